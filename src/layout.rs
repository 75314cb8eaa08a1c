//! The layout engine.
//!
//! [`compute_layout`] turns the entry list plus a snapshot of the monitor
//! catalog into the list of [`WindowPlacement`]s to launch.  It is a pure
//! function: no I/O, no logging, no hidden state.
//!
//! Entries are grouped by monitor.  Groups are emitted in the order their
//! monitor first appears in the entry list, and entries keep their relative
//! order within a group.
//!
//! Both modes split monitor extents with floor division.  The last tile may
//! therefore stop up to `n - 1` pixels short of the monitor's far edge; the
//! remainder is left uncovered rather than handed to any tile.

use crate::model::{GridDims, LayoutMode, Monitor, MonitorRef, UrlEntry, WindowPlacement};

/// Errors reported by [`compute_layout`].
///
/// `EmptyEntryList`, `MissingAssignment` and `UnknownMonitor` abort the
/// whole computation.  `GridCapacityExceeded` is collected in
/// [`Layout::errors`] and only affects the overflowing monitor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("no URLs to launch")]
    EmptyEntryList,
    /// `index` is the 0-based position in the entry list.
    #[error("URL {} has no monitor assigned", .index + 1)]
    MissingAssignment { index: usize },
    #[error("URL {} is assigned to {monitor}, which is not connected", .index + 1)]
    UnknownMonitor { index: usize, monitor: MonitorRef },
    #[error("{monitor}: too many URLs assigned for the selected grid size (max {max})")]
    GridCapacityExceeded { monitor: MonitorRef, max: usize },
}

/// Result of a successful layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Windows to open, grouped by monitor.
    pub placements: Vec<WindowPlacement>,
    /// Non-fatal, per-monitor rejections.
    pub errors: Vec<LayoutError>,
}

impl Layout {
    /// Whether every entry that could be placed was placed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compute window placements for `entries` on `monitors`.
///
/// `grid` is only consulted in [`LayoutMode::Grid`].
pub fn compute_layout(
    entries: &[UrlEntry],
    monitors: &[Monitor],
    mode: LayoutMode,
    grid: GridDims,
) -> Result<Layout, LayoutError> {
    if entries.is_empty() {
        return Err(LayoutError::EmptyEntryList);
    }
    match mode {
        LayoutMode::List => list_layout(entries, monitors),
        LayoutMode::Grid => Ok(grid_layout(entries, monitors, grid)),
    }
}

/// One monitor's share of the entry list.
struct Group<'a> {
    monitor_ref: MonitorRef,
    monitor: &'a Monitor,
    /// Positions in the full entry list.
    indices: Vec<usize>,
}

/// Group entries whose monitor resolves against `monitors`; others are
/// dropped.
fn group_by_monitor<'a>(entries: &[UrlEntry], monitors: &'a [Monitor]) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(monitor_ref) = entry.monitor else {
            continue;
        };
        let Some(monitor) = monitor_ref.resolve(monitors) else {
            continue;
        };
        match groups.iter_mut().find(|g| g.monitor_ref == monitor_ref) {
            Some(group) => group.indices.push(index),
            None => groups.push(Group {
                monitor_ref,
                monitor,
                indices: vec![index],
            }),
        }
    }
    groups
}

fn list_layout(entries: &[UrlEntry], monitors: &[Monitor]) -> Result<Layout, LayoutError> {
    // A missing assignment anywhere wins over an unknown monitor earlier on.
    if let Some(index) = entries.iter().position(|e| e.monitor.is_none()) {
        return Err(LayoutError::MissingAssignment { index });
    }
    for (index, entry) in entries.iter().enumerate() {
        if let Some(monitor) = entry.monitor {
            if monitor.resolve(monitors).is_none() {
                return Err(LayoutError::UnknownMonitor { index, monitor });
            }
        }
    }

    let mut placements = Vec::with_capacity(entries.len());
    for group in group_by_monitor(entries, monitors) {
        let mon = group.monitor;
        let tile_w = mon.width / group.indices.len() as u32;
        for (pos, &i) in group.indices.iter().enumerate() {
            let entry = &entries[i];
            placements.push(WindowPlacement {
                title: format!("Display {}", i + 1),
                url: entry.url.clone(),
                x: mon.x + (pos as u32 * tile_w) as i32,
                y: mon.y,
                width: tile_w,
                height: mon.height,
                fullscreen: entry.fullscreen,
            });
        }
    }

    Ok(Layout {
        placements,
        errors: Vec::new(),
    })
}

fn grid_layout(entries: &[UrlEntry], monitors: &[Monitor], grid: GridDims) -> Layout {
    let rows = grid.rows.get();
    let cols = grid.cols.get();
    let max = grid.capacity();

    let mut layout = Layout::default();
    for group in group_by_monitor(entries, monitors) {
        let mon = group.monitor;
        let cell_w = mon.width / cols;
        let cell_h = mon.height / rows;
        for (cell, &i) in group.indices.iter().enumerate() {
            if cell >= max {
                layout.errors.push(LayoutError::GridCapacityExceeded {
                    monitor: group.monitor_ref,
                    max,
                });
                break;
            }
            let row = cell as u32 / cols;
            let col = cell as u32 % cols;
            let entry = &entries[i];
            layout.placements.push(WindowPlacement {
                title: format!("Grid {}", i + 1),
                url: entry.url.clone(),
                x: mon.x + (col * cell_w) as i32,
                y: mon.y + (row * cell_h) as i32,
                width: cell_w,
                height: cell_h,
                fullscreen: entry.fullscreen,
            });
        }
    }
    layout
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn fhd() -> Monitor {
        Monitor::new(0, 0, 1920, 1080)
    }

    fn two_monitors() -> Vec<Monitor> {
        vec![Monitor::new(0, 0, 1920, 1080), Monitor::new(1920, 0, 2560, 1440)]
    }

    fn on(monitor: usize, url: &str) -> UrlEntry {
        UrlEntry::new(url, MonitorRef::from_number(monitor), false)
    }

    fn unassigned(url: &str) -> UrlEntry {
        UrlEntry::new(url, None, false)
    }

    fn rects(layout: &Layout) -> Vec<(i32, i32, u32, u32)> {
        layout
            .placements
            .iter()
            .map(|p| (p.x, p.y, p.width, p.height))
            .collect()
    }

    fn grid(rows: u32, cols: u32) -> GridDims {
        GridDims::new(rows, cols).unwrap()
    }

    //  List mode

    #[test]
    fn list_two_entries_split_monitor_in_half() {
        let entries = vec![on(1, "https://a"), on(1, "https://b")];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::List, grid(2, 2)).unwrap();
        assert_eq!(rects(&layout), vec![(0, 0, 960, 1080), (960, 0, 960, 1080)]);
        assert!(layout.is_complete());
    }

    #[test]
    fn list_three_entries_divide_exactly() {
        let entries = vec![on(1, "a"), on(1, "b"), on(1, "c")];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::List, grid(2, 2)).unwrap();
        assert_eq!(
            rects(&layout),
            vec![(0, 0, 640, 1080), (640, 0, 640, 1080), (1280, 0, 640, 1080)]
        );
    }

    #[test]
    fn list_remainder_is_left_uncovered() {
        let mons = vec![Monitor::new(0, 0, 1000, 800)];
        let entries = vec![on(1, "a"), on(1, "b"), on(1, "c")];
        let layout = compute_layout(&entries, &mons, LayoutMode::List, grid(1, 1)).unwrap();
        assert_eq!(
            rects(&layout),
            vec![(0, 0, 333, 800), (333, 0, 333, 800), (666, 0, 333, 800)]
        );
        let last = layout.placements.last().unwrap();
        assert_eq!(last.x + last.width as i32, 999);
    }

    #[test]
    fn list_tile_widths_never_exceed_monitor() {
        for width in [1u32, 7, 1000, 1366, 1920, 2560, 3839] {
            for k in 1..=7usize {
                let mons = vec![Monitor::new(0, 0, width, 1080)];
                let entries: Vec<UrlEntry> = (0..k).map(|i| on(1, &format!("u{i}"))).collect();
                let layout =
                    compute_layout(&entries, &mons, LayoutMode::List, grid(1, 1)).unwrap();
                let total: u32 = layout.placements.iter().map(|p| p.width).sum();
                assert_eq!(total, k as u32 * (width / k as u32));
                assert!(total <= width);
            }
        }
    }

    #[test]
    fn list_missing_assignment_aborts_everything() {
        let entries = vec![on(1, "a"), unassigned("b"), on(1, "c")];
        let err = compute_layout(&entries, &[fhd()], LayoutMode::List, grid(2, 2)).unwrap_err();
        assert_eq!(err, LayoutError::MissingAssignment { index: 1 });
        assert_eq!(err.to_string(), "URL 2 has no monitor assigned");
    }

    #[test]
    fn list_reports_first_missing_entry() {
        let entries = vec![unassigned("a"), unassigned("b")];
        let err = compute_layout(&entries, &[fhd()], LayoutMode::List, grid(2, 2)).unwrap_err();
        assert_eq!(err, LayoutError::MissingAssignment { index: 0 });
    }

    #[test]
    fn list_unknown_monitor_aborts() {
        let entries = vec![on(1, "a"), on(3, "b")];
        let err =
            compute_layout(&entries, &two_monitors(), LayoutMode::List, grid(2, 2)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownMonitor {
                index: 1,
                monitor: MonitorRef::from_index(2)
            }
        );
    }

    #[test]
    fn list_missing_assignment_beats_earlier_unknown_monitor() {
        let entries = vec![on(5, "a"), unassigned("b")];
        let one = [Monitor::new(0, 0, 1920, 1080)];
        let err = compute_layout(&entries, &one, LayoutMode::List, grid(2, 2)).unwrap_err();
        assert_eq!(err, LayoutError::MissingAssignment { index: 1 });
    }

    #[test]
    fn list_groups_per_monitor_in_first_appearance_order() {
        let entries = vec![on(2, "a"), on(1, "b"), on(2, "c")];
        let layout =
            compute_layout(&entries, &two_monitors(), LayoutMode::List, grid(2, 2)).unwrap();
        let urls: Vec<&str> = layout.placements.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "c", "b"]);
        assert_eq!(
            rects(&layout),
            vec![
                (1920, 0, 1280, 1440),
                (3200, 0, 1280, 1440),
                (0, 0, 1920, 1080),
            ]
        );
    }

    #[test]
    fn list_titles_use_position_in_full_list() {
        let entries = vec![on(2, "a"), on(1, "b"), on(2, "c")];
        let layout =
            compute_layout(&entries, &two_monitors(), LayoutMode::List, grid(2, 2)).unwrap();
        let titles: Vec<&str> = layout.placements.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Display 1", "Display 3", "Display 2"]);
    }

    #[test]
    fn list_carries_fullscreen_flag() {
        let entries = vec![
            UrlEntry::new("a", MonitorRef::from_number(1), true),
            on(1, "b"),
        ];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::List, grid(2, 2)).unwrap();
        assert!(layout.placements[0].fullscreen);
        assert!(!layout.placements[1].fullscreen);
    }

    #[test]
    fn list_respects_negative_monitor_origin() {
        let mons = vec![Monitor::new(-1280, 200, 1280, 1024)];
        let entries = vec![on(1, "a"), on(1, "b")];
        let layout = compute_layout(&entries, &mons, LayoutMode::List, grid(2, 2)).unwrap();
        assert_eq!(
            rects(&layout),
            vec![(-1280, 200, 640, 1024), (-640, 200, 640, 1024)]
        );
    }

    //  Grid mode

    #[test]
    fn grid_overflow_is_rejected_per_monitor() {
        let entries: Vec<UrlEntry> = (0..5).map(|i| on(1, &format!("u{i}"))).collect();
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::Grid, grid(2, 2)).unwrap();
        assert_eq!(
            rects(&layout),
            vec![
                (0, 0, 960, 540),
                (960, 0, 960, 540),
                (0, 540, 960, 540),
                (960, 540, 960, 540),
            ]
        );
        let urls: Vec<&str> = layout.placements.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["u0", "u1", "u2", "u3"]);
        assert_eq!(
            layout.errors,
            vec![LayoutError::GridCapacityExceeded {
                monitor: MonitorRef::from_index(0),
                max: 4
            }]
        );
    }

    #[test]
    fn grid_overflow_does_not_block_other_monitors() {
        let mut entries: Vec<UrlEntry> = (0..3).map(|i| on(1, &format!("a{i}"))).collect();
        entries.push(on(2, "b0"));
        let layout =
            compute_layout(&entries, &two_monitors(), LayoutMode::Grid, grid(1, 2)).unwrap();
        assert_eq!(layout.placements.len(), 3);
        assert_eq!(layout.errors.len(), 1);
        let b0 = layout.placements.iter().find(|p| p.url == "b0").unwrap();
        assert_eq!((b0.x, b0.y, b0.width, b0.height), (1920, 0, 1280, 1440));
    }

    #[test]
    fn grid_placement_count_is_min_of_group_and_capacity() {
        let g = grid(2, 3);
        for n in 0..12usize {
            let mut entries: Vec<UrlEntry> = (0..n).map(|i| on(1, &format!("u{i}"))).collect();
            entries.push(on(2, "other"));
            let layout = compute_layout(&entries, &two_monitors(), LayoutMode::Grid, g).unwrap();
            let on_first = layout.placements.iter().filter(|p| p.x < 1920).count();
            assert_eq!(on_first, n.min(g.capacity()));
            let overflows = layout.errors.len();
            assert_eq!(overflows, usize::from(n > g.capacity()));
        }
    }

    #[test]
    fn grid_skips_unassigned_without_error() {
        let entries = vec![unassigned("a"), on(1, "b"), unassigned("c")];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::Grid, grid(2, 2)).unwrap();
        assert_eq!(layout.placements.len(), 1);
        assert_eq!(layout.placements[0].url, "b");
        assert_eq!(layout.placements[0].title, "Grid 2");
        assert_eq!(rects(&layout), vec![(0, 0, 960, 540)]);
        assert!(layout.is_complete());
    }

    #[test]
    fn grid_skips_unknown_monitor() {
        let entries = vec![on(5, "a"), on(1, "b")];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::Grid, grid(2, 2)).unwrap();
        assert_eq!(layout.placements.len(), 1);
        assert!(layout.is_complete());
    }

    #[test]
    fn grid_all_unassigned_yields_nothing() {
        let entries = vec![unassigned("a"), unassigned("b")];
        let layout = compute_layout(&entries, &[fhd()], LayoutMode::Grid, grid(2, 2)).unwrap();
        assert!(layout.placements.is_empty());
        assert!(layout.errors.is_empty());
    }

    #[test]
    fn grid_fills_row_major_with_floor_cells() {
        let mons = vec![Monitor::new(100, 50, 1000, 700)];
        let entries: Vec<UrlEntry> = (0..4).map(|i| on(1, &format!("u{i}"))).collect();
        let layout = compute_layout(&entries, &mons, LayoutMode::Grid, grid(3, 3)).unwrap();
        assert_eq!(
            rects(&layout),
            vec![
                (100, 50, 333, 233),
                (433, 50, 333, 233),
                (766, 50, 333, 233),
                (100, 283, 333, 233),
            ]
        );
    }

    //  Common

    #[test]
    fn empty_entries_rejected_in_both_modes() {
        for mode in [LayoutMode::List, LayoutMode::Grid] {
            let err = compute_layout(&[], &[fhd()], mode, grid(2, 2)).unwrap_err();
            assert_eq!(err, LayoutError::EmptyEntryList);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let entries = vec![on(2, "a"), on(1, "b"), on(2, "c"), unassigned("d")];
        for mode in [LayoutMode::List, LayoutMode::Grid] {
            let first = compute_layout(&entries, &two_monitors(), mode, grid(2, 2));
            let second = compute_layout(&entries, &two_monitors(), mode, grid(2, 2));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn capacity_error_message_names_monitor_and_max() {
        let err = LayoutError::GridCapacityExceeded {
            monitor: MonitorRef::from_index(1),
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "Monitor 2: too many URLs assigned for the selected grid size (max 4)"
        );
    }
}

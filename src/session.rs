//! The editing session and the launch orchestration.
//!
//! A [`Session`] holds the user's URL list and launch settings between
//! loads and saves of the [`Config`] document.  [`Session::launch`] ties
//! the pieces together: it snapshots the monitors from a
//! [`MonitorCatalog`], runs the layout engine and passes the placements to
//! a [`Launcher`].

use crate::config::{BrowserConfig, Config, OverlayConfig};
use crate::layout::{compute_layout, Layout, LayoutError};
use crate::model::{GridDims, LayoutMode, Monitor, MonitorRef, UrlEntry};
use crate::traits::{Launcher, MonitorCatalog};
use log::{debug, info, warn};

/// Errors from editing the entry list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// `index` is 0-based.
    #[error("there is no URL {} (the list has {len})", .index + 1)]
    NoSuchEntry { index: usize, len: usize },
}

/// Errors from [`Session::launch`].
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The monitor catalog returned an error.
    #[error("monitor catalog error: {0}")]
    Catalog(String),
    /// The launcher returned an error.
    #[error("launcher error: {0}")]
    Launcher(String),
}

/// What a launch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Number of windows handed to the launcher.
    pub launched: usize,
    /// Per-monitor rejections; the rest of the launch went ahead.
    pub rejected: Vec<LayoutError>,
}

/// URLs assigned to one monitor, for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorPreview {
    pub monitor: MonitorRef,
    pub rect: Monitor,
    pub urls: Vec<String>,
}

/// The user's working state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    entries: Vec<UrlEntry>,
    mode: LayoutMode,
    grid: GridDims,
    default_fullscreen: bool,
    overlay: OverlayConfig,
    browser: BrowserConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl Session {
    /// Start a session from a loaded document.
    pub fn from_config(config: Config) -> Self {
        Self {
            entries: config.entries(),
            mode: config.mode,
            grid: config.grid,
            default_fullscreen: config.fullscreen,
            overlay: config.overlay,
            browser: config.browser,
        }
    }

    /// Snapshot the session as a document ready to be saved.
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            mode: self.mode,
            fullscreen: self.default_fullscreen,
            grid: self.grid,
            overlay: self.overlay.clone(),
            browser: self.browser.clone(),
            ..Config::default()
        };
        config.set_entries(&self.entries);
        config
    }

    //  Accessors

    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn default_fullscreen(&self) -> bool {
        self.default_fullscreen
    }

    pub fn overlay(&self) -> &OverlayConfig {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayConfig {
        &mut self.overlay
    }

    pub fn browser(&self) -> &BrowserConfig {
        &self.browser
    }

    //  Editing

    /// Append `url`, assigned to Monitor 1 with the default fullscreen
    /// flag.  Blank URLs are ignored; returns whether an entry was added.
    pub fn add_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.entries.push(UrlEntry::new(
            url,
            Some(MonitorRef::from_index(0)),
            self.default_fullscreen,
        ));
        true
    }

    /// Remove the last entry, if any.
    pub fn remove_last(&mut self) -> Option<UrlEntry> {
        self.entries.pop()
    }

    /// Remove the entry at 0-based `index`.
    pub fn remove(&mut self, index: usize) -> Result<UrlEntry, SessionError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Set or clear the monitor of the entry at `index`.
    pub fn assign(&mut self, index: usize, monitor: Option<MonitorRef>) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.entries[index].monitor = monitor;
        Ok(())
    }

    /// Flip the fullscreen flag of the entry at `index`; returns the new
    /// value.
    pub fn toggle_fullscreen(&mut self, index: usize) -> Result<bool, SessionError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        entry.fullscreen = !entry.fullscreen;
        Ok(entry.fullscreen)
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.mode = mode;
    }

    pub fn set_grid(&mut self, grid: GridDims) {
        self.grid = grid;
    }

    /// Only affects entries added afterwards.
    pub fn set_default_fullscreen(&mut self, fullscreen: bool) {
        self.default_fullscreen = fullscreen;
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(SessionError::NoSuchEntry {
                index,
                len: self.entries.len(),
            })
        }
    }

    //  Planning and launching

    /// For every monitor in catalog order, the URLs assigned to it.
    pub fn preview(&self, monitors: &[Monitor]) -> Vec<MonitorPreview> {
        monitors
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                let monitor = MonitorRef::from_index(i);
                MonitorPreview {
                    monitor,
                    rect: *rect,
                    urls: self
                        .entries
                        .iter()
                        .filter(|e| e.monitor == Some(monitor))
                        .map(|e| e.url.clone())
                        .collect(),
                }
            })
            .collect()
    }

    /// Run the layout engine against `monitors` with the session settings.
    pub fn plan(&self, monitors: &[Monitor]) -> Result<Layout, LayoutError> {
        compute_layout(&self.entries, monitors, self.mode, self.grid)
    }

    /// Snapshot the monitors, lay out the entries and hand the windows to
    /// `launcher`.
    ///
    /// Fatal layout errors stop before anything is launched.  Grid capacity
    /// rejections are logged and reported, and the remaining windows are
    /// launched anyway.
    pub fn launch<C, L>(&self, catalog: &C, launcher: &L) -> Result<LaunchReport, LaunchError>
    where
        C: MonitorCatalog,
        L: Launcher,
    {
        let monitors = catalog
            .monitors()
            .map_err(|e| LaunchError::Catalog(e.to_string()))?;
        debug!("launching on {} monitor(s): {:?}", monitors.len(), monitors);

        let layout = self.plan(&monitors)?;
        for rejection in &layout.errors {
            warn!("{}", rejection);
        }

        if layout.placements.is_empty() {
            info!("nothing to launch");
        } else {
            launcher
                .spawn_windows(&layout.placements)
                .map_err(|e| LaunchError::Launcher(e.to_string()))?;
            info!(
                "launched {} window(s) in {} mode",
                layout.placements.len(),
                self.mode
            );
        }

        Ok(LaunchReport {
            launched: layout.placements.len(),
            rejected: layout.errors,
        })
    }
}

//  Tests

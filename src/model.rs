//! Types shared by every part of webtiler.
//!
//! [`Monitor`] is a display rectangle as handed out by a
//! [`MonitorCatalog`](crate::traits::MonitorCatalog), [`UrlEntry`] is one
//! line of the user's list, and [`WindowPlacement`] is what the layout
//! engine produces for a launcher to consume.
//!
//! Monitors are referred to by their position in the catalog.  On the wire
//! and in every user-facing string that position is 1-based
//! (`"Monitor 1"`); in memory [`MonitorRef`] stores it 0-based.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Error produced when parsing one of the textual forms in this module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid monitor label {0:?} (expected \"Monitor <n>\" with n >= 1)")]
    MonitorLabel(String),
    #[error("invalid layout mode {0:?} (expected \"list\" or \"grid\")")]
    LayoutMode(String),
}

//  Monitors

/// A display rectangle in virtual-screen coordinates.
///
/// Coordinates are logical pixels: the catalog has already divided out the
/// display scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Monitor {
    /// X position on the virtual desktop.
    pub x: i32,
    /// Y position on the virtual desktop.
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Monitor {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// Reference to a monitor by its position in the catalog.
///
/// Displays as `"Monitor <n>"` with `n` starting at 1.  Parsing accepts the
/// same label (case-insensitive prefix) or a bare positive number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorRef(usize);

impl MonitorRef {
    /// Reference the monitor at 0-based catalog position `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Reference the monitor with 1-based label number `number`.
    ///
    /// Returns `None` for `0`, which has no label.
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).map(Self)
    }

    /// 0-based catalog position.
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based number used in labels.
    pub fn number(self) -> usize {
        self.0 + 1
    }

    /// Resolve against a catalog snapshot.
    pub fn resolve(self, monitors: &[Monitor]) -> Option<&Monitor> {
        monitors.get(self.0)
    }
}

impl fmt::Display for MonitorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Monitor {}", self.number())
    }
}

impl FromStr for MonitorRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("monitor") => trimmed[7..].trim_start(),
            _ => trimmed,
        };
        digits
            .parse::<usize>()
            .ok()
            .and_then(MonitorRef::from_number)
            .ok_or_else(|| ParseError::MonitorLabel(s.to_string()))
    }
}

impl Serialize for MonitorRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonitorRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

//  Entries

/// One URL in the user's list.
///
/// The list is ordered; its order is both the display order and the launch
/// order.  An entry without a monitor cannot be launched in list mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub url: String,
    pub monitor: Option<MonitorRef>,
    pub fullscreen: bool,
}

impl UrlEntry {
    pub fn new(url: impl Into<String>, monitor: Option<MonitorRef>, fullscreen: bool) -> Self {
        Self {
            url: url.into(),
            monitor,
            fullscreen,
        }
    }
}

/// How entries sharing a monitor divide it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Side-by-side vertical strips, one per entry.
    #[default]
    List,
    /// A fixed `rows × cols` grid filled in row-major order.
    Grid,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::List => write!(f, "list"),
            LayoutMode::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(LayoutMode::List),
            "grid" => Ok(LayoutMode::Grid),
            _ => Err(ParseError::LayoutMode(s.to_string())),
        }
    }
}

/// Grid dimensions for [`LayoutMode::Grid`].  Both axes are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: NonZeroU32,
    pub cols: NonZeroU32,
}

impl GridDims {
    /// Returns `None` if either dimension is zero.
    pub fn new(rows: u32, cols: u32) -> Option<Self> {
        Some(Self {
            rows: NonZeroU32::new(rows)?,
            cols: NonZeroU32::new(cols)?,
        })
    }

    /// Number of cells, i.e. the most entries one monitor can hold.
    pub fn capacity(&self) -> usize {
        self.rows.get() as usize * self.cols.get() as usize
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            rows: NonZeroU32::MIN.saturating_add(1),
            cols: NonZeroU32::MIN.saturating_add(1),
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

//  Placements

/// One window to open: where, what, and whether to go fullscreen.
///
/// This is also the element type of the hand-off document, so the field
/// names are part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub title: String,
    pub url: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Fullscreen overrides the rectangle once the window is shown.
    pub fullscreen: bool,
}

//! Monitor identification overlay ("which screen is Monitor 2?").
//!
//! The geometry and the theme / position presets live here so they can be
//! tested without a display.  When the `overlay-gtk` feature is enabled,
//! [`gtk::show_monitor_ids`] renders the overlay with GTK4 layer-shell
//! surfaces; [`show_monitor_ids`] dispatches to it.

#[cfg(feature = "overlay-gtk")]
pub mod gtk;

use crate::config::OverlayConfig;
use crate::model::Monitor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from showing the overlay.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("monitor overlay requires the `overlay-gtk` feature")]
    Unsupported,
    #[error("failed to initialise GTK: {0}")]
    Init(String),
}

/// Error for unrecognised preset names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset {0:?}")]
pub struct UnknownPreset(String);

/// Normalise a preset name: case-insensitive, spaces, `-` and `_` ignored.
fn preset_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

//  Themes

/// Named colour schemes for the overlay label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Dark,
    Light,
    Neon,
    Military,
}

impl ThemePreset {
    /// `(foreground, background)` colours.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            ThemePreset::Dark => ("#ffffff", "#222222"),
            ThemePreset::Light => ("#000000", "#ffffff"),
            ThemePreset::Neon => ("#00ffff", "#000000"),
            ThemePreset::Military => ("#ffffcc", "#003300"),
        }
    }
}

impl FromStr for ThemePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match preset_key(s).as_str() {
            "dark" => Ok(ThemePreset::Dark),
            "light" => Ok(ThemePreset::Light),
            "neon" => Ok(ThemePreset::Neon),
            "military" => Ok(ThemePreset::Military),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

//  Position

/// Reference point of a monitor the overlay offset is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayAnchor {
    #[default]
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    BottomRight,
}

impl OverlayAnchor {
    /// The anchor point of `monitor` in virtual-screen coordinates.
    fn point(self, monitor: &Monitor) -> (i32, i32) {
        let right = monitor.x + monitor.width as i32;
        let bottom = monitor.y + monitor.height as i32;
        match self {
            OverlayAnchor::TopLeft => (monitor.x, monitor.y),
            OverlayAnchor::TopRight => (right, monitor.y),
            OverlayAnchor::Center => (
                monitor.x + (monitor.width / 2) as i32,
                monitor.y + (monitor.height / 2) as i32,
            ),
            OverlayAnchor::BottomLeft => (monitor.x, bottom),
            OverlayAnchor::BottomRight => (right, bottom),
        }
    }
}

/// The five position choices offered to the user.
///
/// Each preset pairs an anchor with an offset sized for the default
/// 200×100 overlay so that it sits 50 px in from the chosen corner (or is
/// centred).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPreset {
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    BottomRight,
}

impl PositionPreset {
    pub fn anchor(self) -> OverlayAnchor {
        match self {
            PositionPreset::TopLeft => OverlayAnchor::TopLeft,
            PositionPreset::TopRight => OverlayAnchor::TopRight,
            PositionPreset::Center => OverlayAnchor::Center,
            PositionPreset::BottomLeft => OverlayAnchor::BottomLeft,
            PositionPreset::BottomRight => OverlayAnchor::BottomRight,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            PositionPreset::TopLeft => (50, 50),
            PositionPreset::TopRight => (-250, 50),
            PositionPreset::Center => (-100, -50),
            PositionPreset::BottomLeft => (50, -150),
            PositionPreset::BottomRight => (-250, -150),
        }
    }

    /// Point `overlay` at this preset.
    pub fn apply(self, overlay: &mut OverlayConfig) {
        overlay.anchor = self.anchor();
        overlay.offset = self.offset();
    }
}

impl fmt::Display for PositionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionPreset::TopLeft => write!(f, "Top Left"),
            PositionPreset::TopRight => write!(f, "Top Right"),
            PositionPreset::Center => write!(f, "Center"),
            PositionPreset::BottomLeft => write!(f, "Bottom Left"),
            PositionPreset::BottomRight => write!(f, "Bottom Right"),
        }
    }
}

impl FromStr for PositionPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match preset_key(s).as_str() {
            "topleft" => Ok(PositionPreset::TopLeft),
            "topright" => Ok(PositionPreset::TopRight),
            "center" | "centre" => Ok(PositionPreset::Center),
            "bottomleft" => Ok(PositionPreset::BottomLeft),
            "bottomright" => Ok(PositionPreset::BottomRight),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Where the overlay box lands, relative to its monitor's top-left corner.
///
/// The box is clamped so that it stays on the monitor whenever it fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Compute the overlay box for `monitor`.
pub fn overlay_box(monitor: &Monitor, overlay: &OverlayConfig) -> OverlayBox {
    let (ax, ay) = overlay.anchor.point(monitor);
    let (w, h) = overlay.size;
    let max_left = (monitor.width as i32 - w as i32).max(0);
    let max_top = (monitor.height as i32 - h as i32).max(0);
    OverlayBox {
        left: (ax + overlay.offset.0 - monitor.x).clamp(0, max_left),
        top: (ay + overlay.offset.1 - monitor.y).clamp(0, max_top),
        width: w,
        height: h,
    }
}

/// Show a "Monitor N" label on every monitor for `overlay.duration` ms.
///
/// Blocks until the overlay is gone.
#[cfg(feature = "overlay-gtk")]
pub fn show_monitor_ids(monitors: &[Monitor], overlay: &OverlayConfig) -> Result<(), OverlayError> {
    gtk::show_monitor_ids(monitors, overlay)
}

/// Without the `overlay-gtk` feature there is nothing to draw with.
#[cfg(not(feature = "overlay-gtk"))]
pub fn show_monitor_ids(_monitors: &[Monitor], _overlay: &OverlayConfig) -> Result<(), OverlayError> {
    Err(OverlayError::Unsupported)
}

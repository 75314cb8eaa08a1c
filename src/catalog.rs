//! Helpers shared by [`MonitorCatalog`] implementations, plus
//! [`StaticCatalog`] for monitor lists given on the command line.

use crate::model::Monitor;
use crate::traits::MonitorCatalog;

/// Bring raw monitor rectangles into catalog order.
///
/// Sorts by `x`, then `y`, and drops exact duplicates (mirrored outputs
/// report the same rectangle twice).
pub fn normalize(mut monitors: Vec<Monitor>) -> Vec<Monitor> {
    monitors.sort_by_key(|m| (m.x, m.y, m.width, m.height));
    monitors.dedup();
    monitors
}

/// Convert a mode size in device pixels to logical pixels.
///
/// `transform` follows the Wayland output transform numbering; odd values
/// are rotated by 90° or 270° and swap the axes.
pub fn logical_size(width: u32, height: u32, scale: f64, transform: u8) -> (u32, u32) {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let w = (width as f64 / scale).round() as u32;
    let h = (height as f64 / scale).round() as u32;
    if transform % 2 == 1 {
        (h, w)
    } else {
        (w, h)
    }
}

/// Error for a malformed `WIDTHxHEIGHT+X+Y` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid monitor geometry {0:?} (expected WIDTHxHEIGHT+X+Y, e.g. 1920x1080+0+0)")]
pub struct GeometryError(String);

/// Parse an X11-style geometry string such as `1920x1080+0+0` or
/// `1280x1024-1280+0`.  The offsets are signed positions, not distances
/// from the far edge.
pub fn parse_geometry(s: &str) -> Result<Monitor, GeometryError> {
    let err = || GeometryError(s.to_string());
    let text = s.trim();
    let (size, offsets) = text
        .find(['+', '-'])
        .map(|i| text.split_at(i))
        .ok_or_else(err)?;
    let (w, h) = size.split_once(['x', 'X']).ok_or_else(err)?;
    let width: u32 = w.parse().map_err(|_| err())?;
    let height: u32 = h.parse().map_err(|_| err())?;
    if width == 0 || height == 0 {
        return Err(err());
    }

    // offsets = "<sign><digits><sign><digits>"
    let second = offsets[1..]
        .find(['+', '-'])
        .map(|i| i + 1)
        .ok_or_else(err)?;
    let (xs, ys) = offsets.split_at(second);
    let x: i32 = xs.parse().map_err(|_| err())?;
    let y: i32 = ys.parse().map_err(|_| err())?;
    Ok(Monitor::new(x, y, width, height))
}

/// A catalog with a fixed monitor list.
///
/// Used when the monitors are given explicitly (`--monitor`) instead of
/// being queried from the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    monitors: Vec<Monitor>,
}

impl StaticCatalog {
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self {
            monitors: normalize(monitors),
        }
    }

    /// Build a catalog from geometry strings.
    pub fn from_geometries<S: AsRef<str>>(specs: &[S]) -> Result<Self, GeometryError> {
        let monitors = specs
            .iter()
            .map(|s| parse_geometry(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(monitors))
    }
}

impl MonitorCatalog for StaticCatalog {
    type Error = std::convert::Infallible;

    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error> {
        Ok(self.monitors.clone())
    }
}

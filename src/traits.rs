//! Capability traits that keep the layout engine free of platform code.
//!
//! A [`MonitorCatalog`] says which displays exist; a [`Launcher`] opens the
//! windows.  [`Session`](crate::session::Session) only depends on these
//! abstractions, so tests drive it with in-memory doubles.

use crate::model::{Monitor, WindowPlacement};

/// Source of the current monitor layout.
///
/// Implementations may query a compositor, parse a static list, or return
/// canned data in tests.
pub trait MonitorCatalog {
    /// The error type produced by this catalog.
    type Error: std::error::Error + Send + 'static;

    /// Return the attached monitors, deduplicated and ordered by ascending
    /// `x`, then ascending `y`, in logical (scale-adjusted) pixels.
    ///
    /// The position of a monitor in this list is what `"Monitor N"` refers
    /// to (`N` = position + 1).
    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error>;
}

/// Something that can put windows on screen.
///
/// # Contract
///
/// * Each placement becomes one independent window loading its URL.
/// * `fullscreen` placements are shown fullscreen; the rectangle is then
///   only a hint.
/// * The call does **not** wait for the windows to close.  It returns once
///   they have been handed off, and nothing flows back afterwards.
pub trait Launcher {
    /// The error type produced by this launcher.
    type Error: std::error::Error + Send + 'static;

    /// Open one window per placement, in order.
    fn spawn_windows(&self, placements: &[WindowPlacement]) -> Result<(), Self::Error>;
}

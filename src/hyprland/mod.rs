//! Hyprland-specific implementations.
//!
//! This module provides the [`MonitorCatalog`](crate::traits::MonitorCatalog)
//! backend for Hyprland, talking to the compositor over its IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod monitors;

//! **webtiler** — tile web pages across multiple monitors.
//!
//! Each URL in the user's list is assigned to a monitor.  At launch time the
//! entries sharing a monitor split it either into side-by-side strips
//! ([`LayoutMode::List`](model::LayoutMode::List)) or into a fixed grid
//! ([`LayoutMode::Grid`](model::LayoutMode::Grid)), and every URL is opened
//! in its own window at the computed rectangle.
//!
//! # Architecture
//!
//! The pure core is [`layout::compute_layout`].  Around it sit two traits:
//!
//! * [`traits::MonitorCatalog`] — where the monitor rectangles come from
//!   (Hyprland IPC in [`hyprland`], a fixed list in [`catalog`]).
//! * [`traits::Launcher`] — how windows get opened ([`handoff`] passes
//!   them to the runner process, [`browser`] spawns browser app windows).
//!
//! [`session::Session`] holds the editable state that is saved as a
//! [`config::Config`] document and drives a launch through those traits.

pub mod browser;
pub mod catalog;
pub mod config;
pub mod handoff;
pub mod hyprland;
pub mod layout;
pub mod model;
pub mod overlay;
pub mod session;
pub mod traits;

//! [`MonitorCatalog`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.

use crate::catalog::{logical_size, normalize};
use crate::model::Monitor;
use crate::traits::MonitorCatalog;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed monitor catalog.
///
/// Every call to [`monitors`](MonitorCatalog::monitors) opens a short-lived
/// IPC request, so each launch sees the monitors as they are right now.
#[derive(Debug, Default)]
pub struct HyprlandMonitors;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl HyprlandMonitors {
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set (is Hyprland running?)".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a JSON data query (`j/<command>`) and return the raw response.
fn ipc_json(data_command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(format!("j/{}", data_command).as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

//  Minimal serde struct for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
///
/// `width`/`height` are the mode size in device pixels; `x`/`y` are
/// already in layout (logical) coordinates.
#[derive(Deserialize)]
struct MonitorJson {
    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    #[serde(default)]
    transform: u8,
    #[serde(default)]
    disabled: bool,
}

fn unit_scale() -> f64 {
    1.0
}

/// Parse a `j/monitors` response into catalog order.
fn monitors_from_json(json: &str) -> Result<Vec<Monitor>, HyprlandError> {
    let raw: Vec<MonitorJson> =
        serde_json::from_str(json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
    let monitors = raw
        .into_iter()
        .filter(|m| !m.disabled)
        .map(|m| {
            let (width, height) = logical_size(m.width, m.height, m.scale, m.transform);
            debug!(
                "{}: {}x{} @ {} (transform {}) -> {}x{}{:+}{:+}",
                m.name, m.width, m.height, m.scale, m.transform, width, height, m.x, m.y
            );
            Monitor::new(m.x, m.y, width, height)
        })
        .collect();
    Ok(normalize(monitors))
}

//  MonitorCatalog implementation

impl MonitorCatalog for HyprlandMonitors {
    type Error = HyprlandError;

    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error> {
        monitors_from_json(&ipc_json("monitors")?)
    }
}

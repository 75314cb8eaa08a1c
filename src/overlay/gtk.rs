//! GTK4 + layer-shell monitor identification overlay.
//!
//! # Widget tree
//!
//! One layer-shell surface per monitor:
//!
//! ```text
//! window                       (layer-shell, transparent, pinned to a monitor)
//! └ .monitor-id                (coloured box, overlay.size)
//!     └ .monitor-id-label      ("Monitor N")
//! ```
//!
//! Colours and font come from [`OverlayConfig`] and are compiled into a
//! stylesheet before any window is created.

use super::{overlay_box, OverlayError};
use crate::config::OverlayConfig;
use crate::model::{Monitor, MonitorRef};
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use gtk4_layer_shell::{Edge, LayerShell};
use log::{debug, info, warn};
use std::time::Duration;

/// Build the stylesheet for the overlay from the configured theme.
fn build_css(overlay: &OverlayConfig) -> String {
    let weight = if overlay.font.weight.eq_ignore_ascii_case("bold") {
        "bold"
    } else {
        "normal"
    };
    format!(
        r#"
window,
window.background {{
    background-color: transparent;
    background: none;
}}

.monitor-id {{
    background-color: {bg};
}}

.monitor-id-label {{
    color: {fg};
    font-family: "{family}";
    font-size: {size}pt;
    font-weight: {weight};
}}
"#,
        bg = overlay.bg,
        fg = overlay.fg,
        family = overlay.font.family,
        size = overlay.font.size,
        weight = weight,
    )
}

fn load_css(overlay: &OverlayConfig) {
    let provider = gtk4::CssProvider::new();
    #[allow(deprecated)]
    provider.load_from_data(&build_css(overlay));

    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        warn!("no GDK display, overlay theme will not be applied");
    }
}

/// Find the GDK monitor whose logical origin matches `monitor`.
fn gdk_monitor_at(monitor: &Monitor) -> Option<gdk::Monitor> {
    let display = gdk::Display::default()?;
    let list = display.monitors();
    (0..list.n_items())
        .filter_map(|i| list.item(i).and_downcast::<gdk::Monitor>())
        .find(|m| {
            let g = m.geometry();
            g.x() == monitor.x && g.y() == monitor.y
        })
}

fn build_window(monitor_ref: MonitorRef, monitor: &Monitor, overlay: &OverlayConfig) -> gtk4::Window {
    let placement = overlay_box(monitor, overlay);

    let window = gtk4::Window::new();
    window.init_layer_shell();
    window.set_layer(gtk4_layer_shell::Layer::Overlay);
    window.set_namespace("webtiler");
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::None);
    window.set_decorated(false);
    window.remove_css_class("background");

    match gdk_monitor_at(monitor) {
        Some(m) => window.set_monitor(Some(&m)),
        None => warn!("no GDK monitor at ({}, {}), using compositor default", monitor.x, monitor.y),
    }
    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Left, true);
    window.set_margin(Edge::Top, placement.top);
    window.set_margin(Edge::Left, placement.left);

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.add_css_class("monitor-id");
    container.set_size_request(placement.width as i32, placement.height as i32);

    let label = gtk4::Label::new(Some(&monitor_ref.to_string()));
    label.add_css_class("monitor-id-label");
    label.set_hexpand(true);
    label.set_vexpand(true);
    label.set_halign(gtk4::Align::Center);
    label.set_valign(gtk4::Align::Center);
    container.append(&label);

    window.set_child(Some(&container));
    debug!(
        "{}: overlay {}x{} at +{}+{} on {}",
        monitor_ref, placement.width, placement.height, placement.left, placement.top, monitor
    );
    window
}

/// Show every monitor's label, run the GLib main loop until
/// `overlay.duration` has elapsed, then tear the windows down.
pub fn show_monitor_ids(monitors: &[Monitor], overlay: &OverlayConfig) -> Result<(), OverlayError> {
    gtk4::init().map_err(|e| OverlayError::Init(e.to_string()))?;
    load_css(overlay);

    let windows: Vec<gtk4::Window> = monitors
        .iter()
        .enumerate()
        .map(|(i, m)| build_window(MonitorRef::from_index(i), m, overlay))
        .collect();
    for window in &windows {
        window.present();
    }
    info!(
        "showing {} monitor label(s) for {}ms",
        windows.len(),
        overlay.duration
    );

    let main_loop = glib::MainLoop::new(None, false);
    {
        let main_loop = main_loop.clone();
        glib::timeout_add_local_once(Duration::from_millis(overlay.duration), move || {
            for window in &windows {
                window.destroy();
            }
            main_loop.quit();
        });
    }
    main_loop.run();
    Ok(())
}

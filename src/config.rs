//! The saved configuration document.
//!
//! The document is a flat JSON object.  URLs, their monitor assignments and
//! their fullscreen flags are stored as three parallel arrays; an empty
//! assignment string means "not assigned".
//!
//! # Example
//!
//! ```json
//! {
//!   "urls": ["https://example.com", "https://grafana.local"],
//!   "assignments": ["Monitor 1", ""],
//!   "fullscreens": [false, true],
//!   "mode": "grid",
//!   "fullscreen": false,
//!   "grid": { "rows": 2, "cols": 2 },
//!   "overlay": {
//!     "duration": 3000,
//!     "size": [200, 100],
//!     "offset": [50, 50],
//!     "font": ["Arial", 18, "bold"],
//!     "bg": "#222222",
//!     "fg": "#ffffff"
//!   }
//! }
//! ```

use crate::model::{GridDims, LayoutMode, MonitorRef, UrlEntry};
use crate::overlay::{OverlayAnchor, ThemePreset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration document.
///
/// Every field is optional: `{}` is a valid document and loads as an empty
/// list in list mode with a 2×2 grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub urls: Vec<String>,

    /// One label per URL, `"Monitor <n>"` or `""`.
    #[serde(with = "assignment_list")]
    pub assignments: Vec<Option<MonitorRef>>,

    pub fullscreens: Vec<bool>,

    pub mode: LayoutMode,

    /// Fullscreen flag given to newly added URLs, and to URLs whose entry
    /// in `fullscreens` is missing.
    pub fullscreen: bool,

    pub grid: GridDims,

    /// Monitor identification overlay.
    pub overlay: OverlayConfig,

    /// Browser used by the runner to open the windows.
    pub browser: BrowserConfig,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Write the document to `path` as indented JSON, creating the parent
    /// directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| ConfigError(format!("failed to create {}: {}", dir.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError(format!("failed to serialise config: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| ConfigError(format!("failed to write {}: {}", path.display(), e)))
    }

    /// Zip the parallel arrays into entries.
    ///
    /// `urls` is authoritative.  Missing assignments read as unassigned and
    /// missing fullscreen flags fall back to [`Config::fullscreen`]; surplus
    /// values are ignored.
    pub fn entries(&self) -> Vec<UrlEntry> {
        self.urls
            .iter()
            .enumerate()
            .map(|(i, url)| UrlEntry {
                url: url.clone(),
                monitor: self.assignments.get(i).copied().flatten(),
                fullscreen: self.fullscreens.get(i).copied().unwrap_or(self.fullscreen),
            })
            .collect()
    }

    /// Replace the parallel arrays with the contents of `entries`.
    pub fn set_entries(&mut self, entries: &[UrlEntry]) {
        self.urls = entries.iter().map(|e| e.url.clone()).collect();
        self.assignments = entries.iter().map(|e| e.monitor).collect();
        self.fullscreens = entries.iter().map(|e| e.fullscreen).collect();
    }
}

/// Error from loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// `"Monitor <n>"` / `""` on the wire, `Option<MonitorRef>` in memory.
///
/// Labels that do not parse (and `null`) load as unassigned.
mod assignment_list {
    use crate::model::MonitorRef;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(list: &[Option<MonitorRef>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            list.iter()
                .map(|m| m.map(|m| m.to_string()).unwrap_or_default()),
        )
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Option<MonitorRef>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<Option<String>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|s| s.and_then(|s| s.parse().ok()))
            .collect())
    }
}

//  Overlay

/// Font as `[family, size, weight]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32, String)", into = "(String, u32, String)")]
pub struct FontSpec {
    pub family: String,
    /// Point size.
    pub size: u32,
    /// `"normal"` or `"bold"`.
    pub weight: String,
}

impl From<(String, u32, String)> for FontSpec {
    fn from((family, size, weight): (String, u32, String)) -> Self {
        Self {
            family,
            size,
            weight,
        }
    }
}

impl From<FontSpec> for (String, u32, String) {
    fn from(f: FontSpec) -> Self {
        (f.family, f.size, f.weight)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".into(),
            size: 18,
            weight: "bold".into(),
        }
    }
}

/// Settings for the "Monitor N" identification overlay.
///
/// Purely cosmetic; the layout engine never reads it.  The overlay box is
/// `size` large and placed at `anchor` point of each monitor plus `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How long the overlay stays up (ms).
    pub duration: u64,
    /// `[width, height]` in pixels.
    pub size: (u32, u32),
    /// `[x, y]` relative to `anchor`.
    pub offset: (i32, i32),
    pub anchor: OverlayAnchor,
    pub font: FontSpec,
    pub bg: String,
    pub fg: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            duration: 3000,
            size: (200, 100),
            offset: (50, 50),
            anchor: OverlayAnchor::TopLeft,
            font: FontSpec::default(),
            bg: "#222222".into(),
            fg: "#ffffff".into(),
        }
    }
}

impl OverlayConfig {
    /// Replace both colours with those of `preset`.
    pub fn apply_theme(&mut self, preset: ThemePreset) {
        let (fg, bg) = preset.colors();
        self.fg = fg.into();
        self.bg = bg.into();
    }
}

//  Browser

/// Browser command the runner spawns per window.
///
/// The runner appends `--app=<url>`, `--window-position=<x>,<y>` and
/// `--window-size=<w>,<h>` (plus `--start-fullscreen`) after `args`, so the
/// command must understand Chromium-style switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            command: "chromium".into(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_config_path() -> std::path::PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "webtiler-config-test-{}-{}",
            std::process::id(),
            id
        ))
    }

    #[test]
    fn deserialize_full_config() {
        let json = r##"{
            "urls": ["https://a", "https://b", "https://c"],
            "assignments": ["Monitor 1", "", "Monitor 2"],
            "fullscreens": [false, true, false],
            "mode": "grid",
            "fullscreen": true,
            "grid": { "rows": 3, "cols": 1 },
            "overlay": {
                "duration": 1500,
                "size": [300, 120],
                "offset": [-250, 50],
                "font": ["Sans", 24, "normal"],
                "bg": "#000000",
                "fg": "#00ffff"
            }
        }"##;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.urls.len(), 3);
        assert_eq!(
            cfg.assignments,
            vec![
                Some(MonitorRef::from_index(0)),
                None,
                Some(MonitorRef::from_index(1))
            ]
        );
        assert_eq!(cfg.fullscreens, vec![false, true, false]);
        assert_eq!(cfg.mode, LayoutMode::Grid);
        assert!(cfg.fullscreen);
        assert_eq!(cfg.grid, GridDims::new(3, 1).unwrap());
        assert_eq!(cfg.overlay.duration, 1500);
        assert_eq!(cfg.overlay.size, (300, 120));
        assert_eq!(cfg.overlay.offset, (-250, 50));
        assert_eq!(cfg.overlay.font.family, "Sans");
        assert_eq!(cfg.overlay.font.size, 24);
        assert_eq!(cfg.overlay.fg, "#00ffff");
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert!(cfg.urls.is_empty());
        assert_eq!(cfg.mode, LayoutMode::List);
        assert!(!cfg.fullscreen);
        assert_eq!(cfg.grid, GridDims::default());
        assert_eq!(cfg.overlay, OverlayConfig::default());
        assert_eq!(cfg.browser.command, "chromium");
    }

    #[test]
    fn deserialize_partial_overlay() {
        let json = r#"{ "overlay": { "duration": 600 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.overlay.duration, 600);
        let od = OverlayConfig::default();
        assert_eq!(cfg.overlay.size, od.size);
        assert_eq!(cfg.overlay.font, od.font);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "urls": [], "future_section": { "key": 42 } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn zero_grid_is_rejected() {
        let json = r#"{ "grid": { "rows": 0, "cols": 2 } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn garbage_assignments_read_as_unassigned() {
        let json = r#"{
            "urls": ["a", "b", "c"],
            "assignments": ["Screen 1", null, "Monitor 0"]
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.assignments, vec![None, None, None]);
    }

    #[test]
    fn entries_pad_missing_arrays() {
        let json = r#"{
            "urls": ["a", "b"],
            "assignments": ["Monitor 2"],
            "fullscreen": true
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        let entries = cfg.entries();
        assert_eq!(
            entries,
            vec![
                UrlEntry::new("a", Some(MonitorRef::from_index(1)), true),
                UrlEntry::new("b", None, true),
            ]
        );
    }

    #[test]
    fn serialise_uses_labels_and_arrays() {
        let mut cfg = Config::default();
        cfg.set_entries(&[
            UrlEntry::new("a", MonitorRef::from_number(1), false),
            UrlEntry::new("b", None, true),
        ]);
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["assignments"], serde_json::json!(["Monitor 1", ""]));
        assert_eq!(value["fullscreens"], serde_json::json!([false, true]));
        assert_eq!(value["mode"], serde_json::json!("list"));
        assert_eq!(value["grid"], serde_json::json!({ "rows": 2, "cols": 2 }));
        assert_eq!(value["overlay"]["size"], serde_json::json!([200, 100]));
        assert_eq!(
            value["overlay"]["font"],
            serde_json::json!(["Arial", 18, "bold"])
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tmp_config_path();
        let path = dir.join("nested").join("config.json");

        let mut cfg = Config {
            mode: LayoutMode::Grid,
            fullscreen: true,
            grid: GridDims::new(1, 3).unwrap(),
            ..Config::default()
        };
        cfg.set_entries(&[
            UrlEntry::new("https://a", MonitorRef::from_number(2), false),
            UrlEntry::new("https://b", None, true),
            UrlEntry::new("https://c", MonitorRef::from_number(1), true),
        ]);
        cfg.overlay.apply_theme(ThemePreset::Neon);

        cfg.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.entries(), cfg.entries());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_fails() {
        let path = tmp_config_path().join("absent.json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn apply_theme_sets_both_colours() {
        let mut overlay = OverlayConfig::default();
        overlay.apply_theme(ThemePreset::Military);
        assert_eq!(overlay.fg, "#ffffcc");
        assert_eq!(overlay.bg, "#003300");
    }
}

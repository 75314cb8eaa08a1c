//! The hand-off document.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "windows": [
//!     { "title": "Display 1", "url": "https://example.com",
//!       "x": 0, "y": 0, "width": 960, "height": 1080, "fullscreen": false }
//!   ]
//! }
//! ```

use super::HandoffError;
use crate::model::WindowPlacement;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Placements travelling from the CLI to the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffDocument {
    pub windows: Vec<WindowPlacement>,
}

impl HandoffDocument {
    pub fn new(windows: Vec<WindowPlacement>) -> Self {
        Self { windows }
    }

    /// Write the document to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), HandoffError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|source| HandoffError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read a document previously written with [`write_to`](Self::write_to).
    pub fn read_from(path: &Path) -> Result<Self, HandoffError> {
        let contents = std::fs::read_to_string(path).map_err(|source| HandoffError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Monotonic counter so several hand-offs from one process never collide.
static HANDOFF_ID: AtomicU32 = AtomicU32::new(0);

/// A fresh path in the system temp directory for a hand-off file.
pub fn temp_path() -> PathBuf {
    let id = HANDOFF_ID.fetch_add(1, Ordering::SeqCst);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!(
        "webtiler-{}-{}-{}.json",
        std::process::id(),
        nanos,
        id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HandoffDocument {
        HandoffDocument::new(vec![
            WindowPlacement {
                title: "Grid 1".into(),
                url: "https://a".into(),
                x: -1280,
                y: 0,
                width: 640,
                height: 512,
                fullscreen: false,
            },
            WindowPlacement {
                title: "Grid 3".into(),
                url: "https://c".into(),
                x: -640,
                y: 0,
                width: 640,
                height: 512,
                fullscreen: true,
            },
        ])
    }

    #[test]
    fn wire_format_matches_runner_expectations() {
        let value = serde_json::to_value(sample()).unwrap();
        let first = &value["windows"][0];
        assert_eq!(first["title"], "Grid 1");
        assert_eq!(first["url"], "https://a");
        assert_eq!(first["x"], -1280);
        assert_eq!(first["y"], 0);
        assert_eq!(first["width"], 640);
        assert_eq!(first["height"], 512);
        assert_eq!(first["fullscreen"], false);
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path();
        let doc = sample();
        doc.write_to(&path).unwrap();
        assert_eq!(HandoffDocument::read_from(&path).unwrap(), doc);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn temp_paths_are_unique() {
        assert_ne!(temp_path(), temp_path());
    }

    #[test]
    fn reading_missing_file_names_path() {
        let path = temp_path();
        let err = HandoffDocument::read_from(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn missing_windows_key_is_rejected() {
        assert!(serde_json::from_str::<HandoffDocument>("{}").is_err());
    }
}

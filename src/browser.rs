//! [`Launcher`] that opens each placement as a browser app window.
//!
//! One browser process is started per placement with Chromium-style
//! switches for the URL, position and size.  Processes are not waited on;
//! each window lives independently of the runner and of the others.

use crate::config::BrowserConfig;
use crate::model::WindowPlacement;
use crate::traits::Launcher;
use log::{debug, error, info};
use std::process::{Command, Stdio};

/// Environment variable carrying the browser command to the runner.
pub const BROWSER_ENV: &str = "WEBTILER_BROWSER";
/// Environment variable carrying extra browser arguments as a JSON array.
pub const BROWSER_ARGS_ENV: &str = "WEBTILER_BROWSER_ARGS";

/// Errors from starting browser windows.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("{failed} of {total} window(s) failed to start")]
    Failed { failed: usize, total: usize },
    #[error("invalid WEBTILER_BROWSER_ARGS: {0}")]
    Args(#[from] serde_json::Error),
}

/// Opens windows by spawning `command args... <placement switches>`.
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    browser: BrowserConfig,
}

impl BrowserLauncher {
    pub fn new(browser: BrowserConfig) -> Self {
        Self { browser }
    }

    /// Build from [`BROWSER_ENV`] / [`BROWSER_ARGS_ENV`], falling back to
    /// [`BrowserConfig::default`] for whatever is unset.
    pub fn from_env() -> Result<Self, BrowserError> {
        let mut browser = BrowserConfig::default();
        if let Ok(command) = std::env::var(BROWSER_ENV) {
            if !command.trim().is_empty() {
                browser.command = command;
            }
        }
        if let Ok(args) = std::env::var(BROWSER_ARGS_ENV) {
            browser.args = serde_json::from_str(&args)?;
        }
        Ok(Self::new(browser))
    }

    pub fn browser(&self) -> &BrowserConfig {
        &self.browser
    }
}

/// Arguments for one window, after the configured extra args.
pub fn window_args(placement: &WindowPlacement) -> Vec<String> {
    let mut args = vec![
        format!("--app={}", placement.url),
        format!("--window-position={},{}", placement.x, placement.y),
        format!("--window-size={},{}", placement.width, placement.height),
    ];
    if placement.fullscreen {
        args.push("--start-fullscreen".into());
    }
    args
}

impl Launcher for BrowserLauncher {
    type Error = BrowserError;

    /// Start every window, even if some fail; report the failures at the
    /// end.
    fn spawn_windows(&self, placements: &[WindowPlacement]) -> Result<(), Self::Error> {
        let mut failed = 0;
        for placement in placements {
            let args = window_args(placement);
            debug!("{}: {} {:?} {:?}", placement.title, self.browser.command, self.browser.args, args);
            let spawned = Command::new(&self.browser.command)
                .args(&self.browser.args)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(child) => info!(
                    "{}: {} at {}x{}{:+}{:+} (pid {})",
                    placement.title,
                    placement.url,
                    placement.width,
                    placement.height,
                    placement.x,
                    placement.y,
                    child.id()
                ),
                Err(e) => {
                    error!("{}: failed to start {}: {}", placement.title, self.browser.command, e);
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            return Err(BrowserError::Failed {
                failed,
                total: placements.len(),
            });
        }
        Ok(())
    }
}

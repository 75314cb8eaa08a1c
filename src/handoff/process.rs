//! [`Launcher`] that hands placements to a separate runner process.

use super::document::{temp_path, HandoffDocument};
use super::HandoffError;
use crate::browser::{BROWSER_ARGS_ENV, BROWSER_ENV};
use crate::config::BrowserConfig;
use crate::model::WindowPlacement;
use crate::traits::Launcher;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// File name of the runner binary.
pub const RUNNER_NAME: &str = "webtiler-runner";

/// Writes a [`HandoffDocument`] to a temp file and starts the runner on it.
///
/// The runner is spawned with null stdio and never waited on, so the
/// caller returns as soon as the process has started.  Browser settings
/// travel in the runner's environment.
#[derive(Debug, Clone)]
pub struct ProcessHandoff {
    runner: PathBuf,
    browser: BrowserConfig,
}

impl ProcessHandoff {
    pub fn new(runner: impl AsRef<Path>, browser: BrowserConfig) -> Self {
        Self {
            runner: runner.as_ref().to_path_buf(),
            browser,
        }
    }

    /// Use the runner installed next to the current executable, falling
    /// back to a `$PATH` lookup.
    pub fn locate(browser: BrowserConfig) -> Self {
        let sibling = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(RUNNER_NAME)))
            .filter(|p| p.is_file());
        match sibling {
            Some(path) => Self::new(path, browser),
            None => Self::new(RUNNER_NAME, browser),
        }
    }

    /// The runner executable that will be started.
    pub fn runner(&self) -> &Path {
        &self.runner
    }

    /// Write the document and start the runner.  Returns the document path.
    pub fn send(&self, placements: &[WindowPlacement]) -> Result<PathBuf, HandoffError> {
        let path = temp_path();
        self.send_via(&path, placements)?;
        Ok(path)
    }

    /// Hand off through the document at `path`.  The file is removed again
    /// if the runner cannot be started, since nothing else would.
    fn send_via(&self, path: &Path, placements: &[WindowPlacement]) -> Result<(), HandoffError> {
        let args = serde_json::to_string(&self.browser.args)?;
        HandoffDocument::new(placements.to_vec()).write_to(path)?;
        debug!("wrote {} placement(s) to {}", placements.len(), path.display());

        let spawned = Command::new(&self.runner)
            .arg(path)
            .env(BROWSER_ENV, &self.browser.command)
            .env(BROWSER_ARGS_ENV, args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn();
        let child = match spawned {
            Ok(child) => child,
            Err(source) => {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("could not remove {}: {}", path.display(), e);
                }
                return Err(HandoffError::Spawn {
                    runner: self.runner.display().to_string(),
                    source,
                });
            }
        };
        info!(
            "handed {} window(s) to {} (pid {})",
            placements.len(),
            self.runner.display(),
            child.id()
        );
        Ok(())
    }
}

impl Launcher for ProcessHandoff {
    type Error = HandoffError;

    fn spawn_windows(&self, placements: &[WindowPlacement]) -> Result<(), Self::Error> {
        self.send(placements).map(|_| ())
    }
}

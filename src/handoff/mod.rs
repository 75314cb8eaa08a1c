//! Hand-off from the `webtiler` CLI to the `webtiler-runner` process.
//!
//! The CLI writes the computed placements to a JSON file and starts the
//! runner with that file's path as its only argument.  The exchange is one
//! way: the CLI does not wait for the runner, and the runner never reports
//! back.

pub mod document;
pub mod process;

/// Errors produced while writing, reading or sending a hand-off.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to start {runner}: {source}")]
    Spawn {
        runner: String,
        #[source]
        source: std::io::Error,
    },
}

//! Entry point for **webtiler-runner**.
//!
//! Reads the hand-off document named by its only argument, deletes it, and
//! opens one browser window per placement.  Started by `webtiler launch`;
//! not meant to be run by hand.

use log::{debug, error, info, warn};
use webtiler::browser::BrowserLauncher;
use webtiler::handoff::document::HandoffDocument;
use webtiler::traits::Launcher;

fn main() {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => std::path::PathBuf::from(path),
        _ => {
            error!("usage: webtiler-runner <handoff.json>");
            std::process::exit(2);
        }
    };

    let doc = match HandoffDocument::read_from(&path) {
        Ok(doc) => doc,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    match std::fs::remove_file(&path) {
        Ok(()) => debug!("removed {}", path.display()),
        Err(e) => warn!("could not remove {}: {}", path.display(), e),
    }

    let launcher = match BrowserLauncher::from_env() {
        Ok(l) => l,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "opening {} window(s) with {}",
        doc.windows.len(),
        launcher.browser().command
    );

    if let Err(e) = launcher.spawn_windows(&doc.windows) {
        error!("{}", e);
        std::process::exit(1);
    }
}

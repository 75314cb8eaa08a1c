//! Entry point for the **webtiler** CLI.
//!
//! Every subcommand loads the configuration document, acts on it, and (for
//! editing commands) saves it back.  `launch` computes the layout and hands
//! it to `webtiler-runner`, then exits without waiting for the windows.

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use webtiler::catalog::{GeometryError, StaticCatalog};
use webtiler::config::{Config, ConfigError};
use webtiler::handoff::process::ProcessHandoff;
use webtiler::hyprland::monitors::{HyprlandError, HyprlandMonitors};
use webtiler::model::{GridDims, LayoutMode, Monitor, MonitorRef, ParseError};
use webtiler::overlay::{self, OverlayError, PositionPreset, ThemePreset};
use webtiler::session::{LaunchError, Session, SessionError};
use webtiler::traits::MonitorCatalog;

#[derive(Parser)]
#[command(name = "webtiler")]
#[command(about = "Tile web pages across multiple monitors")]
struct Cli {
    /// Configuration document (default: $XDG_CONFIG_HOME/webtiler/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use this monitor instead of asking Hyprland (WIDTHxHEIGHT+X+Y, repeatable)
    #[arg(long = "monitor", global = true)]
    monitors: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the monitors in the order "Monitor N" refers to
    Monitors,
    /// Show the URL list with assignments
    List,
    /// Append a URL (assigned to Monitor 1 unless --monitor-number is given)
    Add {
        url: String,
        /// Monitor number to assign instead of 1
        #[arg(long = "monitor-number", short = 'm')]
        monitor: Option<MonitorRef>,
        /// Open fullscreen even if the default is off
        #[arg(long)]
        fullscreen: bool,
    },
    /// Remove a URL by number (the last one if omitted)
    Remove {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: Option<u64>,
    },
    /// Assign a URL to a monitor ("none" clears the assignment)
    Assign {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
        monitor: String,
    },
    /// Toggle fullscreen for a URL
    Fullscreen {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
    /// Set the layout mode (list or grid)
    Mode { mode: LayoutMode },
    /// Set the grid dimensions used in grid mode
    Grid {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        rows: u32,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        cols: u32,
    },
    /// Set the fullscreen flag given to new URLs
    DefaultFullscreen {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Apply an overlay colour theme (Dark, Light, Neon, Military)
    Theme { preset: ThemePreset },
    /// Move the monitor overlay (Top Left, Top Right, Center, Bottom Left, Bottom Right)
    OverlayPosition { preset: PositionPreset },
    /// Resize the monitor overlay
    OverlaySize {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
    },
    /// Show which URLs go to which monitor
    Preview,
    /// Flash "Monitor N" on every monitor
    Identify,
    /// Compute the layout and open the windows
    Launch {
        /// Print the placements instead of opening windows
        #[arg(long)]
        dry_run: bool,
    },
}

/// Anything that can make a command fail.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Hyprland(#[from] HyprlandError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Layout(#[from] webtiler::layout::LayoutError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid grid size {rows}x{cols} (rows and columns must be at least 1)")]
    Grid { rows: u32, cols: u32 },
}

/// Where the monitors come from for this invocation.
enum Catalog {
    Static(StaticCatalog),
    Hyprland(HyprlandMonitors),
}

impl MonitorCatalog for Catalog {
    type Error = HyprlandError;

    fn monitors(&self) -> Result<Vec<Monitor>, HyprlandError> {
        match self {
            Catalog::Static(c) => Ok(c.monitors().unwrap_or_else(|never| match never {})),
            Catalog::Hyprland(c) => c.monitors(),
        }
    }
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/webtiler`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("webtiler")
}

/// Load the document at `path`; a missing file is an empty session.
fn load_session(path: &Path) -> Result<Session, ConfigError> {
    if !path.exists() {
        info!("no config file at {}, starting empty", path.display());
        return Ok(Session::default());
    }
    let config = Config::load(path)?;
    debug!("loaded config from {}", path.display());
    Ok(Session::from_config(config))
}

fn save_session(session: &Session, path: &Path) -> Result<(), ConfigError> {
    session.to_config().save(path)?;
    debug!("saved config to {}", path.display());
    Ok(())
}

/// Convert a 1-based CLI number into a list index.  Numbers too large for
/// `usize` map past the end and fail the session's bounds check.
fn entry_index(number: u64) -> usize {
    usize::try_from(number).map_or(usize::MAX, |n| n.saturating_sub(1))
}

fn grid_dims(rows: u32, cols: u32) -> Result<GridDims, CliError> {
    GridDims::new(rows, cols).ok_or(CliError::Grid { rows, cols })
}

fn parse_assignment(s: &str) -> Result<Option<MonitorRef>, ParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "-" => Ok(None),
        _ => s.parse().map(Some),
    }
}

fn print_entries(session: &Session) {
    if session.entries().is_empty() {
        println!("(no URLs)");
        return;
    }
    for (i, entry) in session.entries().iter().enumerate() {
        let monitor = entry
            .monitor
            .map(|m| m.to_string())
            .unwrap_or_else(|| "(unassigned)".into());
        let fs = if entry.fullscreen { "  [fullscreen]" } else { "" };
        println!("{:>3}. {}  -> {}{}", i + 1, entry.url, monitor, fs);
    }
    println!(
        "mode: {}  grid: {}  default fullscreen: {}",
        session.mode(),
        session.grid(),
        session.default_fullscreen()
    );
}

//  Main

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir().join("config.json"));
    let catalog = if cli.monitors.is_empty() {
        Catalog::Hyprland(HyprlandMonitors::new())
    } else {
        Catalog::Static(StaticCatalog::from_geometries(&cli.monitors)?)
    };
    let mut session = load_session(&path)?;

    match cli.command {
        Commands::Monitors => {
            for (i, m) in catalog.monitors()?.iter().enumerate() {
                println!("{}: {}", MonitorRef::from_index(i), m);
            }
        }
        Commands::List => print_entries(&session),
        Commands::Add {
            url,
            monitor,
            fullscreen,
        } => {
            if session.add_url(&url) {
                let index = session.entries().len() - 1;
                if let Some(m) = monitor {
                    session.assign(index, Some(m))?;
                }
                if fullscreen && !session.entries()[index].fullscreen {
                    session.toggle_fullscreen(index)?;
                }
                save_session(&session, &path)?;
                info!("added URL {}", index + 1);
            } else {
                info!("empty URL ignored");
            }
        }
        Commands::Remove { index } => {
            let removed = match index {
                Some(n) => Some(session.remove(entry_index(n))?),
                None => session.remove_last(),
            };
            if let Some(entry) = removed {
                save_session(&session, &path)?;
                info!("removed {}", entry.url);
            }
        }
        Commands::Assign { index, monitor } => {
            session.assign(entry_index(index), parse_assignment(&monitor)?)?;
            save_session(&session, &path)?;
        }
        Commands::Fullscreen { index } => {
            let on = session.toggle_fullscreen(entry_index(index))?;
            save_session(&session, &path)?;
            info!("URL {} fullscreen: {}", index, on);
        }
        Commands::Mode { mode } => {
            session.set_mode(mode);
            save_session(&session, &path)?;
        }
        Commands::Grid { rows, cols } => {
            session.set_grid(grid_dims(rows, cols)?);
            save_session(&session, &path)?;
        }
        Commands::DefaultFullscreen { enabled } => {
            session.set_default_fullscreen(enabled);
            save_session(&session, &path)?;
        }
        Commands::Theme { preset } => {
            session.overlay_mut().apply_theme(preset);
            save_session(&session, &path)?;
        }
        Commands::OverlayPosition { preset } => {
            preset.apply(session.overlay_mut());
            save_session(&session, &path)?;
        }
        Commands::OverlaySize { width, height } => {
            session.overlay_mut().size = (width, height);
            save_session(&session, &path)?;
        }
        Commands::Preview => {
            for p in session.preview(&catalog.monitors()?) {
                println!("{} ({})", p.monitor, p.rect);
                if p.urls.is_empty() {
                    println!("    (None)");
                }
                for url in &p.urls {
                    println!("    {}", url);
                }
            }
        }
        Commands::Identify => {
            overlay::show_monitor_ids(&catalog.monitors()?, session.overlay())?;
        }
        Commands::Launch { dry_run: true } => {
            let layout = session.plan(&catalog.monitors()?)?;
            for rejection in &layout.errors {
                error!("{}", rejection);
            }
            println!("{}", serde_json::to_string_pretty(&layout.placements)?);
        }
        Commands::Launch { dry_run: false } => {
            let launcher = ProcessHandoff::locate(session.browser().clone());
            let report = session.launch(&catalog, &launcher)?;
            for rejection in &report.rejected {
                error!("{}", rejection);
            }
            info!("{} window(s) handed to {}", report.launched, launcher.runner().display());
        }
    }
    Ok(())
}

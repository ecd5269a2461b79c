// SPDX-License-Identifier: MPL-2.0
//! Command-line host for the loop controller.
//!
//! `run` wires the pieces together: settings from `settings.toml`, a
//! [`SimulatedPlayer`] standing in for the embedded player, a
//! [`YoutubeClient`] (or canned data with `--dry-run`) for related videos, and
//! an in-memory query string. User commands are read line by line from stdin.

mod driver;
mod message;

pub use driver::{Driver, DriverSettings};
pub use message::{Command, Flags, USAGE};

use crate::application::port::{PlayerEvent, RelatedVideoSource, UrlState};
use crate::config::{self, Config};
use crate::controller::{ControllerOptions, LoopController, QueryBounds};
use crate::domain::video::{PlaybackWindow, VideoId};
use crate::error::{Error, Result};
use crate::infrastructure::{MemoryUrl, SimulatedPlayer, SimulatedSource, YoutubeClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

/// Video played when none is given.
pub const DEFAULT_VIDEO_ID: &str = "ttpO7wNqFv8";

/// Length of every simulated video when `--sim-duration` is absent.
pub const DEFAULT_SIM_DURATION_SECS: f64 = 240.0;

/// Loads settings from `--config` or the default location.
///
/// # Errors
///
/// Fails when an explicitly named settings file cannot be read.
pub fn load_config(flags: &Flags) -> Result<Config> {
    match &flags.config_path {
        Some(path) => config::load_from_path(Path::new(path)),
        None => config::load(),
    }
}

/// Controller options from settings, with CLI switches applied on top.
#[must_use]
pub fn controller_options(config: &Config, flags: &Flags) -> ControllerOptions {
    let mut options = ControllerOptions::from(config);
    if flags.shuffle {
        options.shuffle = true;
    }
    if flags.no_repeat {
        options.repeat = false;
    }
    options
}

/// Initial query string built from the CLI flags.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the video argument is neither an
/// id nor a recognised watch URL, and [`Error::Window`] when `--start` and
/// `--end` are both given but do not form a valid window.
pub fn initial_query(flags: &Flags) -> Result<String> {
    let raw = flags.video.as_deref().unwrap_or(DEFAULT_VIDEO_ID);
    let id = VideoId::from_url_or_id(raw)
        .ok_or_else(|| Error::InvalidArgument(format!("Not a video id or URL: {raw}")))?;
    if let (Some(start), Some(end)) = (flags.start, flags.end) {
        PlaybackWindow::new(start, end, 0.0)?;
    }
    Ok(QueryBounds::from_secs(flags.start, flags.end).with_video(&id))
}

/// Related-video source: the YouTube API when a key is configured and
/// `--dry-run` is off, canned data otherwise.
fn related_source(
    config: &Config,
    flags: &Flags,
    sim_duration: f64,
) -> Result<Arc<dyn RelatedVideoSource>> {
    if !flags.dry_run {
        if let Some(key) = config.resolved_api_key() {
            let client = YoutubeClient::new(key, config.max_related_results())?;
            return Ok(Arc::new(client));
        }
        tracing::warn!(
            "No API key configured (set `api_key` or {}); using canned related videos",
            config::API_KEY_ENV_VAR
        );
    }
    Ok(Arc::new(SimulatedSource::canned(sim_duration as u64)))
}

fn spawn_stdin_commands(commands: UnboundedSender<Command>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!("{err}"),
            }
        }
    });
}

fn spawn_ctrl_c(commands: UnboundedSender<Command>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = commands.send(Command::Quit);
        }
    });
}

/// Runs the loop until the user quits.
///
/// # Errors
///
/// Fails on invalid arguments or an unreadable settings file.
pub async fn run(flags: Flags) -> Result<()> {
    let config = load_config(&flags)?;
    let sim_duration = flags.sim_duration.unwrap_or(DEFAULT_SIM_DURATION_SECS);
    let url = MemoryUrl::new(initial_query(&flags)?);
    let source = related_source(&config, &flags, sim_duration)?;

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let (command_tx, mut commands) = mpsc::unbounded_channel();
    spawn_stdin_commands(command_tx.clone());
    spawn_ctrl_c(command_tx);

    let mut controller = LoopController::new(controller_options(&config, &flags));
    controller.load_from_url(&url);
    controller.handle_event(PlayerEvent::Ready(SimulatedPlayer::new(
        event_tx,
        sim_duration,
    )));

    tracing::info!(query = %url.query(), "Starting loop");
    let config_path = flags.config_path.as_ref().map(PathBuf::from);
    let mut driver = Driver::new(controller, source, url, DriverSettings::from(&config))
        .with_config(config, config_path);
    driver.run(&mut events, &mut commands).await;

    tracing::info!(query = %driver.url().query(), "Stopped");
    Ok(())
}

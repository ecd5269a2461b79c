// SPDX-License-Identifier: MPL-2.0
//! Startup flags and interactive commands.

use crate::error::{Error, Result};
use std::str::FromStr;

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Usage: tube_looper [OPTIONS] [VIDEO_ID|URL]

Options:
  --start <SECS>         Loop window start
  --end <SECS>           Loop window end
  --shuffle              Pick related videos at random
  --no-repeat            Advance instead of repeating the window
  --dry-run              Use canned related videos instead of the API
  --sim-duration <SECS>  Length of every simulated video
  --config <PATH>        Settings file to use instead of the default
  -h, --help             Print this help

Commands (one per line on stdin):
  toggle | next | prev | repeat | shuffle | status | clear | save | quit
  start <SECS> | end <SECS> | load <ID|URL> | queue <ID> | play <ID>";

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flags {
    /// Video id or watch URL to start with.
    pub video: Option<String>,
    /// Optional loop window start, in seconds.
    pub start: Option<f64>,
    /// Optional loop window end, in seconds.
    pub end: Option<f64>,
    /// Forces shuffle mode on.
    pub shuffle: bool,
    /// Forces repeat mode off.
    pub no_repeat: bool,
    /// Serves related videos from canned data instead of the network.
    pub dry_run: bool,
    /// Length of every simulated video, in seconds.
    pub sim_duration: Option<f64>,
    /// Optional settings file override.
    pub config_path: Option<String>,
    /// Print usage and exit.
    pub help: bool,
}

impl Flags {
    /// Parses flags from the process arguments.
    ///
    /// # Errors
    ///
    /// Fails on malformed option values or unexpected extra arguments.
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let flags = Flags {
            help: args.contains(["-h", "--help"]),
            start: args.opt_value_from_str("--start")?,
            end: args.opt_value_from_str("--end")?,
            shuffle: args.contains("--shuffle"),
            no_repeat: args.contains("--no-repeat"),
            dry_run: args.contains("--dry-run"),
            sim_duration: args.opt_value_from_str("--sim-duration")?,
            config_path: args.opt_value_from_str("--config")?,
            video: args.opt_free_from_str()?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "Unexpected arguments: {rest:?}"
            )));
        }
        Ok(flags)
    }
}

/// A user command read while the loop runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePlay,
    Next,
    Previous,
    ToggleRepeat,
    ToggleShuffle,
    SetStart(f64),
    SetEnd(f64),
    Load(String),
    Queue(String),
    PlayQueued(String),
    ClearQueue,
    Status,
    /// Writes the current autoplay/repeat/shuffle modes to the settings file.
    SaveSettings,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();

        let required = |what: &str| {
            arg.map(str::to_string)
                .ok_or_else(|| Error::InvalidArgument(format!("`{name}` needs {what}")))
        };
        let seconds = || -> Result<f64> {
            let raw = required("a number of seconds")?;
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| Error::InvalidArgument(format!("Not a number: {raw}")))
        };

        let command = match name.as_str() {
            "toggle" | "p" => Command::TogglePlay,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "repeat" => Command::ToggleRepeat,
            "shuffle" => Command::ToggleShuffle,
            "start" | "s" => Command::SetStart(seconds()?),
            "end" | "e" => Command::SetEnd(seconds()?),
            "load" => Command::Load(required("a video id or URL")?),
            "queue" => Command::Queue(required("a video id")?),
            "play" => Command::PlayQueued(required("a video id")?),
            "clear" => Command::ClearQueue,
            "status" => Command::Status,
            "save" => Command::SaveSettings,
            "quit" | "q" | "exit" => Command::Quit,
            other => {
                return Err(Error::InvalidArgument(format!("Unknown command: {other}")));
            }
        };
        Ok(command)
    }
}

// SPDX-License-Identifier: MPL-2.0
//! `tube_looper` loops a chosen window of a streamed video and, when the
//! window ends, repeats it or moves on to a related video.
//!
//! The crate follows a ports-and-adapters layout:
//! - [`domain`]: value types (durations, windows, player states, video ids)
//! - [`application`]: port traits for the player, search and URL state
//! - [`controller`]: the playback-window control loop
//! - [`infrastructure`]: YouTube, simulated and in-memory adapters
//! - [`app`]: the command-line host

pub mod app;
pub mod application;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_utils;

// SPDX-License-Identifier: MPL-2.0
//! Remote player port definition.
//!
//! This module defines the [`PlayerAdapter`] trait, the capability set the loop
//! controller needs from an embedded remote player, and the [`PlayerEvent`]s
//! the player raises back.
//!
//! # Design Notes
//!
//! - All queries are **synchronous and non-blocking**: they read the last
//!   state the player reported, so the time check never waits
//! - Commands are fire-and-forget; the player confirms them later through a
//!   [`PlayerEvent::StateChange`]
//! - The adapter handle becomes available with [`PlayerEvent::Ready`]

use crate::domain::video::VideoId;
use std::fmt;

// =============================================================================
// PlayerAdapter Trait
// =============================================================================

/// Port for controlling an embedded remote player.
///
/// # Example
///
/// ```ignore
/// use tube_looper::application::port::PlayerAdapter;
///
/// fn restart(player: &mut impl PlayerAdapter, start: f64) {
///     player.seek_to(start, true);
///     player.play_video();
/// }
/// ```
pub trait PlayerAdapter {
    /// Loads `id` without starting it. The player reports
    /// `VideoCued` once it is ready.
    fn cue_video(&mut self, id: &VideoId);

    /// Seeks to `seconds`. `allow_seek_ahead` lets the player request data
    /// it has not buffered yet.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    /// Starts or resumes playback.
    fn play_video(&mut self);

    /// Pauses playback.
    fn pause_video(&mut self);

    /// Current playback position, or `None` while the embed is still loading.
    fn current_time(&self) -> Option<f64>;

    /// Video duration in seconds; `0.0` until the player knows it.
    fn duration(&self) -> f64;
}

// =============================================================================
// PlayerErrorCode
// =============================================================================

/// Error codes raised by the remote player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerErrorCode {
    /// The request contained an invalid parameter value.
    InvalidParameter,
    /// The content cannot be played in an HTML5 player.
    Html5Playback,
    /// The video was removed or marked private.
    NotFound,
    /// The owner does not allow embedded playback (codes 101 and 150).
    EmbedBlocked(i32),
    /// Any code the player API does not document.
    Unknown(i32),
}

impl PlayerErrorCode {
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::InvalidParameter,
            5 => Self::Html5Playback,
            100 => Self::NotFound,
            101 | 150 => Self::EmbedBlocked(code),
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn is_embed_blocked(self) -> bool {
        matches!(self, Self::EmbedBlocked(_))
    }
}

impl fmt::Display for PlayerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "Invalid player parameter"),
            Self::Html5Playback => write!(f, "Video cannot be played in an HTML5 player"),
            Self::NotFound => write!(f, "Video not found or private"),
            Self::EmbedBlocked(code) => write!(f, "Embedded playback blocked (code {code})"),
            Self::Unknown(code) => write!(f, "Unknown player error (code {code})"),
        }
    }
}

// =============================================================================
// PlayerEvent
// =============================================================================

/// Events raised by the remote player.
///
/// `Ready` carries the adapter handle itself so the controller can own it.
pub enum PlayerEvent<P> {
    /// The player finished loading; the handle is usable from now on.
    Ready(P),
    /// The player reported a raw lifecycle state code.
    StateChange(i32),
    /// The player reported an error code.
    Error(i32),
}

impl<P> fmt::Debug for PlayerEvent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("Ready"),
            Self::StateChange(code) => f.debug_tuple("StateChange").field(code).finish(),
            Self::Error(code) => f.debug_tuple("Error").field(code).finish(),
        }
    }
}

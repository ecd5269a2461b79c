// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects and enums that are
//! independent of any player or network concerns.

pub mod duration;
pub mod newtypes;
pub mod playback;
pub mod window;

// Re-export commonly used types
pub use duration::{
    parse_iso8601, parse_iso8601_strict, to_colon_string, to_display_string, DurationParseError,
};
pub use newtypes::{RelatedVideo, VideoId};
pub use playback::PlayerState;
pub use window::{PlaybackWindow, Thumb, WindowError, WindowMark, MIN_DISTANCE_SECS};

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Playback Modes**: Autoplay, repeat and shuffle defaults
//! - **Polling**: Host tick interval bounds
//! - **Search**: Related-video fetch limits

// ==========================================================================
// Playback Mode Defaults
// ==========================================================================

/// Autoplay is armed when a video loads.
pub const DEFAULT_AUTOPLAY: bool = true;

/// The current window loops until the user turns repeat off.
pub const DEFAULT_REPEAT: bool = true;

/// Shuffle among related videos is off.
pub const DEFAULT_SHUFFLE: bool = false;

/// Blocked embeds are reported but not skipped.
pub const DEFAULT_SKIP_BLOCKED_VIDEOS: bool = false;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Default host tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Minimum host tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 250;

/// Maximum host tick interval in milliseconds.
pub const MAX_TICK_INTERVAL_MS: u64 = 5_000;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Default timeout for a related-video fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Minimum fetch timeout in seconds.
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 1;

/// Maximum fetch timeout in seconds.
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 60;

/// Default number of related results requested.
pub const DEFAULT_MAX_RELATED_RESULTS: u32 = 25;

/// Minimum number of related results requested.
pub const MIN_MAX_RELATED_RESULTS: u32 = 1;

/// Maximum number of related results the search API accepts.
pub const MAX_MAX_RELATED_RESULTS: u32 = 50;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "YOUTUBE_API_KEY";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_TICK_INTERVAL_MS > 0);
    assert!(MAX_TICK_INTERVAL_MS >= MIN_TICK_INTERVAL_MS);
    assert!(DEFAULT_TICK_INTERVAL_MS >= MIN_TICK_INTERVAL_MS);
    assert!(DEFAULT_TICK_INTERVAL_MS <= MAX_TICK_INTERVAL_MS);

    assert!(MIN_FETCH_TIMEOUT_SECS > 0);
    assert!(MAX_FETCH_TIMEOUT_SECS >= MIN_FETCH_TIMEOUT_SECS);
    assert!(DEFAULT_FETCH_TIMEOUT_SECS >= MIN_FETCH_TIMEOUT_SECS);
    assert!(DEFAULT_FETCH_TIMEOUT_SECS <= MAX_FETCH_TIMEOUT_SECS);

    assert!(MIN_MAX_RELATED_RESULTS > 0);
    assert!(MAX_MAX_RELATED_RESULTS >= MIN_MAX_RELATED_RESULTS);
    assert!(DEFAULT_MAX_RELATED_RESULTS >= MIN_MAX_RELATED_RESULTS);
    assert!(DEFAULT_MAX_RELATED_RESULTS <= MAX_MAX_RELATED_RESULTS);
};

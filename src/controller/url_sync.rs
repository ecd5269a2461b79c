// SPDX-License-Identifier: MPL-2.0
//! Query-string mirroring of the loop window.
//!
//! The shareable link carries three parameters:
//! - `v`: the video id
//! - `s`: window start, in seconds
//! - `e`: window end, in seconds
//!
//! Bounds are read once when a video loads and written back on every window
//! change.

use crate::domain::video::{PlaybackWindow, VideoId};
use url::form_urlencoded;

/// Query parameter carrying the video id.
pub const VIDEO_PARAM: &str = "v";
/// Query parameter carrying the window start.
pub const START_PARAM: &str = "s";
/// Query parameter carrying the window end.
pub const END_PARAM: &str = "e";

/// Raw `s`/`e` values read from a query string.
///
/// Values are kept as strings so that non-numeric input can fall back to a
/// default at the point where the window is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBounds {
    start: Option<String>,
    end: Option<String>,
}

impl QueryBounds {
    /// Reads `s` and `e` from a query string (with or without leading `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut bounds = Self::default();
        for (key, value) in pairs(query) {
            match key.as_ref() {
                START_PARAM => bounds.start = Some(value.into_owned()),
                END_PARAM => bounds.end = Some(value.into_owned()),
                _ => {}
            }
        }
        bounds
    }

    /// Builds bounds from already-known numbers.
    #[must_use]
    pub fn from_secs(start: Option<f64>, end: Option<f64>) -> Self {
        Self {
            start: start.map(format_secs),
            end: end.map(format_secs),
        }
    }

    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    #[must_use]
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Query string naming `id` and carrying these bounds.
    #[must_use]
    pub fn with_video(&self, id: &VideoId) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair(VIDEO_PARAM, id.as_str());
        if let Some(start) = self.start() {
            query.append_pair(START_PARAM, start);
        }
        if let Some(end) = self.end() {
            query.append_pair(END_PARAM, end);
        }
        query.finish()
    }

    /// Window seeded from these bounds: `(s ?? 0, e ?? duration)`.
    ///
    /// Returns `None` when the result is not a valid window, e.g. when the
    /// duration is still unknown and no end was given.
    #[must_use]
    pub fn window(&self, video_duration: f64) -> Option<PlaybackWindow> {
        PlaybackWindow::from_query(
            self.start(),
            self.end(),
            0.0,
            video_duration,
            video_duration,
        )
        .ok()
    }
}

/// Extracts the `v` parameter from a query string.
#[must_use]
pub fn video_id_from_query(query: &str) -> Option<VideoId> {
    pairs(query)
        .find(|(key, _)| key == VIDEO_PARAM)
        .and_then(|(_, value)| VideoId::new(value.as_ref()))
}

/// Builds the shareable query string for the current video and window.
///
/// Parameters without a value are omitted.
#[must_use]
pub fn build_query(id: Option<&VideoId>, window: Option<&PlaybackWindow>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(id) = id {
        query.append_pair(VIDEO_PARAM, id.as_str());
    }
    if let Some(window) = window {
        query.append_pair(START_PARAM, &format_secs(window.start()));
        query.append_pair(END_PARAM, &format_secs(window.end()));
    }
    query.finish()
}

fn pairs(query: &str) -> form_urlencoded::Parse<'_> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
}

/// Seconds rounded to milliseconds, without a trailing `.0`.
fn format_secs(secs: f64) -> String {
    let rounded = (secs * 1_000.0).round() / 1_000.0;
    format!("{rounded}")
}

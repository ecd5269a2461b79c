// SPDX-License-Identifier: MPL-2.0
//! Related-video search port definition.
//!
//! This module defines the [`RelatedVideoSource`] trait. Given the id of the
//! video being looped, a source returns that video's duration and an ordered
//! list of candidates to play after it.
//!
//! # Design Notes
//!
//! - Fetching is `async` and returns a boxed future so the trait stays
//!   object-safe
//! - Candidates are returned raw; dropping incomplete items is the caller's
//!   job (see [`SearchItem::into_related`])
//! - No retry policy lives here

use crate::domain::video::{RelatedVideo, VideoId};
use futures_util::future::BoxFuture;
use std::fmt;

// =============================================================================
// SearchError
// =============================================================================

/// Errors that can occur while fetching related videos.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The response body could not be decoded.
    Decode(String),
    /// The source video does not exist.
    NotFound,
    /// The fetch did not complete in time.
    Timeout,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Network(msg) => write!(f, "Network error: {msg}"),
            SearchError::Status(code) => write!(f, "Search service returned HTTP {code}"),
            SearchError::Decode(msg) => write!(f, "Invalid search response: {msg}"),
            SearchError::NotFound => write!(f, "Video not found"),
            SearchError::Timeout => write!(f, "Search timed out"),
        }
    }
}

impl std::error::Error for SearchError {}

// =============================================================================
// SearchItem
// =============================================================================

/// Descriptive payload of a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

/// One raw candidate returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
}

impl SearchItem {
    /// Converts the item into a [`RelatedVideo`].
    ///
    /// Returns `None` when the item has no usable id, no snippet, or a
    /// snippet missing its title or description.
    #[must_use]
    pub fn into_related(self) -> Option<RelatedVideo> {
        let id = VideoId::new(self.id?)?;
        let snippet = self.snippet?;
        let title = snippet.title.filter(|t| !t.trim().is_empty())?;
        let description = snippet.description?;
        Some(RelatedVideo::new(id, title, description, snippet.thumbnail))
    }
}

/// Everything a fetch returns for one source video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSession {
    /// Duration of the source video in seconds (`0` when unknown).
    pub duration_secs: u64,
    /// Ordered candidates, unfiltered.
    pub candidates: Vec<SearchItem>,
}

// =============================================================================
// RelatedVideoSource Trait
// =============================================================================

/// Port for fetching the metadata and related videos of a source video.
pub trait RelatedVideoSource: Send + Sync {
    /// Fetches the duration and related candidates for `id`.
    fn fetch<'a>(&'a self, id: &'a VideoId) -> BoxFuture<'a, Result<VideoSession, SearchError>>;
}

// SPDX-License-Identifier: MPL-2.0
//! Video identity newtypes.
//!
//! This module provides type-safe wrappers for the values that identify a
//! video and the candidates that may play after it.

use std::fmt;
use url::Url;

// =============================================================================
// VideoId
// =============================================================================

/// Opaque identifier of a streamed video, guaranteed non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Creates a video id, rejecting empty or whitespace-only input.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Accepts either a bare id or a watch URL (`watch?v=`, `youtu.be/`,
    /// `/embed/`, `/shorts/`) and returns the id it names.
    ///
    /// URLs may omit the scheme (`youtu.be/abc`).
    #[must_use]
    pub fn from_url_or_id(input: &str) -> Option<Self> {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) => Self::from_url(&url),
            Err(_) if input.contains(['/', '?']) => Url::parse(&format!("https://{input}"))
                .ok()
                .and_then(|url| Self::from_url(&url)),
            Err(_) => Self::new(input),
        }
    }

    fn from_url(url: &Url) -> Option<Self> {
        let from_query = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| Self::new(value.as_ref()));
        if from_query.is_some() {
            return from_query;
        }

        let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let segment = if url.host_str() == Some("youtu.be") {
            first
        } else if matches!(first, "embed" | "shorts") {
            segments.next()?
        } else {
            return None;
        };
        let decoded = urlencoding::decode(segment).ok()?;
        Self::new(decoded.as_ref())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// RelatedVideo
// =============================================================================

/// A candidate for what plays next. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedVideo {
    id: VideoId,
    title: String,
    description: String,
    thumbnail: Option<String>,
}

impl RelatedVideo {
    #[must_use]
    pub fn new(
        id: VideoId,
        title: impl Into<String>,
        description: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            thumbnail,
        }
    }

    #[must_use]
    pub fn id(&self) -> &VideoId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Title shortened to `max_chars` characters with a trailing ellipsis,
    /// as shown in queue rows.
    #[must_use]
    pub fn short_title(&self, max_chars: usize) -> String {
        if self.title.chars().count() > max_chars {
            let head: String = self.title.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.title.clone()
        }
    }
}

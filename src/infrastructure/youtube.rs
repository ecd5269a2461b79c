// SPDX-License-Identifier: MPL-2.0
//! YouTube Data API adapter.
//!
//! Implements [`RelatedVideoSource`] on top of two v3 endpoints:
//! - `/videos?part=snippet,contentDetails` for the source video's duration
//! - `/search?relatedToVideoId=` for the candidates
//!
//! Responses are decoded into private wire types and mapped onto the port's
//! [`SearchItem`]s; filtering incomplete items is left to the controller.

use crate::application::port::{
    RelatedVideoSource, SearchError, SearchItem, Snippet, VideoSession,
};
use crate::domain::video::{parse_iso8601, VideoId};
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Base URL of the YouTube Data API v3.
pub const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const USER_AGENT: &str = concat!("TubeLooper/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<SearchResultId>,
    snippet: Option<WireSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSnippet {
    title: Option<String>,
    description: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl From<SearchResult> for SearchItem {
    fn from(result: SearchResult) -> Self {
        SearchItem {
            id: result.id.and_then(|id| id.video_id),
            snippet: result.snippet.map(|snippet| Snippet {
                title: snippet.title,
                description: snippet.description,
                thumbnail: snippet
                    .thumbnails
                    .and_then(|thumbs| thumbs.medium.or(thumbs.default))
                    .map(|thumb| thumb.url),
            }),
        }
    }
}

// =============================================================================
// YoutubeClient
// =============================================================================

/// HTTP client for the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: u32,
}

impl YoutubeClient {
    /// Creates a client for the public API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Network`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, max_results: u32) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            api_key: api_key.into(),
            max_results,
        })
    }

    /// Points the client at another API root, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "YouTube API request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }

    /// Duration of `id` in seconds; `0` if the API reports none.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] when the API knows no such video.
    pub async fn video_duration(&self, id: &VideoId) -> Result<u64, SearchError> {
        let response: ListResponse<VideoResource> = self
            .get_json(
                "/videos",
                &[("part", "snippet,contentDetails"), ("id", id.as_str())],
            )
            .await?;

        let video = response
            .items
            .into_iter()
            .next()
            .ok_or(SearchError::NotFound)?;

        Ok(video
            .content_details
            .and_then(|details| details.duration)
            .map_or(0, |raw| parse_iso8601(&raw)))
    }

    /// Videos related to `id`, in API order.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decoding failures.
    pub async fn related_videos(&self, id: &VideoId) -> Result<Vec<SearchItem>, SearchError> {
        let max_results = self.max_results.to_string();
        let response: ListResponse<SearchResult> = self
            .get_json(
                "/search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("relatedToVideoId", id.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(response.items.into_iter().map(SearchItem::from).collect())
    }
}

impl RelatedVideoSource for YoutubeClient {
    fn fetch<'a>(&'a self, id: &'a VideoId) -> BoxFuture<'a, Result<VideoSession, SearchError>> {
        Box::pin(async move {
            let duration_secs = self.video_duration(id).await?;
            let candidates = self.related_videos(id).await?;
            Ok(VideoSession {
                duration_secs,
                candidates,
            })
        })
    }
}

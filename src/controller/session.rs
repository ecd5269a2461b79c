// SPDX-License-Identifier: MPL-2.0
//! Related-video session tracking.
//!
//! Every change of the active video id opens a new session and hands out a
//! [`FetchTicket`]. The host runs the fetch and returns the result together
//! with the ticket; results carrying any ticket but the latest are dropped,
//! so a slow fetch for an old video can never overwrite a newer one.

use super::url_sync::QueryBounds;
use super::{HostRequest, LoopController};
use crate::application::port::{PlayerAdapter, SearchError, SearchItem, VideoSession};
use crate::domain::video::{RelatedVideo, VideoId};

/// Handle identifying one related-video fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    id: VideoId,
}

impl FetchTicket {
    #[must_use]
    pub fn id(&self) -> &VideoId {
        &self.id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub(crate) struct RelatedSession {
    active: Option<VideoId>,
    generation: u64,
    pending: Option<(u64, QueryBounds)>,
}

impl RelatedSession {
    pub(crate) fn active(&self) -> Option<&VideoId> {
        self.active.as_ref()
    }

    /// Opens a session for `id`, superseding any in-flight fetch.
    ///
    /// Returns `None` when `id` is already the active video.
    pub(crate) fn begin(&mut self, id: VideoId, query: QueryBounds) -> Option<FetchTicket> {
        if self.active.as_ref() == Some(&id) {
            return None;
        }
        self.generation += 1;
        self.active = Some(id.clone());
        self.pending = Some((self.generation, query));
        Some(FetchTicket {
            generation: self.generation,
            id,
        })
    }

    pub(crate) fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
            && self.active.as_ref() == Some(&ticket.id)
            && matches!(self.pending, Some((generation, _)) if generation == ticket.generation)
    }

    /// Closes the pending fetch for `ticket`, returning the query bounds it
    /// was opened with. Stale or already-finished tickets yield `None`.
    pub(crate) fn finish(&mut self, ticket: &FetchTicket) -> Option<QueryBounds> {
        if !self.is_current(ticket) {
            return None;
        }
        self.pending.take().map(|(_, query)| query)
    }

    /// Query bounds of the fetch still in flight, if any.
    pub(crate) fn pending_query(&self) -> Option<&QueryBounds> {
        self.pending.as_ref().map(|(_, query)| query)
    }
}

/// Keeps only the candidates that carry a full snippet.
#[must_use]
pub fn filter_candidates(candidates: Vec<SearchItem>) -> Vec<RelatedVideo> {
    candidates
        .into_iter()
        .filter_map(SearchItem::into_related)
        .collect()
}

impl<P: PlayerAdapter> LoopController<P> {
    /// Applies the result of a related-video fetch.
    ///
    /// On success the related list is replaced and the window is reset to
    /// `(s ?? 0, e ?? duration)`. On failure the related list stays empty
    /// and the window is seeded from the query bounds and whatever duration
    /// the player reports.
    ///
    /// Returns `false` (and changes nothing) when `ticket` is not the latest
    /// one issued.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<VideoSession, SearchError>,
    ) -> bool {
        let Some(query) = self.session.finish(ticket) else {
            tracing::debug!(
                video = %ticket.id(),
                generation = ticket.generation(),
                "Discarding stale related-video result"
            );
            return false;
        };

        match result {
            Ok(session) => {
                let duration = session.duration_secs as f64;
                self.related = filter_candidates(session.candidates);
                self.window = query.window(duration);
                tracing::info!(
                    video = %ticket.id(),
                    related = self.related.len(),
                    duration_secs = session.duration_secs,
                    "Related videos refreshed"
                );
            }
            Err(err) => {
                self.related.clear();
                self.window = self.provisional_window(&query);
                tracing::warn!(video = %ticket.id(), "Related-video fetch failed: {err}");
            }
        }

        self.sync_url();
        true
    }

    /// Returns `true` while a fetch for the active video is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.session.pending_query().is_some()
    }

    pub(crate) fn request_fetch(&mut self, ticket: FetchTicket) {
        self.requests.push(HostRequest::FetchRelated(ticket));
    }
}

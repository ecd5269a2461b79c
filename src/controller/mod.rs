// SPDX-License-Identifier: MPL-2.0
//! Loop controller.
//!
//! [`LoopController`] owns everything the playback loop needs: the player
//! handle, the reported lifecycle state, the loop window, the related-video
//! list, the user queue and the repeat/shuffle modes. It never performs I/O
//! itself. Whatever the host has to do (run a fetch, rewrite the URL, show a
//! notice) is queued as a [`HostRequest`] and drained with
//! [`LoopController::take_requests`].
//!
//! The controller is split across submodules by concern:
//! - [`lifecycle`]: player events and the play/pause toggle
//! - [`scheduler`]: the periodic time check
//! - [`selector`]: picking the next video
//! - [`session`]: related-video fetch tickets
//! - [`url_sync`]: `v`/`s`/`e` query parameters

pub mod lifecycle;
pub mod queue;
pub mod scheduler;
pub mod selector;
pub mod session;
pub mod url_sync;

#[cfg(test)]
pub(crate) mod mock;

pub use lifecycle::ToggleAction;
pub use queue::Queue;
pub use scheduler::{SkipReason, TickDecision, TickOutcome, TIME_CHECK_INTERVAL_SECS};
pub use selector::{AdvanceOutcome, NextSelector};
pub use session::FetchTicket;
pub use url_sync::QueryBounds;

use crate::application::port::{PlayerAdapter, PlayerErrorCode, UrlState};
use crate::config::{self, Config};
use crate::domain::video::{PlaybackWindow, PlayerState, RelatedVideo, Thumb, VideoId};
use session::RelatedSession;
use std::fmt;

/// Something the controller needs the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    /// Fetch related videos and metadata, then hand the result back through
    /// [`LoopController::complete_fetch`].
    FetchRelated(FetchTicket),
    /// Scroll the page back to the player.
    ScrollToTop,
    /// Replace the current query string without adding a history entry.
    ReplaceQuery(String),
    /// Show a message to the user.
    Notice(PlaybackNotice),
}

/// User-visible playback problems.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackNotice {
    /// The video owner does not allow embedded playback.
    EmbedBlocked {
        video: Option<VideoId>,
        code: PlayerErrorCode,
    },
    /// Any other error raised by the player.
    PlayerError {
        video: Option<VideoId>,
        code: PlayerErrorCode,
    },
}

impl fmt::Display for PlaybackNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (video, code) = match self {
            PlaybackNotice::EmbedBlocked { video, code }
            | PlaybackNotice::PlayerError { video, code } => (video, code),
        };
        match video {
            Some(video) => write!(f, "{code} ({video})"),
            None => write!(f, "{code}"),
        }
    }
}

/// Behaviour switches the controller starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub autoplay: bool,
    pub repeat: bool,
    pub shuffle: bool,
    pub skip_blocked_videos: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            autoplay: config::DEFAULT_AUTOPLAY,
            repeat: config::DEFAULT_REPEAT,
            shuffle: config::DEFAULT_SHUFFLE,
            skip_blocked_videos: config::DEFAULT_SKIP_BLOCKED_VIDEOS,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            autoplay: config.autoplay(),
            repeat: config.repeat(),
            shuffle: config.shuffle(),
            skip_blocked_videos: config.skip_blocked_videos(),
        }
    }
}

/// Number of previously played videos kept for `skip_previous`.
pub const HISTORY_LIMIT: usize = 50;

/// Playback-window control loop over a player adapter `P`.
#[derive(Debug)]
pub struct LoopController<P> {
    player: Option<P>,
    state: PlayerState,
    autoplay: bool,
    skip_blocked_videos: bool,
    window: Option<PlaybackWindow>,
    selector: NextSelector,
    related: Vec<RelatedVideo>,
    queue: Queue,
    session: RelatedSession,
    history: Vec<VideoId>,
    requests: Vec<HostRequest>,
}

impl<P: PlayerAdapter> LoopController<P> {
    #[must_use]
    pub fn new(options: ControllerOptions) -> Self {
        Self::with_selector(options, NextSelector::new(options.repeat, options.shuffle))
    }

    /// Creates a controller whose shuffle picks are reproducible.
    #[must_use]
    pub fn with_seed(options: ControllerOptions, seed: u64) -> Self {
        Self::with_selector(
            options,
            NextSelector::with_seed(options.repeat, options.shuffle, seed),
        )
    }

    fn with_selector(options: ControllerOptions, selector: NextSelector) -> Self {
        Self {
            player: None,
            state: PlayerState::default(),
            autoplay: options.autoplay,
            skip_blocked_videos: options.skip_blocked_videos,
            window: None,
            selector,
            related: Vec::new(),
            queue: Queue::new(),
            session: RelatedSession::default(),
            history: Vec::new(),
            requests: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.player.as_mut()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.player.is_some()
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    #[must_use]
    pub fn window(&self) -> Option<&PlaybackWindow> {
        self.window.as_ref()
    }

    #[must_use]
    pub fn active_video(&self) -> Option<&VideoId> {
        self.session.active()
    }

    #[must_use]
    pub fn related(&self) -> &[RelatedVideo] {
        &self.related
    }

    #[must_use]
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Previously played ids, oldest first.
    #[must_use]
    pub fn history(&self) -> &[VideoId] {
        &self.history
    }

    /// Drains the requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    // =========================================================================
    // Video changes
    // =========================================================================

    /// Makes `id` the active video.
    ///
    /// `query` carries the `s`/`e` bounds to apply once the video metadata is
    /// known. The related list is cleared, the player (if attached) cues the
    /// new video, and a [`HostRequest::FetchRelated`] is queued.
    ///
    /// Returns `None` when `id` is already active.
    pub fn load_video(&mut self, id: VideoId, query: QueryBounds) -> Option<FetchTicket> {
        self.switch_video(id, query, true)
    }

    /// Loads the video named by the `v` parameter of `url`, using its `s`/`e`
    /// parameters as the initial window.
    pub fn load_from_url(&mut self, url: &impl UrlState) -> Option<FetchTicket> {
        let query = url.query();
        let id = url_sync::video_id_from_query(&query)?;
        self.load_video(id, QueryBounds::parse(&query))
    }

    fn switch_video(
        &mut self,
        id: VideoId,
        query: QueryBounds,
        remember: bool,
    ) -> Option<FetchTicket> {
        let previous = self.session.active().cloned();
        let Some(ticket) = self.session.begin(id.clone(), query.clone()) else {
            tracing::debug!(video = %id, "Video already active");
            return None;
        };

        if remember {
            if let Some(previous) = previous {
                if self.history.len() == HISTORY_LIMIT {
                    self.history.remove(0);
                }
                self.history.push(previous);
            }
        }

        tracing::info!(video = %id, "Loading video");
        self.related.clear();
        if let Some(player) = self.player.as_mut() {
            player.cue_video(&id);
        }
        self.window = self.provisional_window(&query);
        self.sync_url();
        self.request_fetch(ticket.clone());
        Some(ticket)
    }

    /// Window used until the related-video fetch reports the duration.
    ///
    /// Query bounds that cannot form a window on their own (`s` without
    /// `e`) are checked against the attached player's duration instead.
    pub(crate) fn provisional_window(&self, query: &QueryBounds) -> Option<PlaybackWindow> {
        if let Some(window) = query.window(0.0) {
            return Some(window);
        }
        if query.is_empty() {
            return None;
        }
        let duration = self.player.as_ref().map_or(0.0, |player| player.duration());
        query.window(duration)
    }

    // =========================================================================
    // Window
    // =========================================================================

    /// Moves one slider thumb and mirrors the result into the URL.
    ///
    /// Without a window yet, the whole video (as reported by the player) is
    /// taken as the starting point. Returns the resulting window, or `None`
    /// when no window can be built yet.
    pub fn move_thumb(&mut self, thumb: Thumb, proposed: f64) -> Option<PlaybackWindow> {
        let base = match self.window {
            Some(window) => window,
            None => {
                let duration = self.player.as_ref().map_or(0.0, |player| player.duration());
                PlaybackWindow::full(duration).ok()?
            }
        };

        let moved = base.move_thumb(thumb, proposed);
        let applied = match thumb {
            Thumb::Start => moved.start(),
            Thumb::End => moved.end(),
        };
        if (applied - proposed).abs() > f64::EPSILON {
            tracing::debug!(?thumb, proposed, applied, "Window thumb clamped");
        }

        self.window = Some(moved);
        self.sync_url();
        Some(moved)
    }

    /// Replaces the window outright and mirrors it into the URL.
    pub fn set_window(&mut self, window: PlaybackWindow) {
        self.window = Some(window);
        self.sync_url();
    }

    pub(crate) fn sync_url(&mut self) {
        let query = url_sync::build_query(self.session.active(), self.window.as_ref());
        self.requests.push(HostRequest::ReplaceQuery(query));
    }

    // =========================================================================
    // Queue
    // =========================================================================

    /// Puts `entry` at the front of the queue.
    pub fn queue_add(&mut self, entry: RelatedVideo) {
        tracing::debug!(video = %entry.id(), "Queued video");
        self.queue.push_front(entry);
    }

    /// Queues the related entry with `id`. Returns `false` if no related entry
    /// has that id.
    pub fn queue_add_related(&mut self, id: &VideoId) -> bool {
        match self.related.iter().find(|entry| entry.id() == id) {
            Some(entry) => {
                let entry = entry.clone();
                self.queue_add(entry);
                true
            }
            None => false,
        }
    }

    pub fn queue_remove(&mut self, id: &VideoId) -> Option<RelatedVideo> {
        self.queue.remove(id)
    }

    pub fn queue_clear(&mut self) {
        self.queue.clear();
    }

    /// Plays a queued entry right away and removes it from the queue.
    ///
    /// Returns `None` and leaves the queue untouched when `id` is not queued
    /// or is already the active video.
    pub fn play_queued(&mut self, id: &VideoId) -> Option<FetchTicket> {
        if !self.queue.contains(id) {
            return None;
        }
        let ticket = self.load_video(id.clone(), QueryBounds::default())?;
        self.queue.remove(id);
        self.requests.push(HostRequest::ScrollToTop);
        Some(ticket)
    }
}

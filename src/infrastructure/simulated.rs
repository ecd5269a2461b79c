// SPDX-License-Identifier: MPL-2.0
//! Offline stand-ins for the remote player and the search service.
//!
//! [`SimulatedPlayer`] plays a silent timeline that follows the tokio clock,
//! so the whole loop can run (and be tested with paused time) without an
//! embedded player. It reports state changes through the same
//! [`PlayerEvent`] channel a real player bridge would use.
//!
//! [`SimulatedSource`] answers every fetch with a fixed duration and
//! candidate list. The list is rotated so that it starts right after the
//! requested video and never contains it.

use crate::application::port::{
    PlayerAdapter, PlayerEvent, RelatedVideoSource, SearchError, SearchItem, Snippet,
    VideoSession,
};
use crate::domain::video::{PlayerState, VideoId};
use futures_util::future::BoxFuture;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

/// Event sender feeding a [`SimulatedPlayer`]'s notifications back to the
/// driver.
pub type SimulatedEvents = UnboundedSender<PlayerEvent<SimulatedPlayer>>;

// =============================================================================
// SimulatedPlayer
// =============================================================================

/// Player whose every video lasts `duration` seconds.
#[derive(Debug)]
pub struct SimulatedPlayer {
    events: SimulatedEvents,
    duration: f64,
    loaded: Option<VideoId>,
    /// Position at `resumed_at`, or the paused position.
    position: f64,
    /// Set while playing.
    resumed_at: Option<Instant>,
}

impl SimulatedPlayer {
    #[must_use]
    pub fn new(events: SimulatedEvents, duration: f64) -> Self {
        Self {
            events,
            duration: duration.max(0.0),
            loaded: None,
            position: 0.0,
            resumed_at: None,
        }
    }

    /// Video currently loaded.
    #[must_use]
    pub fn loaded(&self) -> Option<&VideoId> {
        self.loaded.as_ref()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.resumed_at.is_some()
    }

    fn position_now(&self) -> f64 {
        let elapsed = self
            .resumed_at
            .map_or(0.0, |since| since.elapsed().as_secs_f64());
        (self.position + elapsed).min(self.duration)
    }

    fn report(&self, state: PlayerState) {
        // The driver may already be gone during shutdown.
        let _ = self.events.send(PlayerEvent::StateChange(state.code()));
    }
}

impl PlayerAdapter for SimulatedPlayer {
    fn cue_video(&mut self, id: &VideoId) {
        self.loaded = Some(id.clone());
        self.position = 0.0;
        self.resumed_at = None;
        self.report(PlayerState::VideoCued);
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        if !seconds.is_finite() {
            return;
        }
        self.position = seconds.clamp(0.0, self.duration);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
    }

    fn play_video(&mut self) {
        if self.loaded.is_none() || self.resumed_at.is_some() {
            return;
        }
        self.resumed_at = Some(Instant::now());
        self.report(PlayerState::Playing);
    }

    fn pause_video(&mut self) {
        if self.resumed_at.is_none() {
            return;
        }
        self.position = self.position_now();
        self.resumed_at = None;
        self.report(PlayerState::Paused);
    }

    fn current_time(&self) -> Option<f64> {
        self.loaded.as_ref().map(|_| self.position_now())
    }

    fn duration(&self) -> f64 {
        if self.loaded.is_some() {
            self.duration
        } else {
            0.0
        }
    }
}

// =============================================================================
// SimulatedSource
// =============================================================================

/// Titles of the catalogue served by [`SimulatedSource::canned`].
const CANNED_TITLES: [&str; 5] = [
    "Warm-up groove",
    "Slow practice take",
    "Full band rehearsal",
    "Solo breakdown",
    "Live encore",
];

/// Search source returning canned data.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSource {
    duration_secs: u64,
    candidates: Vec<SearchItem>,
}

impl SimulatedSource {
    #[must_use]
    pub fn new(duration_secs: u64, candidates: Vec<SearchItem>) -> Self {
        Self {
            duration_secs,
            candidates,
        }
    }

    /// Source serving a small catalogue of complete entries (`sim-1`,
    /// `sim-2`, ...), so advancing keeps finding a new video.
    #[must_use]
    pub fn canned(duration_secs: u64) -> Self {
        let candidates = CANNED_TITLES
            .iter()
            .enumerate()
            .map(|(index, title)| SearchItem {
                id: Some(format!("sim-{}", index + 1)),
                snippet: Some(Snippet {
                    title: Some((*title).to_string()),
                    description: Some(format!(
                        "Simulated video {} of {}",
                        index + 1,
                        CANNED_TITLES.len()
                    )),
                    thumbnail: None,
                }),
            })
            .collect();
        Self::new(duration_secs, candidates)
    }

    fn candidates_for(&self, id: &VideoId) -> Vec<SearchItem> {
        let position = self
            .candidates
            .iter()
            .position(|item| item.id.as_deref() == Some(id.as_str()));
        match position {
            Some(index) => self.candidates[index + 1..]
                .iter()
                .chain(&self.candidates[..index])
                .cloned()
                .collect(),
            None => self.candidates.clone(),
        }
    }
}

impl RelatedVideoSource for SimulatedSource {
    fn fetch<'a>(&'a self, id: &'a VideoId) -> BoxFuture<'a, Result<VideoSession, SearchError>> {
        tracing::debug!(video = %id, "Serving simulated related videos");
        let session = VideoSession {
            duration_secs: self.duration_secs,
            candidates: self.candidates_for(id),
        };
        Box::pin(async move { Ok(session) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn codes(rx: &mut mpsc::UnboundedReceiver<PlayerEvent<SimulatedPlayer>>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let PlayerEvent::StateChange(code) = event {
                out.push(code);
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn clock_follows_tokio_time() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = SimulatedPlayer::new(tx, 60.0);
        assert_eq!(player.current_time(), None);
        assert_abs_diff_eq!(player.duration(), 0.0);

        player.cue_video(&VideoId::new("abc").unwrap());
        player.seek_to(10.0, true);
        player.play_video();
        tokio::time::advance(Duration::from_secs(5)).await;

        assert_abs_diff_eq!(player.current_time().unwrap(), 15.0, epsilon = 1e-6);
        assert_eq!(codes(&mut rx), vec![5, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_position() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = SimulatedPlayer::new(tx, 60.0);
        player.cue_video(&VideoId::new("abc").unwrap());
        player.play_video();
        tokio::time::advance(Duration::from_secs(3)).await;
        player.pause_video();
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_abs_diff_eq!(player.current_time().unwrap(), 3.0, epsilon = 1e-6);
        assert_eq!(codes(&mut rx), vec![5, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn position_stops_at_duration() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut player = SimulatedPlayer::new(tx, 20.0);
        player.cue_video(&VideoId::new("abc").unwrap());
        player.play_video();
        tokio::time::advance(Duration::from_secs(90)).await;
        assert_abs_diff_eq!(player.current_time().unwrap(), 20.0);
    }

    #[test]
    fn play_before_cue_is_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = SimulatedPlayer::new(tx, 20.0);
        player.play_video();
        assert!(!player.is_playing());
        assert!(codes(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn source_returns_canned_session() {
        let source = SimulatedSource::new(120, Vec::new());
        let session = source
            .fetch(&VideoId::new("abc").unwrap())
            .await
            .unwrap();
        assert_eq!(session.duration_secs, 120);
        assert!(session.candidates.is_empty());
    }

    #[tokio::test]
    async fn canned_source_serves_complete_entries() {
        let source = SimulatedSource::canned(90);
        let session = source
            .fetch(&VideoId::new("abc").unwrap())
            .await
            .unwrap();
        assert_eq!(session.candidates.len(), CANNED_TITLES.len());
        assert!(session.candidates.iter().all(|item| item.clone().into_related().is_some()));
    }

    #[tokio::test]
    async fn candidates_start_after_requested_video() {
        let source = SimulatedSource::canned(90);
        let session = source
            .fetch(&VideoId::new("sim-2").unwrap())
            .await
            .unwrap();
        let ids: Vec<_> = session
            .candidates
            .iter()
            .filter_map(|item| item.id.as_deref())
            .collect();
        assert_eq!(ids, ["sim-3", "sim-4", "sim-5", "sim-1"]);
    }
}

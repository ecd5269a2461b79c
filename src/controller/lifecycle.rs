// SPDX-License-Identifier: MPL-2.0
//! Player lifecycle handling.
//!
//! The controller only reacts to what the player reports: lifecycle state is
//! written from [`PlayerEvent::StateChange`] and nowhere else. The one side
//! effect tied to a transition is the autoplay start on `VideoCued`.

use super::{HostRequest, LoopController, PlaybackNotice};
use crate::application::port::{PlayerAdapter, PlayerErrorCode, PlayerEvent};
use crate::domain::video::PlayerState;

/// Side effect triggered by entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing to do.
    None,
    /// Seek to the window start and play.
    StartFromWindow,
}

/// Command issued by the play/pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
}

/// Reaction to entering `next`.
#[must_use]
pub fn react(next: PlayerState, autoplay: bool, attached: bool) -> Reaction {
    match next {
        PlayerState::VideoCued if autoplay && attached => Reaction::StartFromWindow,
        _ => Reaction::None,
    }
}

/// Command the toggle issues from `state`; `None` while buffering.
#[must_use]
pub fn toggle_action(state: PlayerState) -> Option<ToggleAction> {
    match state {
        PlayerState::Playing => Some(ToggleAction::Pause),
        PlayerState::Paused
        | PlayerState::Ended
        | PlayerState::Unstarted
        | PlayerState::VideoCued => Some(ToggleAction::Play),
        PlayerState::Buffering => None,
    }
}

impl<P: PlayerAdapter> LoopController<P> {
    /// Dispatches one event raised by the player.
    pub fn handle_event(&mut self, event: PlayerEvent<P>) {
        match event {
            PlayerEvent::Ready(player) => self.attach(player),
            PlayerEvent::StateChange(code) => self.on_state_change(code),
            PlayerEvent::Error(code) => self.on_player_error(code),
        }
    }

    fn attach(&mut self, mut player: P) {
        tracing::debug!("Player ready");
        if let Some(id) = self.session.active() {
            player.cue_video(id);
        }
        self.player = Some(player);
    }

    fn on_state_change(&mut self, code: i32) {
        let Some(next) = PlayerState::from_code(code) else {
            tracing::debug!(code, "Ignoring unknown player state");
            return;
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "Player state changed");
        }
        self.state = next;

        if react(next, self.autoplay, self.player.is_some()) == Reaction::StartFromWindow {
            if self.window.is_none() {
                let seeded = self
                    .session
                    .pending_query()
                    .and_then(|query| self.provisional_window(query));
                if seeded.is_some() {
                    self.window = seeded;
                    self.sync_url();
                }
            }
            let start = self.window.map_or(0.0, |window| window.start().max(0.0));
            if let Some(player) = self.player.as_mut() {
                player.seek_to(start, true);
                player.play_video();
            }
        }
    }

    fn on_player_error(&mut self, code: i32) {
        let error = PlayerErrorCode::from_code(code);
        let video = self.session.active().cloned();
        tracing::warn!(?video, "Player error: {error}");

        if error.is_embed_blocked() {
            self.requests
                .push(HostRequest::Notice(PlaybackNotice::EmbedBlocked { video, code: error }));
            if self.skip_blocked_videos {
                let outcome = self.skip_next();
                tracing::info!(?outcome, "Skipped blocked video");
            }
        } else {
            self.requests
                .push(HostRequest::Notice(PlaybackNotice::PlayerError { video, code: error }));
        }
    }

    /// Plays or pauses depending on the current state.
    pub fn toggle_play_pause(&mut self) -> Option<ToggleAction> {
        let player = self.player.as_mut()?;
        let action = toggle_action(self.state)?;
        match action {
            ToggleAction::Play => player.play_video(),
            ToggleAction::Pause => player.pause_video(),
        }
        Some(action)
    }
}

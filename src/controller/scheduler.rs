// SPDX-License-Identifier: MPL-2.0
//! Periodic time check.
//!
//! The host calls [`LoopController::tick`] on a fixed interval. Each tick
//! samples the player and decides, without any state carried over from
//! earlier ticks, whether to leave playback alone, pull it back into the
//! window, or advance to the next video.
//!
//! The window end is treated as reached [`TIME_CHECK_INTERVAL_SECS`] early so
//! that a coarse tick cannot overshoot it.

use super::selector::AdvanceOutcome;
use super::LoopController;
use crate::application::port::PlayerAdapter;
use crate::domain::video::{PlaybackWindow, PlayerState};

/// Lead time before the window end at which the loop advances, in seconds.
pub const TIME_CHECK_INTERVAL_SECS: f64 = 1.5;

/// Why a tick did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No player attached yet.
    Detached,
    /// The player is waiting for data.
    Buffering,
    /// The player does not know the duration yet.
    UnknownDuration,
    /// The player reported no usable position.
    NoPosition,
}

/// What the player looked like at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub state: PlayerState,
    pub duration: f64,
    pub current_time: Option<f64>,
}

/// Decision for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickDecision {
    Skip(SkipReason),
    Advance,
    SeekTo(f64),
    Continue,
}

/// What a tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    Advanced(AdvanceOutcome),
    SoughtTo(f64),
    Continued,
}

/// Loop bounds actually in force: the window where it has usable values,
/// otherwise `(0, duration)`.
#[must_use]
pub fn effective_bounds(window: Option<&PlaybackWindow>, duration: f64) -> (f64, f64) {
    let start = window
        .map(PlaybackWindow::start)
        .filter(|start| *start >= 0.0)
        .unwrap_or(0.0);
    let end = window
        .map(PlaybackWindow::end)
        .filter(|end| *end > 0.0)
        .unwrap_or(duration);
    (start, end)
}

/// Decides what a tick should do for `sample`.
#[must_use]
pub fn decide(sample: &Sample, window: Option<&PlaybackWindow>) -> TickDecision {
    if sample.state.is_buffering() {
        return TickDecision::Skip(SkipReason::Buffering);
    }
    if sample.duration <= 0.0 || !sample.duration.is_finite() {
        return TickDecision::Skip(SkipReason::UnknownDuration);
    }
    let current = match sample.current_time {
        Some(time) if time.is_finite() && time != 0.0 => time,
        _ => return TickDecision::Skip(SkipReason::NoPosition),
    };

    let (start, end) = effective_bounds(window, sample.duration);
    if current >= end - TIME_CHECK_INTERVAL_SECS || sample.state == PlayerState::Ended {
        TickDecision::Advance
    } else if current < start {
        TickDecision::SeekTo(start)
    } else {
        TickDecision::Continue
    }
}

impl<P: PlayerAdapter> LoopController<P> {
    /// Runs one time check.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(player) = self.player.as_mut() else {
            return TickOutcome::Skipped(SkipReason::Detached);
        };

        if self.autoplay && self.state.awaits_start() {
            player.play_video();
        }

        let sample = Sample {
            state: self.state,
            duration: player.duration(),
            current_time: player.current_time(),
        };

        match decide(&sample, self.window.as_ref()) {
            TickDecision::Skip(reason) => TickOutcome::Skipped(reason),
            TickDecision::Continue => TickOutcome::Continued,
            TickDecision::SeekTo(start) => {
                tracing::debug!(position = ?sample.current_time, start, "Before window start, seeking");
                player.seek_to(start, true);
                TickOutcome::SoughtTo(start)
            }
            TickDecision::Advance => {
                let outcome = self.advance();
                tracing::debug!(?outcome, "Window end reached");
                TickOutcome::Advanced(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::PlayerEvent;
    use crate::controller::mock::{Call, MockPlayer};
    use crate::controller::ControllerOptions;
    use crate::test_utils::assert_abs_diff_eq;

    fn sample(state: PlayerState, current_time: f64) -> Sample {
        Sample {
            state,
            duration: 100.0,
            current_time: Some(current_time),
        }
    }

    fn window() -> PlaybackWindow {
        PlaybackWindow::new(10.0, 20.0, 100.0).unwrap()
    }

    #[test]
    fn advances_within_lead_time_of_end() {
        let decision = decide(&sample(PlayerState::Playing, 18.6), Some(&window()));
        assert_eq!(decision, TickDecision::Advance);
    }

    #[test]
    fn continues_inside_window() {
        let decision = decide(&sample(PlayerState::Playing, 15.0), Some(&window()));
        assert_eq!(decision, TickDecision::Continue);
    }

    #[test]
    fn seeks_when_before_start() {
        let decision = decide(&sample(PlayerState::Playing, 5.0), Some(&window()));
        assert_eq!(decision, TickDecision::SeekTo(10.0));
    }

    #[test]
    fn lead_time_boundary() {
        assert_eq!(
            decide(&sample(PlayerState::Playing, 18.4), Some(&window())),
            TickDecision::Continue
        );
        assert_eq!(
            decide(&sample(PlayerState::Playing, 18.5), Some(&window())),
            TickDecision::Advance
        );
    }

    #[test]
    fn ended_state_advances_anywhere() {
        let decision = decide(&sample(PlayerState::Ended, 12.0), Some(&window()));
        assert_eq!(decision, TickDecision::Advance);
    }

    #[test]
    fn buffering_is_skipped() {
        let decision = decide(&sample(PlayerState::Buffering, 19.9), Some(&window()));
        assert_eq!(decision, TickDecision::Skip(SkipReason::Buffering));
    }

    #[test]
    fn unknown_duration_is_skipped() {
        let s = Sample {
            state: PlayerState::Playing,
            duration: 0.0,
            current_time: Some(50.0),
        };
        assert_eq!(decide(&s, None), TickDecision::Skip(SkipReason::UnknownDuration));
    }

    #[test]
    fn missing_or_zero_position_is_skipped() {
        let mut s = sample(PlayerState::Playing, 0.0);
        assert_eq!(decide(&s, None), TickDecision::Skip(SkipReason::NoPosition));
        s.current_time = None;
        assert_eq!(decide(&s, None), TickDecision::Skip(SkipReason::NoPosition));
        s.current_time = Some(f64::NAN);
        assert_eq!(decide(&s, None), TickDecision::Skip(SkipReason::NoPosition));
    }

    #[test]
    fn no_window_uses_whole_video() {
        assert_eq!(effective_bounds(None, 100.0), (0.0, 100.0));
        assert_eq!(
            decide(&sample(PlayerState::Playing, 98.6), None),
            TickDecision::Advance
        );
        assert_eq!(
            decide(&sample(PlayerState::Playing, 50.0), None),
            TickDecision::Continue
        );
    }

    #[test]
    fn effective_bounds_prefer_window() {
        let (start, end) = effective_bounds(Some(&window()), 100.0);
        assert_abs_diff_eq!(start, 10.0);
        assert_abs_diff_eq!(end, 20.0);
    }

    fn attached(time: f64) -> LoopController<MockPlayer> {
        let mut ctrl = LoopController::with_seed(ControllerOptions::default(), 3);
        ctrl.handle_event(PlayerEvent::Ready(MockPlayer::at(time, 100.0)));
        ctrl.set_window(window());
        ctrl.handle_event(PlayerEvent::StateChange(1));
        ctrl.player_mut().unwrap().take_calls();
        ctrl
    }

    #[test]
    fn tick_without_player_is_noop() {
        let mut ctrl: LoopController<MockPlayer> =
            LoopController::new(ControllerOptions::default());
        assert_eq!(ctrl.tick(), TickOutcome::Skipped(SkipReason::Detached));
    }

    #[test]
    fn tick_seeks_into_window_without_pausing() {
        let mut ctrl = attached(5.0);
        assert_eq!(ctrl.tick(), TickOutcome::SoughtTo(10.0));
        assert_eq!(
            ctrl.player_mut().unwrap().take_calls(),
            vec![Call::Seek(10.0, true)]
        );
    }

    #[test]
    fn tick_inside_window_issues_nothing() {
        let mut ctrl = attached(15.0);
        assert_eq!(ctrl.tick(), TickOutcome::Continued);
        assert!(ctrl.player_mut().unwrap().take_calls().is_empty());
    }

    #[test]
    fn tick_at_end_repeats_by_default() {
        let mut ctrl = attached(18.6);
        assert_eq!(
            ctrl.tick(),
            TickOutcome::Advanced(AdvanceOutcome::Repeated { start: 10.0 })
        );
        assert_eq!(
            ctrl.player_mut().unwrap().take_calls(),
            vec![Call::Seek(10.0, true), Call::Play]
        );
    }

    #[test]
    fn tick_while_buffering_issues_nothing() {
        let mut ctrl = attached(19.9);
        ctrl.handle_event(PlayerEvent::StateChange(3));
        assert_eq!(ctrl.tick(), TickOutcome::Skipped(SkipReason::Buffering));
        assert!(ctrl.player_mut().unwrap().take_calls().is_empty());
    }

    #[test]
    fn tick_kicks_missed_autostart() {
        let mut ctrl = LoopController::with_seed(ControllerOptions::default(), 3);
        ctrl.handle_event(PlayerEvent::Ready(MockPlayer::at(15.0, 100.0)));
        ctrl.set_window(window());
        assert_eq!(ctrl.state(), PlayerState::Unstarted);
        assert_eq!(ctrl.tick(), TickOutcome::Continued);
        assert_eq!(ctrl.player_mut().unwrap().take_calls(), vec![Call::Play]);
    }

    #[test]
    fn tick_keeps_no_state_between_calls() {
        let mut ctrl = attached(15.0);
        for _ in 0..5 {
            assert_eq!(ctrl.tick(), TickOutcome::Continued);
        }
        ctrl.player_mut().unwrap().time = Some(5.0);
        assert_eq!(ctrl.tick(), TickOutcome::SoughtTo(10.0));
    }
}

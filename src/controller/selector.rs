// SPDX-License-Identifier: MPL-2.0
//! Next-video selection.
//!
//! When the loop reaches its end, [`LoopController::advance`] picks what
//! plays next with a fixed precedence: repeat, then shuffle, then
//! sequential. Only the related-video list is considered; the user queue is
//! played explicitly through [`LoopController::play_queued`].

use super::scheduler::effective_bounds;
use super::{HostRequest, LoopController, QueryBounds};
use crate::application::port::PlayerAdapter;
use crate::domain::video::VideoId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pick made by a [`NextSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Replay the current window.
    Repeat,
    /// Play the related entry at this index, picked at random.
    Shuffle(usize),
    /// Play the related entry at this index, in list order.
    Sequential(usize),
    /// Nothing to play.
    Stay,
}

/// Repeat/shuffle modes and the random source used for shuffle picks.
#[derive(Debug, Clone)]
pub struct NextSelector {
    repeat: bool,
    shuffle: bool,
    rng: StdRng,
}

impl NextSelector {
    #[must_use]
    pub fn new(repeat: bool, shuffle: bool) -> Self {
        Self {
            repeat,
            shuffle,
            rng: StdRng::from_entropy(),
        }
    }

    #[must_use]
    pub fn with_seed(repeat: bool, shuffle: bool, seed: u64) -> Self {
        Self {
            repeat,
            shuffle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    /// Chooses among `candidates` related entries.
    pub fn choose(&mut self, candidates: usize) -> Choice {
        if self.repeat {
            return Choice::Repeat;
        }
        self.choose_other(candidates)
    }

    /// Chooses a different video regardless of repeat mode.
    pub fn choose_other(&mut self, candidates: usize) -> Choice {
        if candidates == 0 {
            Choice::Stay
        } else if self.shuffle {
            Choice::Shuffle(self.rng.gen_range(0..candidates))
        } else {
            Choice::Sequential(0)
        }
    }
}

/// What an advance did.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The window restarted at `start`.
    Repeated { start: f64 },
    /// Another video was loaded.
    ChangedVideo { id: VideoId, shuffled: bool },
    /// Nothing changed.
    Stayed,
}

impl<P: PlayerAdapter> LoopController<P> {
    #[must_use]
    pub fn repeat(&self) -> bool {
        self.selector.repeat()
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.selector.shuffle()
    }

    /// Flips repeat mode and returns the new value.
    pub fn toggle_repeat(&mut self) -> bool {
        let repeat = !self.selector.repeat();
        self.selector.set_repeat(repeat);
        tracing::info!(repeat, "Repeat mode changed");
        repeat
    }

    /// Flips shuffle mode and returns the new value.
    pub fn toggle_shuffle(&mut self) -> bool {
        let shuffle = !self.selector.shuffle();
        self.selector.set_shuffle(shuffle);
        tracing::info!(shuffle, "Shuffle mode changed");
        shuffle
    }

    /// Moves on at the end of the loop according to the active modes.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let choice = self.selector.choose(self.related.len());
        self.apply_choice(choice)
    }

    /// Moves to another video now, ignoring repeat mode.
    pub fn skip_next(&mut self) -> AdvanceOutcome {
        let choice = self.selector.choose_other(self.related.len());
        self.apply_choice(choice)
    }

    /// Returns to the previously played video.
    ///
    /// History entries naming the active video are dropped on the way.
    pub fn skip_previous(&mut self) -> Option<VideoId> {
        while let Some(previous) = self.history.pop() {
            if self.session.active() == Some(&previous) {
                continue;
            }
            self.switch_video(previous.clone(), QueryBounds::default(), false)?;
            return Some(previous);
        }
        None
    }

    fn apply_choice(&mut self, choice: Choice) -> AdvanceOutcome {
        let outcome = match choice {
            Choice::Repeat => {
                let duration = self.player.as_ref().map_or(0.0, |player| player.duration());
                let (start, _) = effective_bounds(self.window.as_ref(), duration);
                if let Some(player) = self.player.as_mut() {
                    player.seek_to(start, true);
                    player.play_video();
                }
                AdvanceOutcome::Repeated { start }
            }
            Choice::Shuffle(index) | Choice::Sequential(index) => {
                let shuffled = matches!(choice, Choice::Shuffle(_));
                let id = self.related[index].id().clone();
                if self.load_video(id.clone(), QueryBounds::default()).is_none() {
                    AdvanceOutcome::Stayed
                } else {
                    if shuffled {
                        self.requests.push(HostRequest::ScrollToTop);
                    }
                    AdvanceOutcome::ChangedVideo { id, shuffled }
                }
            }
            Choice::Stay => AdvanceOutcome::Stayed,
        };
        tracing::info!(?outcome, "Advanced");
        outcome
    }
}

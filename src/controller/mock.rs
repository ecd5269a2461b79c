// SPDX-License-Identifier: MPL-2.0
//! Recording player used by the controller unit tests.

use crate::application::port::PlayerAdapter;
use crate::domain::video::VideoId;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Cue(String),
    Seek(f64, bool),
    Play,
    Pause,
}

#[derive(Debug, Default)]
pub(crate) struct MockPlayer {
    pub calls: Vec<Call>,
    pub time: Option<f64>,
    pub duration: f64,
}

impl MockPlayer {
    pub fn at(time: f64, duration: f64) -> Self {
        Self {
            calls: Vec::new(),
            time: Some(time),
            duration,
        }
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl PlayerAdapter for MockPlayer {
    fn cue_video(&mut self, id: &VideoId) {
        self.calls.push(Call::Cue(id.as_str().to_string()));
    }

    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) {
        self.calls.push(Call::Seek(seconds, allow_seek_ahead));
    }

    fn play_video(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause_video(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn current_time(&self) -> Option<f64> {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Player lifecycle states.
//!
//! These mirror the states an embedded remote player reports through its
//! state-change event. The controller never sets them on its own; it only
//! reacts to what the player reports.

/// Lifecycle state reported by the remote player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Player created, nothing played yet.
    #[default]
    Unstarted,
    /// Playback reached the end of the video.
    Ended,
    /// Video is playing.
    Playing,
    /// Video is paused.
    Paused,
    /// Player is waiting for data.
    Buffering,
    /// Video is loaded and ready to play.
    VideoCued,
}

impl PlayerState {
    /// Maps a raw state code from the player to a state.
    ///
    /// Returns `None` for codes the player API does not define.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::VideoCued),
            _ => None,
        }
    }

    /// Raw state code as used by the player API.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::VideoCued => 5,
        }
    }

    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    #[must_use]
    pub fn is_buffering(self) -> bool {
        matches!(self, Self::Buffering)
    }

    /// Returns true if the player has not started playing the loaded video.
    #[must_use]
    pub fn awaits_start(self) -> bool {
        matches!(self, Self::Unstarted | Self::VideoCued)
    }
}

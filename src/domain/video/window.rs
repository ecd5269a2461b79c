// SPDX-License-Identifier: MPL-2.0
//! Loop window bounds.
//!
//! A [`PlaybackWindow`] is the `[start, end]` range (in seconds) that the
//! controller keeps looping. The two endpoints are always at least
//! [`MIN_DISTANCE_SECS`] apart, and the only way to change them after
//! creation is [`PlaybackWindow::move_thumb`].

use super::duration::to_colon_string;
use std::fmt;

/// Minimum span of a loop window, in seconds.
pub const MIN_DISTANCE_SECS: f64 = 10.0;

/// Which slider thumb the user moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Start,
    End,
}

/// Reasons a window cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// A bound was NaN or infinite.
    NonFinite,
    /// The span after clamping is shorter than [`MIN_DISTANCE_SECS`].
    TooShort { start: f64, end: f64 },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::NonFinite => write!(f, "Window bounds must be finite"),
            WindowError::TooShort { start, end } => write!(
                f,
                "Window {start:.1}s..{end:.1}s is shorter than {MIN_DISTANCE_SECS}s"
            ),
        }
    }
}

impl std::error::Error for WindowError {}

/// A labelled slider tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMark {
    pub value: f64,
    pub label: String,
}

/// Loop window `[start, end]`, in seconds.
///
/// `video_duration` of `0.0` means the duration is not known yet; in that case
/// the end bound is not clamped from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackWindow {
    start: f64,
    end: f64,
    video_duration: f64,
}

impl PlaybackWindow {
    /// Creates a window, clamping `start` to zero and `end` to the video
    /// duration when it is known.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NonFinite`] for NaN/infinite input and
    /// [`WindowError::TooShort`] when the clamped span is under
    /// [`MIN_DISTANCE_SECS`].
    pub fn new(start: f64, end: f64, video_duration: f64) -> Result<Self, WindowError> {
        if !start.is_finite() || !end.is_finite() || !video_duration.is_finite() {
            return Err(WindowError::NonFinite);
        }

        let video_duration = video_duration.max(0.0);
        let start = start.max(0.0);
        let end = if video_duration > 0.0 {
            end.min(video_duration)
        } else {
            end
        };

        if end - start < MIN_DISTANCE_SECS {
            return Err(WindowError::TooShort { start, end });
        }

        Ok(Self {
            start,
            end,
            video_duration,
        })
    }

    /// Creates a window spanning the whole video.
    ///
    /// # Errors
    ///
    /// Fails when the video is shorter than [`MIN_DISTANCE_SECS`].
    pub fn full(video_duration: f64) -> Result<Self, WindowError> {
        Self::new(0.0, video_duration, video_duration)
    }

    /// Builds a window from raw `s`/`e` query values.
    ///
    /// A value that is absent or not numeric falls back to the matching
    /// default.
    ///
    /// # Errors
    ///
    /// Same as [`PlaybackWindow::new`].
    pub fn from_query(
        start: Option<&str>,
        end: Option<&str>,
        fallback_start: f64,
        fallback_end: f64,
        video_duration: f64,
    ) -> Result<Self, WindowError> {
        let numeric = |raw: Option<&str>| {
            raw.and_then(|value| value.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
        };
        Self::new(
            numeric(start).unwrap_or(fallback_start),
            numeric(end).unwrap_or(fallback_end),
            video_duration,
        )
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn video_duration(&self) -> f64 {
        self.video_duration
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Moves one endpoint toward `proposed`, keeping the minimum distance to
    /// the other endpoint. The other endpoint is never touched.
    ///
    /// Non-finite proposals leave the window unchanged.
    #[must_use]
    pub fn move_thumb(self, thumb: Thumb, proposed: f64) -> Self {
        if !proposed.is_finite() {
            return self;
        }

        match thumb {
            Thumb::Start => Self {
                start: proposed.max(0.0).min(self.end - MIN_DISTANCE_SECS),
                ..self
            },
            Thumb::End => {
                let upper = if self.video_duration > 0.0 {
                    proposed.min(self.video_duration)
                } else {
                    proposed
                };
                Self {
                    end: upper.max(self.start + MIN_DISTANCE_SECS),
                    ..self
                }
            }
        }
    }

    /// Returns `true` if `position` lies inside the window.
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.start && position <= self.end
    }

    /// Slider tick marks for both endpoints, labelled `M:SS` / `H:MM:SS`.
    #[must_use]
    pub fn marks(&self) -> [WindowMark; 2] {
        let mark = |value: f64| WindowMark {
            value,
            label: to_colon_string(value.max(0.0).floor() as u64),
        };
        [mark(self.start), mark(self.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn window(start: f64, end: f64) -> PlaybackWindow {
        PlaybackWindow::new(start, end, 100.0).expect("valid window")
    }

    #[test]
    fn new_clamps_end_to_duration() {
        let w = PlaybackWindow::new(0.0, 250.0, 100.0).unwrap();
        assert_abs_diff_eq!(w.end(), 100.0);
    }

    #[test]
    fn new_clamps_negative_start() {
        let w = PlaybackWindow::new(-5.0, 30.0, 100.0).unwrap();
        assert_abs_diff_eq!(w.start(), 0.0);
    }

    #[test]
    fn new_rejects_short_span() {
        let err = PlaybackWindow::new(10.0, 15.0, 100.0).unwrap_err();
        assert!(matches!(err, WindowError::TooShort { .. }));
    }

    #[test]
    fn new_rejects_span_made_short_by_clamping() {
        assert!(PlaybackWindow::new(95.0, 200.0, 100.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite() {
        assert_eq!(
            PlaybackWindow::new(f64::NAN, 20.0, 100.0),
            Err(WindowError::NonFinite)
        );
    }

    #[test]
    fn unknown_duration_does_not_clamp_end() {
        let w = PlaybackWindow::new(0.0, 500.0, 0.0).unwrap();
        assert_abs_diff_eq!(w.end(), 500.0);
        let moved = w.move_thumb(Thumb::End, 900.0);
        assert_abs_diff_eq!(moved.end(), 900.0);
    }

    #[test]
    fn full_window_spans_video() {
        let w = PlaybackWindow::full(42.0).unwrap();
        assert_abs_diff_eq!(w.start(), 0.0);
        assert_abs_diff_eq!(w.end(), 42.0);
        assert!(PlaybackWindow::full(5.0).is_err());
    }

    #[test]
    fn move_start_respects_min_distance() {
        let w = window(10.0, 20.0).move_thumb(Thumb::Start, 18.0);
        assert_abs_diff_eq!(w.start(), 10.0);
        assert_abs_diff_eq!(w.end(), 20.0);
    }

    #[test]
    fn move_end_respects_min_distance() {
        let w = window(10.0, 40.0).move_thumb(Thumb::End, 12.0);
        assert_abs_diff_eq!(w.end(), 20.0);
        assert_abs_diff_eq!(w.start(), 10.0);
    }

    #[test]
    fn move_thumb_never_touches_other_endpoint() {
        let base = window(20.0, 60.0);
        for proposed in [-50.0, 0.0, 15.0, 49.0, 50.0, 59.0, 80.0, 1_000.0] {
            assert_abs_diff_eq!(base.move_thumb(Thumb::Start, proposed).end(), 60.0);
            assert_abs_diff_eq!(base.move_thumb(Thumb::End, proposed).start(), 20.0);
        }
    }

    #[test]
    fn move_thumb_never_breaks_min_distance() {
        let mut w = window(0.0, 100.0);
        let proposals = [
            (Thumb::Start, 95.0),
            (Thumb::End, 3.0),
            (Thumb::Start, -10.0),
            (Thumb::End, 200.0),
            (Thumb::Start, 99.0),
            (Thumb::End, 0.0),
        ];
        for (thumb, proposed) in proposals {
            w = w.move_thumb(thumb, proposed);
            assert!(w.span() >= MIN_DISTANCE_SECS, "span {} after {thumb:?}", w.span());
        }
    }

    #[test]
    fn move_thumb_is_idempotent() {
        let w = window(10.0, 50.0);
        let once = w.move_thumb(Thumb::Start, 45.0);
        let twice = once.move_thumb(Thumb::Start, 45.0);
        assert_eq!(once, twice);

        let once = w.move_thumb(Thumb::End, 120.0);
        assert_eq!(once, once.move_thumb(Thumb::End, 120.0));
    }

    #[test]
    fn move_thumb_ignores_nan() {
        let w = window(10.0, 50.0);
        assert_eq!(w.move_thumb(Thumb::Start, f64::NAN), w);
    }

    #[test]
    fn from_query_uses_numeric_values() {
        let w = PlaybackWindow::from_query(Some("12"), Some("42.5"), 0.0, 100.0, 100.0).unwrap();
        assert_abs_diff_eq!(w.start(), 12.0);
        assert_abs_diff_eq!(w.end(), 42.5);
    }

    #[test]
    fn from_query_falls_back_on_missing_or_garbage() {
        let w = PlaybackWindow::from_query(None, Some("abc"), 5.0, 90.0, 100.0).unwrap();
        assert_abs_diff_eq!(w.start(), 5.0);
        assert_abs_diff_eq!(w.end(), 90.0);

        let w = PlaybackWindow::from_query(Some("inf"), None, 0.0, 100.0, 100.0).unwrap();
        assert_abs_diff_eq!(w.start(), 0.0);
    }

    #[test]
    fn marks_use_colon_labels() {
        let [start, end] = window(65.0, 100.0).marks();
        assert_eq!(start.label, "1:05");
        assert_eq!(end.label, "1:40");
    }

    #[test]
    fn contains_checks_bounds() {
        let w = window(10.0, 20.0);
        assert!(w.contains(10.0));
        assert!(w.contains(20.0));
        assert!(!w.contains(9.9));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Duration codec for video lengths.
//!
//! Video metadata reports durations as ISO-8601-like strings (`PT1H2M3S`).
//! The UI shows them either as a verbose string (`1h 02m 03s`) or as a
//! colon-separated label (`1:02:03`) for slider tick marks.
//!
//! The wire form and the display forms are intentionally independent: a
//! display string cannot be re-parsed by [`parse_iso8601`].

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("duration pattern is valid")
});

/// Reason an ISO duration string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    /// The input was empty.
    Empty,
    /// The input does not match `PT#H#M#S`.
    Malformed(String),
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationParseError::Empty => write!(f, "Empty duration"),
            DurationParseError::Malformed(input) => write!(f, "Malformed duration: {input}"),
        }
    }
}

impl std::error::Error for DurationParseError {}

/// Parses an ISO-8601 duration, distinguishing a genuine zero from bad input.
///
/// # Errors
///
/// Returns [`DurationParseError::Empty`] for an empty string and
/// [`DurationParseError::Malformed`] when the pattern does not match or a
/// component overflows.
pub fn parse_iso8601_strict(input: &str) -> Result<u64, DurationParseError> {
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let malformed = || DurationParseError::Malformed(input.to_string());
    let captures = ISO_DURATION.captures(input).ok_or_else(malformed)?;

    let component = |index: usize| -> Result<u64, DurationParseError> {
        captures
            .get(index)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>().map_err(|_| malformed()))
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|h| minutes.checked_mul(SECONDS_PER_MINUTE).map(|m| (h, m)))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(malformed)
}

/// Parses an ISO-8601 duration (`PT#H#M#S`) into seconds.
///
/// Missing components count as zero. Empty or malformed input yields `0`;
/// this function never fails.
///
/// # Examples
///
/// ```
/// use tube_looper::domain::video::duration::parse_iso8601;
///
/// assert_eq!(parse_iso8601("PT1H2M3S"), 3723);
/// assert_eq!(parse_iso8601("PT5M"), 300);
/// assert_eq!(parse_iso8601(""), 0);
/// ```
#[must_use]
pub fn parse_iso8601(input: &str) -> u64 {
    parse_iso8601_strict(input).unwrap_or(0)
}

fn split(total_secs: u64) -> (u64, u64, u64) {
    let hours = total_secs / SECONDS_PER_HOUR;
    let minutes = (total_secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_secs % SECONDS_PER_MINUTE;
    (hours, minutes, seconds)
}

/// Formats seconds as a verbose human string: `5m 03s` or `1h 01m 01s`.
#[must_use]
pub fn to_display_string(total_secs: u64) -> String {
    let (hours, minutes, seconds) = split(total_secs);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else {
        format!("{minutes}m {seconds:02}s")
    }
}

/// Formats seconds as a slider label: `H:MM:SS` with hours, `M:SS` without.
///
/// # Examples
///
/// ```
/// use tube_looper::domain::video::duration::to_colon_string;
///
/// assert_eq!(to_colon_string(65), "1:05");
/// assert_eq!(to_colon_string(3723), "1:02:03");
/// ```
#[must_use]
pub fn to_colon_string(total_secs: u64) -> String {
    let (hours, minutes, seconds) = split(total_secs);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Formats seconds as an ISO-8601 duration, omitting zero components.
///
/// Zero seconds is rendered as `PT0S`.
#[must_use]
pub fn to_iso8601(total_secs: u64) -> String {
    let (hours, minutes, seconds) = split(total_secs);
    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

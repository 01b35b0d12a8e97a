//! `start --> end` cue timing lines

use super::{parse_srt, parse_webvtt, Microseconds};
use crate::utils::errors::{CaptionError, Result};

/// Separator between the start and end timestamps of a cue
pub const TIMING_ARROW: &str = "-->";

/// Split a timing line around its arrow, trimming both halves
///
/// Returns `None` when the line has no arrow.
///
/// # Examples
///
/// ```rust
/// # use caps_core::time::split_timing_line;
/// assert_eq!(
///     split_timing_line("00:01.000 --> 00:02.000 align:start"),
///     Some(("00:01.000", "00:02.000 align:start"))
/// );
/// assert_eq!(split_timing_line("just text"), None);
/// ```
#[must_use]
pub fn split_timing_line(line: &str) -> Option<(&str, &str)> {
    let (start, end) = line.split_once(TIMING_ARROW)?;
    Some((start.trim(), end.trim()))
}

/// Parsed start and end of one cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingLine {
    /// Cue start in microseconds
    pub start: Microseconds,
    /// Cue end in microseconds
    pub end: Microseconds,
}

impl TimingLine {
    /// Parse an SRT timing line
    ///
    /// Display coordinates after the end timestamp (`X1:... X2:...`) are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::MalformedTimestamp`] if the arrow is missing
    /// or either side fails the SRT grammar.
    pub fn parse_srt(line: &str) -> Result<Self> {
        let (start, end) = split_timing_line(line)
            .ok_or_else(|| CaptionError::malformed_timestamp(line, "missing '-->' separator"))?;
        let end = end.split_whitespace().next().unwrap_or_default();

        Ok(Self {
            start: parse_srt(start)?,
            end: parse_srt(end)?,
        })
    }

    /// Parse a WebVTT timing line, ignoring trailing cue settings
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::MalformedTimestamp`] if the arrow is missing
    /// or either side fails the WebVTT grammar.
    pub fn parse_webvtt(line: &str) -> Result<Self> {
        let (start, end) = split_timing_line(line)
            .ok_or_else(|| CaptionError::malformed_timestamp(line, "missing '-->' separator"))?;

        Ok(Self {
            start: parse_webvtt(start)?,
            end: parse_webvtt(end)?,
        })
    }
}

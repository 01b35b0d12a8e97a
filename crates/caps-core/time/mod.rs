//! Timestamp codec shared by every caption format
//!
//! All adapters convert timing fields through this module into a canonical
//! integer microsecond value, and back. No reader or writer does its own
//! timestamp arithmetic.
//!
//! # Dialects
//!
//! - SRT: `HH:MM:SS,mmm`
//! - DFXP: `HH:MM:SS.mmm` clock time (fraction of any precision) or TTML
//!   offset time such as `5.0s` or `120ms`
//! - WebVTT: `[HH:]MM:SS.mmm`
//!
//! # Example
//!
//! ```rust
//! use caps_core::time::{format_srt, parse_dfxp, parse_srt};
//!
//! assert_eq!(parse_dfxp("00:00:18.752")?, 18_752_000);
//! assert_eq!(parse_srt("00:00:17,000")?, 17_000_000);
//! assert_eq!(format_srt(18_752_000), "00:00:18,752");
//! # Ok::<(), caps_core::CaptionError>(())
//! ```

mod timing_line;

pub use timing_line::{split_timing_line, TimingLine, TIMING_ARROW};

use crate::utils::errors::{CaptionError, Result};
use core::fmt;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Canonical caption time unit
pub type Microseconds = u64;

/// Microseconds in one millisecond
pub const MICROS_PER_MILLI: u64 = 1_000;

/// Microseconds in one second
pub const MICROS_PER_SECOND: u64 = 1_000_000;

const MICROS_PER_MINUTE: u64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: u64 = 60 * MICROS_PER_MINUTE;

fn srt_regex() -> &'static Regex {
    static SRT_REGEX: OnceLock<Regex> = OnceLock::new();
    SRT_REGEX.get_or_init(|| {
        Regex::new(r"^(\d+):(\d{2}):(\d{2}),(\d{3})$").expect("Failed to compile SRT timestamp regex")
    })
}

fn dfxp_clock_regex() -> &'static Regex {
    static DFXP_CLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    DFXP_CLOCK_REGEX.get_or_init(|| {
        Regex::new(r"^(\d+):(\d{2}):(\d{2})(?:\.(\d+))?$")
            .expect("Failed to compile DFXP clock time regex")
    })
}

fn dfxp_offset_regex() -> &'static Regex {
    static DFXP_OFFSET_REGEX: OnceLock<Regex> = OnceLock::new();
    DFXP_OFFSET_REGEX.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)(h|m|s|ms)$").expect("Failed to compile DFXP offset time regex")
    })
}

fn webvtt_regex() -> &'static Regex {
    static WEBVTT_REGEX: OnceLock<Regex> = OnceLock::new();
    WEBVTT_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})(?:\s|$)")
            .expect("Failed to compile WebVTT timestamp regex")
    })
}

/// Textual timestamp dialect of a caption format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm`
    Dfxp,
    /// `[HH:]MM:SS.mmm`
    WebVtt,
}

impl Dialect {
    /// Parse a timestamp in this dialect
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::MalformedTimestamp`] if `value` does not match
    /// the dialect's grammar.
    pub fn parse(self, value: &str) -> Result<Microseconds> {
        match self {
            Self::Srt => parse_srt(value),
            Self::Dfxp => parse_dfxp(value),
            Self::WebVtt => parse_webvtt(value),
        }
    }

    /// Format a microsecond value in this dialect
    #[must_use]
    pub fn format(self, micros: Microseconds) -> String {
        match self {
            Self::Srt => format_srt(micros),
            Self::Dfxp => format_dfxp(micros),
            Self::WebVtt => format_webvtt(micros),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::Dfxp => write!(f, "DFXP"),
            Self::WebVtt => write!(f, "WebVTT"),
        }
    }
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) to microseconds
///
/// # Errors
///
/// Returns [`CaptionError::MalformedTimestamp`] unless the whole input
/// matches the pattern exactly.
pub fn parse_srt(value: &str) -> Result<Microseconds> {
    let caps = srt_regex()
        .captures(value)
        .ok_or_else(|| CaptionError::malformed_timestamp(value, "expected HH:MM:SS,mmm"))?;

    let millis = capture_u64(&caps, 4, value)?;
    combine(
        value,
        capture_u64(&caps, 1, value)?,
        capture_u64(&caps, 2, value)?,
        capture_u64(&caps, 3, value)?,
        millis * MICROS_PER_MILLI,
    )
}

/// Parse a DFXP time expression to microseconds
///
/// Clock times (`HH:MM:SS.mmm`) accept a fraction of any precision, read
/// as a decimal fraction of a second (`.07` is 70 ms). Offset times
/// (`12.5s`, `300ms`, `1h`) are accepted as well.
///
/// # Errors
///
/// Returns [`CaptionError::MalformedTimestamp`] if neither form matches.
pub fn parse_dfxp(value: &str) -> Result<Microseconds> {
    let trimmed = value.trim();

    if let Some(caps) = dfxp_clock_regex().captures(trimmed) {
        let fraction = caps.get(4).map_or(Ok(0), |m| fraction_to_micros(m.as_str(), value))?;
        return combine(
            value,
            capture_u64(&caps, 1, value)?,
            capture_u64(&caps, 2, value)?,
            capture_u64(&caps, 3, value)?,
            fraction,
        );
    }

    if let Some(caps) = dfxp_offset_regex().captures(trimmed) {
        let amount: f64 = caps[1]
            .parse()
            .map_err(|_| CaptionError::malformed_timestamp(value, "invalid offset amount"))?;
        let unit = match &caps[2] {
            "h" => MICROS_PER_HOUR,
            "m" => MICROS_PER_MINUTE,
            "s" => MICROS_PER_SECOND,
            _ => MICROS_PER_MILLI,
        };
        return float_to_micros(amount * unit as f64, value);
    }

    Err(CaptionError::malformed_timestamp(
        value,
        "expected HH:MM:SS.mmm or an offset time",
    ))
}

/// Parse a WebVTT timestamp (`[HH:]MM:SS.mmm`) to microseconds
///
/// Anything after the timestamp and a whitespace character (cue settings)
/// is ignored. Fields are combined in floating point as
/// `(h*3600 + m*60 + s) * 1_000_000 + frac * 1_000`.
///
/// # Errors
///
/// Returns [`CaptionError::MalformedTimestamp`] if the pattern does not match.
pub fn parse_webvtt(value: &str) -> Result<Microseconds> {
    let trimmed = value.trim();
    let caps = webvtt_regex()
        .captures(trimmed)
        .ok_or_else(|| CaptionError::malformed_timestamp(value, "expected [HH:]MM:SS.mmm"))?;

    let hours = caps.get(1).map_or(Ok(0.0), |m| parse_f64(m.as_str(), value))?;
    let minutes = parse_f64(&caps[2], value)?;
    let seconds = parse_f64(&caps[3], value)?;
    let fraction = parse_f64(&caps[4], value)?;

    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(CaptionError::malformed_timestamp(
            value,
            "minutes and seconds must be below 60",
        ));
    }

    let total = hours.mul_add(3600.0, minutes.mul_add(60.0, seconds));
    float_to_micros(total.mul_add(1_000_000.0, fraction * 1_000.0), value)
}

/// Format microseconds as an SRT timestamp (`HH:MM:SS,mmm`)
#[must_use]
pub fn format_srt(micros: Microseconds) -> String {
    format_clock(micros, ',')
}

/// Format microseconds as a DFXP clock time (`HH:MM:SS.mmm`)
#[must_use]
pub fn format_dfxp(micros: Microseconds) -> String {
    format_clock(micros, '.')
}

/// Format microseconds as a WebVTT timestamp (`HH:MM:SS.mmm`)
///
/// The hours field is always written, which every WebVTT reader accepts.
#[must_use]
pub fn format_webvtt(micros: Microseconds) -> String {
    format_clock(micros, '.')
}

/// Sub-millisecond precision is truncated.
fn format_clock(micros: Microseconds, separator: char) -> String {
    let total_millis = micros / MICROS_PER_MILLI;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let seconds = (total_millis / 1_000) % 60;
    let millis = total_millis % 1_000;

    format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{millis:03}")
}

fn capture_u64(caps: &Captures<'_>, index: usize, value: &str) -> Result<u64> {
    caps.get(index)
        .ok_or_else(|| CaptionError::malformed_timestamp(value, "missing field"))?
        .as_str()
        .parse()
        .map_err(|_| CaptionError::malformed_timestamp(value, "numeric field out of range"))
}

fn parse_f64(field: &str, value: &str) -> Result<f64> {
    field
        .parse()
        .map_err(|_| CaptionError::malformed_timestamp(value, "invalid numeric field"))
}

fn combine(value: &str, hours: u64, minutes: u64, seconds: u64, sub_second: u64) -> Result<u64> {
    if minutes >= 60 || seconds >= 60 {
        return Err(CaptionError::malformed_timestamp(
            value,
            "minutes and seconds must be below 60",
        ));
    }

    hours
        .checked_mul(MICROS_PER_HOUR)
        .and_then(|h| h.checked_add(minutes * MICROS_PER_MINUTE))
        .and_then(|t| t.checked_add(seconds * MICROS_PER_SECOND))
        .and_then(|t| t.checked_add(sub_second))
        .ok_or_else(|| CaptionError::malformed_timestamp(value, "timestamp overflows"))
}

/// Digits past microsecond precision are dropped.
fn fraction_to_micros(digits: &str, value: &str) -> Result<u64> {
    let mut padded: String = digits.chars().take(6).collect();
    while padded.len() < 6 {
        padded.push('0');
    }
    padded
        .parse()
        .map_err(|_| CaptionError::malformed_timestamp(value, "invalid fraction"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_micros(micros: f64, value: &str) -> Result<u64> {
    if !micros.is_finite() || micros < 0.0 || micros > u64::MAX as f64 {
        return Err(CaptionError::malformed_timestamp(value, "timestamp out of range"));
    }
    Ok(micros.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_known_values() {
        assert_eq!(parse_srt("00:00:17,000").unwrap(), 17_000_000);
        assert_eq!(parse_srt("00:00:18,752").unwrap(), 18_752_000);
        assert_eq!(parse_srt("01:02:03,004").unwrap(), 3_723_004_000);
        assert_eq!(parse_srt("100:00:00,000").unwrap(), 360_000_000_000);
    }

    #[test]
    fn srt_rejects_other_dialects() {
        for bad in ["00:00:17.000", "0:17,000", "00:00:17,00", "00:00:17,000 ", "aa:bb:cc,ddd", ""] {
            let err = parse_srt(bad).unwrap_err();
            assert!(
                matches!(err, CaptionError::MalformedTimestamp { .. }),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn srt_rejects_out_of_range_fields() {
        assert!(parse_srt("00:60:00,000").is_err());
        assert!(parse_srt("00:00:60,000").is_err());
    }

    #[test]
    fn dfxp_clock_times() {
        assert_eq!(parse_dfxp("00:00:18.752").unwrap(), 18_752_000);
        assert_eq!(parse_dfxp("00:00:20.887").unwrap(), 20_887_000);
        assert_eq!(parse_dfxp("0:00:02.07").unwrap(), 2_070_000);
        assert_eq!(parse_dfxp("00:01:00").unwrap(), 60_000_000);
        assert_eq!(parse_dfxp("00:00:01.0000015").unwrap(), 1_000_001);
    }

    #[test]
    fn dfxp_offset_times() {
        assert_eq!(parse_dfxp("5.0s").unwrap(), 5_000_000);
        assert_eq!(parse_dfxp("10ms").unwrap(), 10_000);
        assert_eq!(parse_dfxp("1.5m").unwrap(), 90_000_000);
        assert_eq!(parse_dfxp("2h").unwrap(), 7_200_000_000);
    }

    #[test]
    fn dfxp_rejects_garbage() {
        assert!(parse_dfxp("").is_err());
        assert!(parse_dfxp("00:00:18,752").is_err());
        assert!(parse_dfxp("soon").is_err());
        assert!(parse_dfxp("5x").is_err());
    }

    #[test]
    fn webvtt_optional_hours() {
        assert_eq!(parse_webvtt("01:02.500").unwrap(), 62_500_000);
        assert_eq!(parse_webvtt("00:01:02.500").unwrap(), 62_500_000);
        assert_eq!(parse_webvtt("10:00:00.001").unwrap(), 36_000_001_000);
    }

    #[test]
    fn webvtt_ignores_cue_settings() {
        assert_eq!(
            parse_webvtt("00:00:05.000 align:start position:10%").unwrap(),
            5_000_000
        );
    }

    #[test]
    fn webvtt_rejects_bad_input() {
        assert!(parse_webvtt("1:02.500").is_err());
        assert!(parse_webvtt("00:01:02,500").is_err());
        assert!(parse_webvtt("00:01:02.5").is_err());
        assert!(parse_webvtt("00:61.000").is_err());
    }

    #[test]
    fn formatting() {
        assert_eq!(format_srt(0), "00:00:00,000");
        assert_eq!(format_srt(3_723_004_000), "01:02:03,004");
        assert_eq!(format_dfxp(14_848_000), "00:00:14.848");
        assert_eq!(format_webvtt(62_500_000), "00:01:02.500");
        assert_eq!(format_dfxp(1_999), "00:00:00.001");
    }

    #[test]
    fn dialect_dispatch() {
        assert_eq!(Dialect::Srt.parse("00:00:01,000").unwrap(), 1_000_000);
        assert_eq!(Dialect::Dfxp.format(1_000_000), "00:00:01.000");
        assert_eq!(Dialect::WebVtt.to_string(), "WebVTT");
    }
}

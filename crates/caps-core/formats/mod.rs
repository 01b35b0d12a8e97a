//! Format adapters and the traits they implement
//!
//! Each supported format provides a [`CaptionReader`] and a
//! [`CaptionWriter`]. Readers sniff content with
//! [`CaptionReader::detect`], which [`detect_format`] uses to pick an
//! adapter for unknown input.
//!
//! # Example
//!
//! ```rust
//! use caps_core::formats::{convert, detect_format, CaptionFormat};
//!
//! let srt = "1\n00:00:01,000 --> 00:00:02,500\nHello\n";
//! assert_eq!(detect_format(srt), Some(CaptionFormat::Srt));
//!
//! let vtt = convert(srt, CaptionFormat::WebVtt)?;
//! assert!(vtt.starts_with("WEBVTT"));
//! assert!(vtt.contains("00:00:01.000 --> 00:00:02.500"));
//! # Ok::<(), caps_core::CaptionError>(())
//! ```

use crate::model::CaptionSet;
use crate::utils::errors::{CaptionError, Result};
use core::fmt;

pub mod dfxp;
pub mod srt;
pub mod webvtt;

pub use dfxp::{DfxpOptions, DfxpReader, DfxpWriter, DfxpWriterOptions};
pub use srt::{SrtOptions, SrtReader, SrtWriter};
pub use webvtt::{WebVttOptions, WebVttReader, WebVttWriter};

/// Supported caption formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionFormat {
    /// TTML / DFXP (XML)
    Dfxp,
    /// SubRip
    Srt,
    /// WebVTT
    WebVtt,
}

impl CaptionFormat {
    /// Every supported format, in detection priority order
    pub const ALL: [Self; 3] = [Self::WebVtt, Self::Dfxp, Self::Srt];

    /// Human-readable format name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dfxp => "DFXP",
            Self::Srt => "SRT",
            Self::WebVtt => "WebVTT",
        }
    }

    /// File extensions associated with the format
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Dfxp => &["dfxp", "ttml", "xml"],
            Self::Srt => &["srt"],
            Self::WebVtt => &["vtt", "webvtt"],
        }
    }

    /// MIME type of the format
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Dfxp => "application/ttml+xml",
            Self::Srt => "application/x-subrip",
            Self::WebVtt => "text/vtt",
        }
    }

    /// Find the format for a file extension (case-insensitive, no dot)
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| {
            format
                .extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability to sniff and parse one caption format
pub trait CaptionReader: fmt::Debug + Send + Sync {
    /// Format this reader understands
    fn format(&self) -> CaptionFormat;

    /// Best-effort check whether `content` is in this reader's format
    fn detect(&self, content: &str) -> bool;

    /// Parse `content` into a fresh caption set
    ///
    /// # Errors
    ///
    /// Returns a [`CaptionError`] describing why the content could not be
    /// read. [`CaptionError::EmptyDocument`] carries the (empty) set.
    fn read(&self, content: &str) -> Result<CaptionSet>;
}

/// Capability to serialize a caption set into one format
pub trait CaptionWriter: fmt::Debug + Send + Sync {
    /// Format this writer produces
    fn format(&self) -> CaptionFormat;

    /// Serialize `set` to bytes
    ///
    /// # Errors
    ///
    /// Returns a [`CaptionError`] if serialization fails.
    fn write(&self, set: &CaptionSet) -> Result<Vec<u8>>;

    /// Serialize `set` to a string
    ///
    /// # Errors
    ///
    /// Returns a [`CaptionError`] if serialization fails or the output is not
    /// valid UTF-8.
    fn write_string(&self, set: &CaptionSet) -> Result<String> {
        Ok(String::from_utf8(self.write(set)?)?)
    }
}

/// Reader with default options for `format`
#[must_use]
pub fn reader_for(format: CaptionFormat) -> Box<dyn CaptionReader> {
    match format {
        CaptionFormat::Dfxp => Box::new(DfxpReader::new()),
        CaptionFormat::Srt => Box::new(SrtReader::new()),
        CaptionFormat::WebVtt => Box::new(WebVttReader::new()),
    }
}

/// Writer with default options for `format`
#[must_use]
pub fn writer_for(format: CaptionFormat) -> Box<dyn CaptionWriter> {
    match format {
        CaptionFormat::Dfxp => Box::new(DfxpWriter::new()),
        CaptionFormat::Srt => Box::new(SrtWriter::new()),
        CaptionFormat::WebVtt => Box::new(WebVttWriter::new()),
    }
}

/// Detect the format of `content`
///
/// Readers are asked in [`CaptionFormat::ALL`] order; WebVTT goes first
/// because its signature is unambiguous.
#[must_use]
pub fn detect_format(content: &str) -> Option<CaptionFormat> {
    let detected = CaptionFormat::ALL
        .into_iter()
        .find(|format| reader_for(*format).detect(content));
    log::debug!("detected caption format: {detected:?}");
    detected
}

/// Read `content` in whatever format it is detected as
///
/// # Errors
///
/// Returns [`CaptionError::StructuralError`] if no format matches, or the
/// selected reader's error.
pub fn read_any(content: &str) -> Result<(CaptionFormat, CaptionSet)> {
    let format = detect_format(content)
        .ok_or_else(|| CaptionError::structural("content does not match any caption format"))?;
    let set = reader_for(format).read(content)?;
    Ok((format, set))
}

/// Detect, read and re-emit `content` as `target`
///
/// # Errors
///
/// Returns the first error raised by detection, reading or writing.
pub fn convert(content: &str, target: CaptionFormat) -> Result<String> {
    let (source, set) = read_any(content)?;
    log::debug!(
        "converting {} captions from {source} to {target}",
        set.len()
    );
    writer_for(target).write_string(&set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup() {
        assert_eq!(CaptionFormat::from_extension("SRT"), Some(CaptionFormat::Srt));
        assert_eq!(CaptionFormat::from_extension("ttml"), Some(CaptionFormat::Dfxp));
        assert_eq!(CaptionFormat::from_extension("vtt"), Some(CaptionFormat::WebVtt));
        assert_eq!(CaptionFormat::from_extension("ass"), None);
    }

    #[test]
    fn factories_agree_on_format() {
        for format in CaptionFormat::ALL {
            assert_eq!(reader_for(format).format(), format);
            assert_eq!(writer_for(format).format(), format);
        }
    }

    #[test]
    fn detection_order() {
        assert_eq!(
            detect_format("WEBVTT\n\n00:01.000 --> 00:02.000\nhi\n"),
            Some(CaptionFormat::WebVtt)
        );
        assert_eq!(
            detect_format("<tt xmlns=\"http://www.w3.org/ns/ttml\"><body/></tt>"),
            Some(CaptionFormat::Dfxp)
        );
        assert_eq!(detect_format("plain prose"), None);
    }

    #[test]
    fn read_any_rejects_unknown() {
        assert!(matches!(
            read_any("nothing to see"),
            Err(CaptionError::StructuralError(_))
        ));
    }
}

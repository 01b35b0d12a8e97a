//! WebVTT support
//!
//! The reader is a plain-text projection of WebVTT: cue timing and text are
//! kept, inline cue markup is stripped (voice spans become a
//! `"Speaker: "` prefix) and cue settings are ignored.

mod markup;
mod reader;
mod writer;

pub use markup::strip_markup;
pub use reader::WebVttReader;
pub use writer::WebVttWriter;

use crate::model::DEFAULT_LANGUAGE;

/// Signature token every WebVTT file carries
pub const SIGNATURE: &str = "WEBVTT";

/// Configuration for WebVTT reading and writing
///
/// # Example
///
/// ```rust
/// use caps_core::formats::WebVttOptions;
///
/// let options = WebVttOptions::default().with_ignore_timing_errors(true);
/// assert!(options.ignore_timing_errors);
/// assert_eq!(options.language, "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebVttOptions {
    /// Language the reader files captions under, and the writer emits
    pub language: String,
    /// Accept any cue timing instead of enforcing `start <= end` and
    /// non-decreasing start times
    pub ignore_timing_errors: bool,
}

impl Default for WebVttOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            ignore_timing_errors: false,
        }
    }
}

impl WebVttOptions {
    /// Set the caption language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enable or disable timing validation
    #[must_use]
    pub const fn with_ignore_timing_errors(mut self, ignore: bool) -> Self {
        self.ignore_timing_errors = ignore;
        self
    }
}

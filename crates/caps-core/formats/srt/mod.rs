//! SubRip (SRT) support
//!
//! SRT files are repeating blocks of an optional counter line, a
//! `start --> end` timing line, one or more text lines and a blank line.

mod reader;
mod writer;

pub use reader::SrtReader;
pub use writer::SrtWriter;

use crate::model::DEFAULT_LANGUAGE;

/// Configuration for SRT reading and writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtOptions {
    /// Language the reader files captions under, and the writer emits.
    ///
    /// The writer falls back to the first language of the set when this one
    /// has no captions.
    pub language: String,
}

impl Default for SrtOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl SrtOptions {
    /// Options using `language`
    #[must_use]
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

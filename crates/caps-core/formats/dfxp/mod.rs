//! TTML / DFXP support
//!
//! The reader walks the document as a stream of XML events and keeps going
//! past malformations it can contain to a single paragraph. The writer
//! re-expands the caption model into `tt/head/body` with `tts:` styling
//! attributes.

mod attributes;
mod entities;
mod reader;
mod writer;

pub use reader::DfxpReader;
pub use writer::DfxpWriter;

use crate::model::DEFAULT_LANGUAGE;

/// TTML namespace
pub const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";

/// TTML styling namespace, bound to the `tts` prefix
pub const STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml#styling";

/// Configuration for the DFXP reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfxpOptions {
    /// Language for captions in a `div` with no `xml:lang`
    pub default_language: String,
}

impl Default for DfxpOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl DfxpOptions {
    /// Options using `language` for untagged divs
    #[must_use]
    pub fn with_default_language(language: impl Into<String>) -> Self {
        Self {
            default_language: language.into(),
        }
    }
}

/// Configuration for the DFXP writer
///
/// # Example
///
/// ```rust
/// use caps_core::formats::DfxpWriterOptions;
///
/// assert_eq!(DfxpWriterOptions::default().indent, Some(2));
/// assert_eq!(DfxpWriterOptions::compact().indent, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfxpWriterOptions {
    /// Spaces per nesting level, or `None` for single-line output
    pub indent: Option<usize>,
}

impl Default for DfxpWriterOptions {
    fn default() -> Self {
        Self { indent: Some(2) }
    }
}

impl DfxpWriterOptions {
    /// Options that disable pretty printing
    #[must_use]
    pub const fn compact() -> Self {
        Self { indent: None }
    }
}

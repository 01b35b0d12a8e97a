//! Error categorization and suggestions for caption errors
//!
//! Groups `CaptionError` variants so callers can decide how to report a
//! failed conversion without matching every variant.

use super::CaptionError;
use core::fmt;

/// Error category for filtering and user interface organization
///
/// # Examples
///
/// ```rust
/// use caps_core::utils::errors::{CaptionError, ErrorCategory};
///
/// let error = CaptionError::malformed_timestamp("1:2", "missing milliseconds");
/// assert_eq!(error.category(), ErrorCategory::Timing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Timestamp grammar or cue ordering problems
    Timing,

    /// Document structure could not be located
    Structure,

    /// Document parsed but carried no usable content
    Content,

    /// Serialization and buffer errors on the writing side
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timing => write!(f, "timing"),
            Self::Structure => write!(f, "structure"),
            Self::Content => write!(f, "content"),
            Self::Io => write!(f, "io"),
        }
    }
}

impl CaptionError {
    /// Get the category this error belongs to
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedTimestamp { .. } | Self::InvalidTimingOrder { .. } => {
                ErrorCategory::Timing
            }
            Self::StructuralError(_) => ErrorCategory::Structure,
            Self::EmptyDocument { .. } => ErrorCategory::Content,
            Self::Xml(_) | Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Get a short hint for resolving the error, if one applies
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedTimestamp { .. } => {
                Some("Check the timestamp separators: SRT uses ',' before milliseconds, DFXP and WebVTT use '.'")
            }
            Self::InvalidTimingOrder { .. } => {
                Some("Sort cues by start time or read with ignore_timing_errors enabled")
            }
            Self::StructuralError(_) => Some("A DFXP document needs a <tt> root with a <body>"),
            Self::EmptyDocument { .. } => Some("Verify that the input is of the expected format"),
            Self::Xml(_) | Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CaptionSet;

    #[test]
    fn categories_match_variants() {
        assert_eq!(
            CaptionError::invalid_timing_order(3, "out of order").category(),
            ErrorCategory::Timing
        );
        assert_eq!(
            CaptionError::structural("no body").category(),
            ErrorCategory::Structure
        );
        assert_eq!(
            CaptionError::empty_document("SRT", CaptionSet::new()).category(),
            ErrorCategory::Content
        );
        assert_eq!(CaptionError::Xml("bad".into()).category(), ErrorCategory::Io);
    }

    #[test]
    fn suggestions_present_for_reader_errors() {
        assert!(CaptionError::malformed_timestamp("x", "bad")
            .suggestion()
            .is_some());
        assert!(CaptionError::Io("closed".into()).suggestion().is_none());
    }

    #[test]
    fn category_display() {
        assert_eq!(ErrorCategory::Timing.to_string(), "timing");
        assert_eq!(ErrorCategory::Structure.to_string(), "structure");
    }
}

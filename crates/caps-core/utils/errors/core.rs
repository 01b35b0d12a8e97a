//! Core error type for caption reading and writing
//!
//! Provides the `CaptionError` enum returned by every reader, writer and
//! timestamp codec in the crate.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Recover from per-element problems inside a reader, fail the read otherwise
//! - Never downgrade a failed timestamp to a default value

use thiserror::Error;

use crate::model::CaptionSet;

/// Main error type for caption operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// A timing field does not match its dialect's grammar
    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: String },

    /// Cue timing violates ordering rules (`start <= end`, monotonic starts)
    #[error("Invalid timing order at cue {index}: {reason}")]
    InvalidTimingOrder { index: usize, reason: String },

    /// Document lacks the structure needed to locate any captions
    #[error("Structural error: {0}")]
    StructuralError(String),

    /// Input was understood but produced no captions for any language.
    ///
    /// The (empty) set built while reading is carried along so callers can
    /// still inspect discovered languages, styles and regions.
    #[error("{format} document contains no captions")]
    EmptyDocument {
        format: &'static str,
        set: Box<CaptionSet>,
    },

    /// XML serialization failure while writing
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O failure while writing into a buffer
    #[error("I/O error: {0}")]
    Io(String),
}

impl CaptionError {
    /// Create a malformed timestamp error
    pub fn malformed_timestamp<T: ::core::fmt::Display>(value: T, reason: &str) -> Self {
        Self::MalformedTimestamp {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a timing order error for the cue at `index` (0-based)
    pub fn invalid_timing_order<T: ::core::fmt::Display>(index: usize, reason: T) -> Self {
        Self::InvalidTimingOrder {
            index,
            reason: reason.to_string(),
        }
    }

    /// Create a structural error
    pub fn structural<T: ::core::fmt::Display>(message: T) -> Self {
        Self::StructuralError(message.to_string())
    }

    /// Create an empty document error carrying the set that was read
    #[must_use]
    pub fn empty_document(format: &'static str, set: CaptionSet) -> Self {
        Self::EmptyDocument {
            format,
            set: Box::new(set),
        }
    }

    /// Take the partially-read set out of an `EmptyDocument` error
    #[must_use]
    pub fn into_partial_set(self) -> Option<CaptionSet> {
        match self {
            Self::EmptyDocument { set, .. } => Some(*set),
            _ => None,
        }
    }

    /// Borrow the partially-read set of an `EmptyDocument` error
    #[must_use]
    pub fn partial_set(&self) -> Option<&CaptionSet> {
        match self {
            Self::EmptyDocument { set, .. } => Some(set),
            _ => None,
        }
    }

    /// Attach a 1-based source line number to a timestamp error
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedTimestamp { value, reason } => Self::MalformedTimestamp {
                value,
                reason: format!("{reason} (line {line})"),
            },
            other => other,
        }
    }

    /// Check if error comes from bad timing data
    #[must_use]
    pub const fn is_timing_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedTimestamp { .. } | Self::InvalidTimingOrder { .. }
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CaptionError>;

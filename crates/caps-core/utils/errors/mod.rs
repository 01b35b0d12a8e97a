//! Error types for caption reading, writing and timestamp conversion
//!
//! # Examples
//!
//! ```rust
//! use caps_core::utils::errors::{CaptionError, ErrorCategory};
//!
//! let err = CaptionError::structural("missing <body>");
//! assert_eq!(err.category(), ErrorCategory::Structure);
//! assert!(err.suggestion().is_some());
//! ```

mod category;
mod core;

pub use self::core::{CaptionError, Result};
pub use category::ErrorCategory;

/// Convert from standard I/O errors raised by buffered writers
impl From<std::io::Error> for CaptionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{err}"))
    }
}

/// Convert from XML reader/writer errors
impl From<quick_xml::Error> for CaptionError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(format!("{err}"))
    }
}

/// Convert from UTF-8 errors when turning written bytes into a string
impl From<std::string::FromUtf8Error> for CaptionError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Io(format!("Invalid UTF-8 output: {err}"))
    }
}

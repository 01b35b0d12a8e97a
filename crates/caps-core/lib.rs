//! # caps-core
//!
//! Caption format conversion between TTML/DFXP, SubRip (SRT) and WebVTT
//! through one format-neutral intermediate representation.
//!
//! ## Features
//!
//! - **One model**: every reader produces a [`CaptionSet`], every writer
//!   consumes one, so any input converts to any output
//! - **Microsecond timing**: all timestamps go through the [`time`] codec
//! - **Lenient DFXP**: malformed paragraphs are dropped, not fatal
//! - **Format sniffing**: [`formats::detect_format`] picks a reader for
//!   unknown content
//! - **Thread-safe**: readers and writers hold only immutable options
//!
//! ## Quick Start
//!
//! ```rust
//! use caps_core::formats::{CaptionReader, CaptionWriter, SrtReader, WebVttWriter};
//!
//! let srt = "1\n00:00:09,209 --> 00:00:12,312\n( clock ticking )\n";
//!
//! let set = SrtReader::new().read(srt)?;
//! let vtt = WebVttWriter::new().write_string(&set)?;
//!
//! assert_eq!(vtt, "WEBVTT\n\n00:00:09.209 --> 00:00:12.312\n( clock ticking )\n");
//! # Ok::<(), caps_core::CaptionError>(())
//! ```
//!
//! ## Logging
//!
//! Readers and writers log through the `log` facade: per-document summaries
//! at `debug`, recovered malformations at `warn`. No logger is installed by
//! the library.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod formats;
pub mod model;
pub mod time;
pub mod utils;

pub use formats::{
    convert, detect_format, read_any, reader_for, writer_for, CaptionFormat, CaptionReader,
    CaptionWriter,
};
pub use model::{Caption, CaptionSet, Node, NodeKind, Region, Style, StyleFlags};
pub use time::Microseconds;
pub use utils::{CaptionError, ErrorCategory};

/// Result alias used throughout the crate
pub type Result<T> = utils::errors::Result<T>;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

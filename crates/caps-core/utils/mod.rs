//! Utility functions and shared types for caps-core
//!
//! Contains the error types used across the crate along with the small
//! text and hashing helpers the format readers share.

pub mod errors;
pub mod hashers;
pub mod text;

pub use errors::{CaptionError, ErrorCategory};
pub use hashers::{create_hash_map, create_hash_map_with_capacity, FastHashMap};
pub use text::{is_counter_line, split_lines, strip_bom};

//! Caption intermediate representation
//!
//! Every reader produces, and every writer consumes, a [`CaptionSet`]:
//! captions grouped by language, each carrying microsecond timing and a
//! sequence of [`Node`]s, plus the style and region tables the captions
//! reference by id.
//!
//! # Example
//!
//! ```rust
//! use caps_core::model::{Caption, CaptionSet, Node, Style};
//!
//! let mut set = CaptionSet::new();
//! set.add_style(Style::new("p").with_italics(true));
//!
//! let mut caption = Caption::new(0, 2_000_000).with_style("p");
//! caption.nodes.push(Node::text("Hello"));
//! set.set_captions("en-US", vec![caption]);
//!
//! let first = &set.captions("en-US")[0];
//! assert!(set.style(first.style_id.as_deref().unwrap_or_default()).is_some());
//! ```

mod caption;
mod node;
mod set;
mod style;

pub use caption::Caption;
pub use node::{Node, NodeKind};
pub use set::CaptionSet;
pub use style::{Region, Style, StyleFlags};

/// Language used when a document does not name one
pub const DEFAULT_LANGUAGE: &str = "en-US";

//! Caption content nodes

use super::Style;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Atomic unit of caption content
///
/// A closed set of variants: every consumer matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A run of text, stored unescaped
    Text(String),
    /// A line separator
    LineBreak,
    /// Inline style overlay for the sibling text that follows it
    Style(Style),
}

/// Fieldless mirror of [`Node`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Text`]
    Text,
    /// [`Node::LineBreak`]
    LineBreak,
    /// [`Node::Style`]
    Style,
}

impl Node {
    /// Create a text node
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Which variant this node is
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::LineBreak => NodeKind::LineBreak,
            Self::Style(_) => NodeKind::Style,
        }
    }

    /// Textual content of the node
    ///
    /// Text nodes yield their text, line breaks `"\n"`, and style nodes a
    /// description of the overlay's properties.
    #[must_use]
    pub fn content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::LineBreak => "\n".to_string(),
            Self::Style(style) => style.to_string(),
        }
    }

    /// Text of a text node, `None` for other variants
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::LineBreak | Self::Style(_) => None,
        }
    }
}

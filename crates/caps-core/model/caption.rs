//! A single timed caption

use super::Node;
use crate::time::{format_dfxp, Dialect, Microseconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One timed unit of caption text
///
/// Style and region are references by id into the owning
/// [`CaptionSet`](super::CaptionSet)'s tables.
///
/// # Examples
///
/// ```rust
/// use caps_core::model::{Caption, Node};
///
/// let mut caption = Caption::new(14_848_000, 17_000_000);
/// caption.push_line("MAN:");
/// caption.push_line("When we think");
///
/// assert_eq!(caption.text(), "MAN:\nWhen we think");
/// assert_eq!(caption.format_start(), "00:00:14.848");
/// assert_eq!(caption.nodes[1], Node::LineBreak);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Caption {
    /// Start time in microseconds
    pub start: Microseconds,
    /// End time in microseconds
    pub end: Microseconds,
    /// Content in document order
    pub nodes: Vec<Node>,
    /// Id of the caption's style, if any
    pub style_id: Option<String>,
    /// Id of the caption's region, if any
    pub region_id: Option<String>,
}

impl Caption {
    /// Create a caption with no content
    #[must_use]
    pub const fn new(start: Microseconds, end: Microseconds) -> Self {
        Self {
            start,
            end,
            nodes: Vec::new(),
            style_id: None,
            region_id: None,
        }
    }

    /// Set the style reference
    #[must_use]
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Set the region reference
    #[must_use]
    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    /// True when the caption has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when `start <= end`
    #[must_use]
    pub const fn has_valid_timing(&self) -> bool {
        self.start <= self.end
    }

    /// Duration in microseconds, zero for inverted timing
    #[must_use]
    pub const fn duration(&self) -> Microseconds {
        self.end.saturating_sub(self.start)
    }

    /// Append a text line, separated from existing content by a line break
    pub fn push_line(&mut self, text: impl Into<String>) {
        if !self.nodes.is_empty() {
            self.nodes.push(Node::LineBreak);
        }
        self.nodes.push(Node::Text(text.into()));
    }

    /// Start time as a DFXP clock time
    #[must_use]
    pub fn format_start(&self) -> String {
        format_dfxp(self.start)
    }

    /// End time as a DFXP clock time
    #[must_use]
    pub fn format_end(&self) -> String {
        format_dfxp(self.end)
    }

    /// Start time in the given dialect
    #[must_use]
    pub fn format_start_as(&self, dialect: Dialect) -> String {
        dialect.format(self.start)
    }

    /// End time in the given dialect
    #[must_use]
    pub fn format_end_as(&self, dialect: Dialect) -> String {
        dialect.format(self.end)
    }

    /// Plain-text projection of the content
    ///
    /// Line breaks become `\n`, text runs are concatenated and style
    /// overlays are skipped.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(run) => text.push_str(run),
                Node::LineBreak => text.push('\n'),
                Node::Style(_) => {}
            }
        }
        text
    }
}

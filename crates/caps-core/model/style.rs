//! Style and region definitions
//!
//! Both are identified by id and referenced, never copied, by captions.
//! A `Style` also doubles as the payload of an inline style overlay node.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Text decoration flags of a style
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StyleFlags: u8 {
        /// Italic text
        const ITALICS = 1 << 0;
        /// Bold text
        const BOLD = 1 << 1;
        /// Underlined text
        const UNDERLINE = 1 << 2;
    }
}

/// Appearance metadata for caption text
///
/// String properties are empty when the source document did not set them.
///
/// # Examples
///
/// ```rust
/// use caps_core::model::Style;
///
/// let style = Style {
///     id: "p".to_string(),
///     font_family: "Arial".to_string(),
///     ..Style::default()
/// }
/// .with_bold(true);
///
/// assert!(style.bold());
/// assert!(!style.italics());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    /// Style id (`xml:id` in DFXP); empty for inline overlays
    pub id: String,
    /// Font family name
    pub font_family: String,
    /// Font size with unit, e.g. `10pt`
    pub font_size: String,
    /// Horizontal alignment, e.g. `center`
    pub text_align: String,
    /// Text color, e.g. `#ffeedd`
    pub color: String,
    /// Decoration flags
    pub flags: StyleFlags,
}

impl Style {
    /// Create an empty style with the given id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether text is italic
    #[must_use]
    pub const fn italics(&self) -> bool {
        self.flags.contains(StyleFlags::ITALICS)
    }

    /// Whether text is bold
    #[must_use]
    pub const fn bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    /// Whether text is underlined
    #[must_use]
    pub const fn underline(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINE)
    }

    /// Set or clear the italics flag
    #[must_use]
    pub fn with_italics(mut self, on: bool) -> Self {
        self.flags.set(StyleFlags::ITALICS, on);
        self
    }

    /// Set or clear the bold flag
    #[must_use]
    pub fn with_bold(mut self, on: bool) -> Self {
        self.flags.set(StyleFlags::BOLD, on);
        self
    }

    /// Set or clear the underline flag
    #[must_use]
    pub fn with_underline(mut self, on: bool) -> Self {
        self.flags.set(StyleFlags::UNDERLINE, on);
        self
    }

    /// True when no property or flag is set (the id is not considered)
    #[must_use]
    pub fn is_unstyled(&self) -> bool {
        self.font_family.is_empty()
            && self.font_size.is_empty()
            && self.text_align.is_empty()
            && self.color.is_empty()
            && self.flags.is_empty()
    }
}

impl fmt::Display for Style {
    /// Writes the set properties as `name: value` pairs separated by `; `
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = [
            ("font-family", self.font_family.as_str()),
            ("font-size", self.font_size.as_str()),
            ("text-align", self.text_align.as_str()),
            ("color", self.color.as_str()),
        ];
        let flags = [
            (StyleFlags::ITALICS, "italics"),
            (StyleFlags::BOLD, "bold"),
            (StyleFlags::UNDERLINE, "underline"),
        ];

        let mut first = true;
        let mut separator = |f: &mut fmt::Formatter<'_>| {
            if first {
                first = false;
                Ok(())
            } else {
                write!(f, "; ")
            }
        };

        for (name, value) in properties {
            if !value.is_empty() {
                separator(f)?;
                write!(f, "{name}: {value}")?;
            }
        }
        for (flag, name) in flags {
            if self.flags.contains(flag) {
                separator(f)?;
                write!(f, "{name}")?;
            }
        }
        Ok(())
    }
}

/// On-screen positioning metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Region id (`xml:id` in DFXP)
    pub id: String,
    /// Vertical alignment inside the region, e.g. `after`
    pub display_align: String,
    /// Horizontal alignment, e.g. `center`
    pub text_align: String,
}

impl Region {
    /// Create an empty region with the given id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

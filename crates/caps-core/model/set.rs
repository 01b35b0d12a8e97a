//! Language-keyed caption collection

use super::{Caption, Region, Style};
use crate::utils::hashers::{create_hash_map, FastHashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Captions of one document, grouped by language tag
///
/// Also owns the style and region tables that captions reference by id.
/// Tables keep the order definitions were discovered in.
///
/// # Examples
///
/// ```rust
/// use caps_core::model::{Caption, CaptionSet};
///
/// let mut set = CaptionSet::new();
/// assert!(set.is_empty());
///
/// set.set_captions("en-US", vec![Caption::new(0, 1_000_000)]);
/// assert_eq!(set.captions("en-US").len(), 1);
/// assert!(set.captions("fr-FR").is_empty());
/// assert!(!set.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaptionSet {
    captions: FastHashMap<String, Vec<Caption>>,
    styles: Vec<Style>,
    regions: Vec<Region>,
}

impl CaptionSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            captions: create_hash_map(),
            styles: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Replace the captions of `language`
    pub fn set_captions(&mut self, language: impl Into<String>, captions: Vec<Caption>) {
        self.captions.insert(language.into(), captions);
    }

    /// Append one caption to `language`, creating the language if needed
    pub fn push_caption(&mut self, language: &str, caption: Caption) {
        if let Some(captions) = self.captions.get_mut(language) {
            captions.push(caption);
        } else {
            self.captions.insert(language.to_string(), vec![caption]);
        }
    }

    /// Register `language` with no captions unless already present
    pub fn ensure_language(&mut self, language: &str) {
        if !self.captions.contains_key(language) {
            self.captions.insert(language.to_string(), Vec::new());
        }
    }

    /// Captions of `language`; empty for an unknown language
    #[must_use]
    pub fn captions(&self, language: &str) -> &[Caption] {
        self.captions.get(language).map_or(&[], Vec::as_slice)
    }

    /// Mutable captions of `language`, if the language is present
    pub fn captions_mut(&mut self, language: &str) -> Option<&mut Vec<Caption>> {
        self.captions.get_mut(language)
    }

    /// Whether `language` is present (possibly with no captions)
    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.captions.contains_key(language)
    }

    /// Language tags in sorted order
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.captions.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// `(language, captions)` pairs in sorted language order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Caption])> {
        self.languages()
            .into_iter()
            .map(move |language| (language, self.captions(language)))
    }

    /// True iff every language has no captions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captions.values().all(Vec::is_empty)
    }

    /// Total number of captions across all languages
    #[must_use]
    pub fn len(&self) -> usize {
        self.captions.values().map(Vec::len).sum()
    }

    /// Style definitions in discovery order
    #[must_use]
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Region definitions in discovery order
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a style by id
    #[must_use]
    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.id == id)
    }

    /// Look up a region by id
    #[must_use]
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Add a style, replacing an existing definition with the same id in place
    pub fn add_style(&mut self, style: Style) {
        if let Some(existing) = self.styles.iter_mut().find(|s| s.id == style.id) {
            *existing = style;
        } else {
            self.styles.push(style);
        }
    }

    /// Add a region, replacing an existing definition with the same id in place
    pub fn add_region(&mut self, region: Region) {
        if let Some(existing) = self.regions.iter_mut().find(|r| r.id == region.id) {
            *existing = region;
        } else {
            self.regions.push(region);
        }
    }

    /// Move every caption by `offset` microseconds, clamping at zero
    pub fn shift(&mut self, offset: i64) {
        let apply = |value: u64| {
            if offset >= 0 {
                value.saturating_add(offset.unsigned_abs())
            } else {
                value.saturating_sub(offset.unsigned_abs())
            }
        };

        for caption in self.captions.values_mut().flatten() {
            caption.start = apply(caption.start);
            caption.end = apply(caption.end);
        }
    }
}

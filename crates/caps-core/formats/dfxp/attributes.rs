//! Attribute access for DFXP elements
//!
//! TTML authoring tools disagree on attribute casing (`tts:fontSize` vs
//! `tts:fontsize`), so attributes are looked up by lowercased local name
//! and the namespace prefix is ignored.

use super::entities::decode_entities;
use crate::model::{Region, Style, StyleFlags};
use crate::utils::hashers::{create_hash_map, FastHashMap};
use quick_xml::events::BytesStart;

/// Attributes of one element, keyed by lowercased local name
#[derive(Debug, Default)]
pub(super) struct Attributes {
    values: FastHashMap<String, String>,
}

impl Attributes {
    /// Collect the attributes of `element`
    ///
    /// Malformed attributes are skipped and references that fail to decode
    /// are kept raw. The first occurrence of a local name wins.
    pub(super) fn collect(element: &BytesStart<'_>) -> Self {
        let mut values = create_hash_map();

        for attr in element.attributes().with_checks(false) {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) => {
                    log::warn!("skipping malformed DFXP attribute: {err}");
                    continue;
                }
            };

            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_ascii_lowercase();
            let value = decode_entities(&String::from_utf8_lossy(&attr.value)).into_owned();
            values.entry(key).or_insert(value);
        }

        Self { values }
    }

    /// Value of the attribute whose local name matches `name` in any case
    pub(super) fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Value of `name`, empty when absent
    fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().trim().to_string()
    }

    /// Style properties carried by `tts:*` attributes
    ///
    /// Used for both `head/styling/style` definitions and inline `span`
    /// overlays; the id is only read for definitions.
    pub(super) fn style(&self, with_id: bool) -> Style {
        let mut flags = StyleFlags::empty();
        flags.set(
            StyleFlags::ITALICS,
            self.get("fontStyle")
                .is_some_and(|v| matches!(v.trim(), "italic" | "oblique")),
        );
        flags.set(
            StyleFlags::BOLD,
            self.get("fontWeight").is_some_and(|v| v.trim() == "bold"),
        );
        flags.set(
            StyleFlags::UNDERLINE,
            self.get("textDecoration")
                .is_some_and(|v| v.split_whitespace().any(|d| d == "underline")),
        );

        Style {
            id: if with_id { self.text("id") } else { String::new() },
            font_family: self.text("fontFamily"),
            font_size: self.text("fontSize"),
            text_align: self.text("textAlign"),
            color: self.text("color"),
            flags,
        }
    }

    /// Region definition from a `head/layout/region` element
    pub(super) fn region(&self) -> Region {
        Region {
            id: self.text("id"),
            display_align: self.text("displayAlign"),
            text_align: self.text("textAlign"),
        }
    }
}

/// `tts:*` attributes that reproduce `style`, in a stable order
pub(super) fn style_attributes(style: &Style) -> Vec<(&'static str, &str)> {
    let mut attrs = Vec::new();
    let properties = [
        ("tts:fontFamily", style.font_family.as_str()),
        ("tts:fontSize", style.font_size.as_str()),
        ("tts:textAlign", style.text_align.as_str()),
        ("tts:color", style.color.as_str()),
    ];
    attrs.extend(properties.into_iter().filter(|(_, value)| !value.is_empty()));

    if style.italics() {
        attrs.push(("tts:fontStyle", "italic"));
    }
    if style.bold() {
        attrs.push(("tts:fontWeight", "bold"));
    }
    if style.underline() {
        attrs.push(("tts:textDecoration", "underline"));
    }
    attrs
}

/// `tts:*` attributes that reproduce `region`
pub(super) fn region_attributes(region: &Region) -> Vec<(&'static str, &str)> {
    [
        ("tts:displayAlign", region.display_align.as_str()),
        ("tts:textAlign", region.text_align.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes_of(tag: &str) -> Attributes {
        Attributes::collect(&BytesStart::from_content(tag, tag.find(' ').unwrap_or(tag.len())))
    }

    #[test]
    fn lookup_ignores_case_and_prefix() {
        let attrs = attributes_of(r#"style xml:id="p" tts:fontfamily="Arial" tts:FontSize="10pt""#);
        assert_eq!(attrs.get("id"), Some("p"));
        assert_eq!(attrs.get("fontFamily"), Some("Arial"));
        assert_eq!(attrs.get("fontSize"), Some("10pt"));
        assert_eq!(attrs.get("color"), None);
    }

    #[test]
    fn entities_in_values_are_decoded() {
        let attrs = attributes_of(r#"style tts:fontFamily="A &amp; B""#);
        assert_eq!(attrs.get("fontFamily"), Some("A & B"));
    }

    #[test]
    fn style_flags_from_attributes() {
        let style = attributes_of(
            r#"span tts:fontStyle="italic" tts:fontWeight="bold" tts:textDecoration="underline lineThrough""#,
        )
        .style(false);
        assert!(style.italics());
        assert!(style.bold());
        assert!(style.underline());
        assert!(style.id.is_empty());
    }

    #[test]
    fn style_attributes_skip_unset_properties() {
        let style = Style {
            text_align: "right".to_string(),
            ..Style::default()
        }
        .with_bold(true);
        assert_eq!(
            style_attributes(&style),
            vec![("tts:textAlign", "right"), ("tts:fontWeight", "bold")]
        );
    }

    #[test]
    fn region_from_attributes() {
        let region =
            attributes_of(r#"region tts:displayAlign="after" tts:textAlign="center" xml:id="bottom""#)
                .region();
        assert_eq!(region.id, "bottom");
        assert_eq!(region.display_align, "after");
        assert_eq!(region_attributes(&region).len(), 2);
    }
}

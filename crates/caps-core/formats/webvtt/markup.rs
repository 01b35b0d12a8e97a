//! Inline cue markup stripping

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn voice_regex() -> &'static Regex {
    static VOICE_REGEX: OnceLock<Regex> = OnceLock::new();
    VOICE_REGEX.get_or_init(|| {
        Regex::new(r"<v(?:\.[\w-]+)*\s+([^>]*)>").expect("Failed to compile voice span regex")
    })
}

fn span_regex() -> &'static Regex {
    static SPAN_REGEX: OnceLock<Regex> = OnceLock::new();
    SPAN_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:[cibuv]|ruby|rt|lang)(?:[.\s][^>]*)?>")
            .expect("Failed to compile cue span regex")
    })
}

fn timestamp_tag_regex() -> &'static Regex {
    static TIMESTAMP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_TAG_REGEX.get_or_init(|| {
        Regex::new(r"<(?:\d+:)?\d{2}:\d{2}\.\d{3}>").expect("Failed to compile timestamp tag regex")
    })
}

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", "\u{a0}"),
    ("&lrm;", "\u{200e}"),
    ("&rlm;", "\u{200f}"),
    // Last, so `&amp;lt;` decodes to `&lt;` and not `<`.
    ("&amp;", "&"),
];

/// Reduce one line of cue text to plain text
///
/// `<v Speaker>` becomes `"Speaker: "`; `c`, `i`, `b`, `u`, `v`, `lang`,
/// `ruby` and `rt` tags and inline timestamps are removed with their inner
/// text kept; character references are decoded.
///
/// # Examples
///
/// ```rust
/// use caps_core::formats::webvtt::strip_markup;
///
/// assert_eq!(strip_markup("<v Roger Bingham>We are in New York City"), "Roger Bingham: We are in New York City");
/// assert_eq!(strip_markup("<c.yellow><i>Hello</i></c> &amp; bye"), "Hello & bye");
/// ```
#[must_use]
pub fn strip_markup(line: &str) -> String {
    let voiced = voice_regex().replace_all(line, "${1}: ");
    let unspanned = span_regex().replace_all(&voiced, "");
    let untimed = timestamp_tag_regex().replace_all(&unspanned, "");
    decode_entities(&untimed).into_owned()
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    Cow::Owned(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_with_classes() {
        assert_eq!(strip_markup("<v.loud.angry Esme>Stop!</v>"), "Esme: Stop!");
    }

    #[test]
    fn bare_voice_tag_is_removed() {
        assert_eq!(strip_markup("<v>nobody</v>"), "nobody");
    }

    #[test]
    fn ruby_and_lang() {
        assert_eq!(
            strip_markup("<ruby>漢<rt>kan</rt></ruby> <lang en-GB>colour</lang>"),
            "漢kan colour"
        );
    }

    #[test]
    fn unknown_tags_are_kept() {
        assert_eq!(strip_markup("<LAUGHING & WHOOPS!>"), "<LAUGHING & WHOOPS!>");
        assert_eq!(strip_markup("<bold>"), "<bold>");
    }

    #[test]
    fn inline_timestamps() {
        assert_eq!(
            strip_markup("Never <00:00:01.500>drink <00:02.000>liquid"),
            "Never drink liquid"
        );
    }

    #[test]
    fn entities() {
        assert_eq!(strip_markup("a &lt;b&gt; &amp;lt;"), "a <b> &lt;");
    }
}

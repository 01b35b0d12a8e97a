//! WebVTT serialization

use super::{WebVttOptions, SIGNATURE};
use crate::formats::{CaptionFormat, CaptionWriter};
use crate::model::{Caption, CaptionSet};
use crate::time::format_webvtt;
use crate::utils::errors::Result;

/// WebVTT writer
///
/// Writes the captions of one language as plain-text cues. Style overlays
/// are dropped and `&`, `<` and `>` are escaped so the text survives a
/// read back through [`WebVttReader`](super::WebVttReader).
#[derive(Debug, Clone, Default)]
pub struct WebVttWriter {
    options: WebVttOptions,
}

impl WebVttWriter {
    /// Create a writer for the default language
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with explicit options
    #[must_use]
    pub const fn with_options(options: WebVttOptions) -> Self {
        Self { options }
    }

    fn select<'a>(&self, set: &'a CaptionSet) -> &'a [Caption] {
        let preferred = set.captions(&self.options.language);
        if !preferred.is_empty() {
            return preferred;
        }
        set.iter()
            .map(|(_, captions)| captions)
            .find(|captions| !captions.is_empty())
            .unwrap_or_default()
    }

    fn cue_text(caption: &Caption) -> String {
        // A blank line inside the payload would end the cue.
        escape(&caption.text())
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl CaptionWriter for WebVttWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::WebVtt
    }

    fn write(&self, set: &CaptionSet) -> Result<Vec<u8>> {
        let captions = self.select(set);
        let mut out = String::from(SIGNATURE);
        out.push('\n');

        for caption in captions {
            out.push('\n');
            out.push_str(&format!(
                "{} --> {}\n",
                format_webvtt(caption.start),
                format_webvtt(caption.end)
            ));
            let text = Self::cue_text(caption);
            if !text.is_empty() {
                out.push_str(&text);
                out.push('\n');
            }
        }

        log::debug!("wrote {} WebVTT captions", captions.len());
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Style};

    #[test]
    fn writes_header_and_cues() {
        let mut first = Caption::new(1_000_000, 4_000_000);
        first.push_line("Never drink liquid nitrogen.");
        let mut second = Caption::new(5_000_000, 9_000_000);
        second.push_line("It will perforate");
        second.push_line("your stomach.");

        let mut set = CaptionSet::new();
        set.set_captions("en-US", vec![first, second]);

        let out = WebVttWriter::new().write_string(&set).unwrap();
        assert_eq!(
            out,
            "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nNever drink liquid nitrogen.\n\n00:00:05.000 --> 00:00:09.000\nIt will perforate\nyour stomach.\n"
        );
    }

    #[test]
    fn markup_characters_are_escaped() {
        let mut caption = Caption::new(0, 1_000_000);
        caption.push_line("<LAUGHING & WHOOPS!>");
        let mut set = CaptionSet::new();
        set.set_captions("en-US", vec![caption]);

        let out = WebVttWriter::new().write_string(&set).unwrap();
        assert!(out.contains("&lt;LAUGHING &amp; WHOOPS!&gt;"));
    }

    #[test]
    fn overlays_and_blank_lines_are_dropped() {
        let mut caption = Caption::new(0, 1_000_000);
        caption.nodes.push(Node::Style(Style::new("").with_italics(true)));
        caption.push_line("a < b");
        caption.push_line("");
        caption.push_line("c");
        let mut set = CaptionSet::new();
        set.set_captions("en-US", vec![caption]);

        let out = WebVttWriter::new().write_string(&set).unwrap();
        assert_eq!(out, "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\na &lt; b\nc\n");
    }

    #[test]
    fn empty_set_writes_signature_only() {
        let out = WebVttWriter::new().write_string(&CaptionSet::new()).unwrap();
        assert_eq!(out, "WEBVTT\n");
    }
}

//! DFXP serialization

use super::attributes::{region_attributes, style_attributes};
use super::{DfxpWriterOptions, STYLING_NAMESPACE, TTML_NAMESPACE};
use crate::formats::{CaptionFormat, CaptionWriter};
use crate::model::{Caption, CaptionSet, Node, DEFAULT_LANGUAGE};
use crate::time::format_dfxp;
use crate::utils::errors::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// DFXP writer
///
/// A [`Node::Style`] opens a `span` that wraps the following nodes up to
/// the next style node or the end of the paragraph.
///
/// # Example
///
/// ```rust
/// use caps_core::formats::{CaptionWriter, DfxpWriter};
/// use caps_core::model::{Caption, CaptionSet};
///
/// let mut caption = Caption::new(1_000_000, 2_000_000);
/// caption.push_line("Fish & chips");
/// let mut set = CaptionSet::new();
/// set.set_captions("en-GB", vec![caption]);
///
/// let xml = DfxpWriter::new().write_string(&set)?;
/// assert!(xml.contains(r#"<div xml:lang="en-GB">"#));
/// assert!(xml.contains(r#"<p begin="00:00:01.000" end="00:00:02.000">Fish &amp; chips</p>"#));
/// # Ok::<(), caps_core::CaptionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfxpWriter {
    options: DfxpWriterOptions,
}

impl DfxpWriter {
    /// Create a pretty-printing writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with explicit options
    #[must_use]
    pub const fn with_options(options: DfxpWriterOptions) -> Self {
        Self { options }
    }

    fn writer(&self) -> Writer<Vec<u8>> {
        match self.options.indent {
            Some(size) => Writer::new_with_indent(Vec::new(), b' ', size),
            None => Writer::new(Vec::new()),
        }
    }
}

fn write_head(writer: &mut Writer<Vec<u8>>, set: &CaptionSet) -> Result<()> {
    if set.styles().is_empty() && set.regions().is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("head")))?;

    if !set.styles().is_empty() {
        writer.write_event(Event::Start(BytesStart::new("styling")))?;
        for style in set.styles() {
            let mut element = BytesStart::new("style");
            element.push_attribute(("xml:id", style.id.as_str()));
            element.extend_attributes(style_attributes(style));
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new("styling")))?;
    }

    if !set.regions().is_empty() {
        writer.write_event(Event::Start(BytesStart::new("layout")))?;
        for region in set.regions() {
            let mut element = BytesStart::new("region");
            element.push_attribute(("xml:id", region.id.as_str()));
            element.extend_attributes(region_attributes(region));
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new("layout")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("head")))?;
    Ok(())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, caption: &Caption) -> Result<()> {
    let begin = format_dfxp(caption.start);
    let end = format_dfxp(caption.end);
    let mut element = BytesStart::new("p");
    element.push_attribute(("begin", begin.as_str()));
    element.push_attribute(("end", end.as_str()));
    if let Some(style) = &caption.style_id {
        element.push_attribute(("style", style.as_str()));
    }
    if let Some(region) = &caption.region_id {
        element.push_attribute(("region", region.as_str()));
    }

    if caption.nodes.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    let mut span_open = false;
    for node in &caption.nodes {
        match node {
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::LineBreak => writer.write_event(Event::Empty(BytesStart::new("br")))?,
            Node::Style(style) => {
                if span_open {
                    writer.write_event(Event::End(BytesEnd::new("span")))?;
                }
                let mut span = BytesStart::new("span");
                span.extend_attributes(style_attributes(style));
                writer.write_event(Event::Start(span))?;
                span_open = true;
            }
        }
    }
    if span_open {
        writer.write_event(Event::End(BytesEnd::new("span")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("p")))?;
    Ok(())
}

impl CaptionWriter for DfxpWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Dfxp
    }

    fn write(&self, set: &CaptionSet) -> Result<Vec<u8>> {
        let mut writer = self.writer();
        let languages = set.languages();
        let root_language = languages.first().copied().unwrap_or(DEFAULT_LANGUAGE);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("tt");
        root.push_attribute(("xml:lang", root_language));
        root.push_attribute(("xmlns", TTML_NAMESPACE));
        root.push_attribute(("xmlns:tts", STYLING_NAMESPACE));
        writer.write_event(Event::Start(root))?;

        write_head(&mut writer, set)?;

        writer.write_event(Event::Start(BytesStart::new("body")))?;
        for (language, captions) in set.iter() {
            let mut div = BytesStart::new("div");
            div.push_attribute(("xml:lang", language));
            if captions.is_empty() {
                writer.write_event(Event::Empty(div))?;
                continue;
            }
            writer.write_event(Event::Start(div))?;
            for caption in captions {
                write_paragraph(&mut writer, caption)?;
            }
            writer.write_event(Event::End(BytesEnd::new("div")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("body")))?;
        writer.write_event(Event::End(BytesEnd::new("tt")))?;

        log::debug!(
            "wrote {} DFXP captions in {} languages",
            set.len(),
            languages.len()
        );
        Ok(writer.into_inner())
    }
}

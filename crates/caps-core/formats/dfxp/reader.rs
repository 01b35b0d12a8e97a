//! Streaming DFXP reader with per-paragraph recovery

use super::attributes::Attributes;
use super::entities::decode_entities;
use super::DfxpOptions;
use crate::formats::{CaptionFormat, CaptionReader};
use crate::model::{Caption, CaptionSet, Node};
use crate::time::parse_dfxp;
use crate::utils::errors::{CaptionError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Role of an open element in the walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Root,
    Head,
    Styling,
    Layout,
    Body,
    Div(String),
    Paragraph,
    Span,
    Other,
}

/// An open element: lowercased local name plus its role
#[derive(Debug)]
struct OpenElement {
    name: String,
    scope: Scope,
}

/// A `p` being filled, with the language it will be filed under
#[derive(Debug)]
struct PendingParagraph {
    language: String,
    caption: Caption,
}

/// Mutable state of one `read` call
#[derive(Debug)]
struct Walk<'a> {
    options: &'a DfxpOptions,
    set: CaptionSet,
    stack: Vec<OpenElement>,
    paragraph: Option<PendingParagraph>,
    seen_root: bool,
    seen_body: bool,
    dropped: usize,
}

impl<'a> Walk<'a> {
    fn new(options: &'a DfxpOptions) -> Self {
        Self {
            options,
            set: CaptionSet::new(),
            stack: Vec::new(),
            paragraph: None,
            seen_root: false,
            seen_body: false,
            dropped: 0,
        }
    }

    fn within(&self, scope: &Scope) -> bool {
        self.stack.iter().any(|open| open.scope == *scope)
    }

    /// Language of the innermost enclosing div
    fn language(&self) -> String {
        self.stack
            .iter()
            .rev()
            .find_map(|open| match &open.scope {
                Scope::Div(language) => Some(language.clone()),
                _ => None,
            })
            .unwrap_or_else(|| self.options.default_language.clone())
    }

    /// Handle a start tag, or an empty element when `empty` is set
    fn open(&mut self, element: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = local_name(element);
        let in_paragraph = self.paragraph.is_some();

        let scope = match name.as_str() {
            "tt" => {
                self.seen_root = true;
                Scope::Root
            }
            "head" if !in_paragraph => Scope::Head,
            "styling" if !in_paragraph => Scope::Styling,
            "layout" if !in_paragraph => Scope::Layout,
            "style" if !in_paragraph && self.within(&Scope::Styling) => {
                let style = Attributes::collect(element).style(true);
                log::trace!("style definition '{}'", style.id);
                self.set.add_style(style);
                Scope::Other
            }
            "region" if !in_paragraph && self.within(&Scope::Layout) => {
                let region = Attributes::collect(element).region();
                log::trace!("region definition '{}'", region.id);
                self.set.add_region(region);
                Scope::Other
            }
            "body" if !in_paragraph => {
                self.seen_body = true;
                Scope::Body
            }
            "div" if !in_paragraph => {
                let language = Attributes::collect(element)
                    .get("lang")
                    .map(str::trim)
                    .filter(|lang| !lang.is_empty())
                    .map_or_else(|| self.language(), str::to_string);
                self.set.ensure_language(&language);
                Scope::Div(language)
            }
            "p" if in_paragraph => {
                log::warn!("nested DFXP paragraph treated as plain content");
                Scope::Other
            }
            "p" => {
                self.paragraph = Some(PendingParagraph {
                    language: self.language(),
                    caption: paragraph_caption(&Attributes::collect(element))?,
                });
                Scope::Paragraph
            }
            "br" if in_paragraph => {
                self.line_break();
                Scope::Other
            }
            "span" if in_paragraph => {
                self.push_node(Node::Style(Attributes::collect(element).style(false)));
                Scope::Span
            }
            _ => Scope::Other,
        };

        if empty {
            if scope == Scope::Paragraph {
                self.finish_paragraph();
            }
        } else {
            self.stack.push(OpenElement { name, scope });
        }
        Ok(())
    }

    /// Close the innermost open element named `name`
    fn close(&mut self, name: &str) {
        let Some(position) = self.stack.iter().rposition(|open| open.name == name) else {
            log::warn!("skipping DFXP end tag </{name}> with no open element");
            return;
        };

        if position + 1 != self.stack.len() {
            log::warn!("DFXP end tag </{name}> closes unterminated child elements");
        }
        let closed = self.stack.split_off(position);
        if closed.iter().any(|open| open.scope == Scope::Paragraph) {
            self.finish_paragraph();
        }
    }

    fn finish_paragraph(&mut self) {
        if let Some(PendingParagraph { language, mut caption }) = self.paragraph.take() {
            trim_line_end(&mut caption.nodes);
            self.set.push_caption(&language, caption);
        }
    }

    /// Discard the open paragraph after a syntax error inside it
    fn drop_paragraph(&mut self) {
        if self.paragraph.take().is_some() {
            self.dropped += 1;
            if let Some(position) = self
                .stack
                .iter()
                .rposition(|open| open.scope == Scope::Paragraph)
            {
                self.stack.truncate(position);
            }
        }
    }

    fn push_node(&mut self, node: Node) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.caption.nodes.push(node);
        }
    }

    fn line_break(&mut self) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            trim_line_end(&mut paragraph.caption.nodes);
            paragraph.caption.nodes.push(Node::LineBreak);
        }
    }

    /// Text run inside a paragraph
    ///
    /// Whitespace spanning a source line break collapses to one space and a
    /// whitespace-only run spanning one is dropped. Leading whitespace is
    /// trimmed at the start of a line and after text ending in whitespace;
    /// trailing whitespace is trimmed when the line ends.
    fn text(&mut self, raw: &str) {
        let Some(paragraph) = self.paragraph.as_mut() else {
            return;
        };
        if raw.chars().all(is_xml_space) && raw.contains(['\n', '\r']) {
            return;
        }

        let nodes = &mut paragraph.caption.nodes;
        let trim_start = match nodes.iter().rev().find(|node| !matches!(node, Node::Style(_))) {
            None | Some(Node::LineBreak) => true,
            Some(Node::Text(previous)) => previous.ends_with(is_xml_space),
            Some(Node::Style(_)) => false,
        };

        let collapsed = collapse_line_breaks(raw);
        let run = if trim_start {
            collapsed.trim_start_matches(is_xml_space)
        } else {
            collapsed.as_str()
        };
        if !run.is_empty() {
            nodes.push(Node::text(run));
        }
    }
}

const fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Replace each whitespace run containing a line break with one space
fn collapse_line_breaks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending = String::new();

    for c in raw.chars() {
        if is_xml_space(c) {
            pending.push(c);
            continue;
        }
        flush_whitespace(&mut out, &mut pending);
        out.push(c);
    }
    flush_whitespace(&mut out, &mut pending);
    out
}

fn flush_whitespace(out: &mut String, pending: &mut String) {
    if pending.contains(['\n', '\r']) {
        out.push(' ');
    } else {
        out.push_str(pending);
    }
    pending.clear();
}

/// Trim trailing whitespace from the last text of the current line
fn trim_line_end(nodes: &mut Vec<Node>) {
    let Some(index) = nodes.iter().rposition(|node| !matches!(node, Node::Style(_))) else {
        return;
    };
    if let Node::Text(text) = &mut nodes[index] {
        let len = text.trim_end_matches(is_xml_space).len();
        text.truncate(len);
        if text.is_empty() {
            nodes.remove(index);
        }
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).to_ascii_lowercase()
}

/// Caption for a `p` element; timing attributes are mandatory
fn paragraph_caption(attrs: &Attributes) -> Result<Caption> {
    let begin = attrs
        .get("begin")
        .ok_or_else(|| CaptionError::malformed_timestamp("", "paragraph has no begin attribute"))?;
    let end = attrs
        .get("end")
        .ok_or_else(|| CaptionError::malformed_timestamp("", "paragraph has no end attribute"))?;

    let mut caption = Caption::new(parse_dfxp(begin)?, parse_dfxp(end)?);
    caption.style_id = attrs.get("style").map(str::to_string);
    caption.region_id = attrs.get("region").map(str::to_string);
    Ok(caption)
}

/// DFXP / TTML reader
///
/// # Example
///
/// ```rust
/// use caps_core::formats::{CaptionReader, DfxpReader};
///
/// let dfxp = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div xml:lang="en-US">
///   <p begin="00:00:14.848" end="00:00:17.000">MAN:<br/>When we think</p>
/// </div></body></tt>"#;
///
/// let set = DfxpReader::new().read(dfxp)?;
/// assert_eq!(set.captions("en-US")[0].text(), "MAN:\nWhen we think");
/// # Ok::<(), caps_core::CaptionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfxpReader {
    options: DfxpOptions,
}

impl DfxpReader {
    /// Create a reader with the default language for untagged divs
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit options
    #[must_use]
    pub const fn with_options(options: DfxpOptions) -> Self {
        Self { options }
    }

    /// Reader options
    #[must_use]
    pub const fn options(&self) -> &DfxpOptions {
        &self.options
    }

    fn walk(&self, content: &str) -> Result<Walk<'_>> {
        let mut reader = Reader::from_str(content);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;

        let mut walk = Walk::new(&self.options);
        let mut last_error_at = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(element)) => walk.open(&element, false)?,
                Ok(Event::Empty(element)) => walk.open(&element, true)?,
                Ok(Event::End(element)) => {
                    let name = String::from_utf8_lossy(element.local_name().as_ref())
                        .to_ascii_lowercase();
                    walk.close(&name);
                }
                Ok(Event::Text(text)) if walk.paragraph.is_some() => {
                    walk.text(&decode_entities(&String::from_utf8_lossy(&text)));
                }
                Ok(Event::CData(data)) if walk.paragraph.is_some() => {
                    walk.text(&String::from_utf8_lossy(&data));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    let position = reader.buffer_position();
                    log::warn!("DFXP syntax error at byte {position}: {err}");
                    walk.drop_paragraph();
                    if last_error_at == Some(position) {
                        break;
                    }
                    last_error_at = Some(position);
                }
            }
        }

        if walk.paragraph.is_some() {
            log::warn!("DFXP input ends inside an unterminated paragraph");
            walk.finish_paragraph();
        }
        Ok(walk)
    }
}

impl CaptionReader for DfxpReader {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Dfxp
    }

    fn detect(&self, content: &str) -> bool {
        content.contains("<tt") && (content.contains("</tt>") || content.contains("</tt:tt>"))
    }

    fn read(&self, content: &str) -> Result<CaptionSet> {
        let walk = self.walk(content)?;

        if !walk.seen_root {
            return Err(CaptionError::structural("no <tt> root element"));
        }
        if !walk.seen_body {
            return Err(CaptionError::structural("no <body> element"));
        }
        if walk.dropped > 0 {
            log::warn!("dropped {} malformed DFXP paragraphs", walk.dropped);
        }

        let set = walk.set;
        log::debug!(
            "read {} DFXP captions in {} languages, {} styles, {} regions",
            set.len(),
            set.languages().len(),
            set.styles().len(),
            set.regions().len()
        );

        if set.is_empty() {
            return Err(CaptionError::empty_document(CaptionFormat::Dfxp.name(), set));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(body: &str) -> Result<CaptionSet> {
        DfxpReader::new().read(&format!(
            r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:tts="http://www.w3.org/ns/ttml#styling"><body>{body}</body></tt>"#
        ))
    }

    #[test]
    fn div_without_language_uses_default() {
        let set = read(r#"<div><p begin="00:00:01.000" end="00:00:02.000">hi</p></div>"#).unwrap();
        assert_eq!(set.languages(), vec!["en-US"]);
    }

    #[test]
    fn configured_default_language() {
        let reader = DfxpReader::with_options(DfxpOptions::with_default_language("fr-FR"));
        let set = reader
            .read(r#"<tt><body><div><p begin="1s" end="2s">salut</p></div></body></tt>"#)
            .unwrap();
        assert_eq!(set.captions("fr-FR")[0].start, 1_000_000);
    }

    #[test]
    fn divs_with_same_language_append() {
        let set = read(
            r#"<div xml:lang="de"><p begin="1s" end="2s">a</p></div><div xml:lang="de"><p begin="3s" end="4s">b</p></div>"#,
        )
        .unwrap();
        assert_eq!(set.captions("de").len(), 2);
    }

    #[test]
    fn references_are_kept() {
        let set = read(
            r#"<div><p begin="1s" end="2s" style="s1" region="bottom">x</p></div>"#,
        )
        .unwrap();
        let caption = &set.captions("en-US")[0];
        assert_eq!(caption.style_id.as_deref(), Some("s1"));
        assert_eq!(caption.region_id.as_deref(), Some("bottom"));
    }

    #[test]
    fn nested_spans_emit_one_overlay_each() {
        let set = read(
            r#"<div><p begin="1s" end="2s"><span tts:fontStyle="italic">a <span tts:fontWeight="bold">b</span></span> c</p></div>"#,
        )
        .unwrap();
        let nodes = &set.captions("en-US")[0].nodes;
        assert_eq!(nodes.len(), 5);
        assert!(matches!(&nodes[0], Node::Style(style) if style.italics()));
        assert_eq!(nodes[1], Node::text("a "));
        assert!(matches!(&nodes[2], Node::Style(style) if style.bold()));
        assert_eq!(nodes[3], Node::text("b"));
        assert_eq!(nodes[4], Node::text(" c"));
        assert_eq!(set.captions("en-US")[0].text(), "a b c");
    }

    #[test]
    fn missing_begin_fails_the_document() {
        let err = read(r#"<div><p end="00:00:02.000">x</p></div>"#).unwrap_err();
        assert!(matches!(err, CaptionError::MalformedTimestamp { .. }));
    }

    #[test]
    fn bad_timestamp_fails_the_document() {
        let err = read(r#"<div><p begin="later" end="00:00:02.000">x</p></div>"#).unwrap_err();
        assert!(matches!(err, CaptionError::MalformedTimestamp { .. }));
    }

    #[test]
    fn stray_end_tag_is_skipped() {
        let set = read(r#"<div><p begin="1s" end="2s">one</i> two</p></div>"#).unwrap();
        assert_eq!(
            set.captions("en-US")[0].nodes,
            vec![Node::text("one"), Node::text(" two")]
        );
    }

    #[test]
    fn spaces_around_spans_are_kept() {
        let set = read(
            r#"<div><p begin="1s" end="2s">Hello <span tts:color="red">world</span> again</p></div>"#,
        )
        .unwrap();
        let caption = &set.captions("en-US")[0];
        assert_eq!(caption.text(), "Hello world again");
        assert_eq!(caption.nodes[0], Node::text("Hello "));
        assert_eq!(caption.nodes[2], Node::text("world"));
        assert_eq!(caption.nodes[3], Node::text(" again"));
    }

    #[test]
    fn line_edges_are_trimmed() {
        let set = read(
            "<div><p begin=\"1s\" end=\"2s\">\n    first line   <br/>\n    second\n    line\n  </p></div>",
        )
        .unwrap();
        let caption = &set.captions("en-US")[0];
        assert_eq!(caption.text(), "first line\nsecond line");
    }

    #[test]
    fn indentation_between_spans_is_dropped() {
        let set = read(
            "<div><p begin=\"1s\" end=\"2s\">\n  <span tts:fontStyle=\"italic\">a</span>\n  <span tts:fontWeight=\"bold\">b</span> <span>c</span>\n</p></div>",
        )
        .unwrap();
        assert_eq!(set.captions("en-US")[0].text(), "ab c");
    }

    #[test]
    fn spaces_inside_a_line_are_kept() {
        let set = read(r#"<div><p begin="1s" end="2s">Einstein.  pois é</p></div>"#).unwrap();
        assert_eq!(set.captions("en-US")[0].text(), "Einstein.  pois é");
    }

    #[test]
    fn unclosed_span_is_closed_by_paragraph_end() {
        let set = read(
            r#"<div><p begin="1s" end="2s"><span tts:color="red">a</p><p begin="3s" end="4s">b</p></div>"#,
        )
        .unwrap();
        let captions = set.captions("en-US");
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[1].text(), "b");
    }

    #[test]
    fn missing_body_is_structural() {
        let err = DfxpReader::new().read("<tt><head/></tt>").unwrap_err();
        assert!(matches!(err, CaptionError::StructuralError(_)));
    }

    #[test]
    fn not_xml_is_structural() {
        let err = DfxpReader::new().read("just some words").unwrap_err();
        assert!(matches!(err, CaptionError::StructuralError(_)));
    }

    #[test]
    fn detect() {
        let reader = DfxpReader::new();
        assert!(reader.detect("<tt xmlns=\"http://www.w3.org/ns/ttml\"><body/></tt>"));
        assert!(!reader.detect("1\n00:00:01,000 --> 00:00:02,000\nHi\n"));
    }
}

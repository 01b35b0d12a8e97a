//! WebVTT cue state machine

use super::{strip_markup, WebVttOptions, SIGNATURE};
use crate::formats::{CaptionFormat, CaptionReader};
use crate::model::{Caption, CaptionSet};
use crate::time::{TimingLine, TIMING_ARROW};
use crate::utils::errors::{CaptionError, Result};
use crate::utils::text::split_lines;

/// Scan state; the pending cue is owned by the `InCue` state
#[derive(Debug)]
enum CueState {
    /// Header, cue identifiers, comment blocks or blank lines
    OutsideCue,
    /// After a timing line, collecting cue text
    InCue(Caption),
}

/// WebVTT reader
///
/// # Example
///
/// ```rust
/// use caps_core::formats::{CaptionReader, WebVttReader};
///
/// let vtt = "WEBVTT\n\n1\n00:01.000 --> 00:04.000\n<v Roger>Never drink liquid nitrogen.\n";
/// let set = WebVttReader::new().read(vtt)?;
///
/// assert_eq!(set.captions("en-US")[0].text(), "Roger: Never drink liquid nitrogen.");
/// # Ok::<(), caps_core::CaptionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WebVttReader {
    options: WebVttOptions,
}

impl WebVttReader {
    /// Create a reader that enforces timing order
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit options
    #[must_use]
    pub const fn with_options(options: WebVttOptions) -> Self {
        Self { options }
    }

    /// Reader options
    #[must_use]
    pub const fn options(&self) -> &WebVttOptions {
        &self.options
    }

    fn parse(&self, lines: &[&str]) -> Result<Vec<Caption>> {
        let mut captions: Vec<Caption> = Vec::new();
        let mut state = CueState::OutsideCue;

        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim();

            if line.contains(TIMING_ARROW) {
                let timing = TimingLine::parse_webvtt(line).map_err(|e| e.at_line(index + 1))?;
                if let CueState::InCue(pending) = state {
                    finalize(&mut captions, pending);
                }

                let caption = Caption::new(timing.start, timing.end);
                if !self.options.ignore_timing_errors {
                    validate_timing(&caption, captions.last(), captions.len())?;
                }
                log::trace!("cue opened at line {}", index + 1);
                state = CueState::InCue(caption);
                continue;
            }

            state = match state {
                CueState::InCue(pending) if line.is_empty() => {
                    finalize(&mut captions, pending);
                    CueState::OutsideCue
                }
                CueState::InCue(mut pending) => {
                    pending.push_line(strip_markup(line));
                    CueState::InCue(pending)
                }
                CueState::OutsideCue => CueState::OutsideCue,
            };
        }

        if let CueState::InCue(pending) = state {
            finalize(&mut captions, pending);
        }

        Ok(captions)
    }
}

fn finalize(captions: &mut Vec<Caption>, pending: Caption) {
    if pending.is_empty() {
        log::trace!("dropping cue with no text at {}", pending.format_start());
    } else {
        captions.push(pending);
    }
}

fn validate_timing(caption: &Caption, previous: Option<&Caption>, index: usize) -> Result<()> {
    if !caption.has_valid_timing() {
        return Err(CaptionError::invalid_timing_order(
            index,
            format!(
                "end {} is before start {}",
                caption.format_end(),
                caption.format_start()
            ),
        ));
    }

    if let Some(previous) = previous {
        if caption.start < previous.start {
            return Err(CaptionError::invalid_timing_order(
                index,
                format!(
                    "start {} is before the previous cue's start {}",
                    caption.format_start(),
                    previous.format_start()
                ),
            ));
        }
    }

    Ok(())
}

impl CaptionReader for WebVttReader {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::WebVtt
    }

    fn detect(&self, content: &str) -> bool {
        content.contains(SIGNATURE)
    }

    fn read(&self, content: &str) -> Result<CaptionSet> {
        let captions = self.parse(&split_lines(content))?;
        log::debug!(
            "read {} WebVTT captions for {}",
            captions.len(),
            self.options.language
        );

        let mut set = CaptionSet::new();
        set.set_captions(self.options.language.clone(), captions);

        if set.is_empty() {
            return Err(CaptionError::empty_document(CaptionFormat::WebVtt.name(), set));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn text_before_any_timing_is_ignored() {
        let set = WebVttReader::new()
            .read("WEBVTT\nstray text\n\n00:01.000 --> 00:02.000\nreal\n")
            .unwrap();
        let captions = set.captions("en-US");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text(), "real");
    }

    #[test]
    fn line_breaks_between_lines() {
        let set = WebVttReader::new()
            .read("WEBVTT\n\n00:01.000 --> 00:02.000\none\ntwo\n")
            .unwrap();
        assert_eq!(
            set.captions("en-US")[0].nodes,
            vec![Node::text("one"), Node::LineBreak, Node::text("two")]
        );
    }

    #[test]
    fn empty_cue_is_dropped() {
        let set = WebVttReader::new()
            .read("WEBVTT\n\n00:01.000 --> 00:02.000\n\n00:03.000 --> 00:04.000\nkept\n")
            .unwrap();
        let captions = set.captions("en-US");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].start, 3_000_000);
    }

    #[test]
    fn back_to_back_timing_lines() {
        let set = WebVttReader::new()
            .read("WEBVTT\n\n00:01.000 --> 00:02.000\nfirst\n00:03.000 --> 00:04.000\nsecond\n")
            .unwrap();
        assert_eq!(set.captions("en-US").len(), 2);
    }

    #[test]
    fn inverted_cue_rejected() {
        let err = WebVttReader::new()
            .read("WEBVTT\n\n00:05.000 --> 00:02.000\nbackwards\n")
            .unwrap_err();
        assert!(matches!(err, CaptionError::InvalidTimingOrder { index: 0, .. }));
    }

    #[test]
    fn malformed_timestamp_is_not_zeroed() {
        let err = WebVttReader::new()
            .read("WEBVTT\n\n00:01 --> 00:02.000\nbad\n")
            .unwrap_err();
        assert!(matches!(err, CaptionError::MalformedTimestamp { .. }));
    }

    #[test]
    fn signature_only_is_empty() {
        let err = WebVttReader::new().read("WEBVTT\n\nNOTE nothing here\n").unwrap_err();
        let set = err.into_partial_set().unwrap();
        assert!(set.is_empty());
        assert!(set.has_language("en-US"));
    }
}

//! SRT block parser

use super::SrtOptions;
use crate::formats::{CaptionFormat, CaptionReader};
use crate::model::{Caption, CaptionSet, Node};
use crate::time::{TimingLine, TIMING_ARROW};
use crate::utils::errors::{CaptionError, Result};
use crate::utils::text::{is_counter_line, split_lines};
use regex::Regex;
use std::sync::OnceLock;

fn srt_timing_regex() -> &'static Regex {
    static SRT_TIMING_REGEX: OnceLock<Regex> = OnceLock::new();
    SRT_TIMING_REGEX.get_or_init(|| {
        Regex::new(r"\d+:\d{2}:\d{2},\d{3}[ \t]*-->[ \t]*\d+:\d{2}:\d{2},\d{3}")
            .expect("Failed to compile SRT timing line regex")
    })
}

/// Position of the scan within the block structure
#[derive(Debug)]
enum ScanState {
    /// Between blocks, where a counter or a timing line may appear
    Counter,
    /// After a counter, waiting for the timing line
    Timing,
    /// Reading the text lines of a cue
    Cue(Caption),
}

/// SRT reader
///
/// # Example
///
/// ```rust
/// use caps_core::formats::{CaptionReader, SrtReader};
///
/// let srt = "1\n00:00:09,209 --> 00:00:12,312\n( clock ticking )\n\n2\n00:00:14,848 --> 00:00:17,000\nMAN:\nWhen we think\n";
/// let set = SrtReader::new().read(srt)?;
/// let captions = set.captions("en-US");
///
/// assert_eq!(captions.len(), 2);
/// assert_eq!(captions[1].text(), "MAN:\nWhen we think");
/// # Ok::<(), caps_core::CaptionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SrtReader {
    options: SrtOptions,
}

impl SrtReader {
    /// Create a reader filing captions under the default language
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with explicit options
    #[must_use]
    pub const fn with_options(options: SrtOptions) -> Self {
        Self { options }
    }

    /// Reader options
    #[must_use]
    pub const fn options(&self) -> &SrtOptions {
        &self.options
    }

    fn parse(lines: &[&str]) -> Result<Vec<Caption>> {
        let mut captions = Vec::new();
        let mut state = ScanState::Counter;

        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            let line_number = index + 1;

            state = match state {
                ScanState::Counter if line.is_empty() => ScanState::Counter,
                ScanState::Counter if is_counter_line(line) => ScanState::Timing,
                ScanState::Counter | ScanState::Timing if !line.is_empty() => {
                    let timing = TimingLine::parse_srt(line).map_err(|e| e.at_line(line_number))?;
                    ScanState::Cue(Caption::new(timing.start, timing.end))
                }
                ScanState::Counter | ScanState::Timing => ScanState::Timing,
                ScanState::Cue(caption) if line.is_empty() => {
                    captions.push(caption);
                    ScanState::Counter
                }
                ScanState::Cue(mut caption) => {
                    match Self::inline_timing(line) {
                        Some(timing) => {
                            log::warn!("SRT cue at line {line_number} starts without a blank separator");
                            Self::drop_trailing_counter(&mut caption);
                            captions.push(caption);
                            ScanState::Cue(Caption::new(timing.start, timing.end))
                        }
                        None => {
                            caption.push_line(line);
                            ScanState::Cue(caption)
                        }
                    }
                }
            };
        }

        match state {
            ScanState::Cue(caption) => captions.push(caption),
            ScanState::Timing => log::warn!("SRT input ends with a counter and no timing line"),
            ScanState::Counter => {}
        }

        Ok(captions)
    }

    /// Remove the next block's counter line from the end of `caption`
    fn drop_trailing_counter(caption: &mut Caption) {
        if caption.nodes.last().and_then(Node::as_text).is_some_and(is_counter_line) {
            caption.nodes.pop();
            if caption.nodes.last() == Some(&Node::LineBreak) {
                caption.nodes.pop();
            }
        }
    }

    /// A timing line met inside a cue body, if the line is one
    fn inline_timing(line: &str) -> Option<TimingLine> {
        if line.contains(TIMING_ARROW) {
            TimingLine::parse_srt(line).ok()
        } else {
            None
        }
    }
}

impl CaptionReader for SrtReader {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Srt
    }

    fn detect(&self, content: &str) -> bool {
        let lines = split_lines(content);
        let first = lines.iter().map(|line| line.trim()).find(|line| !line.is_empty());

        first.is_some_and(|line| is_counter_line(line) || line.contains(TIMING_ARROW))
            && srt_timing_regex().is_match(content)
    }

    fn read(&self, content: &str) -> Result<CaptionSet> {
        let captions = Self::parse(&split_lines(content))?;
        log::debug!(
            "read {} SRT captions for {}",
            captions.len(),
            self.options.language
        );

        let mut set = CaptionSet::new();
        set.set_captions(self.options.language.clone(), captions);

        if set.is_empty() {
            return Err(CaptionError::empty_document(CaptionFormat::Srt.name(), set));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_without_counter() {
        let set = SrtReader::new()
            .read("00:00:01,000 --> 00:00:02,000\nHello\n")
            .unwrap();
        assert_eq!(set.captions("en-US")[0].text(), "Hello");
    }

    #[test]
    fn multi_line_text_uses_line_breaks() {
        let set = SrtReader::new()
            .read("1\n00:00:01,000 --> 00:00:02,000\nas an old, wrinkly man\nwith white hair.\n")
            .unwrap();
        assert_eq!(
            set.captions("en-US")[0].nodes,
            vec![
                Node::text("as an old, wrinkly man"),
                Node::LineBreak,
                Node::text("with white hair."),
            ]
        );
    }

    #[test]
    fn bad_timing_after_counter() {
        let err = SrtReader::new().read("1\n00:00:01.000 --> 00:00:02.000\nHi\n").unwrap_err();
        match err {
            CaptionError::MalformedTimestamp { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn text_in_counter_position_is_rejected() {
        assert!(matches!(
            SrtReader::new().read("hello there\n"),
            Err(CaptionError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn missing_blank_line_between_cues() {
        let set = SrtReader::new()
            .read("1\n00:00:01,000 --> 00:00:02,000\nfirst\n00:00:03,000 --> 00:00:04,000\nsecond\n")
            .unwrap();
        let captions = set.captions("en-US");
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[1].text(), "second");
    }

    #[test]
    fn counter_before_unseparated_cue_is_not_text() {
        let set = SrtReader::new()
            .read("1\n00:00:01,000 --> 00:00:02,000\nfirst\n2\n00:00:03,000 --> 00:00:04,000\nsecond\n")
            .unwrap();
        let captions = set.captions("en-US");
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].text(), "first");
        assert_eq!(captions[0].nodes, vec![Node::text("first")]);
        assert_eq!(captions[1].start, 3_000_000);
    }

    #[test]
    fn arrow_inside_text_stays_text() {
        let set = SrtReader::new()
            .read("1\n00:00:01,000 --> 00:00:02,000\nA --> B\n")
            .unwrap();
        assert_eq!(set.captions("en-US")[0].text(), "A --> B");
    }

    #[test]
    fn custom_language() {
        let reader = SrtReader::with_options(SrtOptions::with_language("pt-BR"));
        let set = reader.read("1\n00:00:01,000 --> 00:00:02,000\nOlá\n").unwrap();
        assert_eq!(set.captions("pt-BR").len(), 1);
        assert!(set.captions("en-US").is_empty());
    }

    #[test]
    fn detect() {
        let reader = SrtReader::new();
        assert!(reader.detect("1\n00:00:01,000 --> 00:00:02,000\nHi\n"));
        assert!(reader.detect("\u{FEFF}\n\n12\r\n00:00:01,000 --> 00:00:02,000\r\n"));
        assert!(!reader.detect("WEBVTT\n\n00:01.000 --> 00:02.000\nHi\n"));
        assert!(!reader.detect("<tt></tt>"));
    }
}

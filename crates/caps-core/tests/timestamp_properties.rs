//! Property-based tests for the timestamp codec and line-oriented readers
//!
//! Uses proptest to check that formatting and parsing agree across the
//! whole millisecond range the formats can express.

use caps_core::formats::{CaptionReader, CaptionWriter, SrtReader, SrtWriter};
use caps_core::time::{format_dfxp, format_srt, format_webvtt, parse_dfxp, parse_srt, parse_webvtt};
use caps_core::{Caption, CaptionSet};
use proptest::prelude::*;

/// Millisecond-aligned timestamps up to 100 hours
fn arb_timestamp() -> impl Strategy<Value = u64> {
    (0u64..360_000_000).prop_map(|millis| millis * 1_000)
}

/// A caption text line with no leading or trailing whitespace
fn arb_line() -> impl Strategy<Value = String> {
    "[A-Za-z]([A-Za-z0-9 ,.!?']{0,30}[A-Za-z!?.])?"
}

proptest! {
    #[test]
    fn srt_round_trip(t in arb_timestamp()) {
        prop_assert_eq!(parse_srt(&format_srt(t)).unwrap(), t);
    }

    #[test]
    fn dfxp_round_trip(t in arb_timestamp()) {
        prop_assert_eq!(parse_dfxp(&format_dfxp(t)).unwrap(), t);
    }

    #[test]
    fn webvtt_round_trip(t in arb_timestamp()) {
        prop_assert_eq!(parse_webvtt(&format_webvtt(t)).unwrap(), t);
    }

    #[test]
    fn formatting_truncates_sub_millisecond(t in arb_timestamp(), extra in 0u64..1_000) {
        prop_assert_eq!(format_srt(t + extra), format_srt(t));
    }

    #[test]
    fn srt_writer_output_reads_back(
        cues in prop::collection::vec((0u64..10_000_000, 1u64..5_000_000, prop::collection::vec(arb_line(), 1..4)), 1..10)
    ) {
        let mut start = 0;
        let mut captions = Vec::new();
        for (gap, length, lines) in cues {
            start += gap * 1_000;
            let mut caption = Caption::new(start, start + length * 1_000);
            for line in lines {
                caption.push_line(line);
            }
            captions.push(caption);
        }
        let mut set = CaptionSet::new();
        set.set_captions("en-US", captions);

        let written = SrtWriter::new().write_string(&set).unwrap();
        let reread = SrtReader::new().read(&written).unwrap();
        prop_assert_eq!(reread, set);
    }
}

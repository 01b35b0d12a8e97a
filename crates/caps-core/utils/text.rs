//! Text helpers shared by the line-oriented readers
//!
//! Callers hand readers an already-decoded UTF-8 string; these helpers only
//! deal with the leftovers of that decoding (a BOM, mixed line endings).

/// Strip a leading UTF-8 byte order mark
///
/// Returns the text without BOM and whether one was present.
///
/// # Examples
///
/// ```rust
/// # use caps_core::utils::text::strip_bom;
/// let (stripped, had_bom) = strip_bom("\u{FEFF}WEBVTT");
/// assert_eq!(stripped, "WEBVTT");
/// assert!(had_bom);
/// ```
#[must_use]
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix('\u{FEFF}')
        .map_or((text, false), |stripped| (stripped, true))
}

/// Split content into physical lines
///
/// Handles `\n`, `\r\n` and lone `\r` terminators and strips a leading BOM.
/// A trailing terminator does not produce a final empty line.
///
/// # Examples
///
/// ```rust
/// # use caps_core::utils::text::split_lines;
/// let lines = split_lines("1\r\n00:00:01,000 --> 00:00:02,000\rHello\n");
/// assert_eq!(lines, vec!["1", "00:00:01,000 --> 00:00:02,000", "Hello"]);
/// ```
#[must_use]
pub fn split_lines(content: &str) -> Vec<&str> {
    let (content, _) = strip_bom(content);
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Check whether a line is a plain non-negative integer
#[must_use]
pub fn is_counter_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_mixed_endings() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("a\n\n\nb\n"), vec!["a", "", "", "b"]);
    }

    #[test]
    fn split_lines_empty_input() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\u{FEFF}").is_empty());
    }

    #[test]
    fn counter_lines() {
        assert!(is_counter_line("35"));
        assert!(is_counter_line(" 7 "));
        assert!(!is_counter_line("-1"));
        assert!(!is_counter_line("3a"));
        assert!(!is_counter_line(""));
    }

    #[test]
    fn strip_bom_without_bom() {
        assert_eq!(strip_bom("plain"), ("plain", false));
    }
}

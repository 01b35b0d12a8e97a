//! Character reference decoding for DFXP text and attribute values

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use std::borrow::Cow;

/// Decode the entity and character references in `raw`
///
/// XML and HTML named entities (`&amp;`, `&nbsp;`, `&lrm;`) and numeric
/// references are resolved. A reference that cannot be resolved is kept
/// as written; the references around it are still decoded.
pub(super) fn decode_entities(raw: &str) -> Cow<'_, str> {
    match unescape_with(raw, resolve_predefined_entity) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("keeping undecodable DFXP reference raw: {err}");
            Cow::Owned(decode_each(raw))
        }
    }
}

/// Decode references one at a time, keeping the ones that fail
fn decode_each(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let end = candidate[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|offset| offset + 1)
            .filter(|&end| candidate.as_bytes()[end] == b';');

        match end {
            Some(end) => {
                let reference = &candidate[..=end];
                match unescape_with(reference, resolve_predefined_entity) {
                    Ok(decoded) => out.push_str(&decoded),
                    Err(_) => out.push_str(reference),
                }
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

//! Search highlight markup.
//!
//! The search backend returns a copy of the message text with matches wrapped
//! in `<span class='highlight'>...</span>`. It does not return offsets, so the
//! boundaries are recovered by scanning for the delimiters.

use crate::model::OffsetUnit;
use tracing::trace;

pub const HIGHLIGHT_OPEN: &str = "<span class='highlight'>";
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// A delimiter and the position in the stripped text it belongs before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub index: usize,
    pub delimiter: &'static str,
}

/// Recovers highlight boundaries from search markup.
///
/// Each delimiter is removed from the working copy as soon as it is found and
/// the scan restarts from the start, so every `index` is measured against the
/// text with all earlier delimiters already stripped. Removing a delimiter can
/// join its neighbours into a new one; the rescan picks that up as well.
///
/// Boundaries are returned in scan order. Unterminated or malformed delimiter
/// text is left alone.
pub fn boundaries(markup: &str, unit: OffsetUnit) -> Vec<Boundary> {
    let mut working = markup.to_string();
    let mut out = Vec::new();

    while let Some((byte, delimiter)) = next_delimiter(&working) {
        let index = unit.count(&working[..byte]);
        trace!(index, delimiter, "highlight boundary");
        out.push(Boundary { index, delimiter });
        working.replace_range(byte..byte + delimiter.len(), "");
    }

    out
}

/// A run of highlight markup text, either inside a match or between matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Splits highlight markup on both delimiters.
///
/// Parts alternate plain / highlighted starting with plain; empty parts are
/// dropped. Nested highlights are not supported.
pub fn split_highlights(markup: &str) -> Vec<Segment<'_>> {
    let mut parts = Vec::new();
    let mut rest = markup;
    while let Some((byte, delimiter)) = next_delimiter(rest) {
        parts.push(&rest[..byte]);
        rest = &rest[byte + delimiter.len()..];
    }
    parts.push(rest);

    parts
        .into_iter()
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, text)| Segment {
            text,
            highlighted: i % 2 == 1,
        })
        .collect()
}

/// The earliest delimiter in `s` and its byte offset.
fn next_delimiter(s: &str) -> Option<(usize, &'static str)> {
    [HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE]
        .into_iter()
        .filter_map(|delimiter| s.find(delimiter).map(|byte| (byte, delimiter)))
        .min_by_key(|&(byte, _)| byte)
}

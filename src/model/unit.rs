use serde::{Deserialize, Serialize};

/// The unit in which entity offsets, lengths and highlight positions are
/// measured.
///
/// Message stores hand out entity offsets in UTF-16 code units (the
/// messenger's native convention), so that is the default. `Char` counts
/// Unicode scalar values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    #[default]
    Utf16,
    Char,
}

impl OffsetUnit {
    /// Number of units a single character occupies.
    #[inline]
    pub fn width(self, c: char) -> usize {
        match self {
            OffsetUnit::Utf16 => c.len_utf16(),
            OffsetUnit::Char => 1,
        }
    }

    /// Number of units in `s`.
    pub fn count(self, s: &str) -> usize {
        match self {
            OffsetUnit::Utf16 => s.encode_utf16().count(),
            OffsetUnit::Char => s.chars().count(),
        }
    }
}

/// Text indexed by [`OffsetUnit`] positions.
///
/// Keeps a `(unit position, byte offset)` pair for every character start,
/// plus one trailing pair for the end of the text. Only those positions are
/// boundaries; a position inside a surrogate pair is not.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    unit: OffsetUnit,
    starts: Vec<(usize, usize)>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str, unit: OffsetUnit) -> Self {
        let mut starts = Vec::with_capacity(text.len() + 1);
        let mut pos = 0;
        for (byte, c) in text.char_indices() {
            starts.push((pos, byte));
            pos += unit.width(c);
        }
        starts.push((pos, text.len()));
        Self { text, unit, starts }
    }

    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn unit(&self) -> OffsetUnit {
        self.unit
    }

    /// Length of the text in units.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.last().map_or(0, |&(pos, _)| pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of a unit position, if it sits on a character boundary.
    pub fn byte_offset(&self, pos: usize) -> Option<usize> {
        self.starts
            .binary_search_by_key(&pos, |&(p, _)| p)
            .ok()
            .map(|i| self.starts[i].1)
    }

    #[inline]
    pub fn is_boundary(&self, pos: usize) -> bool {
        self.byte_offset(pos).is_some()
    }

    /// The substring covering units `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        let from = self.byte_offset(start)?;
        let to = self.byte_offset(end)?;
        self.text.get(from..to)
    }

    /// Characters paired with the unit position they start at.
    pub fn chars(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.starts
            .iter()
            .map(|&(pos, _)| pos)
            .zip(self.text.chars())
    }
}

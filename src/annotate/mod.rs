//! Entity + highlight annotation.
//!
//! Turns message text, its entities and an optional search highlight into a
//! single inline markup string. Every boundary collects its markup into one
//! tag record; the text is then walked once and each record is spliced in
//! before the character at its index.
//!
//! Ordering at a shared boundary is processing order and nothing else:
//! entities in input order (openings appended, closings prepended), then
//! highlight delimiters in scan order (each prepended).

mod markup;
mod tags;

pub use markup::{FALLBACK_TAG, LINK_ATTRS, closing_tag, opening_tag, tag_name, url_with_https};

use crate::highlight;
use crate::model::{Entity, OffsetUnit, SourceText};
use tags::TagList;
use thiserror::Error;
use tracing::debug;

/// Options that control how markup is produced.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Unit used by entity offsets/lengths and highlight positions.
    pub offset_unit: OffsetUnit,

    /// If true, HTML-escape text characters and link targets as they are
    /// emitted. Off by default: escaping is left to the rendering surface.
    pub escape_html: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    #[error(
        "entity #{entity} has an invalid range (offset {offset}, length {length}) for text of length {text_len}"
    )]
    InvalidEntityRange {
        entity: usize,
        offset: i64,
        length: i64,
        text_len: usize,
    },

    #[error("entity #{entity} has a boundary at {position} that splits a character")]
    SplitCharacter { entity: usize, position: usize },
}

/// Annotates `text` with default [`RenderOptions`].
pub fn annotate(
    text: &str,
    entities: Option<&[Entity]>,
    highlight_markup: Option<&str>,
) -> Result<String, AnnotateError> {
    annotate_with_options(text, entities, highlight_markup, &RenderOptions::default())
}

/// Annotates `text`, reading entity offsets and highlight positions in
/// `opts.offset_unit` and HTML-escaping emitted text when `opts.escape_html`
/// is set.
pub fn annotate_with_options(
    text: &str,
    entities: Option<&[Entity]>,
    highlight_markup: Option<&str>,
    opts: &RenderOptions,
) -> Result<String, AnnotateError> {
    let source = SourceText::new(text, opts.offset_unit);
    let mut tags = TagList::default();

    for (i, entity) in entities.unwrap_or_default().iter().enumerate() {
        let (start, end) = entity_range(&source, i, entity)?;
        let Some(entity_text) = source.slice(start, end) else {
            return Err(AnnotateError::SplitCharacter {
                entity: i,
                position: start,
            });
        };

        let Some(open) = opening_tag(entity, entity_text, opts.escape_html) else {
            debug!(entity = i, kind = %entity.kind, "skipping entity without markup");
            continue;
        };
        let Some(close) = closing_tag(&open) else {
            debug!(entity = i, kind = %entity.kind, "skipping entity without a tag name");
            continue;
        };

        tags.append(start, &open);
        tags.prepend(end, &close);
    }

    if source.is_empty() {
        return Ok(String::new());
    }

    if let Some(markup) = highlight_markup {
        for boundary in highlight::boundaries(markup, opts.offset_unit) {
            tags.prepend(boundary.index, boundary.delimiter);
        }
    }

    let mut out = String::with_capacity(text.len() * 2);
    for (pos, c) in source.chars() {
        if let Some(tag) = tags.take(pos) {
            out.push_str(&tag.tag);
        }
        push_char(&mut out, c, opts.escape_html);

        // highlight positions inside a surrogate pair land after the character.
        for interior in pos + 1..pos + opts.offset_unit.width(c) {
            if let Some(tag) = tags.take(interior) {
                out.push_str(&tag.tag);
            }
        }
    }

    if let Some(tag) = tags.first() {
        if tags.len() > 1 {
            debug!(pending = tags.len(), "only the first trailing tag is emitted");
        }
        out.push_str(&tag.tag);
    }

    Ok(out)
}

/// Validates an entity against the text and returns its `start..end` units.
fn entity_range(
    source: &SourceText<'_>,
    i: usize,
    entity: &Entity,
) -> Result<(usize, usize), AnnotateError> {
    let invalid = || AnnotateError::InvalidEntityRange {
        entity: i,
        offset: entity.offset,
        length: entity.length,
        text_len: source.len(),
    };

    if entity.length < 1 {
        return Err(invalid());
    }
    let start = usize::try_from(entity.offset).map_err(|_| invalid())?;
    let length = usize::try_from(entity.length).map_err(|_| invalid())?;
    let end = start
        .checked_add(length)
        .filter(|&end| end <= source.len())
        .ok_or_else(invalid)?;

    for position in [start, end] {
        if !source.is_boundary(position) {
            return Err(AnnotateError::SplitCharacter { entity: i, position });
        }
    }

    Ok((start, end))
}

fn push_char(out: &mut String, c: char, escape: bool) {
    if escape {
        let mut buf = [0u8; 4];
        out.push_str(&html_escape::encode_text(&*c.encode_utf8(&mut buf)));
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;

    #[test]
    fn closing_and_opening_at_one_index_close_first() {
        let entities = [
            Entity::new(0, 1, EntityKind::Bold),
            Entity::new(1, 1, EntityKind::Italic),
        ];
        let out = annotate("ab", Some(&entities), None).unwrap();
        assert_eq!(out, "<strong>a</strong><i>b</i>");
    }

    #[test]
    fn closings_at_one_index_close_innermost_first() {
        let entities = [
            Entity::new(0, 2, EntityKind::Bold),
            Entity::new(1, 1, EntityKind::Italic),
        ];
        let out = annotate("ab", Some(&entities), None).unwrap();
        assert_eq!(out, "<strong>a<i>b</i></strong>");
    }

    #[test]
    fn entity_validation_happens_before_the_empty_shortcut() {
        let entities = [Entity::new(0, 1, EntityKind::Bold)];
        let err = annotate("", Some(&entities), None).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidEntityRange { text_len: 0, .. }));
        assert_eq!(annotate("", None, Some("<span class='highlight'></span>")).unwrap(), "");
    }

    #[test]
    fn entity_text_spans_whole_surrogate_pairs_only() {
        let text = "a\u{1F600}b";
        let whole = [Entity::new(1, 2, EntityKind::Bold)];
        assert_eq!(
            annotate(text, Some(&whole), None).unwrap(),
            "a<strong>\u{1F600}</strong>b"
        );

        let split_start = [Entity::new(2, 2, EntityKind::Bold)];
        assert_eq!(
            annotate(text, Some(&split_start), None).unwrap_err(),
            AnnotateError::SplitCharacter { entity: 0, position: 2 }
        );
        let split_end = [Entity::new(0, 2, EntityKind::Bold)];
        assert_eq!(
            annotate(text, Some(&split_end), None).unwrap_err(),
            AnnotateError::SplitCharacter { entity: 0, position: 2 }
        );
    }

    #[test]
    fn highlight_inside_surrogate_pair_lands_after_it() {
        // the highlight text disagrees with the message text here.
        let out = annotate("\u{1F600}b", None, Some("x<span class='highlight'>yz")).unwrap();
        assert_eq!(out, "\u{1F600}<span class='highlight'>b");
    }

    #[test]
    fn escaping_is_per_character() {
        let opts = RenderOptions {
            escape_html: true,
            ..Default::default()
        };
        let entities = [Entity::new(0, 3, EntityKind::Bold)];
        let out = annotate_with_options("a<b & c", Some(&entities), None, &opts).unwrap();
        assert_eq!(out, "<strong>a&lt;b</strong> &amp; c");
    }
}

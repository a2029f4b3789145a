//! Message -> markup.
//!
//! Picks the body, entities and highlight fragment a message view displays
//! and hands them to the annotator. Attachment transcriptions are rendered
//! from their own highlight fields.

use crate::annotate::{AnnotateError, RenderOptions, annotate_with_options};
use crate::highlight::split_highlights;
use crate::model::Message;
use std::borrow::Cow;

const TRANSCRIPTION_OPEN: &str = "<div class=\"transcription\">";
const TRANSCRIPTION_CLOSE: &str = "</div>";
const SEGMENT_OPEN: &str = "<span class=\"highlight\">";
const SEGMENT_CLOSE: &str = "</span>";

/// Renders the displayed body of a message, followed by its transcription
/// block when the attachment has one.
///
/// Returns `Ok(None)` for messages with neither text, caption nor
/// transcription.
pub fn render_message(msg: &Message, opts: &RenderOptions) -> Result<Option<String>, AnnotateError> {
    let body = msg
        .body()
        .map(|body| annotate_with_options(body, msg.body_entities(), msg.highlight_fragment(), opts))
        .transpose()?;
    let transcription = render_transcription(msg, opts)
        .map(|inner| format!("{TRANSCRIPTION_OPEN}{inner}{TRANSCRIPTION_CLOSE}"));

    if body.is_none() && transcription.is_none() {
        return Ok(None);
    }
    Ok(Some(body.into_iter().chain(transcription).collect()))
}

/// Renders an attachment transcription with its highlighted runs wrapped in
/// `<span class="highlight">`. Nested highlights are not supported.
pub fn render_transcription(msg: &Message, opts: &RenderOptions) -> Option<String> {
    let markup = msg.transcription()?;
    let mut out = String::with_capacity(markup.len());
    for segment in split_highlights(markup) {
        let text = if opts.escape_html {
            html_escape::encode_text(segment.text)
        } else {
            Cow::Borrowed(segment.text)
        };
        if segment.highlighted {
            out.push_str(SEGMENT_OPEN);
            out.push_str(&text);
            out.push_str(SEGMENT_CLOSE);
        } else {
            out.push_str(&text);
        }
    }
    Some(out)
}

/// Renders messages one per line. Messages without a body yield empty lines
/// so line numbers keep matching input order.
pub fn render_messages(messages: &[Message], opts: &RenderOptions) -> Result<String, AnnotateError> {
    let mut lines = Vec::with_capacity(messages.len());
    for msg in messages {
        lines.push(render_message(msg, opts)?.unwrap_or_default());
    }
    Ok(lines.join("\n"))
}

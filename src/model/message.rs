use crate::model::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search highlight fragments keyed by the indexed field they came from.
pub type Highlight = BTreeMap<String, Vec<String>>;

/// Highlight fields in lookup order. The first field with at least one
/// fragment wins.
pub const HIGHLIGHT_FIELDS: [&str; 4] = ["text", "caption", "text.minimal", "caption.minimal"];

/// Highlight fields for an attachment transcription, in lookup order.
pub const TRANSCRIPTION_HIGHLIGHT_FIELDS: [&str; 2] =
    ["attachment.transcription", "attachment.transcription.minimal"];

/// The subset of a stored message that the annotator consumes.
///
/// Unknown fields in the payload (chat, sender, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Media caption, used when the message has no text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<Entity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

/// Media attached to a message. Only the speech transcription is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl Message {
    /// The text to render: `text`, else `caption`. Empty bodies count as absent.
    pub fn body(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or(self.caption.as_deref())
            .filter(|body| !body.is_empty())
    }

    /// `entities`, else `caption_entities`.
    pub fn body_entities(&self) -> Option<&[Entity]> {
        self.entities
            .as_deref()
            .or(self.caption_entities.as_deref())
    }

    /// The first highlight fragment of the first populated field in
    /// [`HIGHLIGHT_FIELDS`] order.
    pub fn highlight_fragment(&self) -> Option<&str> {
        self.first_fragment(&HIGHLIGHT_FIELDS)
    }

    /// Transcription markup to display: the first transcription highlight
    /// fragment, else the raw transcription. `None` when the attachment has
    /// no transcription.
    pub fn transcription(&self) -> Option<&str> {
        let raw = self.attachment.as_ref()?.transcription.as_deref()?;
        Some(self.first_fragment(&TRANSCRIPTION_HIGHLIGHT_FIELDS).unwrap_or(raw))
    }

    fn first_fragment(&self, fields: &[&str]) -> Option<&str> {
        let highlight = self.highlight.as_ref()?;
        fields
            .iter()
            .find_map(|field| highlight.get(*field).and_then(|fragments| fragments.first()))
            .map(String::as_str)
    }
}

/// On-disk message payload: a single message or an array of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageFile {
    Many(Vec<Message>),
    One(Box<Message>),
}

impl MessageFile {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            MessageFile::Many(messages) => messages,
            MessageFile::One(message) => vec![*message],
        }
    }
}

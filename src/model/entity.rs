use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic annotation over a contiguous range of message text.
///
/// `offset` and `length` are signed so that malformed payloads deserialize
/// and can be rejected with a proper error instead of a JSON failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub offset: i64,
    pub length: i64,

    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Destination for `text_link` entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Entity {
    pub fn new(offset: i64, length: i64, kind: EntityKind) -> Self {
        Self {
            offset,
            length,
            kind,
            url: None,
        }
    }

    pub fn text_link(offset: i64, length: i64, url: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            kind: EntityKind::TextLink,
            url: Some(url.into()),
        }
    }
}

/// Entity types.
///
/// Any type string without a dedicated variant (including `other`) is kept
/// verbatim in [`EntityKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Mention,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    Blockquote,
    TextLink,
    Hashtag,
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            EntityKind::Mention => "mention",
            EntityKind::Url => "url",
            EntityKind::Email => "email",
            EntityKind::PhoneNumber => "phone_number",
            EntityKind::Bold => "bold",
            EntityKind::Italic => "italic",
            EntityKind::Underline => "underline",
            EntityKind::Strikethrough => "strikethrough",
            EntityKind::Spoiler => "spoiler",
            EntityKind::Code => "code",
            EntityKind::Pre => "pre",
            EntityKind::Blockquote => "blockquote",
            EntityKind::TextLink => "text_link",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for EntityKind {
    fn from(raw: &str) -> Self {
        match raw {
            "mention" => EntityKind::Mention,
            "url" => EntityKind::Url,
            "email" => EntityKind::Email,
            "phone_number" => EntityKind::PhoneNumber,
            "bold" => EntityKind::Bold,
            "italic" => EntityKind::Italic,
            "underline" => EntityKind::Underline,
            "strikethrough" => EntityKind::Strikethrough,
            "spoiler" => EntityKind::Spoiler,
            "code" => EntityKind::Code,
            "pre" => EntityKind::Pre,
            "blockquote" => EntityKind::Blockquote,
            "text_link" => EntityKind::TextLink,
            "hashtag" => EntityKind::Hashtag,
            other => EntityKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityKind {
    fn from(raw: String) -> Self {
        EntityKind::from(raw.as_str())
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

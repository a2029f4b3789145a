use crate::model::{Entity, EntityKind};
use std::borrow::Cow;

/// Attributes shared by every link the annotator emits.
pub const LINK_ATTRS: &str = r#"class="text-indigo-800 hover:underline" target="_blank" rel="noreferrer""#;

/// Wrapper for entity types without a dedicated mapping.
pub const FALLBACK_TAG: &str = "<span>";

/// Opening markup for an entity covering `entity_text`.
///
/// Returns `None` when the entity carries too little data to link anywhere
/// (a `text_link` without a `url`).
pub fn opening_tag(entity: &Entity, entity_text: &str, escape: bool) -> Option<String> {
    let tag = match &entity.kind {
        EntityKind::Mention => link(&format!("https://t.me/{}", entity_text.replacen('@', "", 1)), escape),
        EntityKind::Url => link(&url_with_https(entity_text), escape),
        EntityKind::Email => link(&format!("mailto:{entity_text}"), escape),
        EntityKind::PhoneNumber => link(&format!("tel:{entity_text}"), escape),
        EntityKind::Bold => "<strong>".to_string(),
        EntityKind::Italic => "<i>".to_string(),
        EntityKind::Underline => "<u>".to_string(),
        EntityKind::Strikethrough => "<s>".to_string(),
        EntityKind::Spoiler => "<mark>".to_string(),
        EntityKind::Code => "<code>".to_string(),
        EntityKind::Pre => "<pre>".to_string(),
        EntityKind::Blockquote => "<blockquote>".to_string(),
        EntityKind::TextLink => link(entity.url.as_deref()?, escape),
        EntityKind::Hashtag => r#"<span class="text-blue-800">"#.to_string(),
        EntityKind::Other(_) => FALLBACK_TAG.to_string(),
    };
    Some(tag)
}

fn link(href: &str, escape: bool) -> String {
    let href = if escape {
        html_escape::encode_double_quoted_attribute(href)
    } else {
        Cow::Borrowed(href)
    };
    format!(r#"<a href="{href}" {LINK_ATTRS}>"#)
}

/// Element name of the first tag in `markup`: a `<`, ASCII letters, then
/// whitespace or `>`.
pub fn tag_name(markup: &str) -> Option<&str> {
    let bytes = markup.as_bytes();
    let mut from = 0;
    while let Some(rel) = markup[from..].find('<') {
        let start = from + rel + 1;
        let end = start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_alphabetic())
                .count();
        if end > start
            && bytes
                .get(end)
                .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>')
        {
            return Some(&markup[start..end]);
        }
        from = start;
    }
    None
}

/// Closing markup matching an opening tag.
pub fn closing_tag(opening: &str) -> Option<String> {
    tag_name(opening).map(|name| format!("</{name}>"))
}

/// Prefixes `https://` to URLs that carry no scheme.
///
/// Only the first line is inspected: if it contains `://` the URL is returned
/// as-is, a protocol-relative `//host` becomes `https://host`, and anything
/// else is prefixed whole.
pub fn url_with_https(url: &str) -> String {
    let first_line = url
        .find(['\n', '\r', '\u{2028}', '\u{2029}'])
        .map_or(url, |end| &url[..end]);

    if first_line.contains("://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_tag_is_parsed_from_opening() {
        assert_eq!(closing_tag("<strong>").as_deref(), Some("</strong>"));
        assert_eq!(closing_tag(r#"<a href="x" class="y">"#).as_deref(), Some("</a>"));
        assert_eq!(closing_tag(r#"<span class="text-blue-800">"#).as_deref(), Some("</span>"));
        assert_eq!(closing_tag("<blockquote>").as_deref(), Some("</blockquote>"));
        assert_eq!(closing_tag("no tag"), None);
        assert_eq!(closing_tag("<1><b>"), Some("</b>".to_string()));
    }

    #[test]
    fn url_with_https_cases() {
        assert_eq!(url_with_https("example.com"), "https://example.com");
        assert_eq!(url_with_https("http://example.com"), "http://example.com");
        assert_eq!(url_with_https("ftp://files.example.com/a"), "ftp://files.example.com/a");
        assert_eq!(url_with_https("//cdn.example.com/x.js"), "https://cdn.example.com/x.js");
        assert_eq!(url_with_https("a//b"), "https://a//b");
        assert_eq!(url_with_https("mailto:me@example.com"), "https://mailto:me@example.com");
        // a scheme on a later line does not count.
        assert_eq!(url_with_https("example.com\nhttp://x"), "https://example.com\nhttp://x");
    }

    #[test]
    fn mention_strips_first_at_sign_only() {
        let entity = Entity::new(0, 7, EntityKind::Mention);
        let tag = opening_tag(&entity, "@a@team", false).expect("tag");
        assert!(tag.starts_with(r#"<a href="https://t.me/a@team" "#), "{tag}");
    }

    #[test]
    fn text_link_without_url_has_no_tag() {
        let entity = Entity::new(0, 4, EntityKind::TextLink);
        assert_eq!(opening_tag(&entity, "here", false), None);
    }

    #[test]
    fn escaped_href() {
        let entity = Entity::text_link(0, 4, r#"https://x.org/?a="1"&b=2"#);
        let tag = opening_tag(&entity, "here", true).expect("tag");
        assert!(
            tag.starts_with(r#"<a href="https://x.org/?a=&quot;1&quot;&amp;b=2" "#),
            "{tag}"
        );
    }
}

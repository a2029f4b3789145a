//! AFL++ fuzz target for `msgmark`.
//!
//! This binary is intentionally stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin msgmark_afl_annotate
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/msgmark_afl_annotate
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::collections::BTreeMap;
use std::io::Read;

use msgmark::model::{Entity, EntityKind, OffsetUnit};
use msgmark::{RenderOptions, annotate_with_options};

const MAX_INPUT_LEN: usize = 64 * 1024; // highlight scanning is quadratic; keep cases small.

const KINDS: &[&str] = &[
    "mention",
    "url",
    "email",
    "phone_number",
    "bold",
    "italic",
    "underline",
    "strikethrough",
    "spoiler",
    "code",
    "pre",
    "blockquote",
    "text_link",
    "hashtag",
    "cashtag",
    "bot_command",
];

/// Removes every `<...>` run.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Opening minus closing count per element name.
fn tag_balance(markup: &str) -> BTreeMap<String, i64> {
    let mut balance = BTreeMap::new();
    for piece in markup.split('<').skip(1) {
        let (closing, rest) = match piece.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, piece),
        };
        let name: String = rest.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        *balance.entry(name).or_insert(0) += if closing { -1 } else { 1 };
    }
    balance.retain(|_, v| *v != 0);
    balance
}

fn entities_from_bytes(data: &[u8], len: usize) -> Vec<Entity> {
    data.chunks_exact(3)
        .take(32)
        .map(|c| {
            let offset = c[0] as usize % (len + 1);
            let length = c[1] as usize % (len + 1);
            let kind = EntityKind::from(KINDS[c[2] as usize % KINDS.len()]);
            let mut entity = Entity::new(offset as i64, length as i64, kind);
            if entity.kind == EntityKind::TextLink {
                entity.url = Some("https://example.com".to_string());
            }
            entity
        })
        .collect()
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        return;
    }

    // lossy conversion keeps the harness total (no early returns that reduce coverage).
    let raw = String::from_utf8_lossy(data).to_string();
    let text: String = raw.chars().filter(|c| *c != '<' && *c != '>').collect();

    for unit in [OffsetUnit::Utf16, OffsetUnit::Char] {
        let opts = RenderOptions {
            offset_unit: unit,
            escape_html: false,
        };
        let entities = entities_from_bytes(data, unit.count(&text));

        // invariants for entity-only markup:
        // - stripping the markup gives back the text
        // - every opened element is closed
        if let Ok(html) = annotate_with_options(&text, Some(&entities), None, &opts) {
            assert_eq!(strip_tags(&html), text, "markup changed the text");
            assert!(tag_balance(&html).is_empty(), "unbalanced markup: {html}");
        }

        // arbitrary highlight markup must never panic.
        let _ = annotate_with_options(&text, Some(&entities), Some(&raw), &opts);
    }
}

fn main() {
    let mut data = Vec::new();
    if std::io::stdin().read_to_end(&mut data).is_err() {
        return;
    }

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}

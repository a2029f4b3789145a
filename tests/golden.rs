use std::fs;
use std::path::PathBuf;
use msgmark::RenderOptions;

fn base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
}

#[test]
fn test_mixed_entities_and_highlights() {
    let in_path = base_dir().join("001-in-mixed-entities.json");
    let want_path = base_dir().join("001-want-mixed-entities.html");

    let want_html = fs::read_to_string(&want_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", want_path.display()));

    let actual_html = msgmark::render_file(&in_path, &RenderOptions::default())
        .unwrap_or_else(|e| panic!("failed to render {}: {e}", in_path.display()));

    let out_path = base_dir().join("001-out-mixed-entities.html");
    if !actual_html.eq(&want_html) {
        fs::write(&out_path, &actual_html)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", out_path.display()));
    } else if out_path.exists() {
        fs::remove_file(&out_path)
            .unwrap_or_else(|e| panic!("failed to remove {}: {e}", out_path.display()));
    }

    assert_eq!(actual_html, want_html);
}

#[test]
fn test_escape_option_only_touches_text_and_hrefs() {
    let json = r#"{"text": "1 < 2 & see x.org/?a=1&b=2", "entities": [{"offset": 12, "length": 14, "type": "url"}]}"#;

    let opts = RenderOptions {
        escape_html: true,
        ..Default::default()
    };
    let html = msgmark::render_json(json, &opts).unwrap();

    assert!(html.starts_with("1 &lt; 2 &amp; see "), "{html}");
    assert!(html.contains(r#"<a href="https://x.org/?a=1&amp;b=2" "#), "{html}");
    assert!(html.ends_with(">x.org/?a=1&amp;b=2</a>"), "{html}");
}

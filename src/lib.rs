pub mod annotate;
pub mod highlight;
pub mod model;
pub mod render;

pub use annotate::{AnnotateError, RenderOptions, annotate, annotate_with_options};

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Options controlling how rendered files are written on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// If true, replace `.html` files that already exist. Otherwise they are
    /// left untouched and counted as skipped.
    pub overwrite: bool,
}

/// Counters reported by bulk rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Parses a message payload: a single message object or an array.
pub fn parse_messages(json: &str) -> Result<Vec<model::Message>, serde_json::Error> {
    let file: model::MessageFile = serde_json::from_str(json)?;
    Ok(file.into_messages())
}

/// Renders a JSON payload to markup, one line per message.
pub fn render_json(json: &str, render_opts: &RenderOptions) -> Result<String, Box<dyn Error>> {
    let messages = parse_messages(json)?;
    debug!(count = messages.len(), "rendering messages");
    Ok(render::render_messages(&messages, render_opts)?)
}

/// Single file mode: read a message JSON file and return its markup.
pub fn render_file(path: &Path, render_opts: &RenderOptions) -> Result<String, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    render_json(&json, render_opts)
}

/// Bulk mode: walk `messages_root` for `*.json` files and write the rendered
/// markup to the same relative path under `out_root` with an `.html`
/// extension.
///
/// A file that fails to parse, render or write is reported and counted; the
/// walk carries on with the next file.
pub fn render_all_in_dirs(
    messages_root: &Path,
    out_root: &Path,
    render_opts: &RenderOptions,
    write_opts: &WriteOptions,
) -> Result<RenderSummary, Box<dyn Error>> {
    let start_time = Instant::now();

    if !messages_root.exists() {
        return Err(format!(
            "Messages directory not found: {}",
            messages_root.display()
        )
        .into());
    }

    let mut entries: Vec<_> = WalkDir::new(messages_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
        })
        .collect();

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();
    let mut summary = RenderSummary::default();

    for (n, entry) in entries.iter().enumerate() {
        let path = entry.path();
        let relative = path.strip_prefix(messages_root)?;

        let mut html_path = out_root.join(relative);
        html_path.set_extension("html");

        if html_path.exists() && !write_opts.overwrite {
            summary.skipped += 1;
            debug!(path = %html_path.display(), "keeping existing output");
            continue;
        }

        let html = match render_file(path, render_opts) {
            Ok(html) => html,
            Err(err) => {
                summary.failed += 1;
                warn!(path = %path.display(), error = %err, "failed to render");
                continue;
            }
        };

        if let Err(err) = write_html(&html_path, &html) {
            summary.failed += 1;
            warn!(path = %html_path.display(), error = %err, "failed to write");
            continue;
        }
        summary.rendered += 1;

        let total_ms = start_time.elapsed().as_millis();
        eprintln!(
            "[{:>4}/{:>4}] [{:02}:{:02}.{:03}] Rendered: {:?}",
            n + 1,
            total,
            total_ms / 60_000,
            (total_ms % 60_000) / 1_000,
            total_ms % 1_000,
            html_path
        );
    }

    eprintln!(
        "Done. Rendered {} files in {:.3}s ({} skipped, {} failed).",
        summary.rendered,
        start_time.elapsed().as_secs_f64(),
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

fn write_html(html_path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = html_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(html_path, html)
}

use clap::{Parser, ValueEnum};
use msgmark::model::{Entity, OffsetUnit};
use msgmark::{RenderOptions, WriteOptions};
use std::error::Error;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "msgmark")]
#[command(about = "Render message entities and search highlights as inline HTML")]
#[command(version)]
struct Cli {
    /// Message JSON file (one message or an array). Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Annotate this text instead of reading message JSON.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Entities for `--text`, as a JSON array.
    #[arg(long, requires = "text")]
    entities: Option<String>,

    /// Search highlight markup for `--text`.
    #[arg(long, requires = "text")]
    highlight: Option<String>,

    /// Render every `*.json` under `--messages-dir` into `--out-dir`.
    #[arg(long, conflicts_with_all = ["input", "text"])]
    render_all: bool,

    #[arg(long, default_value = "messages")]
    messages_dir: PathBuf,

    #[arg(long, default_value = "html")]
    out_dir: PathBuf,

    /// Replace existing `.html` files in bulk mode.
    #[arg(long)]
    overwrite: bool,

    /// Unit of entity offsets and lengths.
    #[arg(long, value_enum, default_value_t = UnitArg::Utf16)]
    offset_unit: UnitArg,

    /// HTML-escape message text and link targets.
    #[arg(long)]
    escape_html: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Utf16,
    Char,
}

impl From<UnitArg> for OffsetUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Utf16 => OffsetUnit::Utf16,
            UnitArg::Char => OffsetUnit::Char,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let render_opts = RenderOptions {
        offset_unit: cli.offset_unit.into(),
        escape_html: cli.escape_html,
    };

    if cli.render_all {
        let write_opts = WriteOptions {
            overwrite: cli.overwrite,
        };
        let summary =
            msgmark::render_all_in_dirs(&cli.messages_dir, &cli.out_dir, &render_opts, &write_opts)?;
        return Ok(if summary.failed > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let html = match cli.text {
        Some(text) => {
            let entities: Option<Vec<Entity>> =
                cli.entities.as_deref().map(serde_json::from_str).transpose()?;
            msgmark::annotate_with_options(
                &text,
                entities.as_deref(),
                cli.highlight.as_deref(),
                &render_opts,
            )?
        }
        None => match cli.input {
            Some(path) if path.as_os_str() != "-" => msgmark::render_file(&path, &render_opts)?,
            _ => {
                let mut json = String::new();
                io::stdin().read_to_string(&mut json)?;
                msgmark::render_json(&json, &render_opts)?
            }
        },
    };

    println!("{}", html);
    Ok(ExitCode::SUCCESS)
}

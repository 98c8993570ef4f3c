//! jsx-pipe: transform one TSX document to older JavaScript and print it
//! highlighted.

mod cli;
mod config;
mod error;
mod output;
mod pipeline;

use camino::Utf8PathBuf;
use clap::Parser;
use cli::Args;
use config::{Settings, DEMO_FILENAME, DEMO_SOURCE};
use error::PipelineError;
use jsx_transform::SourceDocument;
use miette::Result;
use pipeline::{AnsiPresenter, JsxTransformer, RunOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Filename given to documents read from stdin.
const STDIN_FILENAME: &str = "<stdin>";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level());

    run(args).await?;
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), PipelineError> {
    let total_start = Instant::now();

    let cwd = std::env::current_dir()
        .map_err(|e| PipelineError::io(".", e))
        .and_then(|dir| {
            Utf8PathBuf::try_from(dir).map_err(|e| PipelineError::io(".", e.into_io_error()))
        })?;
    let settings = Settings::resolve(&args, &cwd)?;

    let mut document = load_document(&args).await?;
    if let Some(dialect) = settings.dialect {
        document = document.with_dialect(dialect);
    }
    debug!(filename = %document.filename, dialect = ?document.dialect, "loaded document");

    let presenter = (args.out_file.is_none() && output::use_color(args.color))
        .then(AnsiPresenter::default);
    let options = RunOptions {
        timeout: Duration::from_millis(args.timeout_ms),
        language: args.language.clone(),
    };
    let outcome = pipeline::run(
        Arc::new(JsxTransformer),
        presenter.as_ref(),
        document,
        settings.config,
        &options,
    )
    .await?;

    let text = match args.out_file {
        Some(_) => &outcome.code,
        None => &outcome.display,
    };
    output::write_output(text, args.out_file.as_deref())?;
    match (&outcome.map, &args.out_file) {
        (Some(map), Some(out_file)) => {
            let path = output::write_source_map(map, out_file)?;
            debug!(%path, "wrote source map");
        }
        (Some(_), None) => warn!("source map requested without --out-file; not written"),
        _ => {}
    }

    if args.timings_enabled() {
        eprintln!(
            "{}",
            output::format_timings(&outcome.timings, total_start.elapsed(), args.timings_format)
        );
    }
    Ok(())
}

/// The input file, stdin for `-`, or the demo document when no input is given.
async fn load_document(args: &Args) -> Result<SourceDocument, PipelineError> {
    match &args.input {
        None => Ok(SourceDocument::new(DEMO_FILENAME, DEMO_SOURCE)),
        Some(_) if args.reads_stdin() => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(|e| PipelineError::io(STDIN_FILENAME, e))?;
            Ok(SourceDocument::new(STDIN_FILENAME, text))
        }
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| PipelineError::io(path, e))?;
            Ok(SourceDocument::new(path.as_str(), text))
        }
    }
}

//! Writing results and timings.

use crate::cli::{ColorMode, TimingFormat};
use crate::error::PipelineError;
use crate::pipeline::Timings;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::{IsTerminal, Write};
use std::time::Duration;

/// Whether output should be decorated.
pub fn use_color(mode: ColorMode) -> bool {
    color_enabled(
        mode,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    )
}

fn color_enabled(mode: ColorMode, is_terminal: bool, no_color: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_terminal && !no_color,
    }
}

/// `text` ending in exactly one newline it did not already have.
fn terminated(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Writes the final text once, newline-terminated, to `out_file` or stdout.
pub fn write_output(text: &str, out_file: Option<&Utf8Path>) -> Result<(), PipelineError> {
    let text = terminated(text);
    match out_file {
        Some(path) => fs::write(path, text).map_err(|e| PipelineError::io(path, e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| PipelineError::io("<stdout>", e))
        }
    }
}

/// The source map path for an output file: `out.js` → `out.js.map`.
pub fn map_path(out_file: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{out_file}.map"))
}

pub fn write_source_map(map: &str, out_file: &Utf8Path) -> Result<Utf8PathBuf, PipelineError> {
    let path = map_path(out_file);
    fs::write(&path, map).map_err(|e| PipelineError::io(&path, e))?;
    Ok(path)
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Formats phase timings for stderr.
pub fn format_timings(timings: &Timings, total: Duration, format: TimingFormat) -> String {
    match format {
        TimingFormat::Json => {
            let mut root = serde_json::Map::new();
            root.insert(
                "transform_ms".to_string(),
                serde_json::Value::from(duration_ms(timings.transform)),
            );
            root.insert(
                "present_ms".to_string(),
                timings
                    .present
                    .map(duration_ms)
                    .map(serde_json::Value::from)
                    .unwrap_or(serde_json::Value::Null),
            );
            root.insert(
                "total_ms".to_string(),
                serde_json::Value::from(duration_ms(total)),
            );
            serde_json::Value::Object(root).to_string()
        }
        TimingFormat::Text => {
            let mut out = String::from("=== jsx-pipe timings ===\n");
            out.push_str(&format!("transform: {:?}\n", timings.transform));
            match timings.present {
                Some(present) => out.push_str(&format!("present: {present:?}\n")),
                None => out.push_str("present: skipped\n"),
            }
            out.push_str(&format!("total: {total:?}"));
            out
        }
    }
}

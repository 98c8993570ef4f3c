//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum};
use jsx_transform::{EsTarget, JsxRuntime, PluginRef};

/// Transform one TSX document to older JavaScript and print it highlighted.
#[derive(Debug, Parser)]
#[command(name = "jsx-pipe")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input file; `-` reads stdin, omitted runs the built-in demo
    pub input: Option<Utf8PathBuf>,

    /// Write plain output to a file instead of stdout
    #[arg(short = 'o', long = "out-file")]
    pub out_file: Option<Utf8PathBuf>,

    /// JSON configuration file (comments allowed)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Target language level (es5, es2015 ... es2022, esnext)
    #[arg(long)]
    pub target: Option<EsTarget>,

    /// Markup runtime (classic or automatic)
    #[arg(long = "jsx-runtime")]
    pub jsx_runtime: Option<JsxRuntime>,

    /// Import source for the automatic runtime
    #[arg(long = "jsx-import-source")]
    pub jsx_import_source: Option<String>,

    /// Plugin identifier with optional JSON options, e.g. `css-interop={}`
    #[arg(long = "plugin", value_name = "ID[=JSON]", value_parser = parse_plugin)]
    pub plugins: Vec<PluginRef>,

    /// Emit CommonJS instead of ES modules
    #[arg(long = "no-module")]
    pub no_module: bool,

    /// Import helpers from `@swc/helpers` instead of inlining them
    #[arg(long = "external-helpers")]
    pub external_helpers: bool,

    /// Write `<out-file>.map` next to the output
    #[arg(long = "source-maps", requires = "out_file")]
    pub source_maps: bool,

    /// Language tag used to highlight the output
    #[arg(long, default_value = "js")]
    pub language: String,

    /// When to color the output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Transform timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = 30_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Print timing breakdowns
    #[arg(long)]
    pub timings: bool,

    /// Timing output format
    #[arg(long, value_enum, default_value = "text")]
    pub timings_format: TimingFormat,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Color policy.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

/// Timing output format.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum TimingFormat {
    /// Human-readable output
    #[default]
    Text,
    /// JSON output (machine-readable)
    Json,
}

impl Args {
    /// Whether the input comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_ref().is_some_and(|path| path.as_str() == "-")
    }

    pub fn timings_enabled(&self) -> bool {
        self.timings || self.timings_format == TimingFormat::Json
    }

    /// Default log level for the given `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parses `ID` or `ID=JSON`.
fn parse_plugin(value: &str) -> Result<PluginRef, String> {
    let (identifier, options) = match value.split_once('=') {
        Some((identifier, json)) => {
            let options = serde_json::from_str(json)
                .map_err(|e| format!("invalid JSON options for `{identifier}`: {e}"))?;
            (identifier, options)
        }
        None => (value, serde_json::Value::Null),
    };
    if identifier.trim().is_empty() {
        return Err("plugin identifier is empty".to_string());
    }
    Ok(PluginRef::new(identifier.trim()).with_options(options))
}

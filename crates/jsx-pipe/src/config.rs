//! Configuration loading.
//!
//! Settings are layered: command-line flags win over the config file, which
//! wins over the defaults. Without an input document the defaults are the
//! built-in demo's settings.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use jsx_transform::{Dialect, EsTarget, JsxRuntime, PluginRef, TransformConfig};
use serde::Deserialize;
use std::fs;
use thiserror::Error;
use tracing::debug;

/// Config file names looked up in the working directory.
pub const CONFIG_FILES: [&str; 2] = [".jsxpiperc", ".jsxpiperc.json"];

pub const DEMO_FILENAME: &str = "Demo.tsx";

pub const DEMO_SOURCE: &str = r#"
import React, { createElement } from 'react';
import { Container, Section } from '@app/components';

export function Demo(): JSX.Element {
  return (
    <Container>
      <Section>{React.createElement('h1', null)}</Section>
      <Section>{createElement('div', null)}</Section>
    </Container>
  );
};
"#;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid `{field}` in {path}: {message}")]
    InvalidValue {
        path: Utf8PathBuf,
        field: &'static str,
        message: String,
    },
}

/// The settings for the built-in demo document.
pub fn demo_config() -> TransformConfig {
    let mut config = TransformConfig {
        is_module: true,
        target: EsTarget::Es5,
        external_helpers: false,
        plugins: vec![PluginRef::new("css-interop").with_options(serde_json::json!({}))],
        ..TransformConfig::default()
    };
    config.jsx.runtime = JsxRuntime::Automatic;
    config.jsx.import_source = "react-native-css-interop".to_string();
    config
}

/// Config file contents. Every field is optional so that a file only
/// overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub is_module: Option<bool>,
    pub filename: Option<String>,
    pub source_maps: Option<bool>,
    #[serde(default)]
    pub jsc: JscConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JscConfig {
    pub target: Option<String>,
    pub parser: Option<ParserConfig>,
    #[serde(default)]
    pub transform: TransformSection,
    #[serde(default)]
    pub experimental: ExperimentalConfig,
    pub external_helpers: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "syntax", rename_all = "lowercase")]
pub enum ParserConfig {
    Typescript {
        #[serde(default)]
        tsx: bool,
    },
    Ecmascript {
        #[serde(default)]
        jsx: bool,
    },
}

impl ParserConfig {
    pub fn dialect(&self) -> Dialect {
        match *self {
            ParserConfig::Typescript { tsx } => Dialect::TypeScript { tsx },
            ParserConfig::Ecmascript { jsx } => Dialect::Ecmascript { jsx },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformSection {
    pub react: Option<ReactConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactConfig {
    pub runtime: Option<JsxRuntime>,
    pub import_source: Option<String>,
    pub pragma: Option<String>,
    pub pragma_frag: Option<String>,
    pub throw_if_namespace: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperimentalConfig {
    /// `[identifier, options]` pairs.
    pub plugins: Option<Vec<(String, serde_json::Value)>>,
}

impl FileConfig {
    /// Loads a config file, stripping comments first.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Utf8Path, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(&remove_json_comments(content)).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Finds and loads the first config file present in `dir`.
    pub fn find(dir: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, ConfigError> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.is_file() {
                debug!(%path, "using config file");
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }

    /// Applies the settings this file names on top of `config`.
    pub fn apply(&self, path: &Utf8Path, config: &mut TransformConfig) -> Result<(), ConfigError> {
        if let Some(is_module) = self.is_module {
            config.is_module = is_module;
        }
        if let Some(filename) = &self.filename {
            config.filename = Some(filename.clone());
        }
        if let Some(source_maps) = self.source_maps {
            config.source_maps = source_maps;
        }
        if let Some(target) = &self.jsc.target {
            config.target = target
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    path: path.to_owned(),
                    field: "jsc.target",
                    message,
                })?;
        }
        if let Some(external_helpers) = self.jsc.external_helpers {
            config.external_helpers = external_helpers;
        }
        if let Some(react) = &self.jsc.transform.react {
            if let Some(runtime) = react.runtime {
                config.jsx.runtime = runtime;
            }
            if let Some(import_source) = &react.import_source {
                config.jsx.import_source = import_source.clone();
            }
            if let Some(pragma) = &react.pragma {
                config.jsx.pragma = pragma.clone();
            }
            if let Some(pragma_frag) = &react.pragma_frag {
                config.jsx.pragma_frag = pragma_frag.clone();
            }
            if let Some(throw_if_namespace) = react.throw_if_namespace {
                config.jsx.throw_if_namespace = throw_if_namespace;
            }
        }
        if let Some(plugins) = &self.jsc.experimental.plugins {
            config.plugins = plugins
                .iter()
                .map(|(identifier, options)| {
                    PluginRef::new(identifier.clone()).with_options(options.clone())
                })
                .collect();
        }
        Ok(())
    }

    pub fn dialect(&self) -> Option<Dialect> {
        self.jsc.parser.as_ref().map(ParserConfig::dialect)
    }
}

/// The resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: TransformConfig,
    /// Parser override from the config file.
    pub dialect: Option<Dialect>,
}

impl Settings {
    /// Layers defaults, the config file and the command line.
    ///
    /// The config file is `--config` when given, otherwise the first of
    /// [`CONFIG_FILES`] found in `cwd`.
    pub fn resolve(args: &Args, cwd: &Utf8Path) -> Result<Self, ConfigError> {
        let mut config = if args.input.is_none() {
            demo_config()
        } else {
            TransformConfig::default()
        };

        let file = match &args.config {
            Some(path) => Some((path.clone(), FileConfig::load(path)?)),
            None => FileConfig::find(cwd)?,
        };
        let mut dialect = None;
        if let Some((path, file)) = &file {
            file.apply(path, &mut config)?;
            dialect = file.dialect();
        }

        apply_args(args, &mut config);
        Ok(Self { config, dialect })
    }
}

fn apply_args(args: &Args, config: &mut TransformConfig) {
    if args.no_module {
        config.is_module = false;
    }
    if let Some(target) = args.target {
        config.target = target;
    }
    if let Some(runtime) = args.jsx_runtime {
        config.jsx.runtime = runtime;
    }
    if let Some(import_source) = &args.jsx_import_source {
        config.jsx.import_source = import_source.clone();
    }
    if !args.plugins.is_empty() {
        config.plugins = args.plugins.clone();
    }
    if args.external_helpers {
        config.external_helpers = true;
    }
    if args.source_maps {
        config.source_maps = true;
    }
}

/// Removes `//` and `/* */` comments outside of strings.
fn remove_json_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                '"' => in_string = false,
                '\\' => result.extend(chars.next()),
                _ => {}
            }
            continue;
        }
        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                while let Some(next) = chars.next() {
                    if next == '*' && chars.next_if_eq(&'/').is_some() {
                        break;
                    }
                }
                // Keep tokens on either side of the comment apart.
                result.push(' ');
            }
            _ => result.push(c),
        }
    }

    result
}

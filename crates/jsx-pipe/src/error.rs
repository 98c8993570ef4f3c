//! Driver errors and their terminal rendering.

use crate::config::ConfigError;
use camino::Utf8PathBuf;
use jsx_transform::{SourceDocument, TransformError};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Everything that stops a run. Each variant exits with status 1.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The transform rejected the document.
    #[error("{error}")]
    Transform {
        error: TransformError,
        source_code: NamedSource<String>,
    },

    #[error("transform did not finish within {0:?}")]
    TimedOut(Duration),

    /// The transform worker panicked or could not be started.
    #[error("transform task failed: {0}")]
    Aborted(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error on {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn transform(error: TransformError, document: &SourceDocument) -> Self {
        Self::Transform {
            error,
            source_code: NamedSource::new(&document.filename, document.text.clone()),
        }
    }

    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Diagnostic for PipelineError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            Self::Transform { .. } => "jsx_pipe::transform",
            Self::TimedOut(_) => "jsx_pipe::timeout",
            Self::Aborted(_) => "jsx_pipe::aborted",
            Self::Config(_) => "jsx_pipe::config",
            Self::Io { .. } => "jsx_pipe::io",
        };
        Some(Box::new(code))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Transform { error, source_code } if error.location().is_some() => {
                Some(source_code)
            }
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Transform { error, .. } = self else {
            return None;
        };
        let location = error.location()?;
        let label = LabeledSpan::at(location.span.range(), error.message());
        Some(Box::new(std::iter::once(label)))
    }
}

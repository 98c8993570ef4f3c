//! Transform error types.

use source_map::{Position, Span};
use thiserror::Error;

/// Where in the input document an error was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: String,
    /// One-based line and column.
    pub position: Position,
    /// Byte span of the offending syntax.
    pub span: Span,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.filename, self.position)
    }
}

fn located(location: &Option<Location>, message: &str) -> String {
    match location {
        Some(location) => format!("{location}: {message}"),
        None => message.to_string(),
    }
}

/// A rejected transform request.
///
/// Every variant is fatal for the request that produced it; no partial output
/// is ever returned alongside an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The document is not valid for its dialect.
    #[error("{location}: {message}")]
    Parse { message: String, location: Location },

    /// A plugin identifier that no registered plugin answers to.
    #[error("unresolved plugin `{identifier}`")]
    UnresolvedPlugin { identifier: String },

    /// Plugin options that the plugin rejected.
    #[error("invalid options for plugin `{identifier}`: {message}")]
    InvalidPluginOptions { identifier: String, message: String },

    /// A namespaced element name while `throw_if_namespace` is set.
    #[error("{location}: namespaced JSX element `{name}` is not supported")]
    NamespacedJsx { name: String, location: Location },

    /// An error reported by one of the transform passes.
    #[error("{}", located(.location, .message))]
    Transform {
        message: String,
        location: Option<Location>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TransformError {
    /// The source location, for errors that have one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Parse { location, .. } | Self::NamespacedJsx { location, .. } => Some(location),
            Self::Transform { location, .. } => location.as_ref(),
            Self::UnresolvedPlugin { .. }
            | Self::InvalidPluginOptions { .. }
            | Self::InvalidConfig(_) => None,
        }
    }

    /// The message without the location prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Parse { message, .. } | Self::Transform { message, .. } => message.clone(),
            Self::NamespacedJsx { name, .. } => {
                format!("namespaced JSX element `{name}` is not supported")
            }
            other => other.to_string(),
        }
    }
}

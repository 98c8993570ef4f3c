//! Presentation errors.

use thiserror::Error;

/// A rejected presentation request.
///
/// Presentation failures are never fatal for the caller: the undecorated
/// text is still valid output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("unknown language tag `{0}`")]
    UnknownLanguage(String),
}

//! Language tags accepted by the highlighter.

use crate::PresentationError;
use std::fmt;
use std::str::FromStr;

/// The languages the highlighter knows how to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Json,
}

impl Language {
    /// Every tag accepted by [`Language::from_str`].
    pub const TAGS: &'static [&'static str] = &[
        "js",
        "javascript",
        "jsx",
        "mjs",
        "cjs",
        "ts",
        "typescript",
        "tsx",
        "mts",
        "cts",
        "json",
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Json => "json",
        }
    }

    pub(crate) fn has_keywords(self) -> bool {
        !matches!(self, Language::Json)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = PresentationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "js" | "javascript" | "jsx" | "mjs" | "cjs" => Ok(Language::JavaScript),
            "ts" | "typescript" | "tsx" | "mts" | "cts" => Ok(Language::TypeScript),
            "json" => Ok(Language::Json),
            _ => Err(PresentationError::UnknownLanguage(tag.to_string())),
        }
    }
}

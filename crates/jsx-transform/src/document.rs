//! Input documents.

/// The syntax a document is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    TypeScript { tsx: bool },
    Ecmascript { jsx: bool },
}

impl Dialect {
    /// Infers the dialect from a file extension. Unknown extensions parse as
    /// TSX, which accepts the widest range of input.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ts" | "mts" | "cts" => Dialect::TypeScript { tsx: false },
            "js" | "jsx" | "mjs" | "cjs" => Dialect::Ecmascript { jsx: true },
            _ => Dialect::TypeScript { tsx: true },
        }
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, Dialect::TypeScript { .. })
    }
}

/// One immutable in-memory source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub filename: String,
    pub dialect: Dialect,
    pub text: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            dialect: Dialect::from_filename(&filename),
            filename,
            text: text.into(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_filename() {
        assert_eq!(
            Dialect::from_filename("Demo.tsx"),
            Dialect::TypeScript { tsx: true }
        );
        assert_eq!(
            Dialect::from_filename("lib/index.mts"),
            Dialect::TypeScript { tsx: false }
        );
        assert_eq!(
            Dialect::from_filename("App.JSX"),
            Dialect::Ecmascript { jsx: true }
        );
        assert_eq!(
            Dialect::from_filename("stdin"),
            Dialect::TypeScript { tsx: true }
        );
    }
}

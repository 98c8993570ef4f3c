//! Painting source text with ANSI styles.

use crate::lexer::{Lexer, TokenKind};
use crate::theme::{Theme, TokenClass};
use crate::{Language, PresentationError};
use tracing::trace;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
    "get", "if", "import", "in", "instanceof", "let", "new", "of", "return", "set", "static",
    "super", "switch", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
];

const TYPESCRIPT_KEYWORDS: &[&str] = &[
    "abstract",
    "declare",
    "enum",
    "implements",
    "infer",
    "interface",
    "is",
    "keyof",
    "namespace",
    "private",
    "protected",
    "public",
    "readonly",
    "satisfies",
    "type",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined", "this", "NaN", "Infinity"];

const BUILT_INS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object", "Promise",
    "Reflect", "RegExp", "Set", "String", "Symbol", "WeakMap", "WeakSet", "console", "exports",
    "module", "require", "window", "document", "globalThis",
];

/// Paints source text for a terminal.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders `text` in the language named by `tag`.
    pub fn highlight(&self, text: &str, tag: &str) -> Result<String, PresentationError> {
        let language: Language = tag.parse()?;
        Ok(self.render(text, language))
    }

    /// Renders `text` as `language`. Escape sequences already in `text` are
    /// removed first, so rendering rendered text changes nothing.
    pub fn render(&self, text: &str, language: Language) -> String {
        let text = strip_ansi(text);
        let mut out = String::with_capacity(text.len() * 2);
        let mut cursor = 0usize;
        let mut painted = 0usize;

        for token in Lexer::new(&text) {
            let range = token.span.range();
            let (Some(gap), Some(slice)) = (text.get(cursor..range.start), text.get(range.clone()))
            else {
                continue;
            };
            out.push_str(gap);
            let class = classify(
                token.kind,
                slice,
                text.get(range.end..).unwrap_or_default(),
                language,
            );
            let style = self.theme.style(class);
            if style.is_plain() {
                out.push_str(slice);
            } else {
                out.push_str(&style.paint(slice).to_string());
                painted += 1;
            }
            cursor = range.end;
        }
        out.push_str(text.get(cursor..).unwrap_or_default());

        trace!(language = %language, painted, "highlighted");
        out
    }
}

fn classify(kind: TokenKind, slice: &str, rest: &str, language: Language) -> TokenClass {
    match kind {
        TokenKind::LineComment | TokenKind::BlockComment => TokenClass::Comment,
        TokenKind::String | TokenKind::Template => TokenClass::String,
        TokenKind::Number => TokenClass::Number,
        TokenKind::Punct => TokenClass::Punctuation,
        TokenKind::PrivateName | TokenKind::Error => TokenClass::Plain,
        TokenKind::Ident => classify_ident(slice, rest, language),
    }
}

fn classify_ident(word: &str, rest: &str, language: Language) -> TokenClass {
    if LITERALS.contains(&word) {
        return TokenClass::Literal;
    }
    if !language.has_keywords() {
        return TokenClass::Plain;
    }
    if KEYWORDS.contains(&word)
        || (language == Language::TypeScript && TYPESCRIPT_KEYWORDS.contains(&word))
    {
        return TokenClass::Keyword;
    }
    if BUILT_INS.contains(&word) {
        return TokenClass::BuiltIn;
    }
    if rest.trim_start().starts_with('(') {
        return TokenClass::Function;
    }
    TokenClass::Plain
}

/// Removes ANSI escape sequences (`ESC [ ... final-byte`) from `text`.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\u{1b}' {
            out.push(ch);
            continue;
        }
        if chars.peek() != Some(&'[') {
            continue;
        }
        chars.next();
        // Parameter and intermediate bytes, then one final byte.
        for c in chars.by_ref() {
            if ('\u{40}'..='\u{7e}').contains(&c) {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_ident() {
        let js = Language::JavaScript;
        assert_eq!(classify_ident("var", "", js), TokenClass::Keyword);
        assert_eq!(classify_ident("null", "", js), TokenClass::Literal);
        assert_eq!(classify_ident("Object", ".assign", js), TokenClass::BuiltIn);
        assert_eq!(classify_ident("_jsx", "(A)", js), TokenClass::Function);
        assert_eq!(classify_ident("_jsx", " (A)", js), TokenClass::Function);
        assert_eq!(classify_ident("value", " = 1", js), TokenClass::Plain);
        assert_eq!(classify_ident("interface", "", js), TokenClass::Plain);
        assert_eq!(
            classify_ident("interface", "", Language::TypeScript),
            TokenClass::Keyword
        );
        assert_eq!(classify_ident("var", "", Language::Json), TokenClass::Plain);
        assert_eq!(classify_ident("true", "", Language::Json), TokenClass::Literal);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\u{1b}[1;34mvar\u{1b}[0m a"), "var a");
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(strip_ansi("\u{1b}[38;5;10mx\u{1b}[0m"), "x");
    }

    #[test]
    fn test_plain_theme_is_identity() {
        let text = "var a = f(1, \"two\"); // three\n";
        let highlighter = Highlighter::new(Theme::plain());
        assert_eq!(highlighter.render(text, Language::JavaScript), text);
    }
}

//! ANSI syntax highlighting for JavaScript, TypeScript and JSON.
//!
//! The highlighter lexes text with a small `logos` lexer and paints each token
//! class with a [`Theme`] style. Whitespace and anything the lexer does not
//! recognise are copied through unchanged, and escape sequences already in the
//! input are stripped first, so highlighting is idempotent.
//!
//! # Example
//!
//! ```
//! use jsx_highlight::{strip_ansi, Highlighter};
//!
//! let highlighter = Highlighter::default();
//! let painted = highlighter.highlight("var a = _jsx(A, {});", "js").unwrap();
//! assert_eq!(strip_ansi(&painted), "var a = _jsx(A, {});");
//! ```

mod error;
mod highlight;
mod language;
pub mod lexer;
mod theme;

pub use error::PresentationError;
pub use highlight::{strip_ansi, Highlighter};
pub use language::Language;
pub use theme::{Theme, TokenClass};

/// Highlights `text` with the default theme.
pub fn highlight(text: &str, tag: &str) -> Result<String, PresentationError> {
    Highlighter::default().highlight(text, tag)
}

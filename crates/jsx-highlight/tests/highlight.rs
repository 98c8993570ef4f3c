//! Tests for the public highlighting API.

use jsx_highlight::{highlight, strip_ansi, Highlighter, Language, PresentationError, Theme};
use pretty_assertions::assert_eq;

const OUTPUT: &str = r#"import { jsx as _jsx } from "react/jsx-runtime";
/* lowered */
export function Demo() {
  return _jsx(Container, { children: `a ${b}`, count: 0x1F, ok: true });
}
"#;

#[test]
fn test_visible_text_is_unchanged() {
    let painted = highlight(OUTPUT, "js").unwrap();
    assert_ne!(painted, OUTPUT);
    assert_eq!(strip_ansi(&painted), OUTPUT);
}

#[test]
fn test_rendering_twice_is_idempotent() {
    let once = highlight(OUTPUT, "tsx").unwrap();
    let twice = highlight(&once, "tsx").unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_keywords_are_painted_with_theme_style() {
    let theme = Theme::default();
    let painted = Highlighter::new(theme.clone()).render("return x;", Language::JavaScript);
    assert!(painted.starts_with(&theme.keyword.paint("return").to_string()));
}

#[test]
fn test_json() {
    let painted = highlight("{\"a\": [1, null]}", "json").unwrap();
    assert_eq!(strip_ansi(&painted), "{\"a\": [1, null]}");
}

#[test]
fn test_unknown_language() {
    assert_eq!(
        highlight("x", "brainfuck"),
        Err(PresentationError::UnknownLanguage("brainfuck".to_string()))
    );
}

#[test]
fn test_unrecognised_bytes_are_copied() {
    let text = "a = \"unterminated\nb = 'é' € \\";
    assert_eq!(strip_ansi(&highlight(text, "js").unwrap()), text);
}

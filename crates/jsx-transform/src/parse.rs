//! Loading documents into swc and parsing them.

use crate::document::{Dialect, SourceDocument};
use crate::error::{Location, TransformError};
use source_map::{LineIndex, Span};
use swc_common::comments::SingleThreadedComments;
use swc_common::{sync::Lrc, FileName, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};

/// One document registered with an swc source map.
pub(crate) struct Input<'a> {
    pub files: Lrc<SourceMap>,
    pub file: Lrc<SourceFile>,
    pub filename: &'a str,
    text: &'a str,
    lines: LineIndex,
}

impl<'a> Input<'a> {
    /// Must be called inside `GLOBALS.set`.
    pub fn new(document: &'a SourceDocument, filename: &'a str) -> Self {
        let files: Lrc<SourceMap> = Default::default();
        let file = files.new_source_file(
            FileName::Custom(filename.to_string()).into(),
            document.text.clone(),
        );
        Self {
            files,
            file,
            filename,
            text: &document.text,
            lines: LineIndex::new(&document.text),
        }
    }

    /// Converts an swc span to a document-relative span.
    pub fn span(&self, span: swc_common::Span) -> Span {
        let start = self.file.start_pos.0;
        Span::new(
            span.lo.0.saturating_sub(start),
            span.hi.0.saturating_sub(start),
        )
    }

    pub fn location(&self, span: swc_common::Span) -> Location {
        let span = self.span(span);
        Location {
            filename: self.filename.to_string(),
            position: self.lines.position(self.text, span.start),
            span,
        }
    }
}

fn syntax(dialect: Dialect) -> Syntax {
    match dialect {
        Dialect::TypeScript { tsx } => Syntax::Typescript(TsSyntax {
            tsx,
            ..Default::default()
        }),
        Dialect::Ecmascript { jsx } => Syntax::Es(EsSyntax {
            jsx,
            ..Default::default()
        }),
    }
}

/// Parses the document as a module. Recoverable errors are fatal too.
pub(crate) fn parse(
    input: &Input<'_>,
    dialect: Dialect,
    comments: &SingleThreadedComments,
) -> Result<Module, TransformError> {
    let mut recovered = Vec::new();
    let parsed = parse_file_as_module(
        &input.file,
        syntax(dialect),
        EsVersion::EsNext,
        Some(comments),
        &mut recovered,
    );

    let error = match parsed {
        Ok(module) => match recovered.into_iter().next() {
            None => return Ok(module),
            Some(error) => error,
        },
        Err(error) => error,
    };
    let span = error.span();
    Err(TransformError::Parse {
        message: error.into_kind().msg().to_string(),
        location: input.location(span),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::comments::Comments;
    use swc_common::{Globals, GLOBALS};

    fn parse_text(filename: &str, text: &str) -> (Result<Module, TransformError>, bool) {
        let document = SourceDocument::new(filename, text);
        GLOBALS.set(&Globals::new(), || {
            let input = Input::new(&document, filename);
            let comments = SingleThreadedComments::default();
            let parsed = parse(&input, document.dialect, &comments);
            let has_comments = parsed
                .as_ref()
                .ok()
                .and_then(|module| module.body.first())
                .is_some_and(|item| comments.has_leading(item.span().lo));
            (parsed, has_comments)
        })
    }

    #[test]
    fn test_parses_tsx_and_keeps_comments() {
        let (parsed, has_comments) = parse_text(
            "a.tsx",
            "/** @jsxRuntime classic */\nconst a: number = 1;\nexport const b = <div />;",
        );
        assert_eq!(parsed.unwrap().body.len(), 2);
        assert!(has_comments);
    }

    #[test]
    fn test_parse_error_has_position() {
        let (parsed, _) = parse_text("a.tsx", "let ok = 1;\nconst a = ;\n");
        match parsed.unwrap_err() {
            TransformError::Parse { location, .. } => {
                assert_eq!(location.filename, "a.tsx");
                assert_eq!(location.position.line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_jsx_is_rejected_in_plain_typescript() {
        assert!(parse_text("a.ts", "const a = <div />;").0.is_err());
    }
}

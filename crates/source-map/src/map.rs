//! Version 3 source maps for generated code.

use crate::LineCol;
use swc_common::source_map::SourceMapGenConfig;
use swc_common::{BytePos, FileName};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to serialize source map")]
pub struct MapError(#[from] swc_sourcemap::Error);

/// Names the single input document and embeds its text.
struct SingleSource<'a> {
    source: &'a str,
}

impl SourceMapGenConfig for SingleSource<'_> {
    fn file_name_to_source(&self, _: &FileName) -> String {
        self.source.to_string()
    }

    fn inline_sources_content(&self, _: &FileName) -> bool {
        true
    }

    fn ignore_list(&self, _: &FileName) -> bool {
        false
    }
}

/// A source map from one generated file back to one input document.
#[derive(Debug)]
pub struct SourceMap {
    inner: swc_sourcemap::SourceMap,
}

impl SourceMap {
    /// Builds the map from the `(original position, generated line/column)`
    /// pairs the code generator records.
    ///
    /// `source` names the input in `sources`; `file` names the output.
    pub fn build(
        files: &swc_common::SourceMap,
        mappings: &[(BytePos, swc_common::LineCol)],
        source: &str,
        file: &str,
    ) -> Self {
        let mut inner = files.build_source_map(mappings, None, SingleSource { source });
        inner.set_file(Some(file.to_string()));
        Self { inner }
    }

    pub fn file(&self) -> Option<&str> {
        self.inner.get_file().map(|file| &**file)
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.inner.sources().map(|source| &**source)
    }

    /// The zero-based original position of the token covering a zero-based
    /// generated line and column.
    pub fn original_position(&self, line: u32, col: u32) -> Option<LineCol> {
        let token = self.inner.lookup_token(line, col)?;
        Some(LineCol::new(token.get_src_line(), token.get_src_col()))
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        let mut out = Vec::new();
        self.inner.to_writer(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swc_common::sync::Lrc;
    use swc_ecma_ast::EsVersion;
    use swc_ecma_codegen::text_writer::JsWriter;
    use swc_ecma_codegen::Emitter;
    use swc_ecma_parser::{parse_file_as_module, Syntax};

    /// Reprints `text` and maps the output back to it.
    fn reprint(text: &str) -> (String, SourceMap) {
        let files: Lrc<swc_common::SourceMap> = Default::default();
        let fm = files.new_source_file(FileName::Custom("in.js".into()).into(), text.to_string());
        let module = parse_file_as_module(
            &fm,
            Syntax::Es(Default::default()),
            EsVersion::latest(),
            None,
            &mut Vec::new(),
        )
        .unwrap();

        let mut code = Vec::new();
        let mut mappings = Vec::new();
        {
            let mut emitter = Emitter {
                cfg: Default::default(),
                cm: files.clone(),
                comments: None,
                wr: JsWriter::new(files.clone(), "\n", &mut code, Some(&mut mappings)),
            };
            emitter.emit_module(&module).unwrap();
        }

        let map = SourceMap::build(&files, &mappings, "src/in.js", "in.out.js");
        (String::from_utf8(code).unwrap(), map)
    }

    #[test]
    fn test_names_source_and_file() {
        let (_, map) = reprint("let a = 1;\n");
        assert_eq!(map.file(), Some("in.out.js"));
        assert_eq!(map.sources().collect::<Vec<_>>(), vec!["src/in.js"]);
    }

    #[test]
    fn test_moved_statement_maps_to_its_line() {
        let (code, map) = reprint("\n\n  call();\n");
        assert_eq!(code, "call();\n");
        assert_eq!(map.original_position(0, 0), Some(LineCol::new(2, 2)));
    }

    #[test]
    fn test_json_embeds_source_text() {
        let (_, map) = reprint("let a = 1;\n");
        let json = map.to_json().unwrap();
        assert!(json.contains("\"version\":3"));
        assert!(json.contains("\"sourcesContent\":[\"let a = 1;\\n\"]"));
    }
}

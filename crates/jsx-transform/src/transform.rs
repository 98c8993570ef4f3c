//! The transform entry point: parse, run the passes, print.

use crate::config::TransformConfig;
use crate::diagnostics::Reports;
use crate::document::{Dialect, SourceDocument};
use crate::error::TransformError;
use crate::parse::{parse, Input};
use crate::passes::{
    check_namespaces, finish_module, lower_jsx, lower_syntax, strip_types, Marks,
};
use crate::plugin::{PluginContext, PluginRegistry};
use std::path::Path;
use swc_common::comments::SingleThreadedComments;
use swc_common::errors::HANDLER;
use swc_common::{BytePos, Globals, LineCol, GLOBALS};
use swc_ecma_ast::Program;
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::Emitter;
use swc_ecma_transforms_base::fixer::fixer;
use swc_ecma_transforms_base::helpers::{Helpers, HELPERS};
use swc_ecma_transforms_base::hygiene::hygiene;
use swc_ecma_transforms_base::resolver;
use swc_ecma_visit::VisitMutWith;
use tracing::debug;

/// The result of a successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// A version 3 source map, when requested.
    pub map: Option<String>,
}

/// Transforms one document with the built-in plugin registry.
pub fn transform(
    document: &SourceDocument,
    config: &TransformConfig,
) -> Result<TransformOutput, TransformError> {
    transform_with_registry(document, config, &PluginRegistry::builtin())
}

/// Transforms one document, resolving plugins through `registry`.
///
/// The call is pure: identical inputs always produce identical output.
pub fn transform_with_registry(
    document: &SourceDocument,
    config: &TransformConfig,
    registry: &PluginRegistry,
) -> Result<TransformOutput, TransformError> {
    let plugins = config
        .plugins
        .iter()
        .map(|plugin| registry.resolve(plugin))
        .collect::<Result<Vec<_>, _>>()?;

    let filename = config
        .filename
        .as_deref()
        .unwrap_or(document.filename.as_str());
    debug!(
        filename,
        target = %config.target,
        runtime = %config.jsx.runtime,
        plugins = plugins.len(),
        "transforming"
    );

    GLOBALS.set(&Globals::new(), || {
        let input = Input::new(document, filename);
        let comments = SingleThreadedComments::default();
        let module = parse(&input, document.dialect, &comments)?;
        if config.jsx.throw_if_namespace {
            check_namespaces(&module, &input)?;
        }

        let reports = Reports::default();
        let handler = reports.handler();
        let helpers = Helpers::new(config.external_helpers);
        let marks = Marks::new();

        let program = HANDLER.set(&handler, || {
            HELPERS.set(&helpers, || {
                let mut module = module;
                module.visit_mut_with(&mut resolver(
                    marks.unresolved,
                    marks.top_level,
                    document.dialect.is_typescript(),
                ));

                let cx = PluginContext::new(filename, marks.unresolved);
                for plugin in &plugins {
                    plugin.transform(&mut module, &cx);
                    debug!(plugin = plugin.name(), "plugin ran");
                }

                let mut program = Program::Module(module);
                if let Dialect::TypeScript { tsx } = document.dialect {
                    program.mutate(strip_types(
                        input.files.clone(),
                        &config.jsx,
                        tsx,
                        &comments,
                        marks,
                    ));
                }
                program.mutate(lower_jsx(input.files.clone(), &config.jsx, &comments, marks));
                program.mutate(lower_syntax(
                    config.target,
                    document.dialect.is_typescript(),
                    &comments,
                    marks,
                ));
                program.mutate(finish_module(config.is_module, config.target, marks));
                program.mutate((hygiene(), fixer(Some(&comments))));
                program
            })
        });

        if let Some(report) = reports.first() {
            let location = report
                .span
                .filter(|span| !span.is_dummy() && input.file.contains(span.lo))
                .map(|span| input.location(span));
            return Err(TransformError::Transform {
                message: report.message,
                location,
            });
        }

        print(&input, &program, &comments, config)
    })
}

fn print(
    input: &Input<'_>,
    program: &Program,
    comments: &SingleThreadedComments,
    config: &TransformConfig,
) -> Result<TransformOutput, TransformError> {
    let mut code = Vec::new();
    let mut mappings: Vec<(BytePos, LineCol)> = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(config.target.es_version()),
            cm: input.files.clone(),
            comments: Some(comments),
            wr: JsWriter::new(
                input.files.clone(),
                "\n",
                &mut code,
                config.source_maps.then_some(&mut mappings),
            ),
        };
        emitter
            .emit_program(program)
            .map_err(|error| TransformError::Transform {
                message: format!("failed to print output: {error}"),
                location: None,
            })?;
    }
    let code = String::from_utf8_lossy(&code).into_owned();

    let map = if config.source_maps {
        let map = source_map::SourceMap::build(
            &input.files,
            &mappings,
            input.filename,
            &output_name(input.filename),
        );
        let json = map.to_json().map_err(|error| TransformError::Transform {
            message: error.to_string(),
            location: None,
        })?;
        Some(json)
    } else {
        None
    };

    Ok(TransformOutput { code, map })
}

/// `src/App.tsx` → `App.js`.
fn output_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    format!("{stem}.js")
}

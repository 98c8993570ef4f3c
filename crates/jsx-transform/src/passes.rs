//! Configuring the swc passes a request runs.

use crate::config::{EsTarget, JsxOptions, JsxRuntime};
use crate::error::TransformError;
use crate::parse::Input;
use swc_common::comments::SingleThreadedComments;
use swc_common::{sync::Lrc, Mark, SourceMap};
use swc_ecma_ast::{JSXElementName, Module, Pass};
use swc_ecma_transforms_base::helpers::inject_helpers;
use swc_ecma_transforms_compat::{
    es2015, es2016, es2017, es2018, es2019, es2020, es2021, es2022,
};
use swc_ecma_transforms_module::common_js::{self, common_js, FeatureFlag};
use swc_ecma_transforms_module::import_analysis::import_analyzer;
use swc_ecma_transforms_module::path::Resolver;
use swc_ecma_transforms_module::util::ImportInterop;
use swc_ecma_transforms_react::{react, Runtime};
use swc_ecma_transforms_typescript::{tsx, typescript, TsxConfig};
use swc_ecma_visit::{Visit, VisitWith};

impl EsTarget {
    pub(crate) fn es_version(self) -> swc_ecma_ast::EsVersion {
        use swc_ecma_ast::EsVersion;
        match self {
            EsTarget::Es5 => EsVersion::Es5,
            EsTarget::Es2015 => EsVersion::Es2015,
            EsTarget::Es2016 => EsVersion::Es2016,
            EsTarget::Es2017 => EsVersion::Es2017,
            EsTarget::Es2018 => EsVersion::Es2018,
            EsTarget::Es2019 => EsVersion::Es2019,
            EsTarget::Es2020 => EsVersion::Es2020,
            EsTarget::Es2021 => EsVersion::Es2021,
            EsTarget::Es2022 => EsVersion::Es2022,
            EsTarget::EsNext => EsVersion::EsNext,
        }
    }
}

/// Marks shared by every pass of one request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Marks {
    pub unresolved: Mark,
    pub top_level: Mark,
}

impl Marks {
    /// Must be called inside `GLOBALS.set`.
    pub fn new() -> Self {
        Self {
            unresolved: Mark::new(),
            top_level: Mark::new(),
        }
    }
}

fn react_options(jsx: &JsxOptions) -> swc_ecma_transforms_react::Options {
    let mut options = swc_ecma_transforms_react::Options::default();
    options.runtime = Some(match jsx.runtime {
        JsxRuntime::Classic => Runtime::Classic,
        JsxRuntime::Automatic => Runtime::Automatic,
    });
    options.import_source = Some(jsx.import_source.as_str().into());
    options.pragma = Some(jsx.pragma.clone().into());
    options.pragma_frag = Some(jsx.pragma_frag.clone().into());
    options.throw_if_namespace = Some(jsx.throw_if_namespace);
    options.development = Some(false);
    options
}

/// Erases TypeScript. `.tsx` documents keep the imports the classic pragma
/// refers to.
pub(crate) fn strip_types(
    files: Lrc<SourceMap>,
    jsx: &JsxOptions,
    tsx_syntax: bool,
    comments: &SingleThreadedComments,
    marks: Marks,
) -> impl Pass {
    let config = swc_ecma_transforms_typescript::Config::default();
    let tsx_pass = tsx_syntax.then(|| {
        tsx(
            files,
            config,
            TsxConfig {
                pragma: Some(jsx.pragma.clone().into()),
                pragma_frag: Some(jsx.pragma_frag.clone().into()),
            },
            comments.clone(),
            marks.unresolved,
            marks.top_level,
        )
    });
    let ts_pass = (!tsx_syntax).then(|| typescript(config, marks.unresolved, marks.top_level));
    (tsx_pass, ts_pass)
}

/// Lowers markup to runtime calls. `@jsx` and `@jsxRuntime` comments in the
/// document override `jsx`.
pub(crate) fn lower_jsx(
    files: Lrc<SourceMap>,
    jsx: &JsxOptions,
    comments: &SingleThreadedComments,
    marks: Marks,
) -> impl Pass {
    react(
        files,
        Some(comments.clone()),
        react_options(jsx),
        marks.top_level,
        marks.unresolved,
    )
}

/// Lowers every syntax level newer than `target`.
pub(crate) fn lower_syntax(
    target: EsTarget,
    typescript: bool,
    comments: &SingleThreadedComments,
    marks: Marks,
) -> impl Pass {
    let unresolved = marks.unresolved;
    (
        (target < EsTarget::Es2022).then(|| es2022(Default::default(), unresolved)),
        (target < EsTarget::Es2021).then(es2021),
        (target < EsTarget::Es2020).then(|| es2020(Default::default(), unresolved)),
        (target < EsTarget::Es2019).then(es2019),
        (target < EsTarget::Es2018).then(|| es2018(Default::default())),
        (target < EsTarget::Es2017).then(|| es2017(Default::default(), unresolved)),
        (target < EsTarget::Es2016).then(es2016),
        (target < EsTarget::Es2015).then(|| {
            es2015(
                unresolved,
                Some(comments.clone()),
                es2015::Config {
                    typescript,
                    ..Default::default()
                },
            )
        }),
    )
}

/// Injects the helpers the lowering passes asked for and, unless `is_module`,
/// rewrites module syntax to `require` and `exports`.
pub(crate) fn finish_module(is_module: bool, target: EsTarget, marks: Marks) -> impl Pass {
    let features = FeatureFlag {
        support_block_scoping: target >= EsTarget::Es2015,
        support_arrow: target >= EsTarget::Es2015,
    };
    (
        (!is_module).then(|| import_analyzer(ImportInterop::Swc, false)),
        inject_helpers(marks.unresolved),
        (!is_module).then(|| {
            common_js(
                Resolver::Default,
                marks.unresolved,
                common_js::Config::default(),
                features,
            )
        }),
    )
}

/// Finds the first namespaced element name, such as `<svg:rect>`.
#[derive(Default)]
struct NamespacedElement {
    found: Option<(String, swc_common::Span)>,
}

impl Visit for NamespacedElement {
    fn visit_jsx_element_name(&mut self, name: &JSXElementName) {
        if self.found.is_some() {
            return;
        }
        if let JSXElementName::JSXNamespacedName(name) = name {
            self.found = Some((format!("{}:{}", name.ns.sym, name.name.sym), name.ns.span));
        }
    }
}

/// Rejects namespaced element names before markup lowering sees them.
pub(crate) fn check_namespaces(module: &Module, input: &Input<'_>) -> Result<(), TransformError> {
    let mut check = NamespacedElement::default();
    module.visit_with(&mut check);
    match check.found {
        Some((name, span)) => Err(TransformError::NamespacedJsx {
            name,
            location: input.location(span),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_options_follow_config() {
        let jsx = JsxOptions {
            runtime: JsxRuntime::Classic,
            pragma: "h".into(),
            throw_if_namespace: false,
            ..Default::default()
        };
        let options = react_options(&jsx);
        assert!(matches!(options.runtime, Some(Runtime::Classic)));
        assert_eq!(options.throw_if_namespace, Some(false));
        assert_eq!(options.import_source.as_deref(), Some("react"));
    }

    #[test]
    fn test_target_maps_to_es_version() {
        use swc_ecma_ast::EsVersion;
        assert_eq!(EsTarget::Es5.es_version(), EsVersion::Es5);
        assert_eq!(EsTarget::EsNext.es_version(), EsVersion::EsNext);
    }
}

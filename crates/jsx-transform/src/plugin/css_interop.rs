//! Routes React `createElement` calls through the css-interop runtime.

use super::{Plugin, PluginContext};
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use swc_common::Spanned;
use swc_ecma_ast::*;
use swc_ecma_visit::{noop_visit_mut_type, VisitMut, VisitMutWith};
use tracing::debug;

const REACT_PACKAGE: &str = "react";
const CREATE_ELEMENT: &str = "createElement";
const REQUIRE: &str = "require";
const INTEROP_REQUIRE_DEFAULT: &str = "_interopRequireDefault";
const LOCAL_HINT: &str = "__c";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct CssInteropOptions {
    import_source: String,
    import_name: String,
    deny: String,
}

impl Default for CssInteropOptions {
    fn default() -> Self {
        Self {
            import_source: "react-native-css-interop".to_string(),
            import_name: "createElementAndCheckCssInterop".to_string(),
            deny: r".*[/\\](?:react|react-native|react-native-web|react-native-css-interop)[/\\]"
                .to_string(),
        }
    }
}

/// Rewrites `createElement(...)`, `React.createElement(...)` and
/// `React.default.createElement(...)` calls whose binding comes from `react`
/// into calls of the css-interop element factory.
#[derive(Debug)]
pub struct CssInterop {
    import_source: String,
    import_name: String,
    deny: Regex,
}

impl CssInterop {
    pub const IDENTIFIERS: &'static [&'static str] =
        &["css-interop", "nativewind", "react-native-css-interop"];

    /// Builds the plugin from its JSON options; `null` means all defaults.
    pub fn from_options(options: &serde_json::Value) -> Result<Self, String> {
        let options: CssInteropOptions = if options.is_null() {
            CssInteropOptions::default()
        } else {
            serde_json::from_value(options.clone()).map_err(|err| err.to_string())?
        };
        let deny = Regex::new(&options.deny).map_err(|err| format!("invalid `deny`: {err}"))?;

        Ok(Self {
            import_source: options.import_source,
            import_name: options.import_name,
            deny,
        })
    }

    fn is_denied(&self, filename: &str) -> bool {
        self.deny.is_match(filename)
    }
}

impl Plugin for CssInterop {
    fn name(&self) -> &'static str {
        "css-interop"
    }

    fn transform(&self, module: &mut Module, cx: &PluginContext<'_>) {
        if self.is_denied(cx.filename()) {
            debug!(filename = cx.filename(), "css-interop skips denied file");
            return;
        }

        let bindings = ReactBindings::collect(module, cx);
        if bindings.is_empty() {
            return;
        }
        debug!(
            base = bindings.base.len(),
            create_element = bindings.create_element.len(),
            "react bindings"
        );

        let mut rewriter = CalleeRewriter {
            bindings: &bindings,
            local: cx.fresh_ident(LOCAL_HINT),
            rewritten: 0,
        };
        module.visit_mut_with(&mut rewriter);
        debug!(calls = rewriter.rewritten, "css-interop rewrote createElement calls");

        if rewriter.rewritten > 0 {
            cx.import_named(module, &self.import_source, &self.import_name, &rewriter.local);
        }
    }
}

/// Top-level bindings that refer to React or to its `createElement`.
#[derive(Debug, Default)]
struct ReactBindings {
    /// `React` in `import React from "react"`, `import * as React`, or
    /// `var React = require("react")`.
    base: FxHashSet<Id>,
    /// Locals bound directly to `createElement`.
    create_element: FxHashSet<Id>,
}

impl ReactBindings {
    fn collect(module: &Module, cx: &PluginContext<'_>) -> Self {
        let mut bindings = Self::default();
        for item in &module.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import))
                    if !import.type_only && is_str(&import.src, REACT_PACKAGE) =>
                {
                    bindings.collect_import(import);
                }
                ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => bindings.collect_var(var, cx),
                _ => {}
            }
        }
        bindings
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty() && self.create_element.is_empty()
    }

    fn collect_import(&mut self, import: &ImportDecl) {
        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    self.base.insert(default.local.to_id());
                }
                ImportSpecifier::Namespace(ns) => {
                    self.base.insert(ns.local.to_id());
                }
                ImportSpecifier::Named(named) if !named.is_type_only => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => &*ident.sym == CREATE_ELEMENT,
                        Some(ModuleExportName::Str(s)) => is_str(s, CREATE_ELEMENT),
                        None => &*named.local.sym == CREATE_ELEMENT,
                    };
                    if imported {
                        self.create_element.insert(named.local.to_id());
                    }
                }
                ImportSpecifier::Named(_) => {}
            }
        }
    }

    fn collect_var(&mut self, var: &VarDecl, cx: &PluginContext<'_>) {
        if var.declare || var.decls.len() != 1 {
            return;
        }
        let Some(declarator) = var.decls.first() else {
            return;
        };
        let Some(init) = declarator.init.as_deref() else {
            return;
        };
        if !requires_react(init, cx) {
            return;
        }

        match &declarator.name {
            Pat::Ident(binding) => {
                self.base.insert(binding.id.to_id());
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::Assign(assign) if &*assign.key.id.sym == CREATE_ELEMENT => {
                            self.create_element.insert(assign.key.id.to_id());
                        }
                        ObjectPatProp::KeyValue(kv) => {
                            let is_create_element = match &kv.key {
                                PropName::Ident(ident) => &*ident.sym == CREATE_ELEMENT,
                                PropName::Str(s) => is_str(s, CREATE_ELEMENT),
                                _ => false,
                            };
                            if let (true, Pat::Ident(binding)) = (is_create_element, &*kv.value) {
                                self.create_element.insert(binding.id.to_id());
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// `React.createElement`, `React.default.createElement`, or any deeper
    /// member chain rooted at a React binding and ending in `createElement`.
    fn is_member_create_element(&self, member: &MemberExpr) -> bool {
        match &member.prop {
            MemberProp::Ident(prop) if &*prop.sym == CREATE_ELEMENT => self.is_rooted(&member.obj),
            _ => false,
        }
    }

    fn is_rooted(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Ident(ident) => self.base.contains(&ident.to_id()),
            Expr::Member(member) if matches!(member.prop, MemberProp::Ident(_)) => {
                self.is_rooted(&member.obj)
            }
            _ => false,
        }
    }
}

fn is_str(s: &Str, expected: &str) -> bool {
    s.value.as_str() == Some(expected)
}

/// `require("react")` or `_interopRequireDefault(require("react"))`, with
/// `require` not shadowed by a local binding.
fn requires_react(expr: &Expr, cx: &PluginContext<'_>) -> bool {
    let Some((callee, arg)) = single_arg_call(expr) else {
        return false;
    };
    match &*callee.sym {
        REQUIRE if cx.is_global(callee) => {
            matches!(arg, Expr::Lit(Lit::Str(s)) if is_str(s, REACT_PACKAGE))
        }
        INTEROP_REQUIRE_DEFAULT => requires_react(arg, cx),
        _ => false,
    }
}

fn single_arg_call(expr: &Expr) -> Option<(&Ident, &Expr)> {
    let Expr::Call(call) = expr else {
        return None;
    };
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Ident(ident) = &**callee else {
        return None;
    };
    let arg = call.args.first()?;
    if arg.spread.is_some() {
        return None;
    }
    Some((ident, &*arg.expr))
}

struct CalleeRewriter<'b> {
    bindings: &'b ReactBindings,
    local: Ident,
    rewritten: usize,
}

impl CalleeRewriter<'_> {
    fn matches(&self, callee: &Expr) -> bool {
        match callee {
            Expr::Ident(ident) if !ident.optional => {
                self.bindings.create_element.contains(&ident.to_id())
            }
            Expr::Member(member) => self.bindings.is_member_create_element(member),
            _ => false,
        }
    }
}

impl VisitMut for CalleeRewriter<'_> {
    noop_visit_mut_type!();

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        if call.type_args.is_some() {
            return;
        }
        let Callee::Expr(callee) = &mut call.callee else {
            return;
        };
        if self.matches(callee) {
            let mut local = self.local.clone();
            local.span = callee.span();
            **callee = Expr::Ident(local);
            self.rewritten += 1;
        }
    }
}

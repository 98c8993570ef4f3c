//! Built-in plugins and the registry that resolves them by identifier.

mod css_interop;

pub use css_interop::CssInterop;

use crate::config::PluginRef;
use crate::error::TransformError;
use swc_atoms::Atom;
use swc_common::{Mark, SyntaxContext, DUMMY_SP};
use swc_ecma_ast::*;
use swc_ecma_utils::{prepend_stmt, private_ident};

/// A transform over the resolved module. Plugins run before TypeScript is
/// erased and before markup is lowered.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn transform(&self, module: &mut Module, cx: &PluginContext<'_>);
}

/// What a plugin may know about the document it runs on.
pub struct PluginContext<'a> {
    filename: &'a str,
    unresolved_mark: Mark,
}

impl<'a> PluginContext<'a> {
    pub(crate) fn new(filename: &'a str, unresolved_mark: Mark) -> Self {
        Self {
            filename,
            unresolved_mark,
        }
    }

    pub fn filename(&self) -> &str {
        self.filename
    }

    /// True for a reference to a name the document never declares, such as
    /// `require`.
    pub fn is_global(&self, ident: &Ident) -> bool {
        ident.ctxt == SyntaxContext::empty().apply_mark(self.unresolved_mark)
    }

    /// A new binding named after `hint`, renamed on output if it collides
    /// with a binding in the document.
    pub fn fresh_ident(&self, hint: &str) -> Ident {
        private_ident!(Atom::from(hint))
    }

    /// Prepends `import { imported as local } from "source"`.
    pub fn import_named(&self, module: &mut Module, source: &str, imported: &str, local: &Ident) {
        let import = ImportDecl {
            span: DUMMY_SP,
            specifiers: vec![ImportSpecifier::Named(ImportNamedSpecifier {
                span: DUMMY_SP,
                local: local.clone(),
                imported: Some(ModuleExportName::Ident(Ident::new_no_ctxt(
                    Atom::from(imported),
                    DUMMY_SP,
                ))),
                is_type_only: false,
            })],
            src: Box::new(Str::from(Atom::from(source))),
            type_only: false,
            with: None,
            phase: Default::default(),
        };
        prepend_stmt(&mut module.body, ModuleItem::ModuleDecl(ModuleDecl::Import(import)));
    }
}

type Factory = fn(&serde_json::Value) -> Result<Box<dyn Plugin>, String>;

/// Maps plugin identifiers to plugin constructors.
pub struct PluginRegistry {
    entries: Vec<(&'static [&'static str], Factory)>,
}

impl PluginRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The registry of plugins shipped with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(CssInterop::IDENTIFIERS, |options| {
            CssInterop::from_options(options).map(|plugin| Box::new(plugin) as Box<dyn Plugin>)
        });
        registry
    }

    pub fn register(&mut self, identifiers: &'static [&'static str], factory: Factory) {
        self.entries.push((identifiers, factory));
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().flat_map(|(ids, _)| ids.iter().copied())
    }

    pub fn resolve(&self, plugin: &PluginRef) -> Result<Box<dyn Plugin>, TransformError> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(ids, _)| ids.contains(&plugin.identifier.as_str()))
            .ok_or_else(|| TransformError::UnresolvedPlugin {
                identifier: plugin.identifier.clone(),
            })?;

        factory(&plugin.options).map_err(|message| TransformError::InvalidPluginOptions {
            identifier: plugin.identifier.clone(),
            message,
        })
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.identifiers()).finish()
    }
}

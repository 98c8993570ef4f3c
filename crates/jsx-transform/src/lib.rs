//! TypeScript and JSX to down-levelled JavaScript.
//!
//! This crate takes one source document and produces JavaScript for an older
//! language level. It handles:
//! - Erasing TypeScript syntax and imports only used as types
//! - Lowering JSX to the classic or automatic runtime
//! - Lowering newer syntax to the configured target where a lowering exists
//! - Converting ES modules to CommonJS
//! - Running built-in plugins resolved by identifier
//! - Building a source map for the output
//!
//! Each request parses the document with swc, runs plugins on the resolved
//! module, then runs the swc TypeScript, React, compat and module passes
//! before printing the result.
//!
//! # Example
//!
//! ```
//! use jsx_transform::{transform, SourceDocument, TransformConfig};
//!
//! let document = SourceDocument::new("App.tsx", "const app = <A><B /></A>;");
//! let output = transform(&document, &TransformConfig::default()).unwrap();
//! assert!(output.code.contains("react/jsx-runtime"));
//! assert!(!output.code.contains('<'));
//! ```

mod config;
mod diagnostics;
mod document;
mod error;
mod parse;
mod passes;
pub mod plugin;
mod transform;

pub use config::{EsTarget, JsxOptions, JsxRuntime, PluginRef, TransformConfig};
pub use document::{Dialect, SourceDocument};
pub use error::{Location, TransformError};
pub use plugin::{Plugin, PluginContext, PluginRegistry};
pub use transform::{transform, transform_with_registry, TransformOutput};

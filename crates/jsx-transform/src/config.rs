//! Transform configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The language level the output must be expressible in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    #[default]
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    EsNext,
}

impl EsTarget {
    pub const ALL: [EsTarget; 10] = [
        EsTarget::Es5,
        EsTarget::Es2015,
        EsTarget::Es2016,
        EsTarget::Es2017,
        EsTarget::Es2018,
        EsTarget::Es2019,
        EsTarget::Es2020,
        EsTarget::Es2021,
        EsTarget::Es2022,
        EsTarget::EsNext,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EsTarget::Es5 => "es5",
            EsTarget::Es2015 => "es2015",
            EsTarget::Es2016 => "es2016",
            EsTarget::Es2017 => "es2017",
            EsTarget::Es2018 => "es2018",
            EsTarget::Es2019 => "es2019",
            EsTarget::Es2020 => "es2020",
            EsTarget::Es2021 => "es2021",
            EsTarget::Es2022 => "es2022",
            EsTarget::EsNext => "esnext",
        }
    }
}

impl fmt::Display for EsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EsTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let lower = match lower.as_str() {
            "es3" => return Err("es3 is not a supported target, use es5".to_string()),
            "es6" => "es2015",
            other => other,
        };
        EsTarget::ALL
            .into_iter()
            .find(|target| target.as_str() == lower)
            .ok_or_else(|| format!("unknown target `{s}`"))
    }
}

/// How markup elements are turned into calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsxRuntime {
    /// `pragma(type, props, ...children)` with a binding already in scope.
    Classic,
    /// `jsx`/`jsxs` imported from `<import_source>/jsx-runtime`.
    #[default]
    Automatic,
}

impl fmt::Display for JsxRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsxRuntime::Classic => f.write_str("classic"),
            JsxRuntime::Automatic => f.write_str("automatic"),
        }
    }
}

impl FromStr for JsxRuntime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(JsxRuntime::Classic),
            "automatic" => Ok(JsxRuntime::Automatic),
            _ => Err(format!("unknown JSX runtime `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsxOptions {
    pub runtime: JsxRuntime,
    pub import_source: String,
    pub pragma: String,
    pub pragma_frag: String,
    pub throw_if_namespace: bool,
}

impl Default for JsxOptions {
    fn default() -> Self {
        Self {
            runtime: JsxRuntime::Automatic,
            import_source: "react".to_string(),
            pragma: "React.createElement".to_string(),
            pragma_frag: "React.Fragment".to_string(),
            throw_if_namespace: true,
        }
    }
}

/// A plugin named by identifier, with JSON options only the plugin reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRef {
    pub identifier: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

impl PluginRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

/// Options for one transform request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    /// Keep ES module syntax; when false, lower to CommonJS.
    pub is_module: bool,
    /// Overrides the document filename in diagnostics, plugin deny checks
    /// and the source map.
    pub filename: Option<String>,
    pub target: EsTarget,
    pub jsx: JsxOptions,
    pub plugins: Vec<PluginRef>,
    /// Import helpers from `@swc/helpers` instead of inlining them.
    pub external_helpers: bool,
    pub source_maps: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            is_module: true,
            filename: None,
            target: EsTarget::Es5,
            jsx: JsxOptions::default(),
            plugins: Vec::new(),
            external_helpers: false,
            source_maps: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_parse_and_order() {
        assert_eq!("ES2017".parse::<EsTarget>(), Ok(EsTarget::Es2017));
        assert_eq!("es6".parse::<EsTarget>(), Ok(EsTarget::Es2015));
        assert!("es1999".parse::<EsTarget>().is_err());
        assert!(EsTarget::Es5 < EsTarget::Es2015);
        assert!(EsTarget::Es2022 < EsTarget::EsNext);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: TransformConfig = serde_json::from_str(
            r#"{ "target": "es2020", "jsx": { "runtime": "classic" } }"#,
        )
        .unwrap();

        assert!(config.is_module);
        assert_eq!(config.target, EsTarget::Es2020);
        assert_eq!(config.jsx.runtime, JsxRuntime::Classic);
        assert_eq!(config.jsx.pragma, "React.createElement");
        assert!(config.plugins.is_empty());
    }
}

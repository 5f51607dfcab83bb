//! Core types shared across the extractor and the synthesizer: resolved type
//! references, methods, embeds, imports, the aggregate [`TypeData`] handoff, and
//! the runtime [`MockgenConfig`].

use serde::Serialize;

use crate::synth::MockStyle;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header line stamped on every generated file.
pub const DEFAULT_HEADER: &str =
    "// Code generated by go-mockgen. DO NOT EDIT.";

/// Default name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".mockgen.toml";

// ---------------------------------------------------------------------------
// Extracted signature data
// ---------------------------------------------------------------------------

/// One resolved parameter or result type.
///
/// `base_name` is never empty once resolution completes. Inline function types keep
/// their whole literal text in `base_name` and have no qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Package prefix for cross-package types, e.g. `io` in `io.Reader`. Compound
    /// types such as `[]*io.Reader` keep their full text in `base_name` instead.
    pub qualifier: Option<String>,
    pub base_name: String,
    /// Declared parameter/result name; `None` for unnamed values.
    pub declared_name: Option<String>,
}

impl TypeRef {
    /// The type as written in Go, e.g. `extrapkg.Error` or `int`.
    pub fn full_type(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{q}.{}", self.base_name),
            None => self.base_name.clone(),
        }
    }

    /// Variadic parameters (`...T`) need a spread at the call site.
    pub fn is_variadic(&self) -> bool {
        self.qualifier.is_none() && self.base_name.starts_with("...")
    }

    /// The declared name, unless it is missing or the blank identifier.
    pub fn usable_name(&self) -> Option<&str> {
        self.declared_name.as_deref().filter(|n| !n.is_empty() && *n != "_")
    }
}

/// A method of the target interface. Parameter and result order is call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<TypeRef>,
    pub returns: Vec<TypeRef>,
}

/// An interface embedded in the target, forwarded verbatim into the mock struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbeddedRef {
    /// Same-package interface, e.g. `SecondInterface`.
    Local { name: String },
    /// Interface from another package, e.g. `io.Writer`.
    Qualified { qualifier: String, name: String },
}

impl EmbeddedRef {
    /// Source text of the reference.
    pub fn text(&self) -> String {
        match self {
            EmbeddedRef::Local { name } => name.clone(),
            EmbeddedRef::Qualified { qualifier, name } => format!("{qualifier}.{name}"),
        }
    }

    pub fn qualifier(&self) -> Option<&str> {
        match self {
            EmbeddedRef::Local { .. } => None,
            EmbeddedRef::Qualified { qualifier, .. } => Some(qualifier),
        }
    }
}

/// A single `import` of the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    /// Explicit package name, e.g. `osfs` in `osfs "os"`.
    pub alias: Option<String>,
    /// Unquoted import path.
    pub path: String,
}

impl ImportEntry {
    /// The name the file uses to refer to this import: the alias if present,
    /// otherwise the last path segment.
    pub fn short_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }

    /// Go source form of the import line, e.g. `osfs "os"`.
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{alias} \"{}\"", self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// Everything extracted about one interface. Built once by [`crate::extract`],
/// consumed once by [`crate::synthesize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeData {
    pub package_name: String,
    /// Only the imports referenced by `methods` or `embeds`, in file order.
    pub imports: Vec<ImportEntry>,
    pub methods: Vec<Method>,
    pub embeds: Vec<EmbeddedRef>,
}

// ---------------------------------------------------------------------------
// Runtime configuration: loaded from .mockgen.toml or defaults
// ---------------------------------------------------------------------------

/// Naming and output settings. Loaded by [`crate::load_mockgen_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockgenConfig {
    /// Prepended to the interface name to name the mock struct.
    pub mock_prefix: String,
    /// Appended to each method name to name its function field.
    pub func_suffix: String,
    /// Appended to the lowercased interface name to name the output file.
    pub file_suffix: String,
    /// First line of the generated file.
    pub header: String,
}

impl Default for MockgenConfig {
    fn default() -> Self {
        Self {
            mock_prefix: "Mock".to_string(),
            func_suffix: "Func".to_string(),
            file_suffix: "_mock.go".to_string(),
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl MockgenConfig {
    pub fn style(&self) -> MockStyle {
        MockStyle {
            mock_prefix: self.mock_prefix.clone(),
            func_suffix: self.func_suffix.clone(),
            header: self.header.clone(),
        }
    }

    /// Default output file for an interface, e.g. `vehicle_mock.go`.
    pub fn output_file_name(&self, interface_name: &str) -> String {
        format!("{}{}", interface_name.to_lowercase(), self.file_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(qualifier: Option<&str>, base: &str, name: Option<&str>) -> TypeRef {
        TypeRef {
            qualifier: qualifier.map(String::from),
            base_name: base.to_string(),
            declared_name: name.map(String::from),
        }
    }

    #[test]
    fn test_full_type() {
        assert_eq!(ty(Some("extrapkg"), "Error", None).full_type(), "extrapkg.Error");
        assert_eq!(ty(None, "int", Some("count")).full_type(), "int");
    }

    #[test]
    fn test_variadic_detection() {
        assert!(ty(None, "...string", Some("args")).is_variadic());
        assert!(ty(None, "...pkg.Option", Some("opts")).is_variadic());
        assert!(!ty(None, "[]string", Some("args")).is_variadic());
    }

    #[test]
    fn test_blank_name_is_unusable() {
        assert_eq!(ty(None, "int", Some("_")).usable_name(), None);
        assert_eq!(ty(None, "int", None).usable_name(), None);
        assert_eq!(ty(None, "int", Some("n")).usable_name(), Some("n"));
    }

    #[test]
    fn test_import_short_name() {
        let plain = ImportEntry { alias: None, path: "github.com/acme/extrapkg".into() };
        assert_eq!(plain.short_name(), "extrapkg");
        assert_eq!(plain.render(), "\"github.com/acme/extrapkg\"");

        let aliased = ImportEntry { alias: Some("osfs".into()), path: "os".into() };
        assert_eq!(aliased.short_name(), "osfs");
        assert_eq!(aliased.render(), "osfs \"os\"");
    }

    #[test]
    fn test_embed_text() {
        let local = EmbeddedRef::Local { name: "SecondInterface".into() };
        assert_eq!(local.text(), "SecondInterface");
        assert_eq!(local.qualifier(), None);

        let qualified = EmbeddedRef::Qualified { qualifier: "io".into(), name: "Writer".into() };
        assert_eq!(qualified.text(), "io.Writer");
        assert_eq!(qualified.qualifier(), Some("io"));
    }

    #[test]
    fn test_output_file_name() {
        let config = MockgenConfig::default();
        assert_eq!(config.output_file_name("Vehicle"), "vehicle_mock.go");
    }
}

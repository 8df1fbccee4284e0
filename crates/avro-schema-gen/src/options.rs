// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compilation options.
//!
//! [`Options`] is an immutable record of named toggles. It is `Copy`, so every
//! recursive resolution receives its own value and nothing can mutate it
//! mid-compilation. Options can be assembled from [`Flag`]s, set field by
//! field, or loaded from a TOML file through [`CompileConfig`].

use crate::error::ConfigError;
use crate::schema::name;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Precision of time-of-day and timestamp logical types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePrecision {
    #[default]
    Micros,
    Millis,
}

/// Where automatic namespaces come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceMode {
    /// First segment of the declaring module path.
    #[default]
    TopLevel,
    /// The whole declaring module path.
    FullModule,
    /// No automatic namespace; only an explicit override is emitted.
    Disabled,
}

/// Base schema of the `json` logical type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsonEncoding {
    #[default]
    Bytes,
    String,
}

/// Named option flags, combinable through [`Options::from_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    NoAutoNamespace,
    AutoNamespaceModule,
    Milliseconds,
    #[serde(rename = "FLOAT_32")]
    Float32,
    #[serde(rename = "INT_32")]
    Int32,
    DefaultsMandatory,
    NoDoc,
    #[serde(alias = "LOGICAL_JSON_STRING")]
    JsonAsString,
    #[serde(rename = "JSON_INDENT_2")]
    JsonIndent2,
    UseFieldAlias,
    JsonSortKeys,
    JsonAppendNewline,
}

/// How the finished document is rendered to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OutputFormat {
    /// Two-space indentation instead of compact output.
    pub pretty: bool,
    /// Sort object keys alphabetically at every level.
    pub sort_keys: bool,
    /// Append a single `\n`.
    pub trailing_newline: bool,
}

/// Options controlling the shape of the generated schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Plain integers become `int` instead of `long`.
    pub int_32: bool,
    /// Plain floats become `float` instead of `double`.
    pub float_32: bool,
    pub time_precision: TimePrecision,
    pub namespace_mode: NamespaceMode,
    /// Every record field must declare a default.
    pub defaults_mandatory: bool,
    pub json_encoding: JsonEncoding,
    /// Omit `doc` keys.
    pub no_doc: bool,
    /// Emit a field's alias instead of its declared name when it has one.
    pub use_field_alias: bool,
    pub pretty: bool,
    pub sort_keys: bool,
    pub trailing_newline: bool,
}

impl Options {
    /// Build options from a set of flags.
    ///
    /// Order does not matter: `NoAutoNamespace` always beats
    /// `AutoNamespaceModule`.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = Flag>,
    {
        flags.into_iter().fold(Self::default(), Self::with)
    }

    /// Return a copy with one more flag set.
    #[must_use]
    pub fn with(mut self, flag: Flag) -> Self {
        match flag {
            Flag::NoAutoNamespace => self.namespace_mode = NamespaceMode::Disabled,
            Flag::AutoNamespaceModule => {
                if self.namespace_mode != NamespaceMode::Disabled {
                    self.namespace_mode = NamespaceMode::FullModule;
                }
            }
            Flag::Milliseconds => self.time_precision = TimePrecision::Millis,
            Flag::Float32 => self.float_32 = true,
            Flag::Int32 => self.int_32 = true,
            Flag::DefaultsMandatory => self.defaults_mandatory = true,
            Flag::NoDoc => self.no_doc = true,
            Flag::JsonAsString => self.json_encoding = JsonEncoding::String,
            Flag::JsonIndent2 => self.pretty = true,
            Flag::UseFieldAlias => self.use_field_alias = true,
            Flag::JsonSortKeys => self.sort_keys = true,
            Flag::JsonAppendNewline => self.trailing_newline = true,
        }
        self
    }

    /// Rendering settings.
    pub fn output(&self) -> OutputFormat {
        OutputFormat {
            pretty: self.pretty,
            sort_keys: self.sort_keys,
            trailing_newline: self.trailing_newline,
        }
    }

    pub(crate) fn millis(&self) -> bool {
        self.time_precision == TimePrecision::Millis
    }
}

/// File-based compilation settings.
///
/// ```toml
/// namespace = "com.example"
/// flags = ["INT_32", "NO_DOC"]
///
/// [options]
/// time_precision = "millis"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Namespace override applied to every named type.
    pub namespace: Option<String>,
    /// Flags applied on top of `options`.
    pub flags: Vec<Flag>,
    pub options: Options,
}

impl CompileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(namespace) = &self.namespace {
            name::validate_namespace(namespace)
                .map_err(|e| ConfigError::Invalid(format!("namespace: {}", e)))?;
        }
        Ok(())
    }

    /// Effective options after applying `flags`.
    pub fn resolved_options(&self) -> Options {
        self.flags.iter().copied().fold(self.options, Options::with)
    }

    /// Namespace override as the compile entry points take it.
    pub fn namespace_override(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert!(!opts.int_32);
        assert_eq!(opts.time_precision, TimePrecision::Micros);
        assert_eq!(opts.namespace_mode, NamespaceMode::TopLevel);
        assert_eq!(opts.output(), OutputFormat::default());
    }

    #[test]
    fn test_no_auto_namespace_wins_in_any_order() {
        let a = Options::from_flags([Flag::NoAutoNamespace, Flag::AutoNamespaceModule]);
        let b = Options::from_flags([Flag::AutoNamespaceModule, Flag::NoAutoNamespace]);
        assert_eq!(a.namespace_mode, NamespaceMode::Disabled);
        assert_eq!(a, b);
    }

    #[test]
    fn test_flags_map_to_fields() {
        let opts = Options::from_flags([
            Flag::Int32,
            Flag::Float32,
            Flag::Milliseconds,
            Flag::JsonAsString,
            Flag::JsonIndent2,
        ]);
        assert!(opts.int_32);
        assert!(opts.float_32);
        assert!(opts.millis());
        assert_eq!(opts.json_encoding, JsonEncoding::String);
        assert!(opts.output().pretty);
    }

    #[test]
    fn test_config_from_toml() {
        let config = CompileConfig::from_toml_str(
            r#"
namespace = "com.example"
flags = ["INT_32", "NO_AUTO_NAMESPACE", "LOGICAL_JSON_STRING"]

[options]
time_precision = "millis"
sort_keys = true
"#,
        )
        .expect("parse");

        assert_eq!(config.namespace_override(), Some("com.example"));
        let opts = config.resolved_options();
        assert!(opts.int_32);
        assert!(opts.sort_keys);
        assert_eq!(opts.time_precision, TimePrecision::Millis);
        assert_eq!(opts.namespace_mode, NamespaceMode::Disabled);
        assert_eq!(opts.json_encoding, JsonEncoding::String);
    }

    #[test]
    fn test_config_rejects_bad_namespace() {
        let err = CompileConfig::from_toml_str(r#"namespace = "com.9bad""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = CompileConfig::from_toml_str("[options]\nindent = 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "flags = [\"DEFAULTS_MANDATORY\"]").expect("write");

        let config = CompileConfig::from_file(file.path()).expect("load");
        assert!(config.resolved_options().defaults_mandatory);
        assert_eq!(config.namespace_override(), None);
    }

    #[test]
    fn test_missing_config_file() {
        let err = CompileConfig::from_file("/nonexistent/avro-schema-gen.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

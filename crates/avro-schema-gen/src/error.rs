// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema compilation.

use thiserror::Error;

/// Errors raised while compiling a type descriptor into a schema.
///
/// Every variant aborts the whole compilation; no partial document is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No registered builder handles the descriptor.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A field default is missing (mandatory defaults) or does not fit the
    /// field's schema.
    #[error("Invalid default for field {field}: {reason}")]
    InvalidFieldDefault { field: String, reason: String },

    /// A parameterized type was given parameters it cannot accept.
    #[error("Invalid parameters for {type_name}: {reason}")]
    InvalidGenericParameters { type_name: String, reason: String },

    /// A name or namespace does not follow the Avro name grammar, or clashes
    /// with a name already defined in this document.
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A cyclic reference points at a descriptor that no longer exists.
    #[error("Type description unavailable: {0}")]
    DescriptorUnavailable(String),

    /// The finished tree could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn field_default(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldDefault {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn generic(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGenericParameters {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

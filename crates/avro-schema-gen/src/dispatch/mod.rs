// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builder dispatch table.
//!
//! A [`DispatchTable`] is an ordered list of [`SchemaBuilder`]s. Resolution
//! asks each builder, lowest priority value first, whether it handles a
//! descriptor; the first one that does owns the translation. New kinds plug in
//! through [`DispatchTable::register`] without touching existing builders.
//!
//! # Example
//!
//! ```
//! use avro_schema_gen::dispatch::{DefaultMismatch, DispatchTable, SchemaBuilder};
//! use avro_schema_gen::compose::Composer;
//! use avro_schema_gen::descriptor::{DefaultValue, TypeDescriptor, TypeKind};
//! use avro_schema_gen::schema::{Primitive, SchemaNode};
//! use avro_schema_gen::Result;
//! use std::sync::Arc;
//!
//! struct Ipv4;
//!
//! impl SchemaBuilder for Ipv4 {
//!     fn name(&self) -> &'static str {
//!         "ipv4"
//!     }
//!     fn handles(&self, ty: &TypeDescriptor) -> bool {
//!         matches!(ty.kind, TypeKind::NamedString) && ty.name == "IPv4Address"
//!     }
//!     fn build(&self, _ty: &Arc<TypeDescriptor>, _cx: &mut Composer<'_>) -> Result<SchemaNode> {
//!         Ok(SchemaNode::logical(Primitive::String, "ipv4"))
//!     }
//!     fn encode_default(
//!         &self,
//!         _ty: &Arc<TypeDescriptor>,
//!         value: &DefaultValue,
//!         _cx: &Composer<'_>,
//!     ) -> std::result::Result<serde_json::Value, DefaultMismatch> {
//!         match value {
//!             DefaultValue::String(s) => Ok(s.clone().into()),
//!             other => Err(DefaultMismatch::expected("str", other)),
//!         }
//!     }
//! }
//!
//! let mut table = DispatchTable::standard();
//! table.register(250, Ipv4);
//! ```

mod builtin;

pub use builtin::{
    Decimals, Durations, Enums, ForwardRefs, JsonDocuments, LogicalTypes, Maps, NamedStrings,
    Primitives, Records, Sequences, Unions,
};

use crate::compose::Composer;
use crate::descriptor::{DefaultValue, TypeDescriptor};
use crate::error::{Result, SchemaError};
use crate::schema::SchemaNode;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One family of descriptor → schema translation.
pub trait SchemaBuilder: Send + Sync {
    /// Short name, used in logs and [`DispatchTable::builders`].
    fn name(&self) -> &'static str;

    /// Capability predicate.
    fn handles(&self, ty: &TypeDescriptor) -> bool;

    /// Translate `ty`. Nested types are resolved through `cx`.
    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode>;

    /// Check a field default against `ty` and convert it to the JSON value
    /// the schema expects.
    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> std::result::Result<Value, DefaultMismatch>;
}

/// A default that does not fit its schema.
///
/// `path` locates the offending value below the field, e.g. `[2]` or
/// `["key"].inner`; it is empty when the field value itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultMismatch {
    pub path: String,
    pub reason: String,
}

impl DefaultMismatch {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            reason: reason.into(),
        }
    }

    /// "must be X; got Y"
    pub fn expected(expected: &str, got: &DefaultValue) -> Self {
        Self::new(format!("must be {}; got {}", expected, got.kind_name()))
    }

    /// Prefix the path with a sequence index.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        self.path = format!("[{}]{}", index, self.path);
        self
    }

    /// Prefix the path with a map key.
    #[must_use]
    pub fn at_key(mut self, key: &str) -> Self {
        self.path = format!("[{:?}]{}", key, self.path);
        self
    }

    /// Prefix the path with a record field name.
    #[must_use]
    pub fn at_field(mut self, field: &str) -> Self {
        self.path = format!(".{}{}", field, self.path);
        self
    }

    pub(crate) fn into_error(self, field: &str) -> SchemaError {
        SchemaError::field_default(format!("{}{}", field, self.path), self.reason)
    }
}

impl fmt::Display for DefaultMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

// ----------------------------------------------------------------------------
// Table
// ----------------------------------------------------------------------------

struct Entry {
    priority: u32,
    builder: Arc<dyn SchemaBuilder>,
}

/// Ordered, extensible set of builders.
pub struct DispatchTable {
    entries: Vec<Entry>,
}

impl DispatchTable {
    /// Table with no builders.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Table with the built-in builders, specific kinds first.
    ///
    /// Priorities are spaced by 100 so third-party builders can be slotted
    /// in between.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table
            .register(100, ForwardRefs)
            .register(200, Primitives)
            .register(300, NamedStrings)
            .register(400, JsonDocuments)
            .register(500, LogicalTypes)
            .register(600, Decimals)
            .register(700, Durations)
            .register(800, Enums)
            .register(900, Unions)
            .register(1000, Sequences)
            .register(1100, Maps)
            .register(1200, Records);
        table
    }

    /// Add a builder. Among equal priorities, earlier registrations win.
    pub fn register<B>(&mut self, priority: u32, builder: B) -> &mut Self
    where
        B: SchemaBuilder + 'static,
    {
        self.register_shared(priority, Arc::new(builder))
    }

    /// Add an already shared builder.
    pub fn register_shared(&mut self, priority: u32, builder: Arc<dyn SchemaBuilder>) -> &mut Self {
        let at = self
            .entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(self.entries.len());
        log::debug!(
            "[dispatch] registered builder {} at priority {}",
            builder.name(),
            priority
        );
        self.entries.insert(at, Entry { priority, builder });
        self
    }

    /// First builder that handles `ty`.
    pub fn find(&self, ty: &TypeDescriptor) -> Result<&dyn SchemaBuilder> {
        self.entries
            .iter()
            .find(|e| e.builder.handles(ty))
            .map(|e| e.builder.as_ref())
            .ok_or_else(|| SchemaError::UnsupportedType(describe(ty)))
    }

    /// `(priority, name)` of each builder in lookup order.
    pub fn builders(&self) -> Vec<(u32, &'static str)> {
        self.entries
            .iter()
            .map(|e| (e.priority, e.builder.name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("builders", &self.builders())
            .finish()
    }
}

fn describe(ty: &TypeDescriptor) -> String {
    use crate::descriptor::{PrimitiveKind, TypeKind};
    match &ty.kind {
        TypeKind::Primitive(PrimitiveKind::Any) => {
            format!("{} (untyped values are only supported as Dict[str, Any])", ty.name)
        }
        TypeKind::Primitive(kind) => format!("{} ({:?})", ty.name, kind),
        TypeKind::Logical(kind) => format!("{} ({:?})", ty.name, kind),
        TypeKind::Generic(g) => format!("{}{:?}", ty.name, g.params),
        _ => ty.name.clone(),
    }
}

#[cfg(test)]
mod tests;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # avro-schema-gen - Avro schemas from type descriptors
//!
//! Compiles a [`TypeDescriptor`] graph (records, enums, unions, collections,
//! logical primitives, possibly self-referential) into a canonical Apache
//! Avro schema document.
//!
//! ## Quick Start
//!
//! ```rust
//! use avro_schema_gen::descriptor::{RecordBuilder, TypeDescriptor};
//! use avro_schema_gen::{compile, Flag, Options};
//! use std::sync::Arc;
//!
//! # fn main() -> avro_schema_gen::Result<()> {
//! let order = RecordBuilder::new("Order")
//!     .origin("shop.model")
//!     .doc("A customer order.")
//!     .field("id", TypeDescriptor::uuid())
//!     .optional_field("note", TypeDescriptor::string())
//!     .build_arc();
//!
//! let bytes = compile(&order, None, Options::from_flags([Flag::Int32]))?;
//! assert!(bytes.starts_with(br#"{"type":"record","name":"Order","namespace":"shop""#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! compile(type, namespace, options)
//!   -> SchemaCache            (type identity, Options, namespace) -> bytes
//!   -> Composer               per-call NamedTypeRegistry
//!        -> DispatchTable     first SchemaBuilder whose predicate matches
//!        -> SchemaBuilder     recurses through the Composer
//!   -> render                 fixed key order, compact or 2-space pretty
//! ```
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - Input model and builders
//! - [`dispatch`] - Builder trait and dispatch table
//! - [`compose`] - Recursive composition, namespaces, defaults, unions
//! - [`schema`] - Schema tree and canonical rendering
//! - [`cache`] - Process-wide memoization
//! - [`options`] - Options, flags and TOML configuration

pub mod cache;
pub mod compose;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod options;
pub mod schema;

pub use cache::{CacheStats, SchemaCache};
pub use compose::Composer;
pub use descriptor::{DefaultValue, FieldDescriptor, TypeDescriptor, TypeKind, TypeRef};
pub use dispatch::{DispatchTable, SchemaBuilder};
pub use error::{ConfigError, Result, SchemaError};
pub use options::{CompileConfig, Flag, Options, OutputFormat};
pub use schema::{render, SchemaNode};

use std::sync::{Arc, OnceLock};

/// A dispatch table paired with its own output cache.
///
/// [`compile`] and friends use a process-wide instance with the standard
/// table. Build a separate `Compiler` to use custom builders; its cache is
/// independent of the global one.
#[derive(Debug, Default)]
pub struct Compiler {
    table: DispatchTable,
    cache: SchemaCache,
}

impl Compiler {
    pub fn new(table: DispatchTable) -> Self {
        Self {
            table,
            cache: SchemaCache::new(),
        }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Schema tree for `ty`, without rendering or caching.
    pub fn schema(
        &self,
        ty: &Arc<TypeDescriptor>,
        namespace: Option<&str>,
        options: Options,
    ) -> Result<SchemaNode> {
        Composer::new(&self.table, options, namespace).compose(ty)
    }

    /// Rendered schema, bypassing the cache.
    pub fn compile_uncached(
        &self,
        ty: &Arc<TypeDescriptor>,
        namespace: Option<&str>,
        options: Options,
    ) -> Result<Vec<u8>> {
        let node = self.schema(ty, namespace, options)?;
        render(&node, options.output())
    }

    /// Rendered schema, memoized by `(identity of ty, options, namespace)`.
    pub fn compile(
        &self,
        ty: &Arc<TypeDescriptor>,
        namespace: Option<&str>,
        options: Options,
    ) -> Result<Arc<[u8]>> {
        self.cache.get_or_try_compile(ty, namespace, options, || {
            self.compile_uncached(ty, namespace, options)
        })
    }
}

static GLOBAL: OnceLock<Compiler> = OnceLock::new();

/// The process-wide compiler behind [`compile`].
pub fn global() -> &'static Compiler {
    GLOBAL.get_or_init(Compiler::default)
}

/// Compile `ty` to a schema document.
///
/// `namespace` overrides every automatic namespace. Output is memoized for
/// the life of the process.
pub fn compile(
    ty: &Arc<TypeDescriptor>,
    namespace: Option<&str>,
    options: Options,
) -> Result<Vec<u8>> {
    global().compile(ty, namespace, options).map(|bytes| bytes.to_vec())
}

/// [`compile`] without the process-wide cache.
pub fn compile_uncached(
    ty: &Arc<TypeDescriptor>,
    namespace: Option<&str>,
    options: Options,
) -> Result<Vec<u8>> {
    global().compile_uncached(ty, namespace, options)
}

/// Schema tree for `ty`.
pub fn schema(
    ty: &Arc<TypeDescriptor>,
    namespace: Option<&str>,
    options: Options,
) -> Result<SchemaNode> {
    global().schema(ty, namespace, options)
}

/// Compile with settings loaded from a [`CompileConfig`].
pub fn compile_with_config(ty: &Arc<TypeDescriptor>, config: &CompileConfig) -> Result<Vec<u8>> {
    compile(ty, config.namespace_override(), config.resolved_options())
}

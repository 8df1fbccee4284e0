// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive resolution of descriptors into schema nodes.

use crate::compose::namespace::{first_paragraph, resolve_namespace};
use crate::compose::registry::{NamedTypeRegistry, Visit};
use crate::descriptor::{DefaultValue, TypeDescriptor, TypeRef};
use crate::dispatch::{DefaultMismatch, DispatchTable};
use crate::error::{Result, SchemaError};
use crate::options::Options;
use crate::schema::name::{full_name, validate_name, validate_namespace};
use crate::schema::SchemaNode;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Name, namespace and doc of a named type about to be defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedHeader {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub full_name: String,
}

/// State of one top-level compilation.
///
/// A composer owns a fresh [`NamedTypeRegistry`] and is consumed by
/// [`Composer::compose`]; it is never shared between compilations.
pub struct Composer<'a> {
    table: &'a DispatchTable,
    options: Options,
    namespace_override: Option<&'a str>,
    registry: NamedTypeRegistry,
    /// Unnamed composites (sequence, map, union) currently being resolved.
    in_progress: HashSet<usize>,
}

impl<'a> Composer<'a> {
    pub fn new(
        table: &'a DispatchTable,
        options: Options,
        namespace_override: Option<&'a str>,
    ) -> Self {
        Self {
            table,
            options,
            namespace_override: namespace_override.filter(|ns| !ns.is_empty()),
            registry: NamedTypeRegistry::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Resolve `root` and everything reachable from it.
    pub fn compose(mut self, root: &Arc<TypeDescriptor>) -> Result<SchemaNode> {
        if let Some(ns) = self.namespace_override {
            validate_namespace(ns)?;
        }
        let node = self.resolve_type(root)?;
        log::debug!(
            "[compose] {} done, {} named type(s)",
            root.name,
            self.registry.len()
        );
        Ok(node)
    }

    /// Resolve a descriptor edge.
    pub fn resolve(&mut self, ty: &TypeRef) -> Result<SchemaNode> {
        let ty = Self::upgrade(ty)?;
        self.resolve_type(&ty)
    }

    /// Resolve a descriptor through the first builder that handles it.
    pub fn resolve_type(&mut self, ty: &Arc<TypeDescriptor>) -> Result<SchemaNode> {
        let table = self.table;
        let builder = table.find(ty)?;
        log::trace!("[compose] {} -> {}", ty.name, builder.name());
        builder.build(ty, self)
    }

    /// Strong handle for an edge, failing on a dropped cyclic target.
    pub fn upgrade(ty: &TypeRef) -> Result<Arc<TypeDescriptor>> {
        ty.resolve().ok_or_else(|| {
            SchemaError::DescriptorUnavailable(format!(
                "cyclic reference at {:#x} outlived its target",
                ty.identity()
            ))
        })
    }

    /// Validated namespace for a named type.
    pub fn namespace_for(&self, ty: &TypeDescriptor) -> Result<Option<String>> {
        let namespace = resolve_namespace(
            self.namespace_override,
            self.options.namespace_mode,
            ty.origin.as_deref(),
        );
        if let Some(ns) = &namespace {
            validate_namespace(ns)?;
        }
        Ok(namespace)
    }

    /// First paragraph of a type doc, or `None` under `no_doc`.
    pub fn doc_for(&self, doc: Option<&str>) -> Option<String> {
        if self.options.no_doc {
            return None;
        }
        doc.and_then(first_paragraph)
    }

    /// Field doc as declared, or `None` under `no_doc`.
    pub fn field_doc_for(&self, doc: Option<&str>) -> Option<String> {
        if self.options.no_doc {
            return None;
        }
        doc.map(str::to_string)
    }

    /// Resolve an unnamed composite, failing if it is already being resolved.
    ///
    /// Only named types can close a cycle; an unnamed node reached again
    /// from inside itself has no finite schema.
    pub fn resolve_unnamed<F>(&mut self, ty: &Arc<TypeDescriptor>, build: F) -> Result<SchemaNode>
    where
        F: FnOnce(&mut Self) -> Result<SchemaNode>,
    {
        let identity = Arc::as_ptr(ty) as usize;
        if !self.in_progress.insert(identity) {
            return Err(SchemaError::UnsupportedType(format!(
                "{} refers to itself without a record, enum or fixed in the cycle",
                ty.name
            )));
        }
        let result = build(self);
        self.in_progress.remove(&identity);
        result
    }

    /// Define a named type exactly once.
    ///
    /// The first call for an identity marks it visited and then runs `build`;
    /// any later call, including one made from inside `build`, returns a
    /// reference to the full name.
    pub fn define_named<F>(&mut self, ty: &Arc<TypeDescriptor>, build: F) -> Result<SchemaNode>
    where
        F: FnOnce(&mut Self, NamedHeader) -> Result<SchemaNode>,
    {
        validate_name(&ty.name)?;
        let namespace = self.namespace_for(ty)?;
        let full_name = full_name(namespace.as_deref(), &ty.name);

        let identity = Arc::as_ptr(ty) as usize;
        if let Visit::Seen(existing) = self.registry.visit(identity, &full_name)? {
            log::trace!("[compose] reference to {}", existing);
            return Ok(SchemaNode::Reference(existing));
        }

        log::debug!("[compose] defining {}", full_name);
        let header = NamedHeader {
            name: ty.name.clone(),
            namespace,
            doc: self.doc_for(ty.doc.as_deref()),
            full_name,
        };
        // A named type closes any cycle that runs through it.
        let outer = std::mem::take(&mut self.in_progress);
        let result = build(self, header);
        self.in_progress = outer;
        result
    }

    /// Check and convert a default against `ty`.
    pub fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
    ) -> std::result::Result<Value, DefaultMismatch> {
        let builder = self
            .table
            .find(ty)
            .map_err(|e| DefaultMismatch::new(e.to_string()))?;
        builder.encode_default(ty, value, self)
    }

    /// [`encode_default`](Self::encode_default) through an edge.
    pub fn encode_default_ref(
        &self,
        ty: &TypeRef,
        value: &DefaultValue,
    ) -> std::result::Result<Value, DefaultMismatch> {
        let ty = ty
            .resolve()
            .ok_or_else(|| DefaultMismatch::new("type description unavailable"))?;
        self.encode_default(&ty, value)
    }
}

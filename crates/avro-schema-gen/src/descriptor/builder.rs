// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for record descriptors.

use crate::descriptor::{DefaultValue, FieldDescriptor, TypeDescriptor, TypeKind, TypeRef};
use std::sync::Arc;

/// Builder for record [`TypeDescriptor`]s.
#[derive(Debug)]
pub struct RecordBuilder {
    name: String,
    origin: Option<String>,
    doc: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl RecordBuilder {
    /// Create a new builder for a record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: None,
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Declaring module path.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a field without a default.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Add a field with a default.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        ty: impl Into<TypeRef>,
        default: impl Into<DefaultValue>,
    ) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, ty).with_default(default));
        self
    }

    /// Add an `Optional[T]` field defaulting to null.
    pub fn optional_field(self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.field_with_default(name, TypeDescriptor::optional(ty), DefaultValue::Null)
    }

    /// Add a fully configured field.
    pub fn push(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            origin: self.origin,
            doc: self.doc,
            kind: TypeKind::Record(self.fields),
        }
    }

    /// Build and wrap in an `Arc`, ready to be shared between fields.
    pub fn build_arc(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}

/// Build a self-referential descriptor.
///
/// The closure receives a back-reference to the descriptor being built and
/// may place it anywhere inside the graph (directly, in a union, in a
/// sequence, or in a nested record that points back).
///
/// ```
/// use avro_schema_gen::descriptor::{recursive, RecordBuilder, TypeDescriptor};
///
/// let node = recursive(|me| {
///     RecordBuilder::new("Node")
///         .field("value", TypeDescriptor::integer())
///         .optional_field("next", me)
///         .build()
/// });
/// assert!(node.is_record());
/// ```
pub fn recursive<F>(build: F) -> Arc<TypeDescriptor>
where
    F: FnOnce(TypeRef) -> TypeDescriptor,
{
    Arc::new_cyclic(|weak| build(TypeRef::Cyclic(weak.clone())))
}

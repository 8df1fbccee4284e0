// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the input model of the schema compiler.
//!
//! A descriptor graph is produced by an adapter that inspects host types. The
//! compiler only reads it. Descriptors point at each other through
//! [`TypeRef`]s; identity of the pointed-to allocation, not structural
//! equality, decides whether two occurrences are the same named type.
//!
//! # Features
//!
//! - Primitives, logical refinements (date, time, uuid, ...), named strings
//! - Records, enums, unions, maps, sequences
//! - Parameterized decimals
//! - Self-referential graphs via [`recursive`]
//!
//! # Example
//!
//! ```
//! use avro_schema_gen::descriptor::{RecordBuilder, TypeDescriptor};
//!
//! let color = std::sync::Arc::new(
//!     TypeDescriptor::enumeration("Color", ["RED", "GREEN"]).with_origin("paint.model"),
//! );
//! let desc = RecordBuilder::new("Car")
//!     .origin("paint.model")
//!     .field("color", &color)
//!     .field("extra", TypeDescriptor::string_map(TypeDescriptor::integer()))
//!     .build();
//! assert_eq!(desc.fields().map(<[_]>::len), Some(2));
//! ```

mod builder;
mod type_descriptor;
mod value;

pub use builder::{recursive, RecordBuilder};
pub use type_descriptor::{
    EnumDescriptor, FieldDescriptor, GenericBase, GenericDescriptor, LogicalKind, PrimitiveKind,
    TypeDescriptor, TypeKind, TypeRef,
};
pub use value::DefaultValue;

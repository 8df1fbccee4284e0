// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema tree, name grammar and canonical rendering.

pub mod name;
mod node;
mod render;

pub use node::{EnumSchema, FixedSchema, Primitive, RecordField, RecordSchema, SchemaNode};
pub use render::render;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema composition: the recursive core of the compiler.
//!
//! A [`Composer`] walks a descriptor graph, asks the dispatch table for the
//! builder of each node, and records named types in a per-call
//! [`NamedTypeRegistry`] so that each one is defined once and every later
//! occurrence (cycles included) becomes a reference.

mod composer;
mod defaults;
pub mod namespace;
mod registry;
mod union;

pub use composer::{Composer, NamedHeader};
pub use registry::{NamedTypeRegistry, Visit};

pub(crate) use defaults::{bytes_to_json, plain_json};

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named-type registry.
//!
//! Tracks which named schemas (record, enum, fixed) have been defined during
//! one compilation. Keys are descriptor identities; a second visit of the same
//! identity yields a reference, a different identity claiming an existing full
//! name is an error.

use crate::error::{Result, SchemaError};
use std::collections::HashMap;

/// Outcome of [`NamedTypeRegistry::visit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// First occurrence: the caller must emit the full definition.
    First,
    /// Already defined (or being defined): emit a reference to this name.
    Seen(String),
}

/// Per-compilation set of visited named types.
#[derive(Debug, Default)]
pub struct NamedTypeRegistry {
    by_identity: HashMap<usize, String>,
    by_name: HashMap<String, usize>,
}

impl NamedTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `identity` as visited under `full_name`.
    ///
    /// Must be called before the type's members are resolved so that
    /// self-references see `Seen`.
    pub fn visit(&mut self, identity: usize, full_name: &str) -> Result<Visit> {
        if let Some(existing) = self.by_identity.get(&identity) {
            return Ok(Visit::Seen(existing.clone()));
        }
        if self.by_name.contains_key(full_name) {
            return Err(SchemaError::name(
                full_name,
                "a different type with this name is already defined",
            ));
        }
        self.by_identity.insert(identity, full_name.to_string());
        self.by_name.insert(full_name.to_string(), identity);
        Ok(Visit::First)
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_then_seen() {
        let mut registry = NamedTypeRegistry::new();
        assert_eq!(registry.visit(1, "ns.A").unwrap(), Visit::First);
        assert_eq!(
            registry.visit(1, "ns.A").unwrap(),
            Visit::Seen("ns.A".to_string())
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_name_clash() {
        let mut registry = NamedTypeRegistry::new();
        registry.visit(1, "ns.A").unwrap();
        let err = registry.visit(2, "ns.A").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { .. }));
    }
}

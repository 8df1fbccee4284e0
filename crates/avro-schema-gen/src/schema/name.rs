// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Avro name grammar.
//!
//! A name is `[A-Za-z_][A-Za-z0-9_]*`; a namespace is a dot-separated
//! sequence of names.

use crate::error::{Result, SchemaError};
use regex::Regex;
use std::sync::OnceLock;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        #[allow(clippy::expect_used)] // literal pattern
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name pattern")
    })
}

/// Check a simple name.
pub fn validate_name(name: &str) -> Result<()> {
    if name_re().is_match(name) {
        Ok(())
    } else {
        Err(SchemaError::name(
            name,
            "must start with [A-Za-z_] followed by [A-Za-z0-9_]",
        ))
    }
}

/// Check a dotted namespace. The empty string is allowed and means "none".
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Ok(());
    }
    for segment in namespace.split('.') {
        if !name_re().is_match(segment) {
            return Err(SchemaError::name(
                namespace,
                format!("namespace segment {:?} is not a valid name", segment),
            ));
        }
    }
    Ok(())
}

/// `namespace.name`, or `name` alone when there is no namespace.
pub fn full_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
        _ => name.to_string(),
    }
}

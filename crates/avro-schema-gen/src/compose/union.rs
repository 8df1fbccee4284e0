// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Union composition.

use crate::compose::Composer;
use crate::descriptor::{DefaultValue, TypeDescriptor, TypeKind, TypeRef};
use crate::dispatch::DefaultMismatch;
use crate::error::{Result, SchemaError};
use crate::schema::SchemaNode;
use std::collections::HashSet;
use std::sync::Arc;

impl Composer<'_> {
    /// Members of a union with nested unions spliced in place and repeated
    /// identities dropped. Declared order is kept.
    pub fn flatten_union(&self, members: &[TypeRef]) -> Result<Vec<Arc<TypeDescriptor>>> {
        let mut seen = HashSet::new();
        let mut active = HashSet::new();
        let mut out = Vec::with_capacity(members.len());
        flatten_into(members, &mut seen, &mut active, &mut out)?;
        Ok(out)
    }

    /// Resolve a union in declared order.
    pub fn resolve_union(&mut self, members: &[TypeRef]) -> Result<SchemaNode> {
        let members = self.flatten_union(members)?;
        self.resolve_members(&members)
    }

    /// Resolve already flattened members, one schema per member.
    pub fn resolve_members(&mut self, members: &[Arc<TypeDescriptor>]) -> Result<SchemaNode> {
        members
            .iter()
            .map(|member| self.resolve_type(member))
            .collect::<Result<Vec<_>>>()
            .map(SchemaNode::Union)
    }

    /// Move the first member that accepts `value` to the front.
    pub fn order_for_default(
        &self,
        mut members: Vec<Arc<TypeDescriptor>>,
        value: &DefaultValue,
    ) -> std::result::Result<Vec<Arc<TypeDescriptor>>, DefaultMismatch> {
        let Some(index) = members
            .iter()
            .position(|m| self.encode_default(m, value).is_ok())
        else {
            let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
            return Err(DefaultMismatch::expected(
                &format!("one of [{}]", names.join(", ")),
                value,
            ));
        };
        if index > 0 {
            let first = members.remove(index);
            members.insert(0, first);
        }
        Ok(members)
    }
}

/// `active` holds the nested unions currently being spliced; meeting one of
/// them again means the union contains itself.
fn flatten_into(
    members: &[TypeRef],
    seen: &mut HashSet<usize>,
    active: &mut HashSet<usize>,
    out: &mut Vec<Arc<TypeDescriptor>>,
) -> Result<()> {
    for member in members {
        let ty = Composer::upgrade(member)?;
        if let TypeKind::Union(inner) = &ty.kind {
            let identity = member.identity();
            if !active.insert(identity) {
                return Err(SchemaError::UnsupportedType(format!(
                    "union {} contains itself",
                    ty.name
                )));
            }
            flatten_into(inner, seen, active, out)?;
            active.remove(&identity);
        } else if seen.insert(member.identity()) {
            out.push(ty);
        }
    }
    Ok(())
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record fields and their defaults.

use crate::compose::Composer;
use crate::descriptor::{DefaultValue, FieldDescriptor, TypeKind};
use crate::error::{Result, SchemaError};
use crate::schema::name::validate_name;
use crate::schema::RecordField;
use serde_json::{Map, Number, Value};

impl Composer<'_> {
    /// Resolve one record field, checking and converting its default.
    ///
    /// A default on a union-typed field reorders the union so that the first
    /// member accepting the default comes first.
    pub fn resolve_field(&mut self, field: &FieldDescriptor) -> Result<RecordField> {
        let name = match &field.alias {
            Some(alias) if self.options().use_field_alias => alias.clone(),
            _ => field.name.clone(),
        };
        validate_name(&name)?;

        if self.options().defaults_mandatory && field.default.is_none() {
            return Err(SchemaError::field_default(name, "default value is missing"));
        }

        let ty = Self::upgrade(&field.ty)?;
        let (schema, default) = match (&field.default, &ty.kind) {
            (Some(value), TypeKind::Union(members)) => {
                let members = self.flatten_union(members)?;
                let ordered = self
                    .order_for_default(members, value)
                    .map_err(|m| m.into_error(&name))?;
                let encoded = match ordered.first() {
                    Some(first) => self
                        .encode_default(first, value)
                        .map_err(|m| m.into_error(&name))?,
                    None => return Err(SchemaError::field_default(name, "union has no members")),
                };
                (self.resolve_members(&ordered)?, Some(encoded))
            }
            (Some(value), _) => {
                let schema = self.resolve_type(&ty)?;
                let encoded = self
                    .encode_default(&ty, value)
                    .map_err(|m| m.into_error(&name))?;
                (schema, Some(encoded))
            }
            (None, _) => (self.resolve_type(&ty)?, None),
        };

        Ok(RecordField {
            name,
            schema,
            doc: self.field_doc_for(field.doc.as_deref()),
            default,
        })
    }
}

/// Default as a plain JSON value, for values that have an obvious JSON form.
pub(crate) fn plain_json(value: &DefaultValue) -> Option<Value> {
    Some(match value {
        DefaultValue::Null => Value::Null,
        DefaultValue::Bool(b) => Value::Bool(*b),
        DefaultValue::Int(i) => Value::from(*i),
        DefaultValue::Float(f) => Value::Number(Number::from_f64(*f)?),
        DefaultValue::String(s) => Value::String(s.clone()),
        DefaultValue::Array(items) => {
            Value::Array(items.iter().map(plain_json).collect::<Option<Vec<_>>>()?)
        }
        DefaultValue::Map(entries) => {
            let mut map = Map::new();
            for (key, item) in entries {
                map.insert(key.clone(), plain_json(item)?);
            }
            Value::Object(map)
        }
        DefaultValue::Json(v) => v.clone(),
        _ => return None,
    })
}

/// Avro JSON form of a `bytes`/`fixed` value: one code point per byte.
pub(crate) fn bytes_to_json(bytes: &[u8]) -> Value {
    Value::String(bytes.iter().map(|&b| char::from(b)).collect())
}

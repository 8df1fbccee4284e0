// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema tree produced by the composer.
//!
//! `Serialize` is implemented by hand so that keys always come out in the
//! same order: `type`, `name`, `namespace`, `doc`, then the body
//! (`fields`/`symbols`/`values`/`items`/`size`), then `logicalType` and its
//! attributes, then `default`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Avro primitive schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
        }
    }
}

/// A record field.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub schema: SchemaNode,
    pub doc: Option<String>,
    pub default: Option<Value>,
}

/// Named record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub fields: Vec<RecordField>,
}

/// Named enum. `default` is always the first symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    pub symbols: Vec<String>,
    pub default: String,
}

/// Named fixed-size blob.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub size: usize,
    pub logical_type: Option<String>,
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(Primitive),
    /// Primitive refined by a logical type, e.g. `int`/`date`.
    Logical {
        base: Primitive,
        logical_type: String,
        /// Extra attributes such as `precision` and `scale`, in emission order.
        attributes: Vec<(String, Value)>,
    },
    /// Plain string annotated with a `namedString` attribute.
    NamedString { full_name: String },
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    Map(Box<SchemaNode>),
    Array(Box<SchemaNode>),
    Union(Vec<SchemaNode>),
    /// Reference to a named type by full name.
    Reference(String),
}

impl SchemaNode {
    pub fn logical(base: Primitive, logical_type: impl Into<String>) -> Self {
        Self::Logical {
            base,
            logical_type: logical_type.into(),
            attributes: Vec::new(),
        }
    }
}

// ----------------------------------------------------------------------------
// Serialization
// ----------------------------------------------------------------------------

fn put_named<M: SerializeMap>(
    map: &mut M,
    kind: &str,
    name: &str,
    namespace: Option<&String>,
) -> Result<(), M::Error> {
    map.serialize_entry("type", kind)?;
    map.serialize_entry("name", name)?;
    if let Some(ns) = namespace {
        map.serialize_entry("namespace", ns)?;
    }
    Ok(())
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Primitive(p) => serializer.serialize_str(p.as_str()),
            Self::Reference(name) => serializer.serialize_str(name),
            Self::Logical {
                base,
                logical_type,
                attributes,
            } => {
                let mut map = serializer.serialize_map(Some(2 + attributes.len()))?;
                map.serialize_entry("type", base.as_str())?;
                map.serialize_entry("logicalType", logical_type)?;
                for (key, value) in attributes {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::NamedString { full_name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("namedString", full_name)?;
                map.end()
            }
            Self::Record(record) => {
                let mut map = serializer.serialize_map(None)?;
                put_named(&mut map, "record", &record.name, record.namespace.as_ref())?;
                if let Some(doc) = &record.doc {
                    map.serialize_entry("doc", doc)?;
                }
                map.serialize_entry("fields", &record.fields)?;
                map.end()
            }
            Self::Enum(schema) => {
                let mut map = serializer.serialize_map(None)?;
                put_named(&mut map, "enum", &schema.name, schema.namespace.as_ref())?;
                if let Some(doc) = &schema.doc {
                    map.serialize_entry("doc", doc)?;
                }
                map.serialize_entry("symbols", &schema.symbols)?;
                map.serialize_entry("default", &schema.default)?;
                map.end()
            }
            Self::Fixed(fixed) => {
                let mut map = serializer.serialize_map(None)?;
                put_named(&mut map, "fixed", &fixed.name, fixed.namespace.as_ref())?;
                map.serialize_entry("size", &fixed.size)?;
                if let Some(logical) = &fixed.logical_type {
                    map.serialize_entry("logicalType", logical)?;
                }
                map.end()
            }
            Self::Map(values) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "map")?;
                map.serialize_entry("values", values.as_ref())?;
                map.end()
            }
            Self::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items.as_ref())?;
                map.end()
            }
            Self::Union(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for RecordField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.schema)?;
        if let Some(doc) = &self.doc {
            map.serialize_entry("doc", doc)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        map.end()
    }
}

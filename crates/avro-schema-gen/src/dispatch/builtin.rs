// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in builders.

use crate::compose::{bytes_to_json, plain_json, Composer};
use crate::descriptor::{
    DefaultValue, GenericBase, LogicalKind, PrimitiveKind, TypeDescriptor, TypeKind,
};
use crate::dispatch::{DefaultMismatch, SchemaBuilder};
use crate::error::{Result, SchemaError};
use crate::options::JsonEncoding;
use crate::schema::name::{full_name, validate_name, validate_namespace};
use crate::schema::{EnumSchema, FixedSchema, Primitive, RecordSchema, SchemaNode};
use chrono::{NaiveDate, Timelike};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

type Encoded = std::result::Result<Value, DefaultMismatch>;

/// Size of the Avro `duration` fixed.
const DURATION_SIZE: usize = 12;

// ----------------------------------------------------------------------------
// Forward references
// ----------------------------------------------------------------------------

/// By-name references to types defined elsewhere.
pub struct ForwardRefs;

impl SchemaBuilder for ForwardRefs {
    fn name(&self) -> &'static str {
        "forward-ref"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Forward(_))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, _cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Forward(name) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        if name.is_empty() {
            return Err(SchemaError::name(name, "forward reference without a name"));
        }
        validate_namespace(name)?;
        Ok(SchemaNode::Reference(name.clone()))
    }

    fn encode_default(
        &self,
        _ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        if value.is_null() {
            return Err(DefaultMismatch::expected("a named type", value));
        }
        plain_json(value).ok_or_else(|| DefaultMismatch::expected("a JSON value", value))
    }
}

// ----------------------------------------------------------------------------
// Primitives
// ----------------------------------------------------------------------------

/// `null`, `boolean`, `int`/`long`, `float`/`double`, `bytes`, `string`.
pub struct Primitives;

impl SchemaBuilder for Primitives {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Primitive(k) if k != PrimitiveKind::Any)
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let options = cx.options();
        let primitive = match ty.kind {
            TypeKind::Primitive(PrimitiveKind::Null) => Primitive::Null,
            TypeKind::Primitive(PrimitiveKind::Boolean) => Primitive::Boolean,
            TypeKind::Primitive(PrimitiveKind::Integer) if options.int_32 => Primitive::Int,
            TypeKind::Primitive(PrimitiveKind::Integer) => Primitive::Long,
            TypeKind::Primitive(PrimitiveKind::Float) if options.float_32 => Primitive::Float,
            TypeKind::Primitive(PrimitiveKind::Float) => Primitive::Double,
            TypeKind::Primitive(PrimitiveKind::Bytes) => Primitive::Bytes,
            TypeKind::Primitive(PrimitiveKind::String) => Primitive::String,
            _ => return Err(SchemaError::UnsupportedType(ty.name.clone())),
        };
        Ok(SchemaNode::Primitive(primitive))
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Primitive(kind) = ty.kind else {
            return Err(DefaultMismatch::new("not a primitive"));
        };
        match (kind, value) {
            (PrimitiveKind::Null, DefaultValue::Null) => Ok(Value::Null),
            (PrimitiveKind::Boolean, DefaultValue::Bool(b)) => Ok(Value::Bool(*b)),
            (PrimitiveKind::Integer, DefaultValue::Int(i)) => {
                if cx.options().int_32 && i32::try_from(*i).is_err() {
                    return Err(DefaultMismatch::new(format!(
                        "{} does not fit a 32-bit int",
                        i
                    )));
                }
                Ok(Value::from(*i))
            }
            (PrimitiveKind::Float, DefaultValue::Float(_) | DefaultValue::Int(_)) => {
                plain_json(value).ok_or_else(|| DefaultMismatch::new("must be a finite number"))
            }
            (PrimitiveKind::Bytes, DefaultValue::Bytes(bytes)) => Ok(bytes_to_json(bytes)),
            (PrimitiveKind::String, DefaultValue::String(s)) => Ok(Value::String(s.clone())),
            (kind, value) => Err(DefaultMismatch::expected(primitive_label(kind), value)),
        }
    }
}

fn primitive_label(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Null => "null",
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Integer => "int",
        PrimitiveKind::Float => "float",
        PrimitiveKind::Bytes => "bytes",
        PrimitiveKind::String => "str",
        PrimitiveKind::Any => "Any",
    }
}

// ----------------------------------------------------------------------------
// Named strings
// ----------------------------------------------------------------------------

/// String refinements, annotated with `namedString`.
pub struct NamedStrings;

impl SchemaBuilder for NamedStrings {
    fn name(&self) -> &'static str {
        "named-string"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::NamedString)
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        validate_name(&ty.name)?;
        let namespace = cx.namespace_for(ty)?;
        Ok(SchemaNode::NamedString {
            full_name: full_name(namespace.as_deref(), &ty.name),
        })
    }

    fn encode_default(
        &self,
        _ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        match value {
            DefaultValue::String(s) => Ok(Value::String(s.clone())),
            other => Err(DefaultMismatch::expected("str", other)),
        }
    }
}

// ----------------------------------------------------------------------------
// JSON documents
// ----------------------------------------------------------------------------

/// `Dict[str, Any]` and `List[Dict[str, Any]]`, stored as JSON text.
pub struct JsonDocuments;

impl JsonDocuments {
    fn is_json_object(ty: &TypeDescriptor) -> bool {
        let TypeKind::Map { key, value } = &ty.kind else {
            return false;
        };
        let (Some(key), Some(value)) = (key.resolve(), value.resolve()) else {
            return false;
        };
        key.is_primitive(PrimitiveKind::String) && value.is_primitive(PrimitiveKind::Any)
    }

    fn is_json_array(ty: &TypeDescriptor) -> bool {
        match &ty.kind {
            TypeKind::Sequence(element) => element
                .resolve()
                .is_some_and(|element| Self::is_json_object(&element)),
            _ => false,
        }
    }
}

impl SchemaBuilder for JsonDocuments {
    fn name(&self) -> &'static str {
        "json"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        Self::is_json_object(ty) || Self::is_json_array(ty)
    }

    fn build(&self, _ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let base = match cx.options().json_encoding {
            JsonEncoding::Bytes => Primitive::Bytes,
            JsonEncoding::String => Primitive::String,
        };
        Ok(SchemaNode::logical(base, "json"))
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        let array = Self::is_json_array(ty);
        let expected = if array { "list of dict" } else { "dict" };
        let document = match value {
            DefaultValue::Null => None,
            DefaultValue::Json(Value::Null) => None,
            other => plain_json(other),
        };
        match document {
            Some(doc @ Value::Array(_)) if array => Ok(Value::String(doc.to_string())),
            Some(doc @ Value::Object(_)) if !array => Ok(Value::String(doc.to_string())),
            _ => Err(DefaultMismatch::expected(expected, value)),
        }
    }
}

// ----------------------------------------------------------------------------
// Logical types
// ----------------------------------------------------------------------------

/// date, datetime, time and uuid.
pub struct LogicalTypes;

impl SchemaBuilder for LogicalTypes {
    fn name(&self) -> &'static str {
        "logical"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(
            ty.kind,
            TypeKind::Logical(
                LogicalKind::Date | LogicalKind::DateTime | LogicalKind::Time | LogicalKind::Uuid
            )
        )
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let millis = cx.options().millis();
        let (base, logical_type) = match ty.kind {
            TypeKind::Logical(LogicalKind::Date) => (Primitive::Int, "date"),
            TypeKind::Logical(LogicalKind::DateTime) if millis => {
                (Primitive::Long, "timestamp-millis")
            }
            TypeKind::Logical(LogicalKind::DateTime) => (Primitive::Long, "timestamp-micros"),
            TypeKind::Logical(LogicalKind::Time) if millis => (Primitive::Int, "time-millis"),
            TypeKind::Logical(LogicalKind::Time) => (Primitive::Long, "time-micros"),
            TypeKind::Logical(LogicalKind::Uuid) => (Primitive::String, "uuid"),
            _ => return Err(SchemaError::UnsupportedType(ty.name.clone())),
        };
        Ok(SchemaNode::logical(base, logical_type))
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let millis = cx.options().millis();
        match (&ty.kind, value) {
            (TypeKind::Logical(LogicalKind::Date), DefaultValue::Date(date)) => {
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
                    .ok_or_else(|| DefaultMismatch::new("epoch out of range"))?;
                Ok(Value::from(date.signed_duration_since(epoch).num_days()))
            }
            (TypeKind::Logical(LogicalKind::Time), DefaultValue::Time(time)) => {
                let micros = i64::from(time.num_seconds_from_midnight()) * 1_000_000
                    + i64::from(time.nanosecond() / 1_000);
                Ok(Value::from(if millis { micros / 1_000 } else { micros }))
            }
            (TypeKind::Logical(LogicalKind::DateTime), DefaultValue::DateTime(dt)) => {
                Ok(Value::from(if millis {
                    dt.timestamp_millis()
                } else {
                    dt.timestamp_micros()
                }))
            }
            (TypeKind::Logical(LogicalKind::DateTime), DefaultValue::LocalDateTime(_)) => Err(
                DefaultMismatch::new("datetime default must be timezone-aware"),
            ),
            (TypeKind::Logical(LogicalKind::Uuid), DefaultValue::Uuid(id)) => {
                Ok(Value::String(id.hyphenated().to_string()))
            }
            (TypeKind::Logical(LogicalKind::Uuid), DefaultValue::String(text)) => {
                uuid::Uuid::parse_str(text)
                    .map(|id| Value::String(id.hyphenated().to_string()))
                    .map_err(|e| DefaultMismatch::new(format!("invalid UUID {:?}: {}", text, e)))
            }
            (TypeKind::Logical(kind), other) => {
                let expected = match kind {
                    LogicalKind::Date => "date",
                    LogicalKind::DateTime => "datetime",
                    LogicalKind::Time => "time",
                    LogicalKind::Uuid => "UUID",
                    LogicalKind::Duration => "timedelta",
                };
                Err(DefaultMismatch::expected(expected, other))
            }
            _ => Err(DefaultMismatch::new("not a logical type")),
        }
    }
}

// ----------------------------------------------------------------------------
// Durations
// ----------------------------------------------------------------------------

/// Durations, as a named 12-byte `fixed`.
pub struct Durations;

impl SchemaBuilder for Durations {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Logical(LogicalKind::Duration))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        cx.define_named(ty, |_cx, header| {
            Ok(SchemaNode::Fixed(FixedSchema {
                name: header.name,
                namespace: header.namespace,
                size: DURATION_SIZE,
                logical_type: Some("duration".to_string()),
            }))
        })
    }

    fn encode_default(
        &self,
        _ty: &Arc<TypeDescriptor>,
        _value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        Err(DefaultMismatch::new(
            "duration defaults are not supported; use a union with null and a null default",
        ))
    }
}

// ----------------------------------------------------------------------------
// Decimals
// ----------------------------------------------------------------------------

/// Fixed-point decimals, as `bytes` with `decimal` logical type.
pub struct Decimals;

impl Decimals {
    /// `(precision, scale)` after validation.
    fn params(ty: &TypeDescriptor) -> Result<(u32, Option<u32>)> {
        let TypeKind::Generic(generic) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        let (precision, scale) = match generic.params.as_slice() {
            [precision] => (*precision, None),
            [precision, scale] => (*precision, Some(*scale)),
            other => {
                return Err(SchemaError::generic(
                    &ty.name,
                    format!(
                        "expected precision and optional scale, got {} parameter(s)",
                        other.len()
                    ),
                ))
            }
        };
        let precision = u32::try_from(precision)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| {
                SchemaError::generic(
                    &ty.name,
                    format!("precision must be >= 1; got {}", precision),
                )
            })?;
        let scale = match scale {
            None => None,
            Some(scale) => {
                let scale = u32::try_from(scale).map_err(|_| {
                    SchemaError::generic(&ty.name, format!("scale must be >= 0; got {}", scale))
                })?;
                if scale > precision {
                    return Err(SchemaError::generic(
                        &ty.name,
                        format!("scale {} must not exceed precision {}", scale, precision),
                    ));
                }
                Some(scale)
            }
        };
        Ok((precision, scale))
    }
}

impl SchemaBuilder for Decimals {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(&ty.kind, TypeKind::Generic(g) if g.base == GenericBase::Decimal)
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, _cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let (precision, scale) = Self::params(ty)?;
        let mut attributes = vec![("precision".to_string(), Value::from(precision))];
        if let Some(scale) = scale {
            attributes.push(("scale".to_string(), Value::from(scale)));
        }
        Ok(SchemaNode::Logical {
            base: Primitive::Bytes,
            logical_type: "decimal".to_string(),
            attributes,
        })
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        let (precision, scale) =
            Self::params(ty).map_err(|e| DefaultMismatch::new(e.to_string()))?;
        let text = match value {
            DefaultValue::Decimal(text) => text.clone(),
            DefaultValue::Int(i) => i.to_string(),
            other => return Err(DefaultMismatch::expected("Decimal", other)),
        };
        let unscaled = unscaled_decimal(&text, precision, scale.unwrap_or(0))?;
        Ok(bytes_to_json(&twos_complement(unscaled)))
    }
}

/// Unscaled integer value of a decimal literal at `scale`.
fn unscaled_decimal(
    text: &str,
    precision: u32,
    scale: u32,
) -> std::result::Result<i128, DefaultMismatch> {
    let invalid = || DefaultMismatch::new(format!("invalid decimal {:?}", text));
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{}{}", int_part, frac_part);
    let significant = digits.trim_start_matches('0').len().max(1);
    if significant > precision as usize {
        return Err(DefaultMismatch::new(format!(
            "{} has {} digits; precision is {}",
            text, significant, precision
        )));
    }
    if frac_part.len() > scale as usize {
        return Err(DefaultMismatch::new(format!(
            "{} has {} decimal places; scale is {}",
            text,
            frac_part.len(),
            scale
        )));
    }

    let padded = format!("{}{}", digits, "0".repeat(scale as usize - frac_part.len()));
    let magnitude: i128 = padded
        .trim_start_matches('0')
        .parse::<i128>()
        .or_else(|e| if padded.bytes().all(|b| b == b'0') { Ok(0) } else { Err(e) })
        .map_err(|_| DefaultMismatch::new(format!("{} is too large", text)))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Minimal big-endian two's-complement bytes.
fn twos_complement(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start + 1 < bytes.len() {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Enumerations. Default is the first symbol.
pub struct Enums;

impl SchemaBuilder for Enums {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Enum(_))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Enum(desc) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        cx.define_named(ty, |_cx, header| {
            let mut seen = HashSet::new();
            let mut symbols = Vec::with_capacity(desc.symbols.len());
            for symbol in &desc.symbols {
                validate_name(symbol)?;
                if seen.insert(symbol.as_str()) {
                    symbols.push(symbol.clone());
                }
            }
            let Some(default) = symbols.first().cloned() else {
                return Err(SchemaError::name(header.full_name, "enum has no symbols"));
            };
            Ok(SchemaNode::Enum(EnumSchema {
                name: header.name,
                namespace: header.namespace,
                doc: header.doc,
                symbols,
                default,
            }))
        })
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Enum(desc) = &ty.kind else {
            return Err(DefaultMismatch::new("not an enum"));
        };
        match value {
            DefaultValue::String(symbol) if desc.contains(symbol) => {
                Ok(Value::String(symbol.clone()))
            }
            DefaultValue::String(symbol) => Err(DefaultMismatch::new(format!(
                "must be one of [{}]; got {:?}",
                desc.symbols.join(", "),
                symbol
            ))),
            other => Err(DefaultMismatch::expected(&ty.name, other)),
        }
    }
}

// ----------------------------------------------------------------------------
// Unions
// ----------------------------------------------------------------------------

/// Unions and optionals.
pub struct Unions;

impl SchemaBuilder for Unions {
    fn name(&self) -> &'static str {
        "union"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Union(_))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Union(members) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        cx.resolve_unnamed(ty, |cx| cx.resolve_union(members))
    }

    /// Encoded against the first member that accepts the value.
    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Union(members) = &ty.kind else {
            return Err(DefaultMismatch::new("not a union"));
        };
        let members = cx
            .flatten_union(members)
            .map_err(|e| DefaultMismatch::new(e.to_string()))?;
        let ordered = cx.order_for_default(members, value)?;
        match ordered.first() {
            Some(first) => cx.encode_default(first, value),
            None => Err(DefaultMismatch::new("union has no members")),
        }
    }
}

// ----------------------------------------------------------------------------
// Collections
// ----------------------------------------------------------------------------

/// Sequences, as `array`.
pub struct Sequences;

impl SchemaBuilder for Sequences {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Sequence(_))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Sequence(element) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        cx.resolve_unnamed(ty, |cx| Ok(SchemaNode::Array(Box::new(cx.resolve(element)?))))
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Sequence(element) = &ty.kind else {
            return Err(DefaultMismatch::new("not a sequence"));
        };
        let DefaultValue::Array(items) = value else {
            return Err(DefaultMismatch::expected("list", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                cx.encode_default_ref(element, item)
                    .map_err(|m| m.at_index(i))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

/// String-keyed maps.
pub struct Maps;

impl SchemaBuilder for Maps {
    fn name(&self) -> &'static str {
        "map"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Map { .. })
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Map { key, value } = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        let key = Composer::upgrade(key)?;
        if !key.is_primitive(PrimitiveKind::String) {
            return Err(SchemaError::UnsupportedType(format!(
                "{} with {} keys (map keys must be strings)",
                ty.name, key.name
            )));
        }
        cx.resolve_unnamed(ty, |cx| Ok(SchemaNode::Map(Box::new(cx.resolve(value)?))))
    }

    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Map { value: item_ty, .. } = &ty.kind else {
            return Err(DefaultMismatch::new("not a map"));
        };
        let DefaultValue::Map(entries) = value else {
            return Err(DefaultMismatch::expected("dict", value));
        };
        let mut map = Map::new();
        for (key, item) in entries {
            let encoded = cx
                .encode_default_ref(item_ty, item)
                .map_err(|m| m.at_key(key))?;
            map.insert(key.clone(), encoded);
        }
        Ok(Value::Object(map))
    }
}

// ----------------------------------------------------------------------------
// Records
// ----------------------------------------------------------------------------

/// Records.
pub struct Records;

impl SchemaBuilder for Records {
    fn name(&self) -> &'static str {
        "record"
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Record(_))
    }

    fn build(&self, ty: &Arc<TypeDescriptor>, cx: &mut Composer<'_>) -> Result<SchemaNode> {
        let TypeKind::Record(fields) = &ty.kind else {
            return Err(SchemaError::UnsupportedType(ty.name.clone()));
        };
        cx.define_named(ty, |cx, header| {
            let mut names = HashSet::new();
            let mut resolved = Vec::with_capacity(fields.len());
            for field in fields {
                let field = cx.resolve_field(field)?;
                if !names.insert(field.name.clone()) {
                    return Err(SchemaError::name(
                        field.name,
                        format!("duplicate field in {}", header.full_name),
                    ));
                }
                resolved.push(field);
            }
            Ok(SchemaNode::Record(RecordSchema {
                name: header.name,
                namespace: header.namespace,
                doc: header.doc,
                fields: resolved,
            }))
        })
    }

    /// Record defaults are maps keyed by field name; missing entries fall back
    /// to the field's own default.
    fn encode_default(
        &self,
        ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        cx: &Composer<'_>,
    ) -> Encoded {
        let TypeKind::Record(fields) = &ty.kind else {
            return Err(DefaultMismatch::new("not a record"));
        };
        let DefaultValue::Map(entries) = value else {
            return Err(DefaultMismatch::expected(&ty.name, value));
        };
        if let Some((unknown, _)) = entries
            .iter()
            .find(|(key, _)| !fields.iter().any(|f| &f.name == key))
        {
            return Err(DefaultMismatch::new(format!(
                "{} has no field {:?}",
                ty.name, unknown
            )));
        }

        let mut map = Map::new();
        for field in fields {
            let given = entries
                .iter()
                .find(|(key, _)| key == &field.name)
                .map(|(_, v)| v)
                .or(field.default.as_ref());
            let Some(item) = given else {
                return Err(DefaultMismatch::new("missing value").at_field(&field.name));
            };
            let encoded = cx
                .encode_default_ref(&field.ty, item)
                .map_err(|m| m.at_field(&field.name))?;
            let key = match &field.alias {
                Some(alias) if cx.options().use_field_alias => alias.clone(),
                _ => field.name.clone(),
            };
            map.insert(key, encoded);
        }
        Ok(Value::Object(map))
    }
}

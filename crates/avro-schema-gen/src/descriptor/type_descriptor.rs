// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors consumed by the schema compiler.

use crate::descriptor::DefaultValue;
use std::sync::{Arc, OnceLock, Weak};

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Integer,
    Float,
    Bytes,
    String,
    /// Untyped value. Only meaningful as the value of a string-keyed map,
    /// where it selects the `json` logical type.
    Any,
}

/// Primitive refinements with a fixed logical-type mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    Date,
    DateTime,
    Time,
    Duration,
    Uuid,
}

/// Base kind of a parameterized type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericBase {
    /// Fixed-point decimal: `[precision]` or `[precision, scale]`.
    Decimal,
}

/// Parameterized type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericDescriptor {
    pub base: GenericBase,
    pub params: Vec<i64>,
}

impl GenericDescriptor {
    /// Decimal with an explicit scale.
    pub fn decimal(precision: i64, scale: i64) -> Self {
        Self {
            base: GenericBase::Decimal,
            params: vec![precision, scale],
        }
    }
}

/// Enumeration type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Symbols in declaration order. Repeated symbols (aliases) are allowed
    /// and collapse to their first occurrence.
    pub symbols: Vec<String>,
}

impl EnumDescriptor {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Logical(LogicalKind),
    /// String refinement that carries its own name.
    NamedString,
    Enum(EnumDescriptor),
    /// Record with ordered fields.
    Record(Vec<FieldDescriptor>),
    /// Union of alternatives, in declared order.
    Union(Vec<TypeRef>),
    Map { key: TypeRef, value: TypeRef },
    Sequence(TypeRef),
    Generic(GenericDescriptor),
    /// Reference to a type by name only. Emitted verbatim.
    Forward(String),
}

/// A complete type descriptor.
///
/// Two descriptors are "the same type" only when they are the same
/// allocation; see [`TypeRef::identity`].
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Simple type name.
    pub name: String,
    /// Dotted path of the declaring module, e.g. `shop.orders.model`.
    pub origin: Option<String>,
    /// Declared documentation, unnormalized.
    pub doc: Option<String>,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            origin: None,
            doc: None,
            kind,
        }
    }

    /// Set the declaring module path.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the declared documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        let name = match kind {
            PrimitiveKind::Null => "None",
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Integer => "int",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::String => "str",
            PrimitiveKind::Any => "Any",
        };
        Self::new(name, TypeKind::Primitive(kind))
    }

    pub fn null() -> Self {
        Self::primitive(PrimitiveKind::Null)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    pub fn float() -> Self {
        Self::primitive(PrimitiveKind::Float)
    }

    pub fn bytes() -> Self {
        Self::primitive(PrimitiveKind::Bytes)
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn any() -> Self {
        Self::primitive(PrimitiveKind::Any)
    }

    pub fn logical(name: impl Into<String>, kind: LogicalKind) -> Self {
        Self::new(name, TypeKind::Logical(kind))
    }

    pub fn date() -> Self {
        Self::logical("date", LogicalKind::Date)
    }

    pub fn datetime() -> Self {
        Self::logical("datetime", LogicalKind::DateTime)
    }

    pub fn time() -> Self {
        Self::logical("time", LogicalKind::Time)
    }

    pub fn uuid() -> Self {
        Self::logical("UUID", LogicalKind::Uuid)
    }

    /// Duration type. Emitted as a named `fixed`, so the name matters: two
    /// separate `duration("Span")` descriptors in one graph clash. Build it
    /// once and share the `Arc`, or use [`timedelta`](Self::timedelta).
    pub fn duration(name: impl Into<String>) -> Self {
        Self::logical(name, LogicalKind::Duration)
    }

    /// Process-wide duration descriptor, `datetime.timedelta`.
    ///
    /// Every call returns the same allocation, so any number of uses in one
    /// graph produce a single definition followed by references.
    pub fn timedelta() -> Arc<TypeDescriptor> {
        static TIMEDELTA: OnceLock<Arc<TypeDescriptor>> = OnceLock::new();
        Arc::clone(TIMEDELTA.get_or_init(|| {
            Arc::new(Self::duration("timedelta").with_origin("datetime"))
        }))
    }

    /// Decimal with both precision and scale.
    pub fn decimal(precision: i64, scale: i64) -> Self {
        Self::new(
            "Decimal",
            TypeKind::Generic(GenericDescriptor::decimal(precision, scale)),
        )
    }

    /// Decimal with an arbitrary parameter list, validated at compile time.
    pub fn decimal_params(params: Vec<i64>) -> Self {
        Self::new(
            "Decimal",
            TypeKind::Generic(GenericDescriptor {
                base: GenericBase::Decimal,
                params,
            }),
        )
    }

    pub fn named_string(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::NamedString)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, TypeKind::Enum(EnumDescriptor::new(symbols)))
    }

    pub fn sequence(element: impl Into<TypeRef>) -> Self {
        Self::new("List", TypeKind::Sequence(element.into()))
    }

    pub fn map(key: impl Into<TypeRef>, value: impl Into<TypeRef>) -> Self {
        Self::new(
            "Dict",
            TypeKind::Map {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    /// Map with string keys.
    pub fn string_map(value: impl Into<TypeRef>) -> Self {
        Self::map(Self::string(), value)
    }

    /// Untyped JSON object, `Dict[str, Any]`.
    pub fn json_object() -> Self {
        Self::string_map(Self::any())
    }

    pub fn union<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeRef>,
    {
        Self::new(
            "Union",
            TypeKind::Union(members.into_iter().map(Into::into).collect()),
        )
    }

    /// `Optional[T]`: the union of `T` and null, in that order.
    pub fn optional(inner: impl Into<TypeRef>) -> Self {
        Self::union([inner.into(), TypeRef::from(Self::null())])
    }

    pub fn forward(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), TypeKind::Forward(name))
    }

    /// Record type descriptor.
    pub fn record(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, TypeKind::Record(fields))
    }

    /// Check if this is a record.
    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Record(_))
    }

    /// Get fields if this is a record.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.kind {
            TypeKind::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    pub fn is_primitive(&self, kind: PrimitiveKind) -> bool {
        matches!(self.kind, TypeKind::Primitive(k) if k == kind)
    }
}

/// Edge from one descriptor to another.
///
/// `Shared` owns the target. `Cyclic` is the back-edge of a recursive type
/// and only borrows it; see [`recursive`](crate::descriptor::recursive).
#[derive(Debug, Clone)]
pub enum TypeRef {
    Shared(Arc<TypeDescriptor>),
    Cyclic(Weak<TypeDescriptor>),
}

impl TypeRef {
    /// Upgrade to a strong handle. `None` when a cyclic target was dropped.
    pub fn resolve(&self) -> Option<Arc<TypeDescriptor>> {
        match self {
            Self::Shared(arc) => Some(Arc::clone(arc)),
            Self::Cyclic(weak) => weak.upgrade(),
        }
    }

    /// Address of the target allocation.
    pub fn identity(&self) -> usize {
        match self {
            Self::Shared(arc) => Arc::as_ptr(arc) as usize,
            Self::Cyclic(weak) => Weak::as_ptr(weak) as usize,
        }
    }
}

impl From<TypeDescriptor> for TypeRef {
    fn from(desc: TypeDescriptor) -> Self {
        Self::Shared(Arc::new(desc))
    }
}

impl From<Arc<TypeDescriptor>> for TypeRef {
    fn from(desc: Arc<TypeDescriptor>) -> Self {
        Self::Shared(desc)
    }
}

impl From<&Arc<TypeDescriptor>> for TypeRef {
    fn from(desc: &Arc<TypeDescriptor>) -> Self {
        Self::Shared(Arc::clone(desc))
    }
}

/// Field descriptor for record members.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeRef,
    /// Default value (if any).
    pub default: Option<DefaultValue>,
    /// Field documentation.
    pub doc: Option<String>,
    /// Serialization alias, used under `use_field_alias`.
    pub alias: Option<String>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            doc: None,
            alias: None,
        }
    }

    /// Set default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields() {
        let desc = TypeDescriptor::record(
            "Point",
            vec![
                FieldDescriptor::new("x", TypeDescriptor::integer()),
                FieldDescriptor::new("y", TypeDescriptor::integer()).with_default(0i64),
            ],
        );

        assert!(desc.is_record());
        assert_eq!(desc.fields().map(<[_]>::len), Some(2));
        assert!(desc.field("y").and_then(|f| f.default.as_ref()).is_some());
        assert!(desc.field("z").is_none());
    }

    #[test]
    fn test_optional_is_union_with_null_last() {
        let desc = TypeDescriptor::optional(TypeDescriptor::string());
        let TypeKind::Union(members) = &desc.kind else {
            panic!("expected union");
        };
        assert_eq!(members.len(), 2);
        let last = members[1].resolve().expect("shared");
        assert!(last.is_primitive(PrimitiveKind::Null));
    }

    #[test]
    fn test_identity_follows_allocation() {
        let shared = Arc::new(TypeDescriptor::string());
        let a = TypeRef::from(&shared);
        let b = TypeRef::from(Arc::clone(&shared));
        let c = TypeRef::from(TypeDescriptor::string());
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn test_dangling_cyclic_ref() {
        let weak = {
            let arc = Arc::new(TypeDescriptor::string());
            Arc::downgrade(&arc)
        };
        assert!(TypeRef::Cyclic(weak).resolve().is_none());
    }
}

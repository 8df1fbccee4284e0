// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::descriptor::{PrimitiveKind, TypeKind};
use crate::options::Options;
use crate::schema::Primitive;

struct Fixed(&'static str, Primitive);

impl SchemaBuilder for Fixed {
    fn name(&self) -> &'static str {
        self.0
    }

    fn handles(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty.kind, TypeKind::Primitive(PrimitiveKind::String))
    }

    fn build(&self, _ty: &Arc<TypeDescriptor>, _cx: &mut Composer<'_>) -> Result<SchemaNode> {
        Ok(SchemaNode::Primitive(self.1))
    }

    fn encode_default(
        &self,
        _ty: &Arc<TypeDescriptor>,
        value: &DefaultValue,
        _cx: &Composer<'_>,
    ) -> std::result::Result<Value, DefaultMismatch> {
        Err(DefaultMismatch::expected("nothing", value))
    }
}

fn compose(table: &DispatchTable, ty: TypeDescriptor) -> Result<SchemaNode> {
    Composer::new(table, Options::default(), None).compose(&Arc::new(ty))
}

#[test]
fn standard_table_order() {
    let table = DispatchTable::standard();
    let names: Vec<_> = table.builders().into_iter().map(|(_, n)| n).collect();
    assert_eq!(
        names,
        vec![
            "forward-ref",
            "primitive",
            "named-string",
            "json",
            "logical",
            "decimal",
            "duration",
            "enum",
            "union",
            "sequence",
            "map",
            "record",
        ]
    );
    assert_eq!(table.len(), 12);
}

#[test]
fn registered_builder_takes_precedence_by_priority() {
    let mut table = DispatchTable::standard();
    table.register(150, Fixed("bytes-strings", Primitive::Bytes));

    let node = compose(&table, TypeDescriptor::string()).expect("compose");
    assert_eq!(node, SchemaNode::Primitive(Primitive::Bytes));

    // Other kinds are untouched.
    let node = compose(&table, TypeDescriptor::integer()).expect("compose");
    assert_eq!(node, SchemaNode::Primitive(Primitive::Long));
}

#[test]
fn later_registration_loses_ties() {
    let mut table = DispatchTable::empty();
    table
        .register(10, Fixed("first", Primitive::Bytes))
        .register(10, Fixed("second", Primitive::Int));
    assert_eq!(table.builders(), vec![(10, "first"), (10, "second")]);

    let found = table.find(&TypeDescriptor::string()).expect("find");
    assert_eq!(found.name(), "first");
}

#[test]
fn low_priority_builder_is_shadowed() {
    let mut table = DispatchTable::standard();
    table.register(5000, Fixed("never", Primitive::Bytes));
    let node = compose(&table, TypeDescriptor::string()).expect("compose");
    assert_eq!(node, SchemaNode::Primitive(Primitive::String));
}

#[test]
fn unsupported_type() {
    let table = DispatchTable::standard();
    let err = compose(&table, TypeDescriptor::any()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType(_)));

    let empty = DispatchTable::empty();
    assert!(empty.is_empty());
    let err = compose(&empty, TypeDescriptor::string()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType(_)));
}

#[test]
fn mismatch_paths() {
    let m = DefaultMismatch::new("bad").at_index(2).at_key("k").at_field("tags");
    assert_eq!(m.path, r#".tags["k"][2]"#);
    assert_eq!(m.to_string(), r#".tags["k"][2]: bad"#);

    let err = DefaultMismatch::new("bad").at_index(0).into_error("tags");
    match err {
        SchemaError::InvalidFieldDefault { field, reason } => {
            assert_eq!(field, "tags[0]");
            assert_eq!(reason, "bad");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// End-to-end properties of the public compile API: determinism, cycle
// termination, named-type dedup, union ordering for defaults, enum defaults,
// collection mapping, decimal validation, namespace suppression and
// mandatory defaults.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::missing_panics_doc)]

use avro_schema_gen::descriptor::{recursive, DefaultValue, RecordBuilder, TypeDescriptor};
use avro_schema_gen::{
    compile, compile_uncached, compile_with_config, global, CompileConfig, Compiler, Flag,
    Options, SchemaError,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("valid JSON")
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8")
}

fn has_key_anywhere(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key(key) || map.values().any(|v| has_key_anywhere(v, key))
        }
        Value::Array(items) => items.iter().any(|v| has_key_anywhere(v, key)),
        _ => false,
    }
}

fn shop_model() -> Arc<TypeDescriptor> {
    let status = Arc::new(
        TypeDescriptor::enumeration("Status", ["OPEN", "SHIPPED", "CLOSED"])
            .with_origin("shop.orders"),
    );
    let line = RecordBuilder::new("Line")
        .origin("shop.orders")
        .field("sku", TypeDescriptor::named_string("Sku").with_origin("shop.catalog"))
        .field("price", TypeDescriptor::decimal(10, 2))
        .build_arc();
    RecordBuilder::new("Order")
        .origin("shop.orders")
        .doc("A customer order.\n\nLong description.")
        .field("id", TypeDescriptor::uuid())
        .field_with_default("status", &status, "OPEN")
        .field("lines", TypeDescriptor::sequence(&line))
        .optional_field("gift", &line)
        .field("previous_status", TypeDescriptor::optional(&status))
        .field_with_default("attributes", TypeDescriptor::json_object(), json!({}))
        .build_arc()
}

#[test]
fn compilation_is_deterministic() {
    init_logging();
    let order = shop_model();
    let options = Options::default();

    let first = compile(&order, None, options).expect("compile");
    let second = compile(&order, None, options).expect("compile");
    let uncached = compile_uncached(&order, None, options).expect("compile");
    assert_eq!(first, second);
    assert_eq!(first, uncached);

    // A fresh compiler with an empty cache produces the same bytes.
    let fresh = Compiler::default()
        .compile(&order, None, options)
        .expect("compile");
    assert_eq!(&first[..], &fresh[..]);
}

#[test]
fn full_document() {
    let order = shop_model();
    let bytes = compile(&order, None, Options::default()).expect("compile");
    assert_eq!(
        text(bytes),
        concat!(
            r#"{"type":"record","name":"Order","namespace":"shop","doc":"A customer order.","fields":["#,
            r#"{"name":"id","type":{"type":"string","logicalType":"uuid"}},"#,
            r#"{"name":"status","type":{"type":"enum","name":"Status","namespace":"shop","symbols":["OPEN","SHIPPED","CLOSED"],"default":"OPEN"},"default":"OPEN"},"#,
            r#"{"name":"lines","type":{"type":"array","items":{"type":"record","name":"Line","namespace":"shop","fields":["#,
            r#"{"name":"sku","type":{"type":"string","namedString":"shop.Sku"}},"#,
            r#"{"name":"price","type":{"type":"bytes","logicalType":"decimal","precision":10,"scale":2}}]}}},"#,
            r#"{"name":"gift","type":["null","shop.Line"],"default":null},"#,
            r#"{"name":"previous_status","type":["shop.Status","null"]},"#,
            r#"{"name":"attributes","type":{"type":"bytes","logicalType":"json"},"default":"{}"}]}"#,
        )
    );
}

#[test]
fn pretty_output_parses_identically() {
    let order = shop_model();
    let compact = compile(&order, None, Options::default()).expect("compile");
    let pretty = compile(&order, None, Options::from_flags([Flag::JsonIndent2])).expect("compile");
    assert!(text(pretty.clone()).starts_with("{\n  \"type\": \"record\",\n  \"name\": \"Order\""));
    assert_eq!(parse(&compact), parse(&pretty));
}

#[test]
fn self_referential_type_terminates() {
    let tree = recursive(|me| {
        RecordBuilder::new("Tree")
            .origin("forest")
            .field("label", TypeDescriptor::string())
            .field("children", TypeDescriptor::sequence(me))
            .build()
    });
    let bytes = compile(&tree, None, Options::default()).expect("compile");
    assert_eq!(
        text(bytes),
        r#"{"type":"record","name":"Tree","namespace":"forest","fields":[{"name":"label","type":"string"},{"name":"children","type":{"type":"array","items":"forest.Tree"}}]}"#
    );
}

#[test]
fn self_reference_without_named_type_is_an_error() {
    let list = recursive(|me| TypeDescriptor::sequence(me));
    let err = compile_uncached(&list, None, Options::default()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType(_)), "{}", err);

    let union = recursive(|me| TypeDescriptor::union([me, TypeDescriptor::integer().into()]));
    let err = compile(&union, None, Options::default()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType(_)), "{}", err);
}

#[test]
fn referenced_twice_defined_once() {
    let money = RecordBuilder::new("Money")
        .field("cents", TypeDescriptor::integer())
        .build_arc();
    let invoice = RecordBuilder::new("Invoice")
        .field("total", &money)
        .field("taxes", TypeDescriptor::string_map(&money))
        .build_arc();

    let value = parse(&compile(&invoice, None, Options::default()).expect("compile"));
    assert_eq!(value["fields"][0]["type"]["type"], json!("record"));
    assert_eq!(value["fields"][1]["type"], json!({"type": "map", "values": "Money"}));
}

#[test]
fn default_decides_union_order() {
    let with_null = RecordBuilder::new("A")
        .field_with_default("n", TypeDescriptor::optional(TypeDescriptor::integer()), DefaultValue::Null)
        .build_arc();
    let with_int = RecordBuilder::new("A")
        .field_with_default("n", TypeDescriptor::optional(TypeDescriptor::integer()), 7i64)
        .build_arc();

    let a = parse(&compile(&with_null, None, Options::default()).expect("compile"));
    let b = parse(&compile(&with_int, None, Options::default()).expect("compile"));
    assert_eq!(a["fields"][0]["type"], json!(["null", "long"]));
    assert_eq!(b["fields"][0]["type"], json!(["long", "null"]));
    assert_eq!(b["fields"][0]["default"], json!(7));
}

#[test]
fn enum_default_is_first_symbol() {
    let ab = Arc::new(TypeDescriptor::enumeration("AB", ["A", "B"]));
    let ba = Arc::new(TypeDescriptor::enumeration("BA", ["B", "A"]));
    assert_eq!(
        text(compile(&ab, None, Options::default()).expect("compile")),
        r#"{"type":"enum","name":"AB","symbols":["A","B"],"default":"A"}"#
    );
    assert_eq!(parse(&compile(&ba, None, Options::default()).expect("compile"))["default"], json!("B"));
}

#[test]
fn map_of_longs() {
    let ty = Arc::new(TypeDescriptor::string_map(TypeDescriptor::integer()));
    assert_eq!(
        text(compile(&ty, None, Options::default()).expect("compile")),
        r#"{"type":"map","values":"long"}"#
    );
}

#[test]
fn decimal_validation() {
    let ok = Arc::new(TypeDescriptor::decimal(4, 2));
    assert_eq!(
        text(compile(&ok, None, Options::default()).expect("compile")),
        r#"{"type":"bytes","logicalType":"decimal","precision":4,"scale":2}"#
    );

    let bad = Arc::new(TypeDescriptor::decimal(2, 4));
    let err = compile(&bad, None, Options::default()).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidGenericParameters { .. }), "{}", err);
}

#[test]
fn no_namespace_anywhere() {
    let order = shop_model();
    let value = parse(&compile(&order, None, Options::from_flags([Flag::NoAutoNamespace])).expect("compile"));
    assert!(!has_key_anywhere(&value, "namespace"));
    // Named strings lose their prefix too.
    assert_eq!(
        value["fields"][2]["type"]["items"]["fields"][0]["type"],
        json!({"type": "string", "namedString": "Sku"})
    );
    assert_eq!(value["fields"][3]["type"], json!(["null", "Line"]));
}

#[test]
fn namespace_override_applies_everywhere() {
    let order = shop_model();
    let value = parse(&compile(&order, Some("com.acme"), Options::default()).expect("compile"));
    assert_eq!(value["namespace"], json!("com.acme"));
    assert_eq!(value["fields"][1]["type"]["namespace"], json!("com.acme"));
    assert_eq!(value["fields"][3]["type"], json!(["null", "com.acme.Line"]));
}

#[test]
fn mandatory_defaults_fail_before_output() {
    let ty = RecordBuilder::new("Settings")
        .field_with_default("retries", TypeDescriptor::integer(), 3i64)
        .field("endpoint", TypeDescriptor::string())
        .build_arc();

    let options = Options::from_flags([Flag::DefaultsMandatory]);
    let err = compile(&ty, None, options).unwrap_err();
    match &err {
        SchemaError::InvalidFieldDefault { field, .. } => assert_eq!(field, "endpoint"),
        other => panic!("unexpected error {other}"),
    }
    assert!(global().cache().get(&ty, None, options).is_none());
}

#[test]
fn trailing_newline_and_sorted_keys() {
    let ty = Arc::new(TypeDescriptor::sequence(TypeDescriptor::date()));
    let options = Options::from_flags([Flag::JsonSortKeys, Flag::JsonAppendNewline]);
    assert_eq!(
        text(compile(&ty, None, options).expect("compile")),
        "{\"items\":{\"logicalType\":\"date\",\"type\":\"int\"},\"type\":\"array\"}\n"
    );
}

#[test]
fn config_file_drives_compilation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("avro.toml");
    std::fs::write(
        &path,
        "namespace = \"com.acme\"\nflags = [\"INT_32\"]\n\n[options]\ntime_precision = \"millis\"\n",
    )
    .expect("write");

    let config = CompileConfig::from_file(&path).expect("load");
    let ty = RecordBuilder::new("Clock")
        .field("at", TypeDescriptor::time())
        .field("count", TypeDescriptor::integer())
        .build_arc();
    let value = parse(&compile_with_config(&ty, &config).expect("compile"));
    assert_eq!(value["namespace"], json!("com.acme"));
    assert_eq!(value["fields"][0]["type"], json!({"type": "int", "logicalType": "time-millis"}));
    assert_eq!(value["fields"][1]["type"], json!("int"));
}

#[test]
fn concurrent_compilation() {
    init_logging();
    let order = shop_model();
    let expected = compile_uncached(&order, None, Options::default()).expect("compile");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let order = Arc::clone(&order);
            thread::spawn(move || compile(&order, None, Options::default()).expect("compile"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), expected);
    }
}

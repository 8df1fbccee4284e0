// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical serializer.

use crate::error::Result;
use crate::options::OutputFormat;
use crate::schema::SchemaNode;
use serde_json::{Map, Value};

/// Render a schema tree to UTF-8 JSON.
///
/// Compact output has no whitespace at all; pretty output uses two-space
/// indentation. Both parse to the same document.
pub fn render(node: &SchemaNode, format: OutputFormat) -> Result<Vec<u8>> {
    let mut out = if format.sort_keys {
        let value = sort_keys(serde_json::to_value(node)?);
        write(&value, format.pretty)?
    } else {
        write(node, format.pretty)?
    };
    if format.trailing_newline {
        out.push(b'\n');
    }
    Ok(out)
}

fn write<T: serde::Serialize>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(bytes)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Primitive, SchemaNode};

    fn sample() -> SchemaNode {
        SchemaNode::Map(Box::new(SchemaNode::Primitive(Primitive::Long)))
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("utf-8")
    }

    #[test]
    fn test_compact() {
        let out = render(&sample(), OutputFormat::default()).expect("render");
        assert_eq!(text(out), r#"{"type":"map","values":"long"}"#);
    }

    #[test]
    fn test_pretty_two_space_indent() {
        let format = OutputFormat {
            pretty: true,
            ..OutputFormat::default()
        };
        let out = render(&sample(), format).expect("render");
        assert_eq!(text(out), "{\n  \"type\": \"map\",\n  \"values\": \"long\"\n}");
    }

    #[test]
    fn test_sorted_keys_and_newline() {
        let format = OutputFormat {
            sort_keys: true,
            trailing_newline: true,
            ..OutputFormat::default()
        };
        let out = render(&sample(), format).expect("render");
        assert_eq!(text(out), "{\"type\":\"map\",\"values\":\"long\"}\n");

        let array = SchemaNode::Array(Box::new(SchemaNode::Primitive(Primitive::Int)));
        let out = render(&array, format).expect("render");
        assert_eq!(text(out), "{\"items\":\"int\",\"type\":\"array\"}\n");
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let compact = render(&sample(), OutputFormat::default()).expect("render");
        let pretty = render(
            &sample(),
            OutputFormat {
                pretty: true,
                ..OutputFormat::default()
            },
        )
        .expect("render");
        let a: Value = serde_json::from_slice(&compact).expect("parse");
        let b: Value = serde_json::from_slice(&pretty).expect("parse");
        assert_eq!(a, b);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field default values.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

/// A declared field default, before it is checked against the field schema.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Null / None.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<DefaultValue>),
    /// Key/value pairs in declaration order. Also used for record defaults.
    Map(Vec<(String, DefaultValue)>),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Timezone-aware timestamp.
    DateTime(DateTime<FixedOffset>),
    /// Timestamp without timezone; never accepted as a default.
    LocalDateTime(NaiveDateTime),
    Duration(chrono::Duration),
    Uuid(Uuid),
    /// Decimal in its textual form, e.g. `"-12.50"`.
    Decimal(String),
    /// Arbitrary JSON document.
    Json(serde_json::Value),
}

impl DefaultValue {
    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "list",
            Self::Map(_) => "dict",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) | Self::LocalDateTime(_) => "datetime",
            Self::Duration(_) => "timedelta",
            Self::Uuid(_) => "UUID",
            Self::Decimal(_) => "Decimal",
            Self::Json(_) => "json",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Decimal default from its textual form.
    pub fn decimal(text: impl Into<String>) -> Self {
        Self::Decimal(text.into())
    }

    /// Map default from key/value pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, DefaultValue)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for DefaultValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<NaiveDate> for DefaultValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for DefaultValue {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<DateTime<FixedOffset>> for DefaultValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v)
    }
}

impl From<NaiveDateTime> for DefaultValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::LocalDateTime(v)
    }
}

impl From<chrono::Duration> for DefaultValue {
    fn from(v: chrono::Duration) -> Self {
        Self::Duration(v)
    }
}

impl From<Uuid> for DefaultValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<serde_json::Value> for DefaultValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<DefaultValue>> From<Option<T>> for DefaultValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(DefaultValue::from(3i32), DefaultValue::Int(3));
        assert_eq!(DefaultValue::from("a"), DefaultValue::String("a".into()));
        assert_eq!(DefaultValue::from(None::<i64>), DefaultValue::Null);
        assert_eq!(DefaultValue::from(Some(true)), DefaultValue::Bool(true));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(DefaultValue::Null.kind_name(), "null");
        assert_eq!(DefaultValue::decimal("1.5").kind_name(), "Decimal");
        assert_eq!(
            DefaultValue::map([("a", DefaultValue::Int(1))]).kind_name(),
            "dict"
        );
    }
}

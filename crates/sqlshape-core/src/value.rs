//! Dynamic SQL values.
//!
//! `Value` is used both for bound statement parameters and for cast result
//! columns.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};

/// Text layout used for DATE values on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Text layout used for DATETIME/TIMESTAMP values on the wire.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A dynamically-typed SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean (from `tinyint(1)` columns).
    Bool(bool),
    /// Integer within the `int` cast kind.
    Int(i64),
    /// Exact large integer (covers `bigint unsigned`).
    BigInt(i128),
    /// Floating point number.
    Double(f64),
    /// Text, including enum values and bigints read as strings.
    Text(String),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Date and time without a zone.
    Timestamp(NaiveDateTime),
    /// Structured JSON document.
    Json(serde_json::Value),
    /// Members of a MySQL `SET` column.
    Set(BTreeSet<String>),
}

impl Value {
    /// Build a `Set` value from any iterator of members.
    pub fn set<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Set(members.into_iter().map(Into::into).collect())
    }

    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INT",
            Value::BigInt(_) => "BIGINT",
            Value::Double(_) => "DOUBLE",
            Value::Text(_) => "TEXT",
            Value::Date(_) => "DATE",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Json(_) => "JSON",
            Value::Set(_) => "SET",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::BigInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(i128::from(*v)),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value.
    ///
    /// Big integers outside the 64-bit range become JSON strings so that no
    /// precision is lost. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Value::Null => J::Null,
            Value::Bool(b) => J::Bool(*b),
            Value::Int(v) => J::from(*v),
            Value::BigInt(v) => {
                if let Ok(i) = i64::try_from(*v) {
                    J::from(i)
                } else if let Ok(u) = u64::try_from(*v) {
                    J::from(u)
                } else {
                    J::String(v.to_string())
                }
            }
            Value::Double(v) => serde_json::Number::from_f64(*v).map_or(J::Null, J::Number),
            Value::Text(s) => J::String(s.clone()),
            Value::Date(d) => J::String(d.format(DATE_FORMAT).to_string()),
            Value::Timestamp(ts) => J::String(ts.format(DATETIME_FORMAT).to_string()),
            Value::Json(v) => v.clone(),
            Value::Set(members) => J::Array(members.iter().cloned().map(J::String).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::BigInt(i128::from(v))
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(v: BTreeSet<String>) -> Self {
        Value::Set(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_into_value() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn test_set_builder_dedups() {
        let v = Value::set(["b", "a", "b"]);
        let members: Vec<_> = v.as_set().unwrap().iter().cloned().collect();
        assert_eq!(members, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_bigint_to_json_keeps_precision() {
        let huge = Value::BigInt(i128::from(u64::MAX) + 1);
        assert_eq!(
            huge.to_json(),
            serde_json::Value::String("18446744073709551616".to_string())
        );
        assert_eq!(Value::BigInt(42).to_json(), serde_json::json!(42));
    }

    #[test]
    fn test_timestamp_to_json() {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        assert_eq!(
            Value::Timestamp(ts).to_json(),
            serde_json::json!("2024-02-29 13:05:00")
        );
    }
}

//! Conversion of textual driver output into semantic values.
//!
//! The transport returns every column as text (or NULL). Each field's
//! [`CastKind`] decides which [`Value`] variant that text becomes. The kind
//! is fixed at resolution time; row data never influences it.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CastError, Result};
use crate::field::FieldDescriptor;
use crate::row::{RawRow, Row};
use crate::value::{DATE_FORMAT, DATETIME_FORMAT, Value};

/// Semantic value category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastKind {
    Int,
    Float,
    Boolean,
    BigInt,
    Date,
    String,
    Json,
    Set,
}

impl CastKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            CastKind::Int => "int",
            CastKind::Float => "float",
            CastKind::Boolean => "boolean",
            CastKind::BigInt => "bigint",
            CastKind::Date => "date",
            CastKind::String => "string",
            CastKind::Json => "json",
            CastKind::Set => "set",
        }
    }

    /// Parse a kind name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Some(CastKind::Int),
            "float" => Some(CastKind::Float),
            "boolean" | "bool" => Some(CastKind::Boolean),
            "bigint" => Some(CastKind::BigInt),
            "date" => Some(CastKind::Date),
            "string" => Some(CastKind::String),
            "json" => Some(CastKind::Json),
            "set" => Some(CastKind::Set),
            _ => None,
        }
    }
}

/// Per-call cast kind overrides, keyed by field or column name.
///
/// Overrides apply to one query only and win over the model's descriptor for
/// the names they mention.
///
/// ```
/// use sqlshape_core::{CastKind, CastOverrides};
///
/// let overrides = CastOverrides::new().with("total", CastKind::BigInt);
/// assert_eq!(overrides.get("total"), Some(CastKind::BigInt));
/// assert_eq!(overrides.get("other"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastOverrides {
    kinds: HashMap<String, CastKind>,
}

impl CastOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, kind: CastKind) -> Self {
        self.kinds.insert(name.into(), kind);
        self
    }

    pub fn get(&self, name: &str) -> Option<CastKind> {
        self.kinds.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn cast_error(field: &str, kind: CastKind, text: &str, message: impl ToString) -> CastError {
    CastError {
        field: field.to_string(),
        kind: kind.as_str(),
        text: text.to_string(),
        message: message.to_string(),
    }
}

/// Parse MySQL DATE/DATETIME/TIMESTAMP text.
///
/// Zero dates (`0000-00-00...`) have no calendar meaning and become NULL.
fn parse_date(field: &str, text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.starts_with("0000-00-00") {
        tracing::trace!(field = field, text = text, "Zero date cast to NULL");
        return Ok(Value::Null);
    }
    if trimmed.len() == 10 {
        return NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| cast_error(field, CastKind::Date, text, e).into());
    }
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(Value::Timestamp)
        .map_err(|e| cast_error(field, CastKind::Date, text, e).into())
}

/// Cast one textual column value.
///
/// `field` is only used for error context.
pub fn cast_text(kind: CastKind, field: &str, text: Option<&str>) -> Result<Value> {
    let Some(text) = text else {
        return Ok(Value::Null);
    };

    match kind {
        CastKind::Int => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| cast_error(field, kind, text, e).into()),
        CastKind::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|e| cast_error(field, kind, text, e).into()),
        CastKind::Boolean => text
            .trim()
            .parse::<i64>()
            .map(|v| Value::Bool(v != 0))
            .map_err(|e| cast_error(field, kind, text, e).into()),
        CastKind::BigInt => text
            .trim()
            .parse::<i128>()
            .map(Value::BigInt)
            .map_err(|e| cast_error(field, kind, text, e).into()),
        CastKind::Date => parse_date(field, text),
        CastKind::Json => serde_json::from_str(text)
            .map(Value::Json)
            .map_err(|e| cast_error(field, kind, text, e).into()),
        CastKind::Set => {
            if text.is_empty() {
                Ok(Value::Set(Default::default()))
            } else {
                Ok(Value::set(text.split(',')))
            }
        }
        CastKind::String => Ok(Value::Text(text.to_string())),
    }
}

/// Cast a raw row using the model's descriptors.
///
/// Only the columns present in `raw` are visited, so projections of a
/// subset of fields cast cleanly. Output entries are named by field name;
/// columns with no descriptor keep their column label and, absent an
/// override, stay text.
pub fn cast_row(
    raw: &RawRow,
    fields: &[FieldDescriptor],
    overrides: &CastOverrides,
) -> Result<Row> {
    let mut row = Row::new();
    for (column, text) in raw.iter() {
        // Column labels match before field names.
        let descriptor = fields
            .iter()
            .find(|f| f.column_name == column)
            .or_else(|| fields.iter().find(|f| f.field_name == column));
        let name = descriptor.map_or(column, |f| f.field_name.as_str());
        let kind = overrides
            .get(name)
            .or_else(|| overrides.get(column))
            .or_else(|| descriptor.map(|f| f.cast_kind))
            .unwrap_or(CastKind::String);
        row.insert(name, cast_text(kind, name, text)?);
    }
    Ok(row)
}

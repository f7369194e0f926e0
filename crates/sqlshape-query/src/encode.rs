//! Per-field encoding of values bound on write.

use sqlshape_core::{CastKind, FieldDescriptor, Value};

/// Encode `value` for binding to `field`'s column.
///
/// JSON fields are sent as JSON text and set fields holding a member set
/// as comma-joined members. Everything else is bound unchanged. `Null`
/// stays `Null`; statement builders render it as a literal `NULL`.
pub fn encode_value(field: &FieldDescriptor, value: &Value) -> Value {
    match (field.cast_kind, value) {
        (_, Value::Null) => Value::Null,
        (CastKind::Json, v) => Value::Text(v.to_json().to_string()),
        (CastKind::Set, Value::Set(members)) => Value::Text(
            members
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        (_, v) => v.clone(),
    }
}

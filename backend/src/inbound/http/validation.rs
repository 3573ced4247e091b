//! Shared validation helpers for inbound HTTP adapters.
//!
//! The landing page posts loosely typed JSON: quantities may arrive as
//! numbers or strings, and untouched inputs as `null` or `""`. These helpers
//! fold such values into optional text before domain validation.

use serde_json::{Value, json};

use crate::domain::{Error, OrderField};

/// Render a scalar JSON value as text.
///
/// Returns `None` for values the form treats as "not filled in": `null`,
/// `false`, numeric zero, blank strings, arrays and objects.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Build the error returned when a required order field is missing.
pub(crate) fn missing_field_error(field: OrderField) -> Error {
    Error::invalid_request(format!("Поле {field} обязательно для заполнения")).with_details(json!({
        "field": field.as_str(),
        "code": "missing_field",
    }))
}

//! Lookup helpers over untyped API payloads.

use serde_json::Value;

use super::FieldError;

/// Follow `path` into `value`; missing keys and nulls are both errors.
pub(crate) fn required<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, FieldError> {
    let mut current = value;
    for key in path {
        current = match current.get(key) {
            Some(Value::Null) | None => return Err(FieldError::Missing(path.join("."))),
            Some(next) => next,
        };
    }
    Ok(current)
}

/// Required field rendered as display text
pub(crate) fn required_text(value: &Value, path: &[&str]) -> Result<String, FieldError> {
    required(value, path).map(display)
}

/// Optional field rendered as display text; null counts as absent
pub(crate) fn optional_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(display(v)),
    }
}

/// Render a JSON value the way it reads in text: strings unquoted
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

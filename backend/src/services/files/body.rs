use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) const EMPTY_BODY: &str = "Validation error: request body is empty";
const INVALID_BODY: &str = "Validation error";

/// Decodes a JSON request body that must carry at least one field.
///
/// An empty body, `null` and `{}` are all treated as empty. Shape errors
/// (for example `data` not being an array) are reported before any handler
/// logic runs.
pub(crate) fn required<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    match decode(body)? {
        Some(value) => from_value(value),
        None => Err(ApiError::validation(EMPTY_BODY)),
    }
}

/// Like [`required`], but an empty body yields `T::default()`.
pub(crate) fn optional<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    match decode(body)? {
        Some(value) => from_value(value),
        None => Ok(T::default()),
    }
}

fn decode(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body).map_err(invalid)?;
    let empty = match &value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    Ok((!empty).then_some(value))
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(invalid)
}

fn invalid(e: serde_json::Error) -> ApiError {
    ApiError::Validation {
        message: INVALID_BODY.to_string(),
        errors: vec![e.to_string()],
    }
}

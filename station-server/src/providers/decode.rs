//! Decoding upstream replies into typed DTOs.
//!
//! Each provider declares its reply shape as `Deserialize` structs and
//! decodes the fetched JSON through [`decode`]. A reply that doesn't match
//! the shape is a `Malformed` error, never a panic.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use super::error::LookupError;

/// Decode a JSON reply into `T`.
pub(crate) fn decode<T: DeserializeOwned>(body: &Value) -> Result<T, LookupError> {
    T::deserialize(body).map_err(|e| LookupError::Malformed(e.to_string()))
}

/// A number that may arrive as a JSON number or a numeric string.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_number(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

/// Like [`number`], but anything unusable (missing, null, garbage) is `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_number))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

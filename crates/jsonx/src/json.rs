//! JSON decoding for transcoder input.
//!
//! Thin wrappers around `serde_json` that decode into [`JsonValue`], which
//! keeps number literals verbatim and every object member, repeated keys
//! included, in source order.

use crate::error::Result;
use crate::value::JsonValue;

/// Decode JSON bytes into a [`JsonValue`].
///
/// # Examples
///
/// ```
/// use audit_jsonx::json::from_json_slice;
///
/// let value = from_json_slice(br#"{"amount": 1.50, "delta": -0}"#).unwrap();
/// assert_eq!(value.get("amount").and_then(|v| v.as_number()), Some("1.50"));
/// assert_eq!(value.get("delta").and_then(|v| v.as_number()), Some("-0"));
/// ```
pub fn from_json_slice(json: &[u8]) -> Result<JsonValue> {
    Ok(serde_json::from_slice(json)?)
}

/// Decode a JSON string into a [`JsonValue`].
pub fn from_json_str(json: &str) -> Result<JsonValue> {
    Ok(serde_json::from_str(json)?)
}

//! Decoded JSON that keeps its source text.
//!
//! [`JsonValue`] is the transcoder's tagged union. It differs from
//! [`serde_json::Value`] in two ways:
//!
//! - numbers hold the literal exactly as written (`-0`, `1.50`, `1E+2`)
//! - objects are member lists, so repeated keys are all kept in source order
//!
//! Decoding captures every value as a [`RawValue`] first and then dispatches
//! on its text, so number literals never pass through a numeric type.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::value::RawValue;

/// Maximum nesting of arrays and objects accepted by the decoder.
pub const MAX_DEPTH: usize = 128;

/// A decoded JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// Number literal, verbatim.
    Number(String),
    String(String),
    Array(Vec<JsonValue>),
    /// Members in source order. A key may appear more than once.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// Returns the first member named `key` when `self` is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the number literal when `self` is a number.
    pub fn as_number(&self) -> Option<&str> {
        match self {
            JsonValue::Number(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Number(n.to_string()),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ValueSeed { depth: 0 }.deserialize(deserializer)
    }
}

/// Checks a number literal against the JSON grammar:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
pub fn is_number_literal(text: &str) -> bool {
    let mut bytes = text.as_bytes();
    if let [b'-', rest @ ..] = bytes {
        bytes = rest;
    }

    bytes = match bytes {
        [b'0', rest @ ..] => rest,
        [b'1'..=b'9', ..] => skip_digits(bytes),
        _ => return false,
    };

    if let [b'.', rest @ ..] = bytes {
        let after = skip_digits(rest);
        if after.len() == rest.len() {
            return false;
        }
        bytes = after;
    }

    if let [b'e' | b'E', rest @ ..] = bytes {
        let rest = match rest {
            [b'+' | b'-', rest @ ..] => rest,
            _ => rest,
        };
        let after = skip_digits(rest);
        if after.len() == rest.len() {
            return false;
        }
        bytes = after;
    }

    bytes.is_empty()
}

fn skip_digits(bytes: &[u8]) -> &[u8] {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    &bytes[digits..]
}

/// Decodes one value found `depth` containers below the root.
#[derive(Clone, Copy)]
struct ValueSeed {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for ValueSeed {
    type Value = JsonValue;

    fn deserialize<D>(self, deserializer: D) -> Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        self.decode(raw.get()).map_err(de::Error::custom)
    }
}

impl ValueSeed {
    fn decode(self, text: &str) -> serde_json::Result<JsonValue> {
        match text.as_bytes().first() {
            Some(b'{' | b'[') if self.depth >= MAX_DEPTH => Err(de::Error::custom(format_args!(
                "nesting deeper than {MAX_DEPTH} levels"
            ))),
            Some(b'{') => {
                let mut de = serde_json::Deserializer::from_str(text);
                let members = (&mut de).deserialize_map(MembersVisitor {
                    depth: self.depth + 1,
                })?;
                de.end()?;
                Ok(JsonValue::Object(members))
            }
            Some(b'[') => {
                let mut de = serde_json::Deserializer::from_str(text);
                let items = (&mut de).deserialize_seq(ItemsVisitor {
                    depth: self.depth + 1,
                })?;
                de.end()?;
                Ok(JsonValue::Array(items))
            }
            Some(b'"') => serde_json::from_str(text).map(JsonValue::String),
            Some(b't' | b'f') => serde_json::from_str(text).map(JsonValue::Bool),
            Some(b'n') => serde_json::from_str::<()>(text).map(|()| JsonValue::Null),
            _ if is_number_literal(text) => Ok(JsonValue::Number(text.to_owned())),
            _ => Err(de::Error::custom(format_args!(
                "invalid number literal {text:?}"
            ))),
        }
    }
}

struct ItemsVisitor {
    depth: usize,
}

impl<'de> Visitor<'de> for ItemsVisitor {
    type Value = Vec<JsonValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON array")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(ValueSeed { depth: self.depth })? {
            items.push(item);
        }
        Ok(items)
    }
}

struct MembersVisitor {
    depth: usize,
}

impl<'de> Visitor<'de> for MembersVisitor {
    type Value = Vec<(String, JsonValue)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(ValueSeed { depth: self.depth })?;
            members.push((key, value));
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> JsonValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_number_literals_keep_source_text() {
        for literal in ["-0", "0", "-0.0", "-0e5", "-0E-0", "0e0", "1E+2", "-0.10", "1.50"] {
            assert_eq!(decode(literal).as_number(), Some(literal));
            let array = decode(&format!("[ {literal} ]"));
            assert_eq!(array, JsonValue::Array(vec![JsonValue::Number(literal.to_string())]));
        }
    }

    #[test]
    fn test_repeated_keys_are_kept_in_order() {
        let value = decode(r#"{"a":1,"b":2,"a":3}"#);
        let JsonValue::Object(members) = &value else {
            panic!("expected object: {value:?}");
        };
        let keys: Vec<_> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b", "a"]);
        assert_eq!(value.get("a").and_then(JsonValue::as_number), Some("1"));
    }

    #[test]
    fn test_scalars_and_escapes() {
        assert_eq!(decode("null"), JsonValue::Null);
        assert_eq!(decode(" true "), JsonValue::Bool(true));
        assert_eq!(decode("false"), JsonValue::Bool(false));
        assert_eq!(decode(r#""a\"bé""#), JsonValue::String("a\"bé".to_string()));
        assert_eq!(decode("{}"), JsonValue::Object(Vec::new()));
        assert_eq!(decode("[]"), JsonValue::Array(Vec::new()));
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(serde_json::from_str::<JsonValue>(&ok).is_ok());

        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert!(serde_json::from_str::<JsonValue>(&deep).is_err());
    }

    #[test]
    fn test_number_grammar() {
        for valid in ["0", "-0", "10", "1.0", "1e10", "1E-7", "-2.50e003", "18446744073709551616"] {
            assert!(is_number_literal(valid), "{valid}");
        }
        for invalid in ["", "-", "01", "1.", ".5", "+1", "1e", "1e+", "0x10", "1.5.2", "NaN"] {
            assert!(!is_number_literal(invalid), "{invalid}");
        }
    }

    #[test]
    fn test_from_serde_value() {
        let value = JsonValue::from(serde_json::json!({"z": [true, null], "a": "x"}));
        assert_eq!(
            value,
            JsonValue::Object(vec![
                (
                    "z".to_string(),
                    JsonValue::Array(vec![JsonValue::Bool(true), JsonValue::Null])
                ),
                ("a".to_string(), JsonValue::String("x".to_string())),
            ])
        );
    }
}

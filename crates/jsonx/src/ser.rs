//! JSONx writer: renders a decoded JSON value as typed XML elements.
//!
//! The writer walks a [`JsonValue`] recursively and emits quick-xml
//! events directly to the output. Every element carries a `type` attribute so
//! the JSON shape can be rebuilt without a schema.

use std::collections::HashMap;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{JsonxError, Result};
use crate::names;
use crate::utils::{self, JSONX_NAMESPACE, ROOT_ELEMENT, TYPE_ATTRIBUTE};
use crate::value::JsonValue;

/// The JSON kind recorded in an element's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonKind {
    /// Returns the kind of a decoded value.
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(_) => JsonKind::Object,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::Bool(_) => JsonKind::Boolean,
            JsonValue::Null => JsonKind::Null,
        }
    }

    /// Returns the `type` attribute value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Boolean => "boolean",
            JsonKind::Null => "null",
        }
    }
}

/// Transcode JSON bytes into a JSONx document.
///
/// # Examples
///
/// ```
/// use audit_jsonx::to_jsonx_vec;
///
/// let xml = to_jsonx_vec(br#"{"type":"magic"}"#).unwrap();
/// let xml = String::from_utf8(xml).unwrap();
/// assert!(xml.contains(r#"<type type="string">magic</type>"#));
/// ```
pub fn to_jsonx_vec(json: &[u8]) -> Result<Vec<u8>> {
    let value = crate::json::from_json_slice(json)?;
    let jsonx = value_to_jsonx_vec(&value)?;
    tracing::trace!(
        json_bytes = json.len(),
        jsonx_bytes = jsonx.len(),
        "transcoded JSON to JSONx"
    );
    Ok(jsonx)
}

/// Transcode a JSON string into a JSONx document string.
pub fn to_jsonx_string(json: &str) -> Result<String> {
    let value = crate::json::from_json_str(json)?;
    Ok(String::from_utf8(value_to_jsonx_vec(&value)?)?)
}

/// Render an already-decoded JSON value as a JSONx byte vector.
pub fn value_to_jsonx_vec(value: &JsonValue) -> Result<Vec<u8>> {
    JsonxEncoder::new(Vec::new()).encode(value)
}

/// Render an already-decoded JSON value as JSONx into a writer.
pub fn to_jsonx_writer<W>(value: &JsonValue, writer: W) -> Result<()>
where
    W: Write,
{
    JsonxEncoder::new(writer).encode(value)?;
    Ok(())
}

/// JSONx encoder writing quick-xml events to `W`.
///
/// An encoder renders exactly one document: [`JsonxEncoder::encode`]
/// consumes it and hands the flushed writer back.
pub struct JsonxEncoder<W: Write> {
    writer: Writer<W>,
    /// JSON Pointer of the value being written, used in error messages
    path: String,
}

impl<W: Write> JsonxEncoder<W> {
    /// Creates a new encoder.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Writer::new(writer),
            path: String::new(),
        }
    }

    /// Writes the XML declaration and the root element for `value`, then
    /// flushes and returns the underlying writer.
    pub fn encode(mut self, value: &JsonValue) -> Result<W> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_value(ROOT_ELEMENT, value, true)?;

        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    fn write_value(&mut self, name: &str, value: &JsonValue, root: bool) -> Result<()> {
        let mut start = BytesStart::new(name);
        if root {
            start.push_attribute(("xmlns", JSONX_NAMESPACE));
        }
        start.push_attribute((TYPE_ATTRIBUTE, JsonKind::of(value).as_str()));

        match value {
            JsonValue::Null => {
                self.writer.write_event(Event::Empty(start))?;
            }
            JsonValue::Bool(b) => {
                self.write_text_element(start, name, utils::bool_to_string(*b))?;
            }
            // Literals are already valid JSON numbers, which need no escaping.
            JsonValue::Number(literal) => {
                self.write_text_element(start, name, literal)?;
            }
            JsonValue::String(s) => {
                let escaped = utils::escape_text(s).map_err(|character| {
                    JsonxError::InvalidCharacter {
                        path: self.pointer(),
                        character,
                    }
                })?;
                self.write_text_element(start, name, &escaped)?;
            }
            JsonValue::Array(items) if items.is_empty() => {
                self.writer.write_event(Event::Empty(start))?;
            }
            JsonValue::Array(items) => {
                self.writer.write_event(Event::Start(start))?;
                for (index, item) in items.iter().enumerate() {
                    let len = self.path.len();
                    utils::push_pointer_token(&mut self.path, &index.to_string());
                    self.write_value(name, item, false)?;
                    self.path.truncate(len);
                }
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            JsonValue::Object(members) if members.is_empty() => {
                self.writer.write_event(Event::Empty(start))?;
            }
            JsonValue::Object(members) => {
                self.writer.write_event(Event::Start(start))?;
                self.write_members(members)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }

        Ok(())
    }

    /// Writes one child element per member. A repeated key is written again
    /// under the same name; only distinct keys sharing a name are rejected.
    fn write_members(&mut self, members: &[(String, JsonValue)]) -> Result<()> {
        // element name -> the key that produced it
        let mut seen: HashMap<String, &str> = HashMap::with_capacity(members.len());

        for (key, child) in members {
            let name = names::escape_name(key);
            if let Some(first) = seen.get(name.as_ref()) {
                if *first != key.as_str() {
                    return Err(JsonxError::NameCollision {
                        path: self.pointer(),
                        name: name.into_owned(),
                        first: first.to_string(),
                        second: key.clone(),
                    });
                }
            } else {
                seen.insert(name.to_string(), key.as_str());
            }

            let len = self.path.len();
            utils::push_pointer_token(&mut self.path, key);
            self.write_value(&name, child, false)?;
            self.path.truncate(len);
        }

        Ok(())
    }

    /// Writes `<name ...>text</name>` where `text` is already escaped.
    fn write_text_element(
        &mut self,
        start: BytesStart<'_>,
        name: &str,
        text: &str,
    ) -> Result<()> {
        self.writer.write_event(Event::Start(start))?;
        if !text.is_empty() {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(text)))?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn pointer(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path.clone()
        }
    }
}

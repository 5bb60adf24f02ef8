//! Test helper that reads a JSONx document back into a JSON value.
//!
//! Only used to check that the structure written by the transcoder can be
//! recovered; it assumes the writer's own output and panics on anything else.

#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

/// Parses a JSONx document and returns the root element name and its value.
pub fn parse_jsonx(xml: &str) -> (String, Value) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().expect("read root") {
            Event::Decl(_) => continue,
            Event::Start(e) => {
                let name = element_name(&e);
                return (name, read_value(&mut reader, &type_of(&e), false));
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                return (name, read_value(&mut reader, &type_of(&e), true));
            }
            other => panic!("unexpected event before root: {other:?}"),
        }
    }
}

/// Returns the value of the `xmlns` attribute on the root element.
pub fn root_namespace(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().expect("read root") {
            Event::Decl(_) => continue,
            Event::Start(e) | Event::Empty(e) => return attribute(&e, b"xmlns"),
            _ => return None,
        }
    }
}

/// Reverses the element name escaping applied to object keys.
pub fn unescape_name(name: &str) -> String {
    if name == "_x_" {
        return String::new();
    }

    let mut key = String::new();
    let mut rest = name;
    while let Some(pos) = rest.find("_x") {
        key.push_str(&rest[..pos]);
        let tail = &rest[pos + 2..];
        match decode_escape(tail) {
            Some((c, consumed)) => {
                key.push(c);
                rest = &tail[consumed..];
            }
            None => {
                key.push_str("_x");
                rest = tail;
            }
        }
    }
    key.push_str(rest);
    key
}

fn decode_escape(tail: &str) -> Option<(char, usize)> {
    for digits in [8, 4] {
        let Some(hex) = tail.get(..digits) else {
            continue;
        };
        if tail.get(digits..digits + 1) == Some("_") && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let code = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(code).map(|c| (c, digits + 1));
        }
    }
    None
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8(e.name().as_ref().to_vec()).expect("utf-8 name")
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .map(|attr| attr.expect("attribute"))
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8(attr.value.to_vec()).expect("utf-8 attribute"))
}

fn type_of(e: &BytesStart<'_>) -> String {
    attribute(e, b"type").expect("every JSONx element has a type")
}

fn read_value(reader: &mut Reader<&[u8]>, kind: &str, empty: bool) -> Value {
    match kind {
        "null" => {
            if !empty {
                assert!(read_text(reader).is_empty());
            }
            Value::Null
        }
        "object" => {
            let mut map = Map::new();
            if !empty {
                while let Some((name, value)) = read_child(reader) {
                    map.insert(unescape_name(&name), value);
                }
            }
            Value::Object(map)
        }
        "array" => {
            let mut items = Vec::new();
            if !empty {
                while let Some((_, value)) = read_child(reader) {
                    items.push(value);
                }
            }
            Value::Array(items)
        }
        "string" => Value::String(if empty { String::new() } else { read_text(reader) }),
        "number" => serde_json::from_str(&read_text(reader)).expect("number literal"),
        "boolean" => match read_text(reader).as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => panic!("bad boolean {other:?}"),
        },
        other => panic!("unknown type {other:?}"),
    }
}

/// Reads the next child element, or `None` once the parent's end tag is hit.
fn read_child(reader: &mut Reader<&[u8]>) -> Option<(String, Value)> {
    match reader.read_event().expect("read child") {
        Event::Start(e) => {
            let name = element_name(&e);
            Some((name, read_value(reader, &type_of(&e), false)))
        }
        Event::Empty(e) => {
            let name = element_name(&e);
            Some((name, read_value(reader, &type_of(&e), true)))
        }
        Event::End(_) => None,
        other => panic!("unexpected event in container: {other:?}"),
    }
}

/// Reads text content up to and including the element's end tag.
fn read_text(reader: &mut Reader<&[u8]>) -> String {
    let mut text = String::new();
    loop {
        match reader.read_event().expect("read text") {
            Event::Text(t) => text.push_str(std::str::from_utf8(&t).expect("utf-8 text")),
            Event::GeneralRef(r) => {
                let name = std::str::from_utf8(&r).expect("utf-8 reference");
                text.push(resolve_reference(name));
            }
            Event::End(_) => return text,
            other => panic!("unexpected event in text: {other:?}"),
        }
    }
}

fn resolve_reference(name: &str) -> char {
    match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse()
            } else {
                panic!("unknown entity {name:?}")
            };
            char::from_u32(code.expect("character reference")).expect("valid character")
        }
    }
}

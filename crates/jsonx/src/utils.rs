//! Constants and character-level helpers shared by the JSONx writer.

use std::borrow::Cow;

/// Namespace declared on the root element of every JSONx document.
pub const JSONX_NAMESPACE: &str = "urn:jsonx:typed-elements:1.0";

/// Name of the root element wrapping the top-level JSON value.
pub const ROOT_ELEMENT: &str = "json";

/// Attribute carrying the JSON kind of an element.
pub const TYPE_ATTRIBUTE: &str = "type";

/// Checks if a character matches the XML 1.0 `Char` production.
///
/// Rust strings never contain surrogates, so only the C0 controls and the
/// two BMP non-characters need to be excluded.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escapes a string for use as XML text content.
///
/// The five predefined entities are used for `& < > " '`, and carriage
/// returns become `&#xD;` so they survive end-of-line normalization in the
/// reader. Returns the first offending character when the string holds one
/// that XML cannot represent at all.
pub fn escape_text(text: &str) -> Result<Cow<'_, str>, char> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'' | '\r');

    if let Some(bad) = text.chars().find(|c| !is_xml_char(*c)) {
        return Err(bad);
    }
    if !text.chars().any(needs_escape) {
        return Ok(Cow::Borrowed(text));
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#xD;"),
            c => escaped.push(c),
        }
    }
    Ok(Cow::Owned(escaped))
}

/// Converts a boolean to its JSON/XML text form.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Appends one JSON Pointer reference token to `path`.
pub fn push_pointer_token(path: &mut String, token: &str) {
    path.push('/');
    for c in token.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            c => path.push(c),
        }
    }
}

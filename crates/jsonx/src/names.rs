//! Escaping of JSON object keys into XML element names.
//!
//! JSON keys are arbitrary strings while XML element names follow the
//! `Name` production of XML 1.0 (fifth edition). Keys are mapped to names
//! with a fixed, injective scheme:
//!
//! - every code point that is not allowed at its position is written as
//!   `_xHHHH_` (uppercase hex; `_xHHHHHHHH_` above the BMP)
//! - a `_` immediately followed by `x` is written as `_x005F_`, so a literal
//!   `_x` in a key can never be mistaken for an escape
//! - `:` is always escaped since keys never carry a namespace prefix
//! - the empty key becomes `_x_`
//!
//! | Key | Element name |
//! |-----|--------------|
//! | `request` | `request` |
//! | `client token` | `client_x0020_token` |
//! | `2fa` | `_x0032_fa` |
//! | `a:b` | `a_x003A_b` |
//! | `_x` | `_x005F_x` |
//! | `` | `_x_` |

use std::borrow::Cow;
use std::fmt::Write;

/// Element name used for the empty key.
pub const EMPTY_KEY_NAME: &str = "_x_";

/// Checks the `NameStartChar` production, excluding `:`.
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Checks the `NameChar` production, excluding `:`.
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Returns true if `name` is a valid, unprefixed XML element name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Escapes a JSON object key into a valid XML element name.
///
/// Keys that are already valid names and contain no `_x` sequence are
/// returned borrowed.
pub fn escape_name(key: &str) -> Cow<'_, str> {
    if key.is_empty() {
        return Cow::Borrowed(EMPTY_KEY_NAME);
    }
    if is_valid_name(key) && !key.contains("_x") {
        return Cow::Borrowed(key);
    }

    let mut name = String::with_capacity(key.len() + 8);
    let mut chars = key.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        let allowed = if first {
            is_name_start_char(c)
        } else {
            is_name_char(c)
        };
        if c == '_' && chars.peek() == Some(&'x') {
            push_escape(&mut name, c);
        } else if allowed {
            name.push(c);
        } else {
            push_escape(&mut name, c);
        }
        first = false;
    }
    Cow::Owned(name)
}

fn push_escape(name: &mut String, c: char) {
    let code = u32::from(c);
    // Writing into a String cannot fail.
    let _ = if code > 0xFFFF {
        write!(name, "_x{:08X}_", code)
    } else {
        write!(name, "_x{:04X}_", code)
    };
}

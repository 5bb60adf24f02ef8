//! # Audit JSONx
//!
//! Lossless, type-preserving transcoding of JSON documents into JSONx: a
//! self-describing XML rendering in which every element carries the JSON kind
//! of the value it holds.
//!
//! ## JSON → JSONx mapping
//!
//! | JSON | JSONx |
//! |------|-------|
//! | `{"a": 1}` | `<json type="object"><a type="number">1</a></json>` |
//! | `{"a": [1, 2]}` | `<a type="array"><a type="number">1</a><a type="number">2</a></a>` |
//! | `{"s": "x & y"}` | `<s type="string">x &amp; y</s>` |
//! | `{"n": 1.50}` | `<n type="number">1.50</n>` |
//! | `{"b": true}` | `<b type="boolean">true</b>` |
//! | `{"z": null}` | `<z type="null"/>` |
//!
//! The root element is always `json` and declares the
//! [`JSONX_NAMESPACE`] default namespace. Object keys that are not valid XML
//! names are escaped as described in [`names`]. Input is decoded into
//! [`JsonValue`], so number literals are written exactly as they appear in
//! the source and repeated object keys each get their own element.
//!
//! ## Example
//!
//! ```
//! use audit_jsonx::to_jsonx_string;
//!
//! let xml = to_jsonx_string(r#"{"type":"magic"}"#).unwrap();
//! assert_eq!(
//!     xml,
//!     concat!(
//!         r#"<?xml version="1.0" encoding="UTF-8"?>"#,
//!         r#"<json xmlns="urn:jsonx:typed-elements:1.0" type="object">"#,
//!         r#"<type type="string">magic</type>"#,
//!         r#"</json>"#,
//!     )
//! );
//! ```

pub mod error;
pub mod json;
pub mod names;
pub mod ser;
mod utils;
pub mod value;

pub use error::{JsonxError, Result};
pub use ser::{
    JsonKind, JsonxEncoder, to_jsonx_string, to_jsonx_vec, to_jsonx_writer, value_to_jsonx_vec,
};
pub use utils::{JSONX_NAMESPACE, ROOT_ELEMENT, TYPE_ATTRIBUTE};
pub use value::JsonValue;

//! Error types for JSON to JSONx transcoding.

use thiserror::Error;

/// Errors raised while decoding JSON input or writing JSONx output.
#[derive(Error, Debug)]
pub enum JsonxError {
    /// The input was not well-formed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying writer failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A string value holds a character XML cannot represent.
    #[error("character {character:?} at {path} is not allowed in XML")]
    InvalidCharacter { path: String, character: char },

    /// Two distinct object keys escaped to the same element name.
    #[error("keys {first:?} and {second:?} at {path} both escape to element name {name:?}")]
    NameCollision {
        path: String,
        name: String,
        first: String,
        second: String,
    },

    /// The rendered document was not valid UTF-8.
    #[error("invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl JsonxError {
    /// Returns true when the error came from decoding the JSON input rather
    /// than from rendering it.
    pub fn is_decode(&self) -> bool {
        matches!(self, JsonxError::Json(_))
    }
}

/// Result type alias for transcoding operations.
pub type Result<T> = std::result::Result<T, JsonxError>;

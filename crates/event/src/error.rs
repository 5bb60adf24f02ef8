//! Error types for event construction.

use thiserror::Error;

/// Errors raised while building or parsing audit events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event identifier was empty.
    #[error("missing ID")]
    EmptyId,

    /// No subtype was supplied to the builder.
    #[error("missing subtype")]
    MissingSubtype,

    /// A subtype string did not name a known audit subtype.
    #[error("invalid subtype: {0:?}")]
    InvalidSubtype(String),

    /// A format string did not name a known audit format.
    #[error("invalid format: {0:?}")]
    InvalidFormat(String),

    /// The event data could not be rendered as JSON.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for event operations.
pub type Result<T> = std::result::Result<T, EventError>;

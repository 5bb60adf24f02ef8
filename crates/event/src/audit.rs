//! The audit payload carried by pipeline events.
//!
//! An [`AuditEvent`] is built once by the producer through
//! [`AuditEvent::builder`] and then handed to [`crate::Event::from_audit`].
//! Formatting stages only ever read it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{EventError, Result};

/// Version stamped on every audit event produced by this crate.
pub const AUDIT_VERSION: &str = "v0.1";

/// Whether the audit entry describes a request or a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSubtype {
    Request,
    Response,
}

impl AuditSubtype {
    /// Returns the wire name of the subtype.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSubtype::Request => "request",
            AuditSubtype::Response => "response",
        }
    }
}

impl fmt::Display for AuditSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditSubtype {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "request" => Ok(AuditSubtype::Request),
            "response" => Ok(AuditSubtype::Response),
            other => Err(EventError::InvalidSubtype(other.to_string())),
        }
    }
}

/// Rendered formats an audit event can be written in.
///
/// [`AuditFormat::as_str`] doubles as the key under which a formatter stores
/// its rendering in the event's format cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditFormat {
    #[default]
    Json,
    Jsonx,
}

impl AuditFormat {
    /// Returns the format name, which is also its format-cache key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditFormat::Json => "json",
            AuditFormat::Jsonx => "jsonx",
        }
    }
}

impl fmt::Display for AuditFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditFormat {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(AuditFormat::Json),
            "jsonx" => Ok(AuditFormat::Jsonx),
            other => Err(EventError::InvalidFormat(other.to_string())),
        }
    }
}

/// A single audit record: identity, classification and the raw log input.
///
/// `data` is kept as JSON source text, so number literals and repeated keys
/// reach the formatters exactly as the producer wrote them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub version: String,
    pub subtype: AuditSubtype,
    pub timestamp: DateTime<Utc>,
    pub data: Option<Box<RawValue>>,
    #[serde(rename = "format")]
    pub required_format: AuditFormat,
}

impl AuditEvent {
    /// Starts building a new audit event.
    pub fn builder() -> AuditEventBuilder {
        AuditEventBuilder::default()
    }

    /// Attaches the raw log input, consuming and returning `self`.
    pub fn with_data(mut self, data: Box<RawValue>) -> Self {
        self.data = Some(data);
        self
    }
}

/// Builder for [`AuditEvent`].
///
/// Unset options fall back to a random UUID v4 identifier, the current UTC
/// time and the `json` format. The subtype has no default.
#[derive(Debug, Default, Clone)]
pub struct AuditEventBuilder {
    id: Option<String>,
    subtype: Option<AuditSubtype>,
    format: Option<AuditFormat>,
    now: Option<DateTime<Utc>>,
    data: Option<serde_json::Value>,
    raw_data: Option<Box<RawValue>>,
}

impl AuditEventBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn subtype(mut self, subtype: AuditSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    pub fn format(mut self, format: AuditFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the data from JSON source text. Takes precedence over
    /// [`AuditEventBuilder::data`].
    pub fn raw_data(mut self, data: Box<RawValue>) -> Self {
        self.raw_data = Some(data);
        self
    }

    /// Validates the options and builds the event.
    pub fn build(self) -> Result<AuditEvent> {
        let id = match self.id {
            Some(id) if id.trim().is_empty() => return Err(EventError::EmptyId),
            Some(id) => id,
            None => uuid::Uuid::new_v4().to_string(),
        };
        let subtype = self.subtype.ok_or(EventError::MissingSubtype)?;
        let data = match (self.raw_data, self.data) {
            (Some(raw), _) => Some(raw),
            (None, Some(value)) => Some(
                serde_json::value::to_raw_value(&value)
                    .map_err(|e| EventError::InvalidData(e.to_string()))?,
            ),
            (None, None) => None,
        };

        Ok(AuditEvent {
            id,
            version: AUDIT_VERSION.to_string(),
            subtype,
            timestamp: self.now.unwrap_or_else(Utc::now),
            data,
            required_format: self.format.unwrap_or_default(),
        })
    }
}

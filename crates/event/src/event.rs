//! The event carrier passed between pipeline stages.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::audit::AuditEvent;

/// Classification of an event flowing through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Audit,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Audit => "audit",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event moving through the pipeline.
///
/// Identity, creation time, type and payload are fixed at construction. The
/// only state that changes afterwards is the format cache, which maps a format
/// name to the bytes a stage rendered for it. The carrier itself does not
/// police who writes which key; stages only ever write their own.
#[derive(Debug, Clone)]
pub struct Event {
    id: String,
    created_at: DateTime<Utc>,
    event_type: EventType,
    payload: AuditEvent,
    formatted: HashMap<String, Vec<u8>>,
}

impl Event {
    /// Creates an event with an empty format cache.
    pub fn new(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        event_type: EventType,
        payload: AuditEvent,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            event_type,
            payload,
            formatted: HashMap::new(),
        }
    }

    /// Wraps an audit payload, taking the event's identity and creation time
    /// from it.
    pub fn from_audit(payload: AuditEvent) -> Self {
        Self::new(
            payload.id.clone(),
            payload.timestamp,
            EventType::Audit,
            payload,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn payload(&self) -> &AuditEvent {
        &self.payload
    }

    /// Stores `bytes` as the rendering for `format`, replacing any previous
    /// rendering under the same name.
    pub fn formatted_as(&mut self, format: impl Into<String>, bytes: Vec<u8>) {
        self.formatted.insert(format.into(), bytes);
    }

    /// Returns the rendering stored for `format`, if any.
    pub fn format(&self, format: &str) -> Option<&[u8]> {
        self.formatted.get(format).map(Vec::as_slice)
    }

    /// Iterates over all stored renderings in no particular order.
    pub fn formats(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.formatted
            .iter()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}

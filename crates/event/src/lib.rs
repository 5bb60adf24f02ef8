//! # Audit Event
//!
//! The record that flows through the audit formatting pipeline.
//!
//! An [`Event`] carries exactly one typed payload (an [`AuditEvent`]) that is
//! set once by the producer and never mutated afterwards, plus a growing cache
//! of rendered formats. Each formatting stage reads the formats it depends on
//! and publishes its own rendering under its own key:
//!
//! | Key | Written by | Content |
//! |-----|------------|---------|
//! | `json` | JSON formatter | canonical JSON of the audit payload |
//! | `jsonx` | JSONx formatter | self-describing XML rendering of `json` |
//!
//! ## Example
//!
//! ```rust
//! use audit_event::{AuditEvent, AuditFormat, AuditSubtype, Event};
//!
//! let audit = AuditEvent::builder()
//!     .id("123")
//!     .subtype(AuditSubtype::Request)
//!     .build()
//!     .unwrap();
//!
//! let mut event = Event::from_audit(audit);
//! event.formatted_as(AuditFormat::Json.as_str(), br#"{"type":"magic"}"#.to_vec());
//! assert!(event.format("json").is_some());
//! ```

pub mod audit;
pub mod error;
pub mod event;

pub use audit::{AUDIT_VERSION, AuditEvent, AuditEventBuilder, AuditFormat, AuditSubtype};
pub use error::{EventError, Result};
pub use event::{Event, EventType};

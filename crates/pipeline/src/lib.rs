//! # Audit Pipeline
//!
//! Pipeline stages ("nodes") that turn audit events into rendered formats.
//!
//! Every node implements [`Node`]: a [`NodeType`] tag used to validate how a
//! pipeline is composed, a `reopen` lifecycle hook, and `process`, which
//! takes one [`audit_event::Event`] and either returns it or fails without
//! touching it.
//!
//! ## Formatters
//!
//! | Node | Reads | Writes |
//! |------|-------|--------|
//! | [`JsonFormatter`] | audit payload | `json` |
//! | [`JsonxFormatter`] | `json` | `jsonx` |
//!
//! The JSONx formatter depends on the JSON formatter having run first. That
//! ordering is the pipeline's responsibility; the formatter only checks that
//! its input is present.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use audit_event::{AuditEvent, AuditSubtype, Event};
//! use audit_pipeline::{JsonFormatter, JsonxFormatter, Pipeline};
//! use tokio_util::sync::CancellationToken;
//!
//! let pipeline = Pipeline::builder()
//!     .node("json", Arc::new(JsonFormatter::new()))
//!     .node("jsonx", Arc::new(JsonxFormatter::new()))
//!     .build()
//!     .unwrap();
//!
//! let audit = AuditEvent::builder()
//!     .subtype(AuditSubtype::Request)
//!     .data(serde_json::json!({"type": "magic"}))
//!     .build()
//!     .unwrap();
//! let mut event = Event::from_audit(audit);
//!
//! let event = pipeline.process(&CancellationToken::new(), &mut event).unwrap();
//! assert!(event.format("jsonx").is_some());
//! ```

pub mod error;
pub mod formatter;
pub mod node;
pub mod pipeline;

pub use error::{ErrorKind, NodeError, PipelineError};
pub use formatter::{JsonFormatter, JsonxFormatter};
pub use node::{Node, NodeType};
pub use pipeline::{Pipeline, PipelineBuilder};

//! JSONx rendering of the pre-formatted JSON.

use audit_event::{AuditFormat, Event};
use tokio_util::sync::CancellationToken;

use crate::error::NodeError;
use crate::node::{Node, NodeType};

const OP: &str = "JsonxFormatter::process";

/// Formatter that transcodes the event's `json` rendering into JSONx and
/// stores it under the `jsonx` format key.
///
/// The formatter is stateless: one instance can be shared by any number of
/// threads processing distinct events.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonxFormatter;

impl JsonxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Node for JsonxFormatter {
    /// Reads the `json` entry written by an earlier [`crate::JsonFormatter`],
    /// transcodes it and writes the result under `jsonx`.
    ///
    /// Fails with [`crate::ErrorKind::InvalidParameter`] when the `json` entry
    /// is missing or empty, and with [`crate::ErrorKind::Encoding`] when it
    /// cannot be decoded or rendered. The event is left untouched on failure.
    fn process<'a>(
        &self,
        ctx: &CancellationToken,
        event: &'a mut Event,
    ) -> Result<&'a mut Event, NodeError> {
        if ctx.is_cancelled() {
            return Err(NodeError::cancelled(OP));
        }

        let json = match event.format(AuditFormat::Json.as_str()) {
            Some(json) if !json.is_empty() => json,
            _ => {
                tracing::warn!(event_id = event.id(), "pre-formatted JSON missing for JSONx");
                return Err(NodeError::invalid_parameter(
                    OP,
                    "pre-formatted JSON required but not found",
                ));
            }
        };

        let jsonx = audit_jsonx::to_jsonx_vec(json).map_err(|err| {
            tracing::warn!(event_id = event.id(), error = %err, "JSONx formatting failed");
            let reason = if err.is_decode() {
                "unable to decode pre-formatted JSON"
            } else {
                "unable to encode JSONx using JSON data"
            };
            NodeError::encoding(OP, reason, err)
        })?;

        tracing::debug!(event_id = event.id(), bytes = jsonx.len(), "formatted event as JSONx");
        event.formatted_as(AuditFormat::Jsonx.as_str(), jsonx);
        Ok(event)
    }

    fn name(&self) -> &str {
        "JsonxFormatter"
    }

    fn node_type(&self) -> NodeType {
        NodeType::Formatter
    }

    fn reopen(&self) -> Result<(), NodeError> {
        tracing::trace!("JSONx formatter holds no resources to reopen");
        Ok(())
    }
}

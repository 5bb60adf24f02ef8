//! Canonical JSON rendering of the audit payload.

use audit_event::{AuditFormat, Event};
use tokio_util::sync::CancellationToken;

use crate::error::NodeError;
use crate::node::{Node, NodeType};

const OP: &str = "JsonFormatter::process";

/// Formatter that serializes the event's audit payload as JSON and stores it
/// under the `json` format key.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Node for JsonFormatter {
    fn process<'a>(
        &self,
        ctx: &CancellationToken,
        event: &'a mut Event,
    ) -> Result<&'a mut Event, NodeError> {
        if ctx.is_cancelled() {
            return Err(NodeError::cancelled(OP));
        }

        let json = serde_json::to_vec(event.payload())
            .map_err(|err| NodeError::encoding(OP, "unable to encode audit event as JSON", err))?;

        tracing::debug!(event_id = event.id(), bytes = json.len(), "formatted event as JSON");
        event.formatted_as(AuditFormat::Json.as_str(), json);
        Ok(event)
    }

    fn name(&self) -> &str {
        "JsonFormatter"
    }

    fn node_type(&self) -> NodeType {
        NodeType::Formatter
    }

    fn reopen(&self) -> Result<(), NodeError> {
        Ok(())
    }
}

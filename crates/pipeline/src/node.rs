//! The contract shared by every pipeline stage.

use std::fmt;

use audit_event::Event;
use tokio_util::sync::CancellationToken;

use crate::error::NodeError;

/// Classification of a pipeline node.
///
/// Only used by [`crate::Pipeline`] to validate composition; nodes never
/// change behaviour based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Source,
    Filter,
    Formatter,
    Sink,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Source => "source",
            NodeType::Filter => "filter",
            NodeType::Formatter => "formatter",
            NodeType::Sink => "sink",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline stage.
///
/// `process` either returns the event it was given, possibly with a new
/// format entry, or fails and leaves the event exactly as it was. Nodes are
/// shared across threads and called concurrently on distinct events.
pub trait Node: Send + Sync {
    /// Processes one event.
    fn process<'a>(
        &self,
        ctx: &CancellationToken,
        event: &'a mut Event,
    ) -> Result<&'a mut Event, NodeError>;

    /// Returns a short, human readable name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Returns the node's classification.
    fn node_type(&self) -> NodeType;

    /// Re-acquires any resources the node holds, such as files or
    /// connections.
    fn reopen(&self) -> Result<(), NodeError>;
}

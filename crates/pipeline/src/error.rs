//! Error types for pipeline nodes and pipelines.
//!
//! A [`NodeError`] always names the operation that failed and a categorical
//! [`ErrorKind`], and renders as `"{op}: {reason}: {kind}"` so messages stay
//! stable for log correlation. The underlying cause, when there is one, is
//! kept as the error's `source`.

use std::fmt;

use thiserror::Error;

use crate::node::NodeType;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Category of a node failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A precondition on the node's input was violated.
    InvalidParameter,
    /// The input could not be decoded or the output could not be rendered.
    Encoding,
    /// The caller cancelled before the node started.
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "invalid parameter",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single node while processing one event.
#[derive(Error, Debug)]
#[error("{op}: {reason}: {kind}")]
pub struct NodeError {
    op: &'static str,
    kind: ErrorKind,
    reason: String,
    #[source]
    source: Option<BoxError>,
}

impl NodeError {
    pub fn new(op: &'static str, kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            op,
            kind,
            reason: reason.into(),
            source: None,
        }
    }

    pub fn invalid_parameter(op: &'static str, reason: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::InvalidParameter, reason)
    }

    pub fn encoding<E>(op: &'static str, reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(op, ErrorKind::Encoding, reason).with_source(source)
    }

    pub fn cancelled(op: &'static str) -> Self {
        Self::new(op, ErrorKind::Cancelled, "context cancelled before processing")
    }

    /// Attaches the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors raised while building or running a [`crate::Pipeline`].
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The pipeline has no nodes.
    #[error("pipeline has no nodes")]
    Empty,

    /// Two nodes were registered under the same identifier.
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// A node type appears where the pipeline cannot accept it.
    #[error("{node_type} node {node} cannot appear at position {position}: {reason}")]
    InvalidOrder {
        node: String,
        node_type: NodeType,
        position: usize,
        reason: &'static str,
    },

    /// A node failed while processing or reopening.
    #[error("node {node} failed: {source}")]
    Node {
        node: String,
        #[source]
        source: NodeError,
    },
}

impl PipelineError {
    /// Returns the node failure, if this error wraps one.
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            PipelineError::Node { source, .. } => Some(source),
            _ => None,
        }
    }
}

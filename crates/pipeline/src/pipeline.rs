//! Ordered composition of nodes.
//!
//! A [`Pipeline`] runs its nodes in registration order over one event at a
//! time. Composition is validated once, at build time, using only each
//! node's [`NodeType`]:
//!
//! - a pipeline needs at least one node
//! - a source may only be the first node
//! - once a sink appears, every following node must also be a sink
//!
//! Whether one formatter's input is produced by an earlier formatter is not
//! checked here; nodes fail at run time when their input is missing.

use std::collections::HashSet;
use std::sync::Arc;

use audit_event::Event;
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;
use crate::node::{Node, NodeType};

/// A validated, immutable sequence of nodes.
#[derive(Clone)]
pub struct Pipeline {
    nodes: Vec<(String, Arc<dyn Node>)>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.nodes
                    .iter()
                    .map(|(id, node)| {
                        format!("{}: {} ({})", id, node.name(), node.node_type())
                    }),
            )
            .finish()
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Returns the node ids in execution order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(id, _)| id.as_str())
    }

    /// Runs every node over `event`, stopping at the first failure.
    ///
    /// Entries written by nodes that ran before the failing one are kept on
    /// the event; the failing node itself writes nothing.
    pub fn process<'a>(
        &self,
        ctx: &CancellationToken,
        event: &'a mut Event,
    ) -> Result<&'a mut Event, PipelineError> {
        let mut event = event;
        for (id, node) in &self.nodes {
            event = node
                .process(ctx, event)
                .map_err(|source| PipelineError::Node {
                    node: id.clone(),
                    source,
                })?;
        }
        Ok(event)
    }

    /// Reopens every node in order.
    pub fn reopen(&self) -> Result<(), PipelineError> {
        for (id, node) in &self.nodes {
            node.reopen().map_err(|source| PipelineError::Node {
                node: id.clone(),
                source,
            })?;
            tracing::trace!(node = %id, "node reopened");
        }
        Ok(())
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    nodes: Vec<(String, Arc<dyn Node>)>,
}

impl PipelineBuilder {
    /// Appends a node under `id`.
    pub fn node(mut self, id: impl Into<String>, node: Arc<dyn Node>) -> Self {
        self.nodes.push((id.into(), node));
        self
    }

    /// Validates the composition and builds the pipeline.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        if self.nodes.is_empty() {
            return Err(PipelineError::Empty);
        }

        let mut ids = HashSet::with_capacity(self.nodes.len());
        let mut sink_seen = false;
        for (position, (id, node)) in self.nodes.iter().enumerate() {
            if !ids.insert(id.as_str()) {
                return Err(PipelineError::DuplicateNode(id.clone()));
            }

            let node_type = node.node_type();
            let reason = match node_type {
                NodeType::Source if position > 0 => Some("a source must be the first node"),
                NodeType::Sink => {
                    sink_seen = true;
                    None
                }
                _ if sink_seen => Some("only sinks may follow a sink"),
                _ => None,
            };
            if let Some(reason) = reason {
                tracing::debug!(
                    node = %id,
                    name = node.name(),
                    %node_type,
                    position,
                    reason,
                    "invalid pipeline order"
                );
                return Err(PipelineError::InvalidOrder {
                    node: id.clone(),
                    node_type,
                    position,
                    reason,
                });
            }
        }

        tracing::debug!(nodes = self.nodes.len(), "pipeline built");
        Ok(Pipeline { nodes: self.nodes })
    }
}

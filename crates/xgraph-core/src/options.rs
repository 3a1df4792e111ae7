//! # Graph Options
//!
//! Construction-time configuration for [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Hook producing a human-readable label for a node.
///
/// Labels are used for diagnostic rendering only and never affect graph
/// semantics. Implemented for any `Fn(&N) -> String`.
pub trait NodeLabeler<N>: Send + Sync {
    /// Label `node` for display.
    fn label(&self, node: &N) -> String;
}

impl<N, F> NodeLabeler<N> for F
where
    F: Fn(&N) -> String + Send + Sync,
{
    fn label(&self, node: &N) -> String {
        self(node)
    }
}

/// How `from`/`to` sequences are produced once the facade lock is released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyMode {
    /// A background producer streams neighbors through a channel.
    #[default]
    Streamed,
    /// Neighbors are collected into memory before iteration starts.
    Snapshot,
}

/// Options recognized by [`Graph::new`](crate::Graph::new).
pub struct GraphOptions<N> {
    /// Optional diagnostic labeler.
    pub node_labeler: Option<Arc<dyn NodeLabeler<N>>>,
    /// Adjacency production strategy.
    pub adjacency: AdjacencyMode,
}

impl<N> GraphOptions<N> {
    /// Default options: no labeler, streamed adjacency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagnostic node labeler.
    #[must_use]
    pub fn with_labeler(mut self, labeler: impl NodeLabeler<N> + 'static) -> Self {
        self.node_labeler = Some(Arc::new(labeler));
        self
    }

    /// Set the adjacency production strategy.
    #[must_use]
    pub fn with_adjacency(mut self, adjacency: AdjacencyMode) -> Self {
        self.adjacency = adjacency;
        self
    }
}

impl<N> Default for GraphOptions<N> {
    fn default() -> Self {
        Self {
            node_labeler: None,
            adjacency: AdjacencyMode::default(),
        }
    }
}

impl<N> Clone for GraphOptions<N> {
    fn clone(&self) -> Self {
        Self {
            node_labeler: self.node_labeler.clone(),
            adjacency: self.adjacency,
        }
    }
}

impl<N> fmt::Debug for GraphOptions<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphOptions")
            .field("node_labeler", &self.node_labeler.is_some())
            .field("adjacency", &self.adjacency)
            .finish()
    }
}

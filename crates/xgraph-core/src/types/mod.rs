//! # Core Type Definitions
//!
//! This module contains the vocabulary shared by every other module:
//! - Internal node identifiers (`NodeId`)
//! - The caller-facing node and edge-kind abstractions (`Node`, `EdgeKind`)
//! - Edge payloads and read-only edge views (`Context`, `Edge`)
//! - Direction markers (`Side`, `Direction`)
//! - Error types (`GraphError`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Internal identifier for a registered node.
///
/// Allocated by the registry in registration order and shared by every
/// kind-graph the node participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Get the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// =============================================================================
// NODE & EDGE KIND
// =============================================================================

/// A caller-owned entity that can be registered in a [`Graph`](crate::Graph).
///
/// Nodes are registered as `Arc<N>`. Two registrations collide when they
/// report the same key; they are the *same* node only when they are also the
/// same allocation.
pub trait Node: fmt::Debug + Send + Sync + 'static {
    /// The identity key of the node.
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Return the stable identity key of this node.
    fn node_key(&self) -> Self::Key;
}

/// Tag partitioning the edge space.
///
/// Blanket-implemented for every small comparable value: integers, strings,
/// and plain enums all qualify.
pub trait EdgeKind: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> EdgeKind for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Free-form payload attached to an edge when it is associated.
pub type Context = serde_json::Value;

// =============================================================================
// DIRECTION MARKERS
// =============================================================================

/// Which endpoint of an association an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("From"),
            Self::To => f.write_str("To"),
        }
    }
}

/// Direction of an adjacency query relative to its anchor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edges leaving the anchor (`Graph::from`).
    Outgoing,
    /// Edges entering the anchor (`Graph::to`).
    Incoming,
}

impl From<Direction> for petgraph::Direction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Outgoing => Self::Outgoing,
            Direction::Incoming => Self::Incoming,
        }
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// Read-only view of a directed, kinded association.
///
/// An `Edge` is a snapshot: re-associating the same pair later replaces the
/// stored context but does not mutate views already handed out.
#[derive(Debug)]
pub struct Edge<N: Node, K> {
    from: Arc<N>,
    to: Arc<N>,
    kind: K,
    context: Arc<[Context]>,
}

impl<N: Node, K> Edge<N, K> {
    pub(crate) fn new(from: Arc<N>, to: Arc<N>, kind: K, context: Arc<[Context]>) -> Self {
        Self {
            from,
            to,
            kind,
            context,
        }
    }

    /// The source node.
    #[must_use]
    pub fn from(&self) -> &Arc<N> {
        &self.from
    }

    /// The target node.
    #[must_use]
    pub fn to(&self) -> &Arc<N> {
        &self.to
    }

    /// The kind this edge belongs to.
    #[must_use]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// The context supplied by the most recent association of this pair.
    #[must_use]
    pub fn context(&self) -> &[Context] {
        &self.context
    }
}

impl<N: Node, K: Clone> Clone for Edge<N, K> {
    fn clone(&self) -> Self {
        Self {
            from: Arc::clone(&self.from),
            to: Arc::clone(&self.to),
            kind: self.kind.clone(),
            context: Arc::clone(&self.context),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by graph mutations.
///
/// Read paths never fail: unknown keys, kinds, and edges come back as
/// `None` or as empty sequences.
#[derive(Debug, Error)]
pub enum GraphError<N: Node> {
    /// A different object is already registered under this node's key.
    #[error("duplicate key: {:?}", .0.node_key())]
    DuplicateKey(Arc<N>),

    /// An association endpoint was never added to the graph.
    #[error("missing {} node: {:?}", .side, .node.node_key())]
    NoSuchNode {
        /// The unregistered endpoint.
        node: Arc<N>,
        /// Which endpoint was missing.
        side: Side,
    },
}

impl<N: Node> GraphError<N> {
    /// The node the error is about.
    #[must_use]
    pub fn node(&self) -> &Arc<N> {
        match self {
            Self::DuplicateKey(node) | Self::NoSuchNode { node, .. } => node,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Node for Named {
        type Key = &'static str;

        fn node_key(&self) -> Self::Key {
            self.0
        }
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(7).to_string(), "n7");
        assert_eq!(NodeId(7).value(), 7);
    }

    #[test]
    fn direction_maps_to_petgraph() {
        assert_eq!(
            petgraph::Direction::from(Direction::Outgoing),
            petgraph::Direction::Outgoing
        );
        assert_eq!(
            petgraph::Direction::from(Direction::Incoming),
            petgraph::Direction::Incoming
        );
    }

    #[test]
    fn error_messages_name_key_and_side() {
        let dup: GraphError<Named> = GraphError::DuplicateKey(Arc::new(Named("a")));
        assert_eq!(dup.to_string(), "duplicate key: \"a\"");

        let missing: GraphError<Named> = GraphError::NoSuchNode {
            node: Arc::new(Named("b")),
            side: Side::To,
        };
        assert_eq!(missing.to_string(), "missing To node: \"b\"");
        assert_eq!(missing.node().0, "b");
    }

    #[test]
    fn edge_clone_shares_context() {
        let edge = Edge::new(
            Arc::new(Named("a")),
            Arc::new(Named("b")),
            1u8,
            Arc::from(vec![serde_json::json!({"w": 1})]),
        );
        let copy = edge.clone();
        assert!(Arc::ptr_eq(copy.from(), edge.from()));
        assert_eq!(copy.context(), edge.context());
        assert_eq!(*copy.kind(), 1);
    }
}

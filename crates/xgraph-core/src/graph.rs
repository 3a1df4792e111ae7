//! # Graph Facade
//!
//! The single entry point to the index.
//!
//! `Graph` owns the node registry and the kind index behind one
//! reader/writer lock:
//! - Write lock: `add`, `associate`, `set_labeler`
//! - Read lock: `node`, `has`, `edge`, counters, and the resolve step of
//!   `from`/`to`
//!
//! The lock is never held while caller code runs (`Node::node_key`,
//! labelers) or while an adjacency sequence is being produced.

use crate::adjacency::NodesOrEdges;
use crate::kind::{EdgeKindIndex, SharedKindGraph};
use crate::options::{AdjacencyMode, GraphOptions, NodeLabeler};
use crate::registry::NodeRegistry;
use crate::render;
use crate::types::{Context, Direction, Edge, EdgeKind, GraphError, Node, NodeId, Side};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Everything guarded by the facade lock.
struct GraphState<N: Node, K> {
    registry: NodeRegistry<N>,
    kinds: EdgeKindIndex<N, K>,
    labeler: Option<Arc<dyn NodeLabeler<N>>>,
}

/// A keyed, kind-partitioned directed multigraph.
///
/// `Graph` is `Send + Sync`; share it by reference or behind an `Arc`.
pub struct Graph<N: Node, K: EdgeKind> {
    state: RwLock<GraphState<N, K>>,
    adjacency: AdjacencyMode,
}

impl<N: Node, K: EdgeKind> Default for Graph<N, K> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N: Node, K: EdgeKind> Graph<N, K> {
    /// Create an empty graph.
    #[must_use]
    pub fn new(options: GraphOptions<N>) -> Self {
        tracing::debug!(adjacency = ?options.adjacency, labeler = options.node_labeler.is_some(), "graph created");
        Self {
            state: RwLock::new(GraphState {
                registry: NodeRegistry::new(),
                kinds: EdgeKindIndex::new(),
                labeler: options.node_labeler,
            }),
            adjacency: options.adjacency,
        }
    }

    // =========================================================================
    // NODES
    // =========================================================================

    /// Register nodes.
    ///
    /// Re-adding the same `Arc` is a no-op. A different object under an
    /// existing key fails with [`GraphError::DuplicateKey`]; nodes before it
    /// in `nodes` remain registered.
    pub fn add<I>(&self, nodes: I) -> Result<(), GraphError<N>>
    where
        I: IntoIterator<Item = Arc<N>>,
    {
        let keyed: Vec<(N::Key, Arc<N>)> = nodes
            .into_iter()
            .map(|node| (node.node_key(), node))
            .collect();
        let mut state = self.state.write();
        state.registry.add_keyed(keyed).map(|_| ())
    }

    /// The node registered under `key`.
    #[must_use]
    pub fn node(&self, key: &N::Key) -> Option<Arc<N>> {
        let state = self.state.read();
        state.registry.lookup(key).map(|handle| Arc::clone(handle.node()))
    }

    /// Whether a node with this node's key is registered.
    #[must_use]
    pub fn has(&self, node: &N) -> bool {
        let key = node.node_key();
        self.state.read().registry.contains_key(&key)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.state.read().registry.len()
    }

    /// Every registered node, in registration order.
    #[must_use]
    pub fn nodes(&self) -> Vec<Arc<N>> {
        let state = self.state.read();
        let mut handles: Vec<_> = state.registry.handles().collect();
        handles.sort_by_key(|handle| handle.id());
        handles
            .into_iter()
            .map(|handle| Arc::clone(handle.node()))
            .collect()
    }

    // =========================================================================
    // EDGES
    // =========================================================================

    /// Create (or replace) the edge `from -[kind]-> to`.
    ///
    /// Both endpoints must have been added. Re-associating an existing pair
    /// replaces its context and keeps a single edge.
    pub fn associate(
        &self,
        from: &Arc<N>,
        kind: K,
        to: &Arc<N>,
        context: Vec<Context>,
    ) -> Result<Edge<N, K>, GraphError<N>> {
        let (from_key, to_key) = (from.node_key(), to.node_key());
        let mut state = self.state.write();

        let from_handle = state
            .registry
            .lookup(&from_key)
            .cloned()
            .ok_or_else(|| GraphError::NoSuchNode {
                node: Arc::clone(from),
                side: Side::From,
            })?;
        let to_handle = state
            .registry
            .lookup(&to_key)
            .cloned()
            .ok_or_else(|| GraphError::NoSuchNode {
                node: Arc::clone(to),
                side: Side::To,
            })?;

        let kind_graph = state.kinds.get_or_create(&kind);
        let context = kind_graph.write().associate(&from_handle, &to_handle, context);
        tracing::debug!(?kind, from = %from_handle.id(), to = %to_handle.id(), "associated");

        Ok(Edge::new(
            Arc::clone(from_handle.node()),
            Arc::clone(to_handle.node()),
            kind,
            context,
        ))
    }

    /// The edge `from -[kind]-> to`, if both endpoints are registered and
    /// the edge exists.
    #[must_use]
    pub fn edge(&self, from: &N, kind: &K, to: &N) -> Option<Edge<N, K>> {
        let (from_key, to_key) = (from.node_key(), to.node_key());
        let state = self.state.read();
        let kind_graph = state.kinds.get(kind)?;
        let from = state.registry.lookup(&from_key)?;
        let to = state.registry.lookup(&to_key)?;

        let kind_graph = kind_graph.read();
        let record = kind_graph.edge_between(from.id(), to.id())?;
        Some(Edge::new(
            Arc::clone(from.node()),
            Arc::clone(to.node()),
            kind.clone(),
            Arc::clone(record.context()),
        ))
    }

    /// Every kind with at least one edge, in no particular order.
    #[must_use]
    pub fn kinds(&self) -> Vec<K> {
        self.state.read().kinds.kinds().cloned().collect()
    }

    /// Number of edges of `kind`.
    #[must_use]
    pub fn edge_count(&self, kind: &K) -> usize {
        let state = self.state.read();
        state
            .kinds
            .get(kind)
            .map(|graph| graph.read().edge_count())
            .unwrap_or(0)
    }

    // =========================================================================
    // ADJACENCY
    // =========================================================================

    /// Nodes and edges reachable from `node` over one outgoing `kind` edge.
    pub fn from(&self, node: &N, kind: &K) -> NodesOrEdges<'_, N, K> {
        NodesOrEdges::new(self, node.node_key(), kind.clone(), Direction::Outgoing)
    }

    /// Nodes and edges reaching `node` over one incoming `kind` edge.
    pub fn to(&self, node: &N, kind: &K) -> NodesOrEdges<'_, N, K> {
        NodesOrEdges::new(self, node.node_key(), kind.clone(), Direction::Incoming)
    }

    /// Resolve the kind-graph and anchor id under the read lock.
    pub(crate) fn resolve(&self, anchor: &N::Key, kind: &K) -> Option<(SharedKindGraph<N>, NodeId)> {
        let state = self.state.read();
        let kind_graph = state.kinds.get(kind)?;
        let anchor = state.registry.lookup(anchor)?;
        Some((Arc::clone(kind_graph), anchor.id()))
    }

    pub(crate) fn adjacency_mode(&self) -> AdjacencyMode {
        self.adjacency
    }

    // =========================================================================
    // LABELS
    // =========================================================================

    /// Replace the diagnostic labeler. Returns how many registered nodes it
    /// now labels.
    pub fn set_labeler(&self, labeler: impl NodeLabeler<N> + 'static) -> usize {
        let mut state = self.state.write();
        state.labeler = Some(Arc::new(labeler));
        state.registry.len()
    }

    /// Diagnostic label for `node`: the labeler's output, or the node key.
    #[must_use]
    pub fn label(&self, node: &N) -> String {
        let labeler = self.state.read().labeler.clone();
        match labeler {
            Some(labeler) => labeler.label(node),
            None => format!("{:?}", node.node_key()),
        }
    }

    /// Render one kind-graph as Graphviz DOT.
    #[must_use]
    pub fn render_dot(&self, kind: &K) -> String {
        let (labeler, kind_graph) = {
            let state = self.state.read();
            (state.labeler.clone(), state.kinds.get(kind).cloned())
        };
        let snapshot = kind_graph
            .map(|graph| render::KindSnapshot::capture(&graph.read()))
            .unwrap_or_default();

        snapshot.to_dot(kind, |node: &N| match &labeler {
            Some(labeler) => labeler.label(node),
            None => format!("{:?}", node.node_key()),
        })
    }
}

impl<N: Node, K: EdgeKind> fmt::Debug for Graph<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Graph")
            .field("nodes", &state.registry.len())
            .field("kinds", &state.kinds.len())
            .field("adjacency", &self.adjacency)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

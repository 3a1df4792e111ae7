//! # Edge Kind Index
//!
//! One independent directed graph per edge kind, all over the registry's
//! shared `NodeId` space.
//!
//! Each kind-graph is a petgraph `DiGraphMap` keyed directly by `NodeId`, so
//! per-kind adjacency ("everything this node *likes*") is a native neighbor
//! walk. Kind-graphs sit behind their own lock so adjacency producers can run
//! without holding the facade lock.

use crate::registry::NodeHandle;
use crate::types::{Context, Direction, Node, NodeId};
use parking_lot::RwLock;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A kind-graph shared between the facade and adjacency producers.
pub type SharedKindGraph<N> = Arc<RwLock<KindGraph<N>>>;

/// Data stored on each edge of a kind-graph.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    context: Arc<[Context]>,
}

impl EdgeRecord {
    /// The context of the latest association.
    #[must_use]
    pub fn context(&self) -> &Arc<[Context]> {
        &self.context
    }
}

// =============================================================================
// KIND GRAPH
// =============================================================================

/// The directed graph of a single edge kind.
#[derive(Debug)]
pub struct KindGraph<N> {
    /// Adjacency: NodeId -> NodeId with per-edge context
    graph: DiGraphMap<NodeId, EdgeRecord>,

    /// Nodes touched by at least one edge of this kind
    members: BTreeMap<NodeId, Arc<N>>,
}

impl<N> Default for KindGraph<N> {
    fn default() -> Self {
        Self {
            graph: DiGraphMap::new(),
            members: BTreeMap::new(),
        }
    }
}

impl<N: Node> KindGraph<N> {
    /// Create an empty kind-graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the edge `from -> to`.
    ///
    /// The context of an existing edge is replaced (last write wins); the
    /// edge itself keeps its identity.
    pub fn associate(
        &mut self,
        from: &NodeHandle<N>,
        to: &NodeHandle<N>,
        context: Vec<Context>,
    ) -> Arc<[Context]> {
        self.members
            .entry(from.id())
            .or_insert_with(|| Arc::clone(from.node()));
        self.members
            .entry(to.id())
            .or_insert_with(|| Arc::clone(to.node()));

        let context: Arc<[Context]> = Arc::from(context);
        let previous = self.graph.add_edge(
            from.id(),
            to.id(),
            EdgeRecord {
                context: Arc::clone(&context),
            },
        );
        if previous.is_some() {
            tracing::debug!(from = %from.id(), to = %to.id(), "replaced edge context");
        }
        context
    }

    /// The edge `from -> to`, if present.
    #[must_use]
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&EdgeRecord> {
        self.graph.edge_weight(from, to)
    }

    /// Neighbor ids of `id` in the given direction. Unknown ids yield nothing.
    pub fn adjacent_ids(&self, id: NodeId, direction: Direction) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors_directed(id, direction.into())
    }

    /// The node registered under `id`, if it takes part in this kind.
    #[must_use]
    pub fn member(&self, id: NodeId) -> Option<&Arc<N>> {
        self.members.get(&id)
    }

    /// All member nodes in id order.
    pub fn members(&self) -> impl Iterator<Item = (NodeId, &Arc<N>)> {
        self.members.iter().map(|(id, node)| (*id, node))
    }

    /// All edges, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &EdgeRecord)> {
        self.graph.all_edges()
    }

    /// Number of nodes touched by this kind.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    /// Number of edges of this kind.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

// =============================================================================
// KIND INDEX
// =============================================================================

/// Kind -> kind-graph mapping. Kind-graphs are created lazily and never
/// dropped.
#[derive(Debug)]
pub struct EdgeKindIndex<N, K> {
    kinds: HashMap<K, SharedKindGraph<N>>,
}

impl<N, K> Default for EdgeKindIndex<N, K> {
    fn default() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }
}

impl<N: Node, K: crate::types::EdgeKind> EdgeKindIndex<N, K> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The kind-graph for `kind`, creating an empty one on first use.
    pub fn get_or_create(&mut self, kind: &K) -> SharedKindGraph<N> {
        let graph = self.kinds.entry(kind.clone()).or_insert_with(|| {
            tracing::debug!(?kind, "created kind-graph");
            Arc::new(RwLock::new(KindGraph::new()))
        });
        Arc::clone(graph)
    }

    /// The kind-graph for `kind`, if any edge of that kind was ever created.
    #[must_use]
    pub fn get(&self, kind: &K) -> Option<&SharedKindGraph<N>> {
        self.kinds.get(kind)
    }

    /// Every known kind, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &K> {
        self.kinds.keys()
    }

    /// Number of known kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

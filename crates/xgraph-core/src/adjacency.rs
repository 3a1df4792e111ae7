//! # Lazy Adjacency
//!
//! Turns a neighbor walk over a kind-graph into a sequence the caller can
//! consume after the facade lock has been released.
//!
//! The facade only resolves the kind-graph and the anchor id under its read
//! lock. Production then runs either on a background thread that streams
//! items through an unbounded channel, or by collecting a snapshot up front
//! (see [`AdjacencyMode`]). Producers take only the kind-graph's own read
//! lock and never wait on the consumer, so a slow or abandoned consumer
//! cannot stall writers for longer than one neighbor walk.

use crate::graph::Graph;
use crate::kind::{KindGraph, SharedKindGraph};
use crate::options::AdjacencyMode;
use crate::types::{Direction, Edge, EdgeKind, Node, NodeId};
use std::fmt;
use std::sync::{Arc, mpsc};
use std::thread;
use std::vec;

/// Name given to background producer threads.
pub const PRODUCER_THREAD_NAME: &str = "xgraph-adjacency";

// =============================================================================
// ADJACENCY SEQUENCE
// =============================================================================

/// A finite, single-pass sequence of adjacent nodes or edges.
///
/// Dropping it early is fine: a streaming producer notices the closed channel
/// and stops.
pub struct Adjacency<T> {
    source: Source<T>,
}

enum Source<T> {
    Empty,
    Snapshot(vec::IntoIter<T>),
    Streamed(mpsc::Receiver<T>),
}

impl<T> Adjacency<T> {
    /// An immediately exhausted sequence.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            source: Source::Empty,
        }
    }

    fn snapshot(items: Vec<T>) -> Self {
        Self {
            source: Source::Snapshot(items.into_iter()),
        }
    }

    fn streamed(receiver: mpsc::Receiver<T>) -> Self {
        Self {
            source: Source::Streamed(receiver),
        }
    }
}

impl<T> Iterator for Adjacency<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match &mut self.source {
            Source::Empty => None,
            Source::Snapshot(items) => items.next(),
            Source::Streamed(receiver) => receiver.recv().ok(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Source::Empty => (0, Some(0)),
            Source::Snapshot(items) => items.size_hint(),
            Source::Streamed(_) => (0, None),
        }
    }
}

impl<T> fmt::Debug for Adjacency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Empty => "empty",
            Source::Snapshot(_) => "snapshot",
            Source::Streamed(_) => "streamed",
        };
        f.debug_struct("Adjacency").field("source", &source).finish()
    }
}

// =============================================================================
// PRODUCTION
// =============================================================================

/// Walk the neighbors of `anchor` and project each one into an item.
///
/// Neighbors the projection rejects are skipped.
fn produce<N, T, F>(
    kind_graph: SharedKindGraph<N>,
    anchor: NodeId,
    direction: Direction,
    mode: AdjacencyMode,
    project: F,
) -> Adjacency<T>
where
    N: Node,
    T: Send + 'static,
    F: Fn(&KindGraph<N>, NodeId) -> Option<T> + Send + Sync + 'static,
{
    let project = Arc::new(project);

    if mode == AdjacencyMode::Streamed {
        let (sender, receiver) = mpsc::channel();
        let graph = Arc::clone(&kind_graph);
        let walk = Arc::clone(&project);

        let spawned = thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.to_string())
            .spawn(move || {
                let graph = graph.read();
                let mut sent = 0usize;
                for neighbor in graph.adjacent_ids(anchor, direction) {
                    let Some(item) = walk(&*graph, neighbor) else {
                        continue;
                    };
                    if sender.send(item).is_err() {
                        tracing::trace!(%anchor, sent, "adjacency consumer went away");
                        return;
                    }
                    sent = sent.saturating_add(1);
                }
                tracing::trace!(%anchor, ?direction, sent, "adjacency stream finished");
            });

        match spawned {
            Ok(_) => return Adjacency::streamed(receiver),
            Err(e) => {
                tracing::warn!(%anchor, "adjacency producer unavailable, using snapshot: {}", e);
            }
        }
    }

    let graph = kind_graph.read();
    let items: Vec<T> = graph
        .adjacent_ids(anchor, direction)
        .filter_map(|neighbor| project(&*graph, neighbor))
        .collect();
    tracing::trace!(%anchor, ?direction, count = items.len(), "adjacency snapshot taken");
    Adjacency::snapshot(items)
}

// =============================================================================
// NODES OR EDGES
// =============================================================================

/// Deferred adjacency query returned by [`Graph::from`] and [`Graph::to`].
///
/// Nothing is resolved until [`nodes`](Self::nodes) or
/// [`edges`](Self::edges) is called; each call is an independent pass that
/// reflects the graph at that moment.
pub struct NodesOrEdges<'g, N: Node, K: EdgeKind> {
    graph: &'g Graph<N, K>,
    anchor: N::Key,
    kind: K,
    direction: Direction,
}

impl<'g, N: Node, K: EdgeKind> NodesOrEdges<'g, N, K> {
    pub(crate) fn new(graph: &'g Graph<N, K>, anchor: N::Key, kind: K, direction: Direction) -> Self {
        Self {
            graph,
            anchor,
            kind,
            direction,
        }
    }

    /// The direction of this query relative to the anchor.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adjacent nodes.
    #[must_use]
    pub fn nodes(&self) -> Adjacency<Arc<N>> {
        let Some((kind_graph, anchor)) = self.graph.resolve(&self.anchor, &self.kind) else {
            return Adjacency::empty();
        };

        produce(
            kind_graph,
            anchor,
            self.direction,
            self.graph.adjacency_mode(),
            |graph, neighbor| graph.member(neighbor).cloned(),
        )
    }

    /// Adjacent edges, each in its stored orientation.
    #[must_use]
    pub fn edges(&self) -> Adjacency<Edge<N, K>> {
        let Some((kind_graph, anchor)) = self.graph.resolve(&self.anchor, &self.kind) else {
            return Adjacency::empty();
        };

        let kind = self.kind.clone();
        let direction = self.direction;
        produce(
            kind_graph,
            anchor,
            direction,
            self.graph.adjacency_mode(),
            move |graph, neighbor| {
                let (from, to) = match direction {
                    Direction::Outgoing => (anchor, neighbor),
                    Direction::Incoming => (neighbor, anchor),
                };
                let record = graph.edge_between(from, to)?;
                Some(Edge::new(
                    Arc::clone(graph.member(from)?),
                    Arc::clone(graph.member(to)?),
                    kind.clone(),
                    Arc::clone(record.context()),
                ))
            },
        )
    }
}

impl<N: Node, K: EdgeKind> fmt::Debug for NodesOrEdges<'_, N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodesOrEdges")
            .field("anchor", &self.anchor)
            .field("kind", &self.kind)
            .field("direction", &self.direction)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NodeRegistry;
    use parking_lot::RwLock;

    #[derive(Debug)]
    struct Item(u32);

    impl Node for Item {
        type Key = u32;

        fn node_key(&self) -> Self::Key {
            self.0
        }
    }

    /// Star graph: 0 -> 1..=n
    fn star(n: u32) -> SharedKindGraph<Item> {
        let mut registry = NodeRegistry::new();
        registry
            .add((0..=n).map(|k| Arc::new(Item(k))))
            .expect("add");
        let hub = registry.lookup(&0).expect("hub").clone();

        let mut graph = KindGraph::new();
        for k in 1..=n {
            let spoke = registry.lookup(&k).expect("spoke").clone();
            graph.associate(&hub, &spoke, vec![]);
        }
        Arc::new(RwLock::new(graph))
    }

    fn keys(adjacency: Adjacency<Arc<Item>>) -> Vec<u32> {
        let mut keys: Vec<u32> = adjacency.map(|n| n.0).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn empty_is_exhausted() {
        let mut adjacency: Adjacency<u32> = Adjacency::empty();
        assert_eq!(adjacency.size_hint(), (0, Some(0)));
        assert!(adjacency.next().is_none());
    }

    #[test]
    fn both_modes_yield_same_items() {
        let graph = star(5);
        for mode in [AdjacencyMode::Streamed, AdjacencyMode::Snapshot] {
            let adjacency = produce(
                Arc::clone(&graph),
                NodeId(0),
                Direction::Outgoing,
                mode,
                |g: &KindGraph<Item>, id| g.member(id).cloned(),
            );
            assert_eq!(keys(adjacency), vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn projection_can_skip_neighbors() {
        let graph = star(6);
        let adjacency = produce(
            graph,
            NodeId(0),
            Direction::Outgoing,
            AdjacencyMode::Snapshot,
            |g: &KindGraph<Item>, id| g.member(id).filter(|n| n.0 % 2 == 0).cloned(),
        );
        assert_eq!(keys(adjacency), vec![2, 4, 6]);
    }

    #[test]
    fn abandoned_stream_releases_kind_graph() {
        let graph = star(1000);
        let mut adjacency = produce(
            Arc::clone(&graph),
            NodeId(0),
            Direction::Outgoing,
            AdjacencyMode::Streamed,
            |g: &KindGraph<Item>, id| g.member(id).cloned(),
        );
        assert!(adjacency.next().is_some());
        drop(adjacency);

        // The producer either finished or saw the closed channel; either way
        // it releases its read lock and a writer gets through.
        let guard = graph.write();
        assert_eq!(guard.edge_count(), 1000);
    }

    #[test]
    fn debug_names_source() {
        let adjacency = Adjacency::snapshot(vec![1u8]);
        assert_eq!(format!("{:?}", adjacency), "Adjacency { source: \"snapshot\" }");
    }
}

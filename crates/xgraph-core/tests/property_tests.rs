//! # Property-Based Tests
//!
//! Invariants of the index checked with proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use xgraph_core::{AdjacencyMode, Graph, GraphOptions, Node};

#[derive(Debug)]
struct Item(u16);

impl Node for Item {
    type Key = u16;

    fn node_key(&self) -> Self::Key {
        self.0
    }
}

/// Register `0..count` and return the allocations by key.
fn populated(count: u16, mode: AdjacencyMode) -> (Graph<Item, u8>, BTreeMap<u16, Arc<Item>>) {
    let graph = Graph::new(GraphOptions::new().with_adjacency(mode));
    let nodes: BTreeMap<u16, Arc<Item>> = (0..count).map(|k| (k, Arc::new(Item(k)))).collect();
    graph.add(nodes.values().cloned()).expect("add");
    (graph, nodes)
}

fn keys(nodes: impl Iterator<Item = Arc<Item>>) -> BTreeSet<u16> {
    nodes.map(|n| n.0).collect()
}

proptest! {
    /// Node count equals the number of unique keys added by identity.
    #[test]
    fn node_count_reflects_unique_keys(raw in vec(0u16..200, 0..100)) {
        let graph: Graph<Item, u8> = Graph::default();
        let mut allocations: BTreeMap<u16, Arc<Item>> = BTreeMap::new();

        for key in &raw {
            let node = Arc::clone(allocations.entry(*key).or_insert_with(|| Arc::new(Item(*key))));
            graph.add([node]).expect("add");
        }

        prop_assert_eq!(graph.node_count(), allocations.len());
    }

    /// `from` and `to` agree with a plain edge set, per kind and direction.
    #[test]
    fn adjacency_matches_edge_set(
        edges in vec((0u16..20, 0u8..3, 0u16..20), 0..80),
        snapshot in any::<bool>(),
    ) {
        let mode = if snapshot { AdjacencyMode::Snapshot } else { AdjacencyMode::Streamed };
        let (graph, nodes) = populated(20, mode);
        let expected: BTreeSet<(u16, u8, u16)> = edges.iter().copied().collect();

        for (from, kind, to) in &edges {
            graph
                .associate(&nodes[from], *kind, &nodes[to], vec![])
                .expect("associate");
        }

        for kind in 0u8..3 {
            let kind_edges = expected.iter().filter(|(_, k, _)| *k == kind).count();
            prop_assert_eq!(graph.edge_count(&kind), kind_edges);

            for (key, node) in &nodes {
                let out: BTreeSet<u16> = expected
                    .iter()
                    .filter(|(f, k, _)| f == key && *k == kind)
                    .map(|(_, _, t)| *t)
                    .collect();
                let inc: BTreeSet<u16> = expected
                    .iter()
                    .filter(|(_, k, t)| t == key && *k == kind)
                    .map(|(f, _, _)| *f)
                    .collect();

                prop_assert_eq!(keys(graph.from(node, &kind).nodes()), out);
                prop_assert_eq!(keys(graph.to(node, &kind).nodes()), inc);
            }
        }
    }

    /// Every edge reported by `edges()` is retrievable through `edge`.
    #[test]
    fn reported_edges_exist(edges in vec((0u16..10, 0u16..10), 1..40)) {
        let (graph, nodes) = populated(10, AdjacencyMode::Streamed);
        for (from, to) in &edges {
            graph.associate(&nodes[from], 0, &nodes[to], vec![]).expect("associate");
        }

        for node in nodes.values() {
            for edge in graph.from(node, &0).edges() {
                prop_assert!(Arc::ptr_eq(edge.from(), node));
                prop_assert!(graph.edge(edge.from(), &0, edge.to()).is_some());
            }
        }
    }
}

//! # Graph Benchmarks
//!
//! Performance benchmarks for xgraph-core index operations.
//!
//! Run with: `cargo bench -p xgraph-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use xgraph_core::{AdjacencyMode, Graph, GraphOptions, Node};

#[derive(Debug)]
struct Item(u64);

impl Node for Item {
    type Key = u64;

    fn node_key(&self) -> Self::Key {
        self.0
    }
}

const LINKS: u8 = 0;

fn items(size: usize) -> Vec<Arc<Item>> {
    (0..size as u64).map(|i| Arc::new(Item(i))).collect()
}

/// Create a graph with a hub linked to every other node (hub-and-spoke).
fn create_star_graph(size: usize, mode: AdjacencyMode) -> (Graph<Item, u8>, Arc<Item>) {
    let graph = Graph::new(GraphOptions::new().with_adjacency(mode));
    let nodes = items(size);
    graph.add(nodes.iter().cloned()).expect("add");

    let hub = Arc::clone(&nodes[0]);
    for spoke in &nodes[1..] {
        graph.associate(&hub, LINKS, spoke, vec![]).expect("associate");
    }
    (graph, hub)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let nodes = items(size);
            b.iter(|| {
                let graph: Graph<Item, u8> = Graph::default();
                graph.add(nodes.iter().cloned()).expect("add");
                black_box(graph)
            });
        });
    }

    group.finish();
}

fn bench_association(c: &mut Criterion) {
    let mut group = c.benchmark_group("association");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_star_graph(size, AdjacencyMode::Snapshot)));
        });
    }

    group.finish();
}

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");

    for mode in [AdjacencyMode::Streamed, AdjacencyMode::Snapshot] {
        for size in [100, 1000, 10000].iter() {
            let (graph, hub) = create_star_graph(*size, mode);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                size,
                |b, _| b.iter(|| black_box(graph.from(&hub, &LINKS).nodes().count())),
            );
        }
    }

    group.finish();
}

fn bench_edge_lookup(c: &mut Criterion) {
    let (graph, hub) = create_star_graph(1000, AdjacencyMode::Snapshot);
    let target = graph.node(&500).expect("node");

    c.bench_function("edge_lookup", |b| {
        b.iter(|| black_box(graph.edge(&hub, &LINKS, &target)))
    });
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_association,
    bench_adjacency,
    bench_edge_lookup
);
criterion_main!(benches);

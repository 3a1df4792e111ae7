//! # DOT Rendering
//!
//! Diagnostic Graphviz output for a single kind-graph.
//!
//! Rendering happens in two steps so that node labelers (caller code) never
//! run under a lock: the kind-graph is captured while its read lock is held,
//! then labeled and written out afterwards.

use crate::kind::KindGraph;
use crate::types::{Context, Node, NodeId};
use std::fmt::{Debug, Write};
use std::sync::Arc;

/// Owned copy of a kind-graph's nodes and edges.
pub struct KindSnapshot<N> {
    nodes: Vec<(NodeId, Arc<N>)>,
    edges: Vec<(NodeId, NodeId, Arc<[Context]>)>,
}

impl<N> Default for KindSnapshot<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N: Node> KindSnapshot<N> {
    /// Copy the members and edges of `graph`.
    #[must_use]
    pub fn capture(graph: &KindGraph<N>) -> Self {
        let nodes = graph
            .members()
            .map(|(id, node)| (id, Arc::clone(node)))
            .collect();
        let mut edges: Vec<_> = graph
            .edges()
            .map(|(from, to, record)| (from, to, Arc::clone(record.context())))
            .collect();
        edges.sort_by_key(|(from, to, _)| (*from, *to));
        Self { nodes, edges }
    }

    /// Write the snapshot as a DOT `digraph` named after `kind`.
    pub fn to_dot<K: Debug>(&self, kind: &K, label: impl Fn(&N) -> String) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", escape(&format!("{:?}", kind)));

        for (id, node) in &self.nodes {
            let _ = writeln!(out, "    {} [label=\"{}\"];", id, escape(&label(node)));
        }

        for (from, to, context) in &self.edges {
            if context.is_empty() {
                let _ = writeln!(out, "    {} -> {};", from, to);
            } else {
                let text = context
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "    {} -> {} [label=\"{}\"];", from, to, escape(&text));
            }
        }

        out.push_str("}\n");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

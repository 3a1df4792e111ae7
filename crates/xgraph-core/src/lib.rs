//! # xgraph-core
//!
//! A concurrency-safe, key-addressable directed multigraph index.
//!
//! Callers register their own objects as nodes under stable identity keys,
//! associate them with typed, directed edges, and query adjacency per edge
//! kind in either direction.
//!
//! ## Layout
//!
//! - `registry` → identity key to internal node handle
//! - `kind` → one petgraph `DiGraphMap` per edge kind over a shared id space
//! - `graph` → the `Graph` facade and its lock
//! - `adjacency` → lazy `from`/`to` sequences produced outside the lock
//! - `render` → diagnostic DOT output
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use xgraph_core::{Graph, GraphOptions, Node};
//!
//! #[derive(Debug)]
//! struct User(String);
//!
//! impl Node for User {
//!     type Key = String;
//!     fn node_key(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! let graph: Graph<User, &str> = Graph::new(GraphOptions::new());
//! let alice = Arc::new(User("alice".into()));
//! let bob = Arc::new(User("bob".into()));
//! graph.add([alice.clone(), bob.clone()]).expect("add");
//! graph.associate(&alice, "likes", &bob, vec![]).expect("associate");
//!
//! let liked: Vec<_> = graph.from(&alice, &"likes").nodes().collect();
//! assert_eq!(liked.len(), 1);
//! assert!(Arc::ptr_eq(&liked[0], &bob));
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod adjacency;
pub mod graph;
pub mod kind;
pub mod options;
pub mod registry;
pub mod render;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use adjacency::{Adjacency, NodesOrEdges};
pub use graph::Graph;
pub use kind::{EdgeKindIndex, EdgeRecord, KindGraph, SharedKindGraph};
pub use options::{AdjacencyMode, GraphOptions, NodeLabeler};
pub use registry::{NodeHandle, NodeRegistry};
pub use render::KindSnapshot;
pub use types::{Context, Direction, Edge, EdgeKind, GraphError, Node, NodeId, Side};

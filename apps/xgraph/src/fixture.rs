//! # Fixture Loading
//!
//! A fixture is a TOML script declaring nodes and associations:
//!
//! ```toml
//! [options]
//! adjacency = "snapshot"
//!
//! [[nodes]]
//! key = "alice"
//! label = "Alice"
//!
//! [[edges]]
//! from = "alice"
//! kind = "likes"
//! to = "bob"
//! context = [{ since = 2020 }]
//! ```

use crate::error::CliError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use xgraph_core::{AdjacencyMode, Context, Graph, GraphOptions, Node};

/// Maximum fixture size (16 MB).
const MAX_FIXTURE_SIZE: u64 = 16 * 1024 * 1024;

// =============================================================================
// ENTITY
// =============================================================================

/// Node type used by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub key: String,
    pub label: Option<String>,
}

impl Node for Entity {
    type Key = String;

    fn node_key(&self) -> Self::Key {
        self.key.clone()
    }
}

/// Label with the declared label, falling back to the key.
fn entity_label(entity: &Entity) -> String {
    entity.label.clone().unwrap_or_else(|| entity.key.clone())
}

// =============================================================================
// FIXTURE LAYOUT
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Fixture {
    #[serde(default)]
    options: FixtureOptions,
    #[serde(default)]
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    edges: Vec<EdgeSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureOptions {
    #[serde(default)]
    adjacency: AdjacencyMode,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeSpec {
    key: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeSpec {
    from: String,
    kind: String,
    to: String,
    #[serde(default)]
    context: Vec<Context>,
}

// =============================================================================
// LOADED GRAPH
// =============================================================================

/// A graph built from a fixture.
#[derive(Debug)]
pub struct Loaded {
    pub graph: Graph<Entity, String>,
}

impl Loaded {
    /// Resolve a node key declared by the fixture.
    pub fn entity(&self, key: &str) -> Result<Arc<Entity>, CliError> {
        self.graph
            .node(&key.to_string())
            .ok_or_else(|| CliError::UnknownNode(key.to_string()))
    }
}

/// Read and build a fixture file.
pub fn load(path: &Path) -> Result<Loaded, CliError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_FIXTURE_SIZE {
        return Err(CliError::InvalidFixture(format!(
            "file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_FIXTURE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path)?;
    let loaded = parse(&text)?;
    tracing::info!(
        "Loaded fixture {:?}: {} nodes, {} kinds",
        path,
        loaded.graph.node_count(),
        loaded.graph.kinds().len()
    );
    Ok(loaded)
}

/// Build a graph from fixture text.
pub fn parse(text: &str) -> Result<Loaded, CliError> {
    let fixture: Fixture = toml::from_str(text)?;

    let graph = Graph::new(
        GraphOptions::new()
            .with_adjacency(fixture.options.adjacency)
            .with_labeler(entity_label),
    );

    let mut declared: BTreeMap<String, Arc<Entity>> = BTreeMap::new();
    for spec in fixture.nodes {
        if spec.key.is_empty() {
            return Err(CliError::InvalidFixture("node key must not be empty".to_string()));
        }
        let entity = Arc::new(Entity {
            key: spec.key.clone(),
            label: spec.label,
        });
        graph.add([Arc::clone(&entity)])?;
        declared.insert(spec.key, entity);
    }

    for spec in fixture.edges {
        // Undeclared endpoints are handed to the graph as fresh entities so it
        // reports which side is missing.
        let from = endpoint(&declared, &spec.from);
        let to = endpoint(&declared, &spec.to);
        graph.associate(&from, spec.kind, &to, spec.context)?;
    }

    Ok(Loaded { graph })
}

fn endpoint(declared: &BTreeMap<String, Arc<Entity>>, key: &str) -> Arc<Entity> {
    declared.get(key).cloned().unwrap_or_else(|| {
        Arc::new(Entity {
            key: key.to_string(),
            label: None,
        })
    })
}

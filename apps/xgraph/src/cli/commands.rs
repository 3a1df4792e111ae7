//! # CLI Command Implementations
//!
//! Each command renders its result to a string; `execute` prints it.

use crate::error::CliError;
use crate::fixture::{Entity, Loaded};
use serde_json::{Value, json};
use xgraph_core::{Direction, Edge};

/// JSON shape of an edge.
fn edge_json(edge: &Edge<Entity, String>) -> Value {
    json!({
        "from": edge.from().key,
        "kind": edge.kind(),
        "to": edge.to().key,
        "context": edge.context(),
    })
}

/// Text shape of an edge.
fn edge_line(edge: &Edge<Entity, String>) -> String {
    let mut line = format!("{} -[{}]-> {}", edge.from().key, edge.kind(), edge.to().key);
    if !edge.context().is_empty() {
        let context: Vec<String> = edge.context().iter().map(|v| v.to_string()).collect();
        line.push_str(&format!("\t{}", context.join(", ")));
    }
    line
}

fn pretty(value: &impl serde::Serialize) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

// =============================================================================
// NODES COMMAND
// =============================================================================

/// List every declared node with its label, in declaration order.
pub fn cmd_nodes(loaded: &Loaded, json_mode: bool) -> Result<String, CliError> {
    let entities = loaded.graph.nodes();

    if json_mode {
        let rows: Vec<Value> = entities
            .iter()
            .map(|e| json!({ "key": e.key, "label": loaded.graph.label(e) }))
            .collect();
        return pretty(&rows);
    }

    let mut out = String::new();
    for entity in &entities {
        out.push_str(&format!("{}\t{}\n", entity.key, loaded.graph.label(entity)));
    }
    Ok(out)
}

// =============================================================================
// ADJACENCY COMMANDS
// =============================================================================

/// Nodes (or edges) adjacent to `node` over `kind` in `direction`.
pub fn cmd_adjacency(
    loaded: &Loaded,
    json_mode: bool,
    node: &str,
    kind: String,
    direction: Direction,
    edges: bool,
) -> Result<String, CliError> {
    let anchor = loaded.entity(node)?;
    let query = match direction {
        Direction::Outgoing => loaded.graph.from(&anchor, &kind),
        Direction::Incoming => loaded.graph.to(&anchor, &kind),
    };
    tracing::debug!(node, kind = %kind, ?direction, edges, "adjacency query");

    if edges {
        let mut found: Vec<Edge<Entity, String>> = query.edges().collect();
        found.sort_by(|a, b| (&a.from().key, &a.to().key).cmp(&(&b.from().key, &b.to().key)));

        if json_mode {
            let rows: Vec<Value> = found.iter().map(edge_json).collect();
            return pretty(&rows);
        }
        return Ok(found.iter().map(|e| edge_line(e) + "\n").collect());
    }

    let mut keys: Vec<String> = query.nodes().map(|n| n.key.clone()).collect();
    keys.sort();

    if json_mode {
        return pretty(&keys);
    }
    Ok(keys.iter().map(|k| format!("{}\n", k)).collect())
}

// =============================================================================
// EDGE COMMAND
// =============================================================================

/// Look up a single edge.
pub fn cmd_edge(
    loaded: &Loaded,
    json_mode: bool,
    from: &str,
    kind: String,
    to: &str,
) -> Result<String, CliError> {
    let from = loaded.entity(from)?;
    let to = loaded.entity(to)?;
    let edge = loaded.graph.edge(&from, &kind, &to);

    if json_mode {
        return pretty(&edge.as_ref().map(edge_json));
    }
    Ok(match edge {
        Some(edge) => edge_line(&edge) + "\n",
        None => format!("no {} edge from {} to {}\n", kind, from.key, to.key),
    })
}

// =============================================================================
// DOT COMMAND
// =============================================================================

/// Render one kind as DOT.
pub fn cmd_dot(loaded: &Loaded, kind: String) -> String {
    loaded.graph.render_dot(&kind)
}

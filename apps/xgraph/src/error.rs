//! # CLI Errors

use crate::fixture::Entity;
use thiserror::Error;
use xgraph_core::GraphError;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The fixture could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The fixture is not valid TOML for the expected layout.
    #[error("fixture parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The fixture is well-formed but inconsistent.
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    /// A graph mutation failed while loading the fixture.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError<Entity>),

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A query named a node the fixture does not declare.
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

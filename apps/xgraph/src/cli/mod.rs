//! # xgraph CLI Module
//!
//! ## Available Commands
//!
//! - `nodes` - List declared nodes
//! - `from` - Nodes or edges leaving a node over one kind
//! - `to` - Nodes or edges entering a node over one kind
//! - `edge` - Look up a single edge
//! - `dot` - Render one kind as Graphviz DOT

mod commands;

use crate::error::CliError;
use crate::fixture;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xgraph_core::Direction;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// xgraph - keyed multigraph inspector
#[derive(Parser, Debug)]
#[command(name = "xgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the fixture file
    #[arg(short, long, global = true, default_value = "xgraph.toml")]
    pub fixture: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List declared nodes
    Nodes,

    /// Follow outgoing edges of one kind
    #[command(name = "from")]
    Outgoing {
        /// Anchor node key
        #[arg(short, long)]
        node: String,

        /// Edge kind
        #[arg(short, long)]
        kind: String,

        /// List edges instead of nodes
        #[arg(short, long)]
        edges: bool,
    },

    /// Follow incoming edges of one kind
    #[command(name = "to")]
    Incoming {
        /// Anchor node key
        #[arg(short, long)]
        node: String,

        /// Edge kind
        #[arg(short, long)]
        kind: String,

        /// List edges instead of nodes
        #[arg(short, long)]
        edges: bool,
    },

    /// Look up the edge FROM -[KIND]-> TO
    Edge {
        /// Source node key
        #[arg(long)]
        from: String,

        /// Edge kind
        #[arg(short, long)]
        kind: String,

        /// Target node key
        #[arg(long)]
        to: String,
    },

    /// Render one kind as Graphviz DOT
    Dot {
        /// Edge kind
        #[arg(short, long)]
        kind: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let loaded = fixture::load(&cli.fixture)?;
    let json_mode = cli.json_mode;

    let output = match cli.command {
        Commands::Nodes => cmd_nodes(&loaded, json_mode)?,
        Commands::Outgoing { node, kind, edges } => {
            cmd_adjacency(&loaded, json_mode, &node, kind, Direction::Outgoing, edges)?
        }
        Commands::Incoming { node, kind, edges } => {
            cmd_adjacency(&loaded, json_mode, &node, kind, Direction::Incoming, edges)?
        }
        Commands::Edge { from, kind, to } => cmd_edge(&loaded, json_mode, &from, kind, &to)?,
        Commands::Dot { kind } => cmd_dot(&loaded, kind),
    };

    print!("{}", output);
    Ok(())
}

//! # xgraph - Diagnostic CLI
//!
//! Loads a TOML fixture into an `xgraph_core::Graph` and answers adjacency
//! queries against it.
//!
//! ## Usage
//!
//! ```bash
//! xgraph -f social.toml nodes
//! xgraph -f social.toml from --node alice --kind likes
//! xgraph -f social.toml to --node bob --kind likes --edges
//! xgraph -f social.toml edge --from alice --kind likes --to bob
//! xgraph -f social.toml dot --kind likes
//! ```

mod cli;
mod error;
mod fixture;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // XGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("XGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // RUST_LOG wins over --verbose.
    let default_filter = if cli.verbose {
        "xgraph=debug,xgraph_core=debug"
    } else {
        "xgraph=info,xgraph_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries query results.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

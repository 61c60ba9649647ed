//! # facetgraph
//!
//! The main binary for the facetgraph graph-construction engine.
//!
//! This application provides:
//! - CLI commands over a catalog snapshot file
//! - A read-only HTTP API serving explorer and ego graphs
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │            apps/facetgraph (THE BINARY)              │
//! │                                                      │
//! │     ┌─────────────┐          ┌─────────────┐         │
//! │     │    CLI      │          │  HTTP API   │         │
//! │     │   (clap)    │          │   (axum)    │         │
//! │     └──────┬──────┘          └──────┬──────┘         │
//! │            └───────────┬────────────┘                │
//! │                        ▼                             │
//! │               ┌─────────────────┐                    │
//! │               │ facetgraph-core │                    │
//! │               │   (THE LOGIC)   │                    │
//! │               └─────────────────┘                    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Audit a catalog
//! facetgraph -C catalog.json check
//!
//! # Explorer graph with two categories enabled, intersected
//! facetgraph -C catalog.json graph --on category:doc --on cluster:urban \
//!     --filter-mode intersection --dim -o graph.json
//!
//! # Ego graph of one item
//! facetgraph -C catalog.json ego --slug dawn-chorus --pretty
//!
//! # Start the HTTP server
//! facetgraph -C catalog.json --config facetgraph.toml serve -p 8080
//! ```

use clap::Parser;
use facetgraph::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // FACETGRAPH_LOG_FORMAT=json enables machine-parseable output. Logs go to
    // stderr; stdout carries graph JSON.
    let log_format =
        std::env::var("FACETGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "facetgraph=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner to stderr.
fn print_banner() {
    eprintln!(
        r#"
   __                _                         _
  / _| __ _  ___ ___| |_ __ _ _ __ __ _ _ __ | |__
 | |_ / _` |/ __/ _ \ __/ _` | '__/ _` | '_ \| '_ \
 |  _| (_| | (_|  __/ || (_| | | | (_| | |_) | | | |
 |_|  \__,_|\___\___|\__\__, |_|  \__,_| .__/|_| |_|
                        |___/          |_|

  facetgraph v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

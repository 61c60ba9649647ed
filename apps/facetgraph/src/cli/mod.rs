//! # facetgraph CLI Module
//!
//! This module implements the CLI interface for facetgraph.
//!
//! ## Available Commands
//!
//! - `graph` - Build the explorer graph and write it as JSON
//! - `active` - Print the active item set for a toggle selection
//! - `ego` - Build the ego graph of one item
//! - `check` - Audit the catalog (default when no command is given)
//! - `serve` - Start the HTTP server

mod commands;

use crate::config::AppConfig;
use clap::{ArgGroup, Parser, Subcommand};
use facetgraph_core::FacetGraphError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// facetgraph - faceted catalog graphs
///
/// Builds renderable node/link graphs from a catalog snapshot and
/// per-group toggles.
#[derive(Parser, Debug)]
#[command(name = "facetgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog snapshot (JSON)
    #[arg(short = 'C', long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the explorer graph
    Graph {
        /// Enable a group, as kind:id (repeatable)
        #[arg(long = "on", value_name = "KIND:ID")]
        on: Vec<String>,

        /// How enabled groups combine (union, intersection)
        #[arg(long)]
        filter_mode: Option<String>,

        /// How node sizes are computed (connections, fixed)
        #[arg(long)]
        size_mode: Option<String>,

        /// Hide an overlay kind (repeatable)
        #[arg(long, value_name = "KIND")]
        hide: Vec<String>,

        /// Dim inactive node colours to this opacity
        #[arg(long, num_args = 0..=1, default_missing_value = "0.15", value_name = "AMOUNT")]
        dim: Option<f64>,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the active item set
    Active {
        /// Enable a group, as kind:id (repeatable)
        #[arg(long = "on", value_name = "KIND:ID")]
        on: Vec<String>,

        /// How enabled groups combine (union, intersection)
        #[arg(long)]
        filter_mode: Option<String>,

        /// Hide an overlay kind (repeatable)
        #[arg(long, value_name = "KIND")]
        hide: Vec<String>,
    },

    /// Build the ego graph of one item
    #[command(group(ArgGroup::new("center").required(true).args(["id", "slug"])))]
    Ego {
        /// Center item id
        #[arg(long)]
        id: Option<String>,

        /// Center item slug
        #[arg(long)]
        slug: Option<String>,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Audit the catalog for dangling references and stale toggles
    Check,

    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), FacetGraphError> {
    let config = AppConfig::load_optional(cli.config.as_deref())?;
    let catalog = cli.catalog.as_path();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Graph {
            on,
            filter_mode,
            size_mode,
            hide,
            dim,
            output,
            pretty,
        }) => {
            let request = GraphRequestArgs {
                on,
                filter_mode,
                size_mode,
                hide,
                dim,
            };
            cmd_graph(catalog, &config, &request, output.as_deref(), pretty)
        }
        Some(Commands::Active {
            on,
            filter_mode,
            hide,
        }) => {
            let request = GraphRequestArgs {
                on,
                filter_mode,
                hide,
                ..GraphRequestArgs::default()
            };
            cmd_active(catalog, &config, &request, json_mode)
        }
        Some(Commands::Ego {
            id,
            slug,
            output,
            pretty,
        }) => cmd_ego(
            catalog,
            id.as_deref(),
            slug.as_deref(),
            output.as_deref(),
            pretty,
        ),
        Some(Commands::Check) => cmd_check(catalog, &config, json_mode, cli.verbose),
        Some(Commands::Serve { host, port }) => cmd_serve(catalog, config, host, port).await,
        None => {
            // No subcommand - audit by default
            cmd_check(catalog, &config, json_mode, cli.verbose)
        }
    }
}

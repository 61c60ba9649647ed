//! # facetgraph
//!
//! CLI and HTTP surfaces over `facetgraph-core`.
//!
//! Exposed as a library so the integration tests can drive the router and
//! the command implementations directly.

pub mod api;
pub mod cli;
pub mod config;

//! # facetgraph HTTP API Module
//!
//! This module implements the read-only HTTP API using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /catalog` - Catalog audit summary
//! - `POST /graph` - Build the explorer graph for a toggle selection
//! - `POST /ego` - Build the ego graph of an item named by id or slug
//! - `POST /ego/input` - Build an ego graph from a pre-scoped input
//!
//! ## Configuration
//!
//! - `server.corsOrigins` / `FACETGRAPH_CORS_ORIGINS`: allowed origins, or "*"
//!   for all (default: localhost only)
//! - `server.bodyLimitBytes`: request body limit (default: 2 MiB)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `facetgraph::api::*`)
pub use handlers::{
    catalog_handler, ego_handler, ego_input_handler, graph_handler, health_handler,
};
pub use types::{EgoRequest, ErrorResponse, GraphRequest, GraphResponse, HealthResponse};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use facetgraph_core::{Catalog, DisplayOptions, FacetGraphError, Toggles};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state. The catalog is never mutated, so no lock is held.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Display options used when a request carries none.
    pub display: Arc<DisplayOptions>,
    /// Toggles used when a request carries none.
    pub toggles: Arc<Toggles>,
}

impl AppState {
    /// Create new app state around a catalog, with default display options
    /// and every toggle off.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            display: Arc::new(DisplayOptions::default()),
            toggles: Arc::new(Toggles::default()),
        }
    }

    /// Replace the request defaults.
    #[must_use]
    pub fn with_defaults(mut self, display: DisplayOptions, toggles: Toggles) -> Self {
        self.display = Arc::new(display);
        self.toggles = Arc::new(toggles);
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer.
///
/// - `None`: localhost only
/// - any entry equal to `"*"`: all origins
/// - otherwise: the listed origins
fn build_cors_layer(origins: Option<Vec<String>>) -> CorsLayer {
    let Some(origins) = origins else {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    };

    if origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        build_localhost_cors()
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = [
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:5173".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:5173".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner): tracing, CORS, body limit.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let cors = build_cors_layer(server.effective_cors_origins());

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/catalog", get(handlers::catalog_handler))
        .route("/graph", post(handlers::graph_handler))
        .route("/ego", post(handlers::ego_handler))
        .route("/ego/input", post(handlers::ego_input_handler))
        .layer(axum::extract::DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and serve until Ctrl+C.
pub async fn run_server(
    addr: &str,
    state: AppState,
    server: &ServerConfig,
) -> Result<(), FacetGraphError> {
    let router = create_router(state, server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| FacetGraphError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("facetgraph HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FacetGraphError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

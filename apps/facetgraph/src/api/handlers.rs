//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{EgoRequest, ErrorResponse, GraphRequest, GraphResponse, HealthResponse},
};
use crate::config::check_dim_amount;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use facetgraph_core::{
    EgoAssembler, EgoInput, FacetGraphError, GraphAssembler, audit, locate_center, scope_ego,
};

/// Map a core error to a status code and JSON error body.
fn error_response(error: &FacetGraphError) -> Response {
    let status = match error {
        FacetGraphError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        FacetGraphError::MissingCenter
        | FacetGraphError::InvalidConfig(_)
        | FacetGraphError::InvalidToggle(_)
        | FacetGraphError::InvalidSnapshot(_) => StatusCode::BAD_REQUEST,
        FacetGraphError::SerializationError(_) | FacetGraphError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// CATALOG HANDLER
// =============================================================================

/// Audit of the served catalog against the default toggles.
pub async fn catalog_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(audit(&state.catalog, &state.toggles)))
}

// =============================================================================
// GRAPH HANDLER
// =============================================================================

/// Build the explorer graph.
pub async fn graph_handler(
    State(state): State<AppState>,
    Json(request): Json<GraphRequest>,
) -> Response {
    let dim = match request.dim_inactive.map(check_dim_amount).transpose() {
        Ok(dim) => dim,
        Err(e) => return error_response(&e),
    };
    let toggles = request
        .toggles
        .unwrap_or_else(|| state.toggles.as_ref().clone());
    let display = request
        .display
        .unwrap_or_else(|| state.display.as_ref().clone());

    let mut graph = GraphAssembler::build(&state.catalog, &toggles, &display);
    if let Some(amount) = dim {
        graph.dim_inactive(amount);
    }
    tracing::debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        active = graph.active_ids.len(),
        "Built explorer graph"
    );

    (StatusCode::OK, Json(GraphResponse { graph, display })).into_response()
}

// =============================================================================
// EGO HANDLERS
// =============================================================================

/// Build the ego graph of a catalog item.
pub async fn ego_handler(
    State(state): State<AppState>,
    Json(request): Json<EgoRequest>,
) -> Response {
    let catalog = state.catalog.as_ref();
    let center = match locate_center(catalog, request.id.as_deref(), request.slug.as_deref()) {
        Ok(center) => center,
        Err(e) => return error_response(&e),
    };
    match scope_ego(catalog, center) {
        Some(input) => (StatusCode::OK, Json(EgoAssembler::build(&input))).into_response(),
        None => error_response(&FacetGraphError::ItemNotFound(center.to_string())),
    }
}

/// Build an ego graph from a caller-scoped input.
pub async fn ego_input_handler(Json(input): Json<EgoInput>) -> impl IntoResponse {
    (StatusCode::OK, Json(EgoAssembler::build(&input)))
}

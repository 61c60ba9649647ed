//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. Field names
//! are camelCase, like the graph itself.

use facetgraph_core::{DisplayOptions, GraphData, Toggles};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// GRAPH REQUEST/RESPONSE
// =============================================================================

/// Explorer graph request. Absent fields fall back to the server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    #[serde(default)]
    pub toggles: Option<Toggles>,
    #[serde(default)]
    pub display: Option<DisplayOptions>,
    /// Opacity for inactive node colours. No dimming when absent.
    #[serde(default)]
    pub dim_inactive: Option<f64>,
}

/// Explorer graph response. Echoes the display options the graph was
/// built with, since the renderer needs the pass-through fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    pub graph: GraphData,
    pub display: DisplayOptions,
}

// =============================================================================
// EGO REQUEST
// =============================================================================

/// Ego graph request naming the center by id or slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgoRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

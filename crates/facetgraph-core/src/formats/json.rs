//! JSON snapshot format.
//!
//! Field names are camelCase. Every catalog collection is optional and
//! decodes to empty when missing.

use crate::catalog::Catalog;
use crate::ego::EgoInput;
use crate::types::{FacetGraphError, GraphData};

/// Largest snapshot accepted for decoding.
///
/// Checked before parsing so an oversized payload is rejected without
/// allocating for it.
pub const MAX_SNAPSHOT_SIZE: usize = 256 * 1024 * 1024;

fn check_size(bytes: &[u8]) -> Result<(), FacetGraphError> {
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(FacetGraphError::InvalidSnapshot(format!(
            "snapshot is {} bytes (limit {})",
            bytes.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }
    Ok(())
}

/// Decode a catalog snapshot.
pub fn catalog_from_json(bytes: &[u8]) -> Result<Catalog, FacetGraphError> {
    check_size(bytes)?;
    serde_json::from_slice(bytes).map_err(|e| FacetGraphError::InvalidSnapshot(e.to_string()))
}

/// Decode a pre-scoped ego input.
pub fn ego_input_from_json(bytes: &[u8]) -> Result<EgoInput, FacetGraphError> {
    check_size(bytes)?;
    serde_json::from_slice(bytes).map_err(|e| FacetGraphError::InvalidSnapshot(e.to_string()))
}

/// Encode a graph as JSON.
pub fn graph_to_json(graph: &GraphData, pretty: bool) -> Result<String, FacetGraphError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(graph)
    } else {
        serde_json::to_string(graph)
    };
    encoded.map_err(|e| FacetGraphError::SerializationError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

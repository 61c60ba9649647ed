//! # Innate Primitives
//!
//! Hardcoded constants for the facetgraph engine: node colours, sizes,
//! synthetic id prefixes and the default dimming opacity.
//!
//! These are compiled in and immutable at runtime. Renderers that want a
//! different palette post-process the produced graph.

// =============================================================================
// SYNTHETIC ID PREFIXES
// =============================================================================

/// Prefix of categorical overlay node ids.
pub const CATEGORY_ID_PREFIX: &str = "cat-";

/// Prefix of clustering overlay node ids.
pub const CLUSTER_ID_PREFIX: &str = "cl-";

/// Prefix of event overlay node ids.
pub const EVENT_ID_PREFIX: &str = "ev-";

// =============================================================================
// COLOURS
// =============================================================================

/// Base colour of item nodes.
pub const ITEM_COLOR: &str = "#857f7a";

/// Base colour of categorical nodes.
pub const CATEGORY_COLOR: &str = "#ff7411";

/// Base colour of clustering nodes.
pub const CLUSTER_COLOR: &str = "#8b5cf6";

/// Base colour of event nodes.
pub const EVENT_COLOR: &str = "#eab308";

/// Opacity applied when de-emphasizing inactive nodes.
pub const DEFAULT_DIM_AMOUNT: f64 = 0.15;

// =============================================================================
// SIZES
// =============================================================================

/// Item size in fixed sizing mode.
pub const ITEM_FIXED_SIZE: f64 = 2.0;

/// Categorical node size in fixed sizing mode.
pub const CATEGORY_FIXED_SIZE: f64 = 6.0;

/// Clustering and event node size in fixed sizing mode.
pub const GROUP_FIXED_SIZE: f64 = 5.0;

/// Per-link growth of an item node in connections mode.
pub const ITEM_SIZE_PER_LINK: f64 = 0.8;

/// Floor of an item node in connections mode.
pub const ITEM_MIN_SIZE: f64 = 1.0;

/// Per-link growth of an overlay node in connections mode.
pub const GROUP_SIZE_PER_LINK: f64 = 0.5;

/// Floor of an overlay node in connections mode.
pub const GROUP_MIN_SIZE: f64 = 2.0;

/// Size of the center node of an ego graph.
pub const EGO_CENTER_SIZE: f64 = 4.0;

/// Size of neighbour nodes of an ego graph.
pub const EGO_NEIGHBOR_SIZE: f64 = 2.0;

/// Size of overlay nodes of an ego graph.
pub const EGO_GROUP_SIZE: f64 = 4.0;

/// Default force strength handed to the layout.
pub const DEFAULT_FORCE_STRENGTH: f64 = -30.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct() {
        assert_ne!(CATEGORY_ID_PREFIX, CLUSTER_ID_PREFIX);
        assert_ne!(CLUSTER_ID_PREFIX, EVENT_ID_PREFIX);
        assert_ne!(CATEGORY_ID_PREFIX, EVENT_ID_PREFIX);
    }
}

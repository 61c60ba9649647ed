//! # facetgraph-core
//!
//! The graph-construction engine for facetgraph - THE LOGIC.
//!
//! Turns a catalog of primary items and three independent kinds of overlay
//! groups (categories, clusters, events) into renderable node/link graphs:
//! - the explorer graph, filtered by per-group toggles
//! - the ego graph, centred on one item
//!
//! ## Architectural Constraints
//!
//! - Pure transforms: every build is a function of its inputs, nothing is cached
//! - Total: dangling memberships and duplicate ids are tolerated, never fatal
//! - Deterministic: identical inputs produce identical output, order included
//! - No async, no network, no logging; the app layer owns all of that

// =============================================================================
// MODULES
// =============================================================================

pub mod assembler;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod ego;
pub mod formats;
pub mod present;
pub mod primitives;
pub mod resolver;
pub mod scope;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ActiveSet, CategorySummary, ClusterSummary, EventSummary, FacetGraphError, GraphData,
    GraphLink, GraphNode, GroupId, ItemId, LinkType, NodeData, NodeId, NodeType, OverlayKind,
};

// =============================================================================
// RE-EXPORTS: Catalog & Configuration
// =============================================================================

pub use catalog::{
    Catalog, CategoryGroup, ClusterGroup, EventGroup, OverlayGroup, PrimaryItem, WeightedMember,
};
pub use config::{DisplayOptions, FilterMode, LabelMode, SizeMode, Toggles};

// =============================================================================
// RE-EXPORTS: Graph Engine
// =============================================================================

pub use assembler::{GraphAssembler, connection_counts, connection_size};
pub use audit::{CatalogAudit, DanglingMember, GroupRef, audit};
pub use ego::{EgoAssembler, EgoCenter, EgoGroup, EgoInput, NeighborItem, ego_active_set};
pub use resolver::{Resolution, compute_active_set, resolve};
pub use scope::{find_by_slug, locate_center, scope_ego};

// =============================================================================
// RE-EXPORTS: Presentation & Formats
// =============================================================================

pub use formats::{MAX_SNAPSHOT_SIZE, catalog_from_json, ego_input_from_json, graph_to_json};
pub use present::{assign_slugs, dim_color, format_duration, slugify};

//! # Core Type Definitions
//!
//! This module contains the output-side types of the facetgraph engine:
//! - Identifiers (`ItemId`, `GroupId`, `NodeId`)
//! - Overlay kinds and the tags they produce (`OverlayKind`, `NodeType`, `LinkType`)
//! - Graph output structures (`GraphNode`, `NodeData`, `GraphLink`, `GraphData`)
//! - The focus set (`ActiveSet`)
//! - Error types (`FacetGraphError`)
//!
//! ## Determinism Guarantees
//!
//! Identifiers implement `Ord` so that every set that leaves the engine is a
//! `BTreeSet` and serializes in the same order on every run.

use crate::catalog::PrimaryItem;
use crate::primitives;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a primary item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an overlay group, unique within its kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    /// Create a new group id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a node in a produced graph.
///
/// Item nodes reuse the item id verbatim; overlay nodes use the group id
/// behind a kind prefix (see [`NodeId::overlay`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Node id of a primary item.
    #[must_use]
    pub fn item(id: &ItemId) -> Self {
        Self(id.0.clone())
    }

    /// Synthetic node id of an overlay group.
    #[must_use]
    pub fn overlay(kind: OverlayKind, id: &GroupId) -> Self {
        Self(format!("{}{}", kind.id_prefix(), id.0))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// OVERLAY KINDS
// =============================================================================

/// The three independent overlay-group kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Categorical groupings (genre, theme, format).
    Category,
    /// Clustering groupings (semantic clusters).
    Cluster,
    /// Event groupings (screenings, sessions).
    Event,
}

impl OverlayKind {
    /// All kinds in emission order.
    pub const ALL: [OverlayKind; 3] = [Self::Category, Self::Cluster, Self::Event];

    /// Prefix that namespaces synthetic node ids of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Category => primitives::CATEGORY_ID_PREFIX,
            Self::Cluster => primitives::CLUSTER_ID_PREFIX,
            Self::Event => primitives::EVENT_ID_PREFIX,
        }
    }

    /// Node type tag of overlay nodes of this kind.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        match self {
            Self::Category => NodeType::Category,
            Self::Cluster => NodeType::Cluster,
            Self::Event => NodeType::Event,
        }
    }

    /// Link type tag produced by groups of this kind.
    #[must_use]
    pub const fn link_type(self) -> LinkType {
        match self {
            Self::Category => LinkType::ItemCategory,
            Self::Cluster => LinkType::ItemCluster,
            Self::Event => LinkType::ItemEvent,
        }
    }

    /// Size used in fixed sizing mode.
    #[must_use]
    pub const fn fixed_size(self) -> f64 {
        match self {
            Self::Category => primitives::CATEGORY_FIXED_SIZE,
            Self::Cluster | Self::Event => primitives::GROUP_FIXED_SIZE,
        }
    }

    /// Lowercase name, as used in CLI toggle specs and config tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Cluster => "cluster",
            Self::Event => "event",
        }
    }

    /// Parse a kind name. Accepts singular and plural forms.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "categories" | "cat" => Some(Self::Category),
            "cluster" | "clusters" | "cl" => Some(Self::Cluster),
            "event" | "events" | "ev" => Some(Self::Event),
            _ => None,
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type tag carried by every graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A primary catalog item.
    Item,
    /// A categorical overlay group.
    Category,
    /// A clustering overlay group.
    Cluster,
    /// An event overlay group.
    Event,
}

impl NodeType {
    /// Base colour for nodes of this type.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Item => primitives::ITEM_COLOR,
            Self::Category => primitives::CATEGORY_COLOR,
            Self::Cluster => primitives::CLUSTER_COLOR,
            Self::Event => primitives::EVENT_COLOR,
        }
    }

    /// Whether this is an item node.
    #[must_use]
    pub const fn is_item(self) -> bool {
        matches!(self, Self::Item)
    }
}

/// Link type tag identifying the overlay kind that produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Item → categorical group.
    #[serde(rename = "item-category")]
    ItemCategory,
    /// Item → clustering group.
    #[serde(rename = "item-cluster")]
    ItemCluster,
    /// Item → event group.
    #[serde(rename = "item-event")]
    ItemEvent,
}

// =============================================================================
// NODE PAYLOADS
// =============================================================================

/// Summary payload of a categorical group node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
    pub item_count: usize,
}

/// Summary payload of a clustering group node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub item_count: usize,
}

/// Summary payload of an event group node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: GroupId,
    pub name: String,
    pub item_count: usize,
}

/// Opaque payload attached to a node, tagged by kind.
///
/// Adjacently tagged: item attributes are free-form and may themselves
/// carry a `kind` key, so the payload lives under `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum NodeData {
    /// The primary item the node stands for.
    Item(PrimaryItem),
    /// Categorical group summary.
    Category(CategorySummary),
    /// Clustering group summary.
    Cluster(ClusterSummary),
    /// Event group summary.
    Event(EventSummary),
}

// =============================================================================
// GRAPH NODE & LINK
// =============================================================================

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    /// Relative node size (the renderer's `val`).
    pub val: f64,
    pub color: String,
    pub active: bool,
    pub visible: bool,
    pub data: NodeData,
}

impl GraphNode {
    /// Create a node with the base colour of its type.
    #[must_use]
    pub fn new(
        id: NodeId,
        node_type: NodeType,
        label: impl Into<String>,
        val: f64,
        active: bool,
        data: NodeData,
    ) -> Self {
        Self {
            id,
            node_type,
            label: label.into(),
            val,
            color: node_type.color().to_string(),
            active,
            visible: true,
            data,
        }
    }
}

/// An undirected association between an item node and an overlay node.
///
/// `source` is always the item, `target` the overlay node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl GraphLink {
    /// Create a new link.
    #[must_use]
    pub const fn new(source: NodeId, target: NodeId, link_type: LinkType) -> Self {
        Self {
            source,
            target,
            link_type,
        }
    }
}

// =============================================================================
// ACTIVE SET
// =============================================================================

/// The primary items currently in focus.
///
/// Uses `BTreeSet` for deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveSet {
    ids: BTreeSet<ItemId>,
}

impl ActiveSet {
    /// Create an empty active set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an item is in focus.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Number of items in focus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is in focus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Whether every id of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &ActiveSet) -> bool {
        self.ids.is_subset(&other.ids)
    }
}

impl FromIterator<ItemId> for ActiveSet {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// GRAPH DATA
// =============================================================================

/// A complete produced graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub active_ids: ActiveSet,
}

impl GraphData {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Nodes of one type, in emission order.
    pub fn nodes_of(&self, node_type: NodeType) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Replace the colour of every inactive node with its dimmed variant.
    ///
    /// Colours that cannot be parsed are left untouched.
    pub fn dim_inactive(&mut self, amount: f64) {
        for node in self.nodes.iter_mut().filter(|n| !n.active) {
            if let Some(dimmed) = crate::present::dim_color(&node.color, amount) {
                node.color = dimmed;
            }
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised at the engine's I/O boundary.
///
/// Graph construction itself is total; these only arise when decoding
/// snapshots or configuration, or when a caller names something that
/// does not exist.
#[derive(Debug, Error)]
pub enum FacetGraphError {
    /// A catalog or ego-input snapshot could not be decoded.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A configuration document could not be decoded.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A toggle spec was not of the form `kind:id`.
    #[error("Invalid toggle '{0}': expected kind:id")]
    InvalidToggle(String),

    /// The requested center item is not in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An ego graph was requested without naming a center.
    #[error("Ego graph needs a center id or slug")]
    MissingCenter,

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

//! # Ego-Graph Assembler
//!
//! Builds the small per-item graph shown on an item's detail view: the
//! center item, its neighbours, and the overlay groups that relate them.
//!
//! The input is already scoped to the center item (see [`crate::scope`]).
//! Toggle state plays no part here: every supplied group is active and
//! every neighbour is dimmed.

use crate::assembler::Emitter;
use crate::catalog::PrimaryItem;
use crate::primitives::{EGO_CENTER_SIZE, EGO_GROUP_SIZE, EGO_NEIGHBOR_SIZE};
use crate::types::{
    ActiveSet, CategorySummary, ClusterSummary, EventSummary, GraphData, GraphLink, GraphNode,
    GroupId, ItemId, NodeData, NodeId, NodeType, OverlayKind,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// INPUT
// =============================================================================

/// The item an ego graph is centred on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgoCenter {
    pub id: ItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A neighbouring item summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// An overlay group summary, pre-scoped to relevant items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgoGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
}

impl EgoGroup {
    /// Create a group summary.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, item_ids: &[&str]) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            item_ids: item_ids.iter().map(|m| ItemId::new(*m)).collect(),
        }
    }
}

/// Everything the ego assembler needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgoInput {
    pub center: EgoCenter,
    #[serde(default)]
    pub categories: Vec<EgoGroup>,
    #[serde(default)]
    pub clusters: Vec<EgoGroup>,
    #[serde(default)]
    pub events: Vec<EgoGroup>,
    #[serde(default)]
    pub neighbors: Vec<NeighborItem>,
}

impl EgoInput {
    /// Create an input with only a center.
    #[must_use]
    pub fn new(center: EgoCenter) -> Self {
        Self {
            center,
            categories: Vec::new(),
            clusters: Vec::new(),
            events: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// The group list of one kind.
    #[must_use]
    pub fn groups(&self, kind: OverlayKind) -> &[EgoGroup] {
        match kind {
            OverlayKind::Category => &self.categories,
            OverlayKind::Cluster => &self.clusters,
            OverlayKind::Event => &self.events,
        }
    }
}

// =============================================================================
// EGO ASSEMBLER
// =============================================================================

/// Builds ego graphs.
pub struct EgoAssembler;

impl EgoAssembler {
    /// Build the ego graph. The active set is exactly the center id.
    #[must_use]
    pub fn build(input: &EgoInput) -> GraphData {
        let mut emitter = Emitter::new();
        let mut present: HashSet<&ItemId> = HashSet::new();

        let center = &input.center;
        let mut center_item = PrimaryItem::new(center.id.0.clone(), center.title.clone());
        if let Some(slug) = &center.slug {
            center_item = center_item.with_attribute("slug", slug.clone());
        }
        emitter.push_node(GraphNode::new(
            NodeId::item(&center.id),
            NodeType::Item,
            center.title.clone(),
            EGO_CENTER_SIZE,
            true,
            NodeData::Item(center_item),
        ));
        present.insert(&center.id);

        for neighbor in &input.neighbors {
            if present.contains(&neighbor.id) {
                continue;
            }
            let node_id = NodeId::item(&neighbor.id);
            if emitter.is_taken(&node_id) {
                continue;
            }
            present.insert(&neighbor.id);
            emitter.push_node(GraphNode::new(
                node_id,
                NodeType::Item,
                neighbor.title.clone(),
                EGO_NEIGHBOR_SIZE,
                false,
                NodeData::Item(neighbor_item(neighbor)),
            ));
        }

        for kind in OverlayKind::ALL {
            for group in input.groups(kind) {
                let node_id = NodeId::overlay(kind, &group.id);
                let emitted = emitter.push_node(GraphNode::new(
                    node_id.clone(),
                    kind.node_type(),
                    group.name.clone(),
                    EGO_GROUP_SIZE,
                    true,
                    summary(kind, group),
                ));
                if !emitted {
                    continue;
                }

                let mut linked = HashSet::new();
                for member in &group.item_ids {
                    if present.contains(member) && linked.insert(member) {
                        emitter.push_link(GraphLink::new(
                            NodeId::item(member),
                            node_id.clone(),
                            kind.link_type(),
                        ));
                    }
                }
            }
        }

        emitter.finish(ego_active_set(input))
    }
}

fn neighbor_item(neighbor: &NeighborItem) -> PrimaryItem {
    let mut item = PrimaryItem::new(neighbor.id.0.clone(), neighbor.title.clone());
    if let Some(length) = neighbor.length {
        item = item.with_attribute("length", length);
    }
    if let Some(slug) = &neighbor.slug {
        item = item.with_attribute("slug", slug.clone());
    }
    item
}

fn summary(kind: OverlayKind, group: &EgoGroup) -> NodeData {
    let item_count = group.item_ids.len();
    match kind {
        OverlayKind::Category => NodeData::Category(CategorySummary {
            id: group.id.clone(),
            name: group.name.clone(),
            description: None,
            category_type: None,
            item_count,
        }),
        OverlayKind::Cluster => NodeData::Cluster(ClusterSummary {
            id: group.id.clone(),
            name: group.name.clone(),
            description: None,
            keywords: Vec::new(),
            item_count,
        }),
        OverlayKind::Event => NodeData::Event(EventSummary {
            id: group.id.clone(),
            name: group.name.clone(),
            item_count,
        }),
    }
}

/// The singleton active set of an ego graph.
#[must_use]
pub fn ego_active_set(input: &EgoInput) -> ActiveSet {
    std::iter::once(input.center.id.clone()).collect()
}

// =============================================================================
// TESTS
// =============================================================================

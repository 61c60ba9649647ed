//! # Catalog Model
//!
//! Read-only snapshot of primary items and the three overlay-group
//! collections that reference them.
//!
//! The catalog is supplied whole by the caller and never mutated by the
//! engine. Memberships may reference ids that are not in the snapshot;
//! the assemblers drop those rather than rejecting the catalog.

use crate::types::{
    CategorySummary, ClusterSummary, EventSummary, GroupId, ItemId, NodeData, OverlayKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

// =============================================================================
// PRIMARY ITEM
// =============================================================================

/// A primary catalog entity (e.g. a submitted work).
///
/// Every field besides `id` and `title` is kept verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryItem {
    #[serde(alias = "_id")]
    pub id: ItemId,
    #[serde(default, alias = "englishTitle")]
    pub title: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl PrimaryItem {
    /// Create an item with no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// A string attribute, if present and a string.
    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Running time in minutes, from the `length` attribute.
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.attributes.get("length").and_then(Value::as_u64)
    }
}

// =============================================================================
// OVERLAY GROUPS
// =============================================================================

/// Common view over the three overlay-group kinds.
///
/// The resolver and the assembler are written once against this trait and
/// instantiated per kind.
pub trait OverlayGroup {
    /// The kind every group of this type belongs to.
    const KIND: OverlayKind;

    /// Group id, unique within the kind.
    fn id(&self) -> &GroupId;

    /// Display name.
    fn name(&self) -> &str;

    /// Raw membership. May repeat ids and reference unknown items.
    fn members(&self) -> impl Iterator<Item = &ItemId>;

    /// Node payload for this group given its number of valid members.
    fn summary(&self, item_count: usize) -> NodeData;
}

/// A weighted membership entry. The score is carried but never used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedMember {
    pub item_id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A categorical grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
    #[serde(default)]
    pub members: Vec<WeightedMember>,
}

impl CategoryGroup {
    /// Create a category with unweighted members.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            description: None,
            category_type: None,
            members: members
                .iter()
                .map(|m| WeightedMember {
                    item_id: ItemId::new(*m),
                    score: None,
                })
                .collect(),
        }
    }
}

impl OverlayGroup for CategoryGroup {
    const KIND: OverlayKind = OverlayKind::Category;

    fn id(&self) -> &GroupId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> impl Iterator<Item = &ItemId> {
        self.members.iter().map(|m| &m.item_id)
    }

    fn summary(&self, item_count: usize) -> NodeData {
        NodeData::Category(CategorySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category_type: self.category_type.clone(),
            item_count,
        })
    }
}

/// A clustering grouping. Membership is highlighted ∪ relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub highlighted: Vec<ItemId>,
    #[serde(default)]
    pub relevant: Vec<ItemId>,
}

impl ClusterGroup {
    /// Create a cluster from its highlighted and relevant members.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        highlighted: &[&str],
        relevant: &[&str],
    ) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            description: None,
            keywords: Vec::new(),
            highlighted: highlighted.iter().map(|m| ItemId::new(*m)).collect(),
            relevant: relevant.iter().map(|m| ItemId::new(*m)).collect(),
        }
    }
}

impl OverlayGroup for ClusterGroup {
    const KIND: OverlayKind = OverlayKind::Cluster;

    fn id(&self) -> &GroupId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> impl Iterator<Item = &ItemId> {
        self.highlighted.iter().chain(self.relevant.iter())
    }

    fn summary(&self, item_count: usize) -> NodeData {
        NodeData::Cluster(ClusterSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            item_count,
        })
    }
}

/// An event grouping (a screening, a session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<ItemId>,
}

impl EventGroup {
    /// Create an event.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            members: members.iter().map(|m| ItemId::new(*m)).collect(),
        }
    }
}

impl OverlayGroup for EventGroup {
    const KIND: OverlayKind = OverlayKind::Event;

    fn id(&self) -> &GroupId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> impl Iterator<Item = &ItemId> {
        self.members.iter()
    }

    fn summary(&self, item_count: usize) -> NodeData {
        NodeData::Event(EventSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            item_count,
        })
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// A complete catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<PrimaryItem>,
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
    #[serde(default)]
    pub clusters: Vec<ClusterGroup>,
    #[serde(default)]
    pub events: Vec<EventGroup>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of catalog-known item ids, for O(1) membership checks.
    #[must_use]
    pub fn item_index(&self) -> HashSet<&ItemId> {
        self.items.iter().map(|item| &item.id).collect()
    }

    /// Look up an item by id. First occurrence wins.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&PrimaryItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Total number of overlay groups across all kinds.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.categories.len() + self.clusters.len() + self.events.len()
    }
}

/// Filter a group's membership to catalog-known ids, deduplicated,
/// preserving first-seen order.
pub fn valid_members<'a, G: OverlayGroup>(
    group: &'a G,
    known: &HashSet<&ItemId>,
) -> Vec<&'a ItemId> {
    let mut seen = HashSet::new();
    group
        .members()
        .filter(|id| known.contains(id) && seen.insert(*id))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_membership_chains_both_lists() {
        let cluster = ClusterGroup::new("c1", "Urban", &["a", "b"], &["b", "c"]);
        let ids: Vec<_> = cluster.members().map(ItemId::as_str).collect();
        assert_eq!(ids, vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn valid_members_dedups_and_drops_unknown() {
        let catalog = Catalog {
            items: vec![PrimaryItem::new("a", "A"), PrimaryItem::new("b", "B")],
            ..Catalog::default()
        };
        let cluster = ClusterGroup::new("c1", "Urban", &["b", "ghost", "a"], &["b"]);
        let known = catalog.item_index();
        let ids: Vec<_> = valid_members(&cluster, &known)
            .into_iter()
            .map(ItemId::as_str)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn item_keeps_unknown_fields_as_attributes() {
        let json = r#"{"_id":"f1","englishTitle":"Dawn Chorus","director":"Ana","length":8}"#;
        let item: PrimaryItem = serde_json::from_str(json).expect("decode");
        assert_eq!(item.id.as_str(), "f1");
        assert_eq!(item.title, "Dawn Chorus");
        assert_eq!(item.attribute_str("director"), Some("Ana"));
        assert_eq!(item.length(), Some(8));
    }

    #[test]
    fn catalog_collections_default_to_empty() {
        let catalog: Catalog = serde_json::from_str(r#"{"items":[]}"#).expect("decode");
        assert_eq!(catalog.group_count(), 0);
    }
}

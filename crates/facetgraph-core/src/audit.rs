//! # Catalog Audit
//!
//! Reports the irregularities the assemblers silently tolerate: duplicate
//! ids, dangling memberships, groups that would be omitted, overlay ids that
//! collide with item ids, and toggles that name no group.
//!
//! The graph build never consults the audit. It exists so the binary can
//! surface these conditions instead of leaving them invisible.

use crate::catalog::{Catalog, OverlayGroup, valid_members};
use crate::config::Toggles;
use crate::types::{GroupId, ItemId, NodeId, OverlayKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A membership entry that references an item missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingMember {
    pub kind: OverlayKind,
    pub group: GroupId,
    pub item: ItemId,
}

/// A `(kind, group)` reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRef {
    pub kind: OverlayKind,
    pub group: GroupId,
}

/// Findings of a catalog audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAudit {
    pub item_count: usize,
    pub category_count: usize,
    pub cluster_count: usize,
    pub event_count: usize,
    /// Sum of the `length` attribute over distinct items, in minutes.
    pub total_length: u64,
    pub duplicate_items: BTreeSet<ItemId>,
    pub duplicate_groups: BTreeSet<GroupRef>,
    pub dangling_members: Vec<DanglingMember>,
    pub empty_groups: Vec<GroupRef>,
    pub id_collisions: Vec<GroupRef>,
    pub stale_toggles: Vec<GroupRef>,
}

impl CatalogAudit {
    /// Whether nothing irregular was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_items.is_empty()
            && self.duplicate_groups.is_empty()
            && self.dangling_members.is_empty()
            && self.empty_groups.is_empty()
            && self.id_collisions.is_empty()
            && self.stale_toggles.is_empty()
    }
}

/// Audit a catalog against a toggle state.
#[must_use]
pub fn audit(catalog: &Catalog, toggles: &Toggles) -> CatalogAudit {
    let known = catalog.item_index();
    let mut report = CatalogAudit {
        item_count: known.len(),
        category_count: catalog.categories.len(),
        cluster_count: catalog.clusters.len(),
        event_count: catalog.events.len(),
        ..CatalogAudit::default()
    };

    let mut seen_items = HashSet::new();
    for item in &catalog.items {
        if seen_items.insert(&item.id) {
            report.total_length = report.total_length.saturating_add(item.length().unwrap_or(0));
        } else {
            report.duplicate_items.insert(item.id.clone());
        }
    }

    let item_node_ids: HashSet<NodeId> = known.iter().map(|id| NodeId::item(id)).collect();
    audit_groups(&catalog.categories, &known, &item_node_ids, toggles, &mut report);
    audit_groups(&catalog.clusters, &known, &item_node_ids, toggles, &mut report);
    audit_groups(&catalog.events, &known, &item_node_ids, toggles, &mut report);

    report
}

fn audit_groups<G: OverlayGroup>(
    groups: &[G],
    known: &HashSet<&ItemId>,
    item_node_ids: &HashSet<NodeId>,
    toggles: &Toggles,
    report: &mut CatalogAudit,
) {
    let kind = G::KIND;
    let mut seen: HashSet<&GroupId> = HashSet::new();

    for group in groups {
        let group_ref = GroupRef {
            kind,
            group: group.id().clone(),
        };
        if !seen.insert(group.id()) {
            report.duplicate_groups.insert(group_ref.clone());
        }

        let mut reported = HashSet::new();
        for member in group.members() {
            if !known.contains(member) && reported.insert(member) {
                report.dangling_members.push(DanglingMember {
                    kind,
                    group: group.id().clone(),
                    item: member.clone(),
                });
            }
        }

        if valid_members(group, known).is_empty() {
            report.empty_groups.push(group_ref.clone());
        }
        if item_node_ids.contains(&NodeId::overlay(kind, group.id())) {
            report.id_collisions.push(group_ref);
        }
    }

    for (id, &enabled) in toggles.for_kind(kind) {
        if enabled && !seen.contains(id) {
            report.stale_toggles.push(GroupRef {
                kind,
                group: id.clone(),
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryGroup, ClusterGroup, EventGroup, PrimaryItem};

    #[test]
    fn clean_catalog_reports_nothing() {
        let catalog = Catalog {
            items: vec![
                PrimaryItem::new("a", "A").with_attribute("length", 50),
                PrimaryItem::new("b", "B").with_attribute("length", 25),
            ],
            categories: vec![CategoryGroup::new("doc", "Doc", &["a"])],
            clusters: vec![ClusterGroup::new("c", "C", &["a"], &["b"])],
            events: vec![EventGroup::new("e", "E", &["b"])],
        };
        let report = audit(&catalog, &Toggles::new().with(OverlayKind::Event, "e"));
        assert!(report.is_clean());
        assert_eq!(report.item_count, 2);
        assert_eq!(report.total_length, 75);
    }

    #[test]
    fn finds_every_irregularity() {
        let catalog = Catalog {
            items: vec![
                PrimaryItem::new("a", "A"),
                PrimaryItem::new("a", "A again"),
                PrimaryItem::new("cl-x", "Looks like a cluster"),
            ],
            categories: vec![
                CategoryGroup::new("doc", "Doc", &["a", "ghost", "ghost"]),
                CategoryGroup::new("doc", "Doc twin", &["a"]),
            ],
            clusters: vec![ClusterGroup::new("x", "X", &["a"], &[])],
            events: vec![EventGroup::new("e", "E", &["nobody"])],
        };
        let toggles = Toggles::new()
            .with(OverlayKind::Cluster, "gone")
            .with(OverlayKind::Event, "e");
        let report = audit(&catalog, &toggles);

        assert!(report.duplicate_items.contains(&ItemId::new("a")));
        assert_eq!(report.duplicate_groups.len(), 1);
        assert_eq!(report.dangling_members.len(), 2);
        assert_eq!(
            report.empty_groups,
            vec![GroupRef {
                kind: OverlayKind::Event,
                group: GroupId::new("e"),
            }]
        );
        assert_eq!(
            report.id_collisions,
            vec![GroupRef {
                kind: OverlayKind::Cluster,
                group: GroupId::new("x"),
            }]
        );
        assert_eq!(
            report.stale_toggles,
            vec![GroupRef {
                kind: OverlayKind::Cluster,
                group: GroupId::new("gone"),
            }]
        );
        assert!(!report.is_clean());
    }
}

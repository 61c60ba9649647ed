//! # Ego Scoping
//!
//! Derives an [`EgoInput`] for one item from a full catalog: the groups
//! that list the item, trimmed to catalog-known members, and every other
//! item those groups reach.
//!
//! Toggles and show switches do not apply; scoping looks at all three kinds.

use crate::catalog::{Catalog, OverlayGroup, PrimaryItem, valid_members};
use crate::ego::{EgoCenter, EgoGroup, EgoInput, NeighborItem};
use crate::present::assign_slugs;
use crate::types::{FacetGraphError, ItemId, OverlayKind};
use std::collections::{BTreeMap, HashSet};

/// Scope the catalog to one center item.
///
/// Returns `None` if the center is not in the catalog.
#[must_use]
pub fn scope_ego(catalog: &Catalog, center_id: &ItemId) -> Option<EgoInput> {
    let center = catalog.item(center_id)?;
    let known = catalog.item_index();
    let slugs = assign_slugs(&catalog.items);

    let mut input = EgoInput::new(EgoCenter {
        id: center.id.clone(),
        title: display_title(center),
        slug: slugs.get(&center.id).cloned(),
    });
    input.categories = related_groups(&catalog.categories, center_id, &known);
    input.clusters = related_groups(&catalog.clusters, center_id, &known);
    input.events = related_groups(&catalog.events, center_id, &known);

    let mut seen: HashSet<&ItemId> = HashSet::new();
    seen.insert(center_id);
    let mut neighbor_ids = Vec::new();
    for kind in OverlayKind::ALL {
        for group in input.groups(kind) {
            for id in &group.item_ids {
                if seen.insert(id) {
                    neighbor_ids.push(id.clone());
                }
            }
        }
    }

    input.neighbors = neighbor_ids
        .iter()
        .filter_map(|id| catalog.item(id))
        .map(|item| NeighborItem {
            id: item.id.clone(),
            title: display_title(item),
            length: item.length(),
            slug: slugs.get(&item.id).cloned(),
        })
        .collect();

    Some(input)
}

/// Find an item by its generated slug.
#[must_use]
pub fn find_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Option<&'a ItemId> {
    let slugs: BTreeMap<ItemId, String> = assign_slugs(&catalog.items);
    catalog
        .items
        .iter()
        .map(|item| &item.id)
        .find(|id| slugs.get(*id).is_some_and(|s| s == slug))
}

/// Resolve an ego center named by id or by slug. The id wins if both are given.
pub fn locate_center<'a>(
    catalog: &'a Catalog,
    id: Option<&str>,
    slug: Option<&str>,
) -> Result<&'a ItemId, FacetGraphError> {
    match (id, slug) {
        (Some(id), _) => catalog
            .item(&ItemId::new(id))
            .map(|item| &item.id)
            .ok_or_else(|| FacetGraphError::ItemNotFound(id.to_string())),
        (None, Some(slug)) => {
            find_by_slug(catalog, slug).ok_or_else(|| FacetGraphError::ItemNotFound(slug.to_string()))
        }
        (None, None) => Err(FacetGraphError::MissingCenter),
    }
}

/// Title used for labels; empty titles read "Untitled".
fn display_title(item: &PrimaryItem) -> String {
    if item.title.is_empty() {
        "Untitled".to_string()
    } else {
        item.title.clone()
    }
}

fn related_groups<G: OverlayGroup>(
    groups: &[G],
    center_id: &ItemId,
    known: &HashSet<&ItemId>,
) -> Vec<EgoGroup> {
    groups
        .iter()
        .filter(|group| group.members().any(|id| id == center_id))
        .map(|group| EgoGroup {
            id: group.id().clone(),
            name: group.name().to_string(),
            item_ids: valid_members(group, known).into_iter().cloned().collect(),
        })
        .filter(|group| !group.item_ids.is_empty())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryGroup, ClusterGroup, EventGroup};
    use crate::ego::EgoAssembler;

    fn catalog() -> Catalog {
        Catalog {
            items: vec![
                PrimaryItem::new("f1", "Dawn Chorus").with_attribute("length", 12),
                PrimaryItem::new("f2", "Concrete Lullaby").with_attribute("length", 8),
                PrimaryItem::new("f3", ""),
                PrimaryItem::new("f4", "Quiet Machines"),
            ],
            categories: vec![
                CategoryGroup::new("doc", "Documentary", &["f1", "f2", "ghost"]),
                CategoryGroup::new("exp", "Experimental", &["f4"]),
            ],
            clusters: vec![ClusterGroup::new("urban", "Urban", &["f1"], &["f3", "f2"])],
            events: vec![EventGroup::new("s1", "Screening 1", &["f1"])],
        }
    }

    #[test]
    fn unknown_center_yields_none() {
        assert!(scope_ego(&catalog(), &ItemId::new("nope")).is_none());
    }

    #[test]
    fn keeps_only_groups_listing_the_center() {
        let input = scope_ego(&catalog(), &ItemId::new("f1")).expect("scoped");
        let names: Vec<_> = input.categories.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(names, vec!["doc"]);
        assert_eq!(input.clusters.len(), 1);
        assert_eq!(input.events.len(), 1);
    }

    #[test]
    fn members_are_filtered_to_catalog() {
        let input = scope_ego(&catalog(), &ItemId::new("f1")).expect("scoped");
        let doc: Vec<_> = input.categories[0].item_ids.iter().map(ItemId::as_str).collect();
        assert_eq!(doc, vec!["f1", "f2"]);
    }

    #[test]
    fn neighbors_exclude_center_in_first_seen_order() {
        let input = scope_ego(&catalog(), &ItemId::new("f1")).expect("scoped");
        let ids: Vec<_> = input.neighbors.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["f2", "f3"]);
        assert_eq!(input.neighbors[0].length, Some(8));
        assert_eq!(input.neighbors[1].title, "Untitled");
        assert_eq!(input.center.slug.as_deref(), Some("dawn-chorus"));
    }

    #[test]
    fn untitled_center_is_labelled_like_neighbors() {
        let input = scope_ego(&catalog(), &ItemId::new("f3")).expect("scoped");
        assert_eq!(input.center.title, "Untitled");

        let graph = EgoAssembler::build(&input);
        assert_eq!(graph.node("f3").map(|n| n.label.as_str()), Some("Untitled"));
    }

    #[test]
    fn find_by_slug_matches_generated_slug() {
        let catalog = catalog();
        assert_eq!(
            find_by_slug(&catalog, "quiet-machines").map(ItemId::as_str),
            Some("f4")
        );
        assert!(find_by_slug(&catalog, "missing").is_none());
    }

    #[test]
    fn locate_center_by_id_or_slug() {
        let catalog = catalog();
        assert_eq!(
            locate_center(&catalog, Some("f2"), None).map(ItemId::as_str).ok(),
            Some("f2")
        );
        assert_eq!(
            locate_center(&catalog, None, Some("dawn-chorus")).map(ItemId::as_str).ok(),
            Some("f1")
        );
        assert!(matches!(
            locate_center(&catalog, Some("f9"), None),
            Err(FacetGraphError::ItemNotFound(_))
        ));
        assert!(matches!(
            locate_center(&catalog, None, None),
            Err(FacetGraphError::MissingCenter)
        ));
    }
}

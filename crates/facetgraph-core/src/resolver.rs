//! # Active-Set Resolver
//!
//! Computes which primary items are in focus for a toggle selection.
//!
//! - A kind contributes only if its show switch is on and one of its
//!   toggles is true.
//! - No contributing kind, or no enabled toggle that names a real group,
//!   means nothing is filtered out.
//! - Otherwise the member sets of the enabled groups are combined by
//!   union or intersection. Set algebra only, so group order is irrelevant.

use crate::catalog::{Catalog, OverlayGroup};
use crate::config::{DisplayOptions, FilterMode, Toggles};
use crate::types::{ActiveSet, ItemId, OverlayKind};
use std::collections::HashSet;

/// Outcome of resolution, with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No kind contributes; every item is active.
    Unfiltered(ActiveSet),
    /// Kinds contribute but no enabled toggle matched a group.
    Fallback(ActiveSet),
    /// The enabled groups' member sets were combined.
    Filtered(ActiveSet),
}

impl Resolution {
    /// The resolved active set.
    #[must_use]
    pub fn active_set(&self) -> &ActiveSet {
        match self {
            Self::Unfiltered(set) | Self::Fallback(set) | Self::Filtered(set) => set,
        }
    }

    /// Consume into the active set.
    #[must_use]
    pub fn into_active_set(self) -> ActiveSet {
        match self {
            Self::Unfiltered(set) | Self::Fallback(set) | Self::Filtered(set) => set,
        }
    }

    /// Whether the "all items" fallback was taken while filters were on.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Compute the active set.
#[must_use]
pub fn compute_active_set(
    catalog: &Catalog,
    toggles: &Toggles,
    display: &DisplayOptions,
) -> ActiveSet {
    resolve(catalog, toggles, display).into_active_set()
}

/// Compute the active set and report which path produced it.
#[must_use]
pub fn resolve(catalog: &Catalog, toggles: &Toggles, display: &DisplayOptions) -> Resolution {
    let contributes = |kind| display.shows(kind) && toggles.any_enabled(kind);

    let mut member_sets: Vec<HashSet<&ItemId>> = Vec::new();
    let mut any_contributing = false;

    if contributes(OverlayKind::Category) {
        any_contributing = true;
        collect_enabled(&catalog.categories, toggles, &mut member_sets);
    }
    if contributes(OverlayKind::Cluster) {
        any_contributing = true;
        collect_enabled(&catalog.clusters, toggles, &mut member_sets);
    }
    if contributes(OverlayKind::Event) {
        any_contributing = true;
        collect_enabled(&catalog.events, toggles, &mut member_sets);
    }

    if !any_contributing {
        return Resolution::Unfiltered(all_items(catalog));
    }
    let Some((first, rest)) = member_sets.split_first() else {
        return Resolution::Fallback(all_items(catalog));
    };

    let known = catalog.item_index();
    let combined: HashSet<&ItemId> = match display.filter_mode {
        FilterMode::Union => member_sets.iter().flatten().copied().collect(),
        FilterMode::Intersection => first
            .iter()
            .filter(|id| rest.iter().all(|set| set.contains(*id)))
            .copied()
            .collect(),
    };

    Resolution::Filtered(
        combined
            .into_iter()
            .filter(|id| known.contains(id))
            .cloned()
            .collect(),
    )
}

/// Push the raw member set of every enabled group.
fn collect_enabled<'a, G: OverlayGroup>(
    groups: &'a [G],
    toggles: &Toggles,
    out: &mut Vec<HashSet<&'a ItemId>>,
) {
    for group in groups {
        if toggles.is_enabled(G::KIND, group.id()) {
            out.push(group.members().collect());
        }
    }
}

fn all_items(catalog: &Catalog) -> ActiveSet {
    catalog.items.iter().map(|item| item.id.clone()).collect()
}

// =============================================================================
// TESTS
// =============================================================================

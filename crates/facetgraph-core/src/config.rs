//! # Toggle State & Display Configuration
//!
//! Both are owned by an external UI-state layer and passed in per call.
//! Field names follow the option names the rendering layer uses
//! (`sizeMode`, `filterMode`, ...).

use crate::primitives::DEFAULT_FORCE_STRENGTH;
use crate::types::{FacetGraphError, GroupId, OverlayKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// MODES
// =============================================================================

/// How node sizes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Proportional to incident links in the produced graph.
    #[default]
    Connections,
    /// Constant per node type.
    Fixed,
}

/// When the renderer draws labels. The engine passes it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    Always,
    #[default]
    Hover,
    Never,
}

/// How the member sets of enabled groups are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Union,
    Intersection,
}

// =============================================================================
// DISPLAY OPTIONS
// =============================================================================

/// Display configuration for the explorer graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    pub size_mode: SizeMode,
    pub label_mode: LabelMode,
    /// Layout-only; never read by the engine.
    pub force_strength: f64,
    pub filter_mode: FilterMode,
    pub show_categories: bool,
    pub show_clusters: bool,
    pub show_events: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            size_mode: SizeMode::default(),
            label_mode: LabelMode::default(),
            force_strength: DEFAULT_FORCE_STRENGTH,
            filter_mode: FilterMode::default(),
            show_categories: true,
            show_clusters: true,
            show_events: true,
        }
    }
}

impl DisplayOptions {
    /// Whether a kind participates in filtering and node emission.
    #[must_use]
    pub const fn shows(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::Category => self.show_categories,
            OverlayKind::Cluster => self.show_clusters,
            OverlayKind::Event => self.show_events,
        }
    }

    /// Set the show switch of a kind.
    pub fn set_shown(&mut self, kind: OverlayKind, shown: bool) {
        match kind {
            OverlayKind::Category => self.show_categories = shown,
            OverlayKind::Cluster => self.show_clusters = shown,
            OverlayKind::Event => self.show_events = shown,
        }
    }
}

// =============================================================================
// TOGGLES
// =============================================================================

/// Per-group enabled flags, one map per overlay kind.
///
/// A group absent from its map counts as disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Toggles {
    pub categories: BTreeMap<GroupId, bool>,
    pub clusters: BTreeMap<GroupId, bool>,
    pub events: BTreeMap<GroupId, bool>,
}

impl Toggles {
    /// Create an empty toggle state (everything off).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The toggle map of one kind.
    #[must_use]
    pub fn for_kind(&self, kind: OverlayKind) -> &BTreeMap<GroupId, bool> {
        match kind {
            OverlayKind::Category => &self.categories,
            OverlayKind::Cluster => &self.clusters,
            OverlayKind::Event => &self.events,
        }
    }

    fn for_kind_mut(&mut self, kind: OverlayKind) -> &mut BTreeMap<GroupId, bool> {
        match kind {
            OverlayKind::Category => &mut self.categories,
            OverlayKind::Cluster => &mut self.clusters,
            OverlayKind::Event => &mut self.events,
        }
    }

    /// Whether a specific group is toggled on.
    #[must_use]
    pub fn is_enabled(&self, kind: OverlayKind, id: &GroupId) -> bool {
        self.for_kind(kind).get(id).copied().unwrap_or(false)
    }

    /// Whether any group of a kind is toggled on.
    #[must_use]
    pub fn any_enabled(&self, kind: OverlayKind) -> bool {
        self.for_kind(kind).values().any(|&on| on)
    }

    /// Set one toggle.
    pub fn set(&mut self, kind: OverlayKind, id: GroupId, enabled: bool) {
        self.for_kind_mut(kind).insert(id, enabled);
    }

    /// Builder-style variant of [`Toggles::set`] that enables a group.
    #[must_use]
    pub fn with(mut self, kind: OverlayKind, id: impl Into<String>) -> Self {
        self.set(kind, GroupId::new(id), true);
        self
    }

    /// Enable a group from a `kind:id` spec, e.g. `category:doc`.
    ///
    /// Only the first `:` separates kind from id, so ids may contain colons.
    pub fn enable_spec(&mut self, spec: &str) -> Result<(), FacetGraphError> {
        let (kind, id) = spec
            .split_once(':')
            .ok_or_else(|| FacetGraphError::InvalidToggle(spec.to_string()))?;
        let kind =
            OverlayKind::parse(kind).ok_or_else(|| FacetGraphError::InvalidToggle(spec.to_string()))?;
        if id.is_empty() {
            return Err(FacetGraphError::InvalidToggle(spec.to_string()));
        }
        self.set(kind, GroupId::new(id), true);
        Ok(())
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: Toggles) {
        self.categories.extend(other.categories);
        self.clusters.extend(other.clusters);
        self.events.extend(other.events);
    }
}

// =============================================================================
// TESTS
// =============================================================================

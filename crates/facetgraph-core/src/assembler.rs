//! # Graph Assembler
//!
//! Builds the full explorer graph: one node per primary item, one node per
//! visible overlay group that keeps at least one valid member, and one link
//! per valid membership. Sizes are computed last, from the links actually
//! produced.
//!
//! The build is a pure function of its inputs. Nothing is cached between
//! calls.

use crate::catalog::{Catalog, OverlayGroup, valid_members};
use crate::config::{DisplayOptions, SizeMode, Toggles};
use crate::primitives::{
    GROUP_MIN_SIZE, GROUP_SIZE_PER_LINK, ITEM_FIXED_SIZE, ITEM_MIN_SIZE, ITEM_SIZE_PER_LINK,
};
use crate::resolver::compute_active_set;
use crate::types::{
    ActiveSet, GraphData, GraphLink, GraphNode, ItemId, NodeData, NodeId, NodeType, OverlayKind,
};
use std::collections::{HashMap, HashSet};

// =============================================================================
// EMITTER
// =============================================================================

/// Node/link accumulator that keeps node ids unique.
#[derive(Debug, Default)]
pub(crate) struct Emitter {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    taken: HashSet<NodeId>,
}

impl Emitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether a node id has already been emitted.
    pub(crate) fn is_taken(&self, id: &NodeId) -> bool {
        self.taken.contains(id)
    }

    /// Push a node. Returns `false` (and drops it) if its id is taken.
    pub(crate) fn push_node(&mut self, node: GraphNode) -> bool {
        if !self.taken.insert(node.id.clone()) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub(crate) fn push_link(&mut self, link: GraphLink) {
        self.links.push(link);
    }

    pub(crate) fn finish(self, active_ids: ActiveSet) -> GraphData {
        GraphData {
            nodes: self.nodes,
            links: self.links,
            active_ids,
        }
    }
}

// =============================================================================
// GRAPH ASSEMBLER
// =============================================================================

/// Builds explorer graphs from a catalog snapshot.
pub struct GraphAssembler;

impl GraphAssembler {
    /// Build the full graph for the given toggles and display options.
    #[must_use]
    pub fn build(catalog: &Catalog, toggles: &Toggles, display: &DisplayOptions) -> GraphData {
        let active = compute_active_set(catalog, toggles, display);
        Self::build_with_active(catalog, toggles, display, active)
    }

    /// Build the full graph around an already resolved active set.
    ///
    /// `active` should come from resolving the same catalog, toggles and
    /// display options; it is used as given.
    #[must_use]
    pub fn build_with_active(
        catalog: &Catalog,
        toggles: &Toggles,
        display: &DisplayOptions,
        active: ActiveSet,
    ) -> GraphData {
        let known = catalog.item_index();
        let mut emitter = Emitter::new();

        for item in &catalog.items {
            emitter.push_node(GraphNode::new(
                NodeId::item(&item.id),
                NodeType::Item,
                item.title.clone(),
                ITEM_FIXED_SIZE,
                active.contains(&item.id),
                NodeData::Item(item.clone()),
            ));
        }

        if display.shows(OverlayKind::Category) {
            emit_overlays(&catalog.categories, toggles, &known, &mut emitter);
        }
        if display.shows(OverlayKind::Cluster) {
            emit_overlays(&catalog.clusters, toggles, &known, &mut emitter);
        }
        if display.shows(OverlayKind::Event) {
            emit_overlays(&catalog.events, toggles, &known, &mut emitter);
        }

        let mut graph = emitter.finish(active);
        if display.size_mode == SizeMode::Connections {
            apply_connection_sizes(&mut graph);
        }
        graph
    }
}

/// Emit one node per group with valid members, plus its links.
fn emit_overlays<G: OverlayGroup>(
    groups: &[G],
    toggles: &Toggles,
    known: &HashSet<&ItemId>,
    emitter: &mut Emitter,
) {
    let kind = G::KIND;
    for group in groups {
        let members = valid_members(group, known);
        if members.is_empty() {
            continue;
        }

        let node_id = NodeId::overlay(kind, group.id());
        let emitted = emitter.push_node(GraphNode::new(
            node_id.clone(),
            kind.node_type(),
            group.name(),
            kind.fixed_size(),
            toggles.is_enabled(kind, group.id()),
            group.summary(members.len()),
        ));
        if !emitted {
            continue;
        }

        for member in members {
            emitter.push_link(GraphLink::new(
                NodeId::item(member),
                node_id.clone(),
                kind.link_type(),
            ));
        }
    }
}

/// Count link endpoints per node id.
#[must_use]
pub fn connection_counts(links: &[GraphLink]) -> HashMap<&NodeId, usize> {
    let mut counts: HashMap<&NodeId, usize> = HashMap::new();
    for link in links {
        *counts.entry(&link.source).or_default() += 1;
        *counts.entry(&link.target).or_default() += 1;
    }
    counts
}

/// Size of a node with `count` incident links in connections mode.
#[must_use]
pub fn connection_size(node_type: NodeType, count: usize) -> f64 {
    let count = count as f64;
    if node_type.is_item() {
        (count * ITEM_SIZE_PER_LINK).max(ITEM_MIN_SIZE)
    } else {
        (count * GROUP_SIZE_PER_LINK).max(GROUP_MIN_SIZE)
    }
}

fn apply_connection_sizes(graph: &mut GraphData) {
    let counts = connection_counts(&graph.links);
    for node in &mut graph.nodes {
        let count = counts.get(&node.id).copied().unwrap_or(0);
        node.val = connection_size(node.node_type, count);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryGroup, ClusterGroup, EventGroup, PrimaryItem};
    use crate::config::FilterMode;
    use crate::types::LinkType;

    fn catalog() -> Catalog {
        Catalog {
            items: vec![
                PrimaryItem::new("a", "Alpha"),
                PrimaryItem::new("b", "Beta"),
                PrimaryItem::new("c", "Gamma"),
            ],
            categories: vec![
                CategoryGroup::new("doc", "Documentary", &["a", "b", "a"]),
                CategoryGroup::new("empty", "Nothing", &["ghost"]),
            ],
            clusters: vec![ClusterGroup::new("urban", "Urban", &["a"], &["a", "c"])],
            events: vec![EventGroup::new("s1", "Screening 1", &["b"])],
        }
    }

    fn fixed() -> DisplayOptions {
        DisplayOptions {
            size_mode: SizeMode::Fixed,
            ..DisplayOptions::default()
        }
    }

    #[test]
    fn emits_items_then_overlays_in_order() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &fixed());
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "cat-doc", "cl-urban", "ev-s1"]);
    }

    #[test]
    fn duplicate_members_produce_one_link() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &fixed());
        let doc_links: Vec<_> = graph
            .links
            .iter()
            .filter(|l| l.target.as_str() == "cat-doc")
            .map(|l| l.source.as_str())
            .collect();
        assert_eq!(doc_links, vec!["a", "b"]);

        let cluster_links = graph
            .links
            .iter()
            .filter(|l| l.link_type == LinkType::ItemCluster)
            .count();
        assert_eq!(cluster_links, 2);
    }

    #[test]
    fn group_without_valid_members_is_omitted() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &fixed());
        assert!(graph.node("cat-empty").is_none());
        assert!(graph.links.iter().all(|l| l.target.as_str() != "cat-empty"));
    }

    #[test]
    fn hidden_kind_emits_no_nodes_or_links() {
        let display = DisplayOptions {
            show_clusters: false,
            ..fixed()
        };
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &display);
        assert_eq!(graph.nodes_of(NodeType::Cluster).count(), 0);
        assert!(
            graph
                .links
                .iter()
                .all(|l| l.link_type != LinkType::ItemCluster)
        );
    }

    #[test]
    fn fixed_mode_uses_kind_constants() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &fixed());
        assert_eq!(graph.node("a").map(|n| n.val), Some(2.0));
        assert_eq!(graph.node("cat-doc").map(|n| n.val), Some(6.0));
        assert_eq!(graph.node("cl-urban").map(|n| n.val), Some(5.0));
        assert_eq!(graph.node("ev-s1").map(|n| n.val), Some(5.0));
    }

    #[test]
    fn connection_mode_counts_produced_links() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &DisplayOptions::default());
        // a: doc + urban = 2 links
        assert_eq!(graph.node("a").map(|n| n.val), Some(1.6));
        // c: urban only
        assert_eq!(graph.node("c").map(|n| n.val), Some(1.0));
        // doc has 2 links -> max(2, 1.0)
        assert_eq!(graph.node("cat-doc").map(|n| n.val), Some(2.0));
    }

    #[test]
    fn overlay_active_flag_follows_own_toggle() {
        let toggles = Toggles::new().with(OverlayKind::Event, "s1");
        let graph = GraphAssembler::build(&catalog(), &toggles, &fixed());
        assert_eq!(graph.node("ev-s1").map(|n| n.active), Some(true));
        assert_eq!(graph.node("cat-doc").map(|n| n.active), Some(false));
        assert_eq!(graph.node("b").map(|n| n.active), Some(true));
        assert_eq!(graph.node("a").map(|n| n.active), Some(false));
    }

    #[test]
    fn overlay_payload_counts_valid_members() {
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &fixed());
        match graph.node("cl-urban").map(|n| &n.data) {
            Some(NodeData::Cluster(summary)) => assert_eq!(summary.item_count, 2),
            other => unreachable!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn colliding_overlay_id_is_skipped() {
        let mut catalog = catalog();
        catalog.items.push(PrimaryItem::new("ev-s1", "Named like an event"));
        let graph = GraphAssembler::build(&catalog, &Toggles::new(), &fixed());
        let matches = graph.nodes.iter().filter(|n| n.id.as_str() == "ev-s1").count();
        assert_eq!(matches, 1);
        assert_eq!(graph.node("ev-s1").map(|n| n.node_type), Some(NodeType::Item));
        assert!(graph.links.iter().all(|l| l.link_type != LinkType::ItemEvent));
    }

    #[test]
    fn duplicate_items_keep_first() {
        let mut catalog = catalog();
        catalog.items.push(PrimaryItem::new("a", "Alpha again"));
        let graph = GraphAssembler::build(&catalog, &Toggles::new(), &fixed());
        assert_eq!(graph.nodes_of(NodeType::Item).count(), 3);
        assert_eq!(graph.node("a").map(|n| n.label.as_str()), Some("Alpha"));
    }

    #[test]
    fn prebuilt_active_set_matches_internal_resolution() {
        let catalog = catalog();
        let toggles = Toggles::new().with(OverlayKind::Cluster, "urban");
        let display = DisplayOptions::default();
        let resolution = crate::resolver::resolve(&catalog, &toggles, &display);

        let graph =
            GraphAssembler::build_with_active(&catalog, &toggles, &display, resolution.into_active_set());
        assert_eq!(graph, GraphAssembler::build(&catalog, &toggles, &display));
        assert!(!graph.node("b").map(|n| n.active).unwrap_or(true));
    }

    #[test]
    fn empty_catalog_yields_empty_graph() {
        let graph = GraphAssembler::build(
            &Catalog::new(),
            &Toggles::new().with(OverlayKind::Category, "x"),
            &DisplayOptions {
                filter_mode: FilterMode::Intersection,
                ..DisplayOptions::default()
            },
        );
        assert!(graph.nodes.is_empty());
        assert!(graph.links.is_empty());
        assert!(graph.active_ids.is_empty());
    }
}

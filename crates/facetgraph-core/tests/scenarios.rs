//! # Scenario Tests
//!
//! End-to-end behaviour of the public API on small hand-built catalogs.
//!
//! ## Scenarios
//! - A: union filtering over one categorical group
//! - B: intersection over two overlapping groups
//! - C: ego graph with the center repeated among neighbours
//! - D: a group whose only member is unknown

use facetgraph_core::{
    Catalog, CategoryGroup, ClusterGroup, DisplayOptions, EgoAssembler, EgoCenter, EgoGroup,
    EgoInput, EventGroup, FilterMode, GraphAssembler, ItemId, LinkType, NeighborItem, NodeType,
    OverlayKind, PrimaryItem, SizeMode, Toggles, audit, catalog_from_json, graph_to_json,
    resolve, scope_ego,
};

fn ids<'a>(iter: impl Iterator<Item = &'a ItemId>) -> Vec<&'a str> {
    iter.map(ItemId::as_str).collect()
}

fn abc() -> Vec<PrimaryItem> {
    vec![
        PrimaryItem::new("A", "Alpha"),
        PrimaryItem::new("B", "Beta"),
        PrimaryItem::new("C", "Gamma"),
    ]
}

// =============================================================================
// SCENARIO A: UNION FILTERING
// =============================================================================

mod scenario_a_union {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            items: abc(),
            categories: vec![CategoryGroup::new("G1", "Group one", &["A", "B"])],
            ..Catalog::default()
        }
    }

    #[test]
    fn enabled_group_focuses_its_members() {
        let toggles = Toggles::new().with(OverlayKind::Category, "G1");
        let graph = GraphAssembler::build(&catalog(), &toggles, &DisplayOptions::default());

        assert_eq!(ids(graph.active_ids.iter()), vec!["A", "B"]);
        assert_eq!(graph.node("A").map(|n| n.active), Some(true));
        assert_eq!(graph.node("B").map(|n| n.active), Some(true));
        assert_eq!(graph.node("C").map(|n| n.active), Some(false));
        assert_eq!(graph.node("cat-G1").map(|n| n.active), Some(true));
    }

    #[test]
    fn hiding_the_kind_lifts_the_filter() {
        let toggles = Toggles::new().with(OverlayKind::Category, "G1");
        let display = DisplayOptions {
            show_categories: false,
            ..DisplayOptions::default()
        };
        let graph = GraphAssembler::build(&catalog(), &toggles, &display);

        assert_eq!(ids(graph.active_ids.iter()), vec!["A", "B", "C"]);
        assert_eq!(graph.nodes_of(NodeType::Category).count(), 0);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn dimming_leaves_active_colours_alone() {
        let toggles = Toggles::new().with(OverlayKind::Category, "G1");
        let mut graph = GraphAssembler::build(&catalog(), &toggles, &DisplayOptions::default());
        graph.dim_inactive(0.15);

        assert_eq!(graph.node("A").map(|n| n.color.as_str()), Some("#857f7a"));
        assert_eq!(
            graph.node("C").map(|n| n.color.as_str()),
            Some("rgba(133,127,122,0.15)")
        );
    }
}

// =============================================================================
// SCENARIO B: INTERSECTION
// =============================================================================

mod scenario_b_intersection {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            items: abc(),
            categories: vec![CategoryGroup::new("G1", "Group one", &["A", "B"])],
            clusters: vec![ClusterGroup::new("G2", "Group two", &["B"], &["C"])],
            ..Catalog::default()
        }
    }

    fn toggles() -> Toggles {
        Toggles::new()
            .with(OverlayKind::Category, "G1")
            .with(OverlayKind::Cluster, "G2")
    }

    #[test]
    fn intersection_keeps_shared_members() {
        let display = DisplayOptions {
            filter_mode: FilterMode::Intersection,
            ..DisplayOptions::default()
        };
        let graph = GraphAssembler::build(&catalog(), &toggles(), &display);
        assert_eq!(ids(graph.active_ids.iter()), vec!["B"]);
    }

    #[test]
    fn union_spans_kinds() {
        let graph = GraphAssembler::build(&catalog(), &toggles(), &DisplayOptions::default());
        assert_eq!(ids(graph.active_ids.iter()), vec!["A", "B", "C"]);
    }

    #[test]
    fn stale_toggle_falls_back_and_is_audited() {
        let toggles = Toggles::new().with(OverlayKind::Event, "gone");
        let resolution = resolve(&catalog(), &toggles, &DisplayOptions::default());
        assert!(resolution.is_fallback());
        assert_eq!(resolution.active_set().len(), 3);

        let report = audit(&catalog(), &toggles);
        assert_eq!(report.stale_toggles.len(), 1);
    }
}

// =============================================================================
// SCENARIO C: EGO GRAPH
// =============================================================================

mod scenario_c_ego {
    use super::*;

    fn neighbor(id: &str) -> NeighborItem {
        NeighborItem {
            id: ItemId::new(id),
            title: id.to_string(),
            length: None,
            slug: None,
        }
    }

    #[test]
    fn center_among_neighbors_appears_once() {
        let mut input = EgoInput::new(EgoCenter {
            id: ItemId::new("X"),
            title: "X".to_string(),
            slug: None,
        });
        input.neighbors = vec![neighbor("X"), neighbor("Y")];
        input.events = vec![EgoGroup::new("e", "Evening", &["X", "Y"])];

        let graph = EgoAssembler::build(&input);
        let items: Vec<_> = graph
            .nodes_of(NodeType::Item)
            .map(|n| (n.id.as_str(), n.active))
            .collect();
        assert_eq!(items, vec![("X", true), ("Y", false)]);
        assert_eq!(ids(graph.active_ids.iter()), vec!["X"]);
        assert_eq!(graph.links.len(), 2);
    }

    #[test]
    fn scoped_catalog_builds_a_consistent_ego_graph() {
        let catalog = Catalog {
            items: abc(),
            categories: vec![CategoryGroup::new("G1", "Group one", &["A", "B"])],
            events: vec![EventGroup::new("E1", "Event one", &["A", "C", "ghost"])],
            ..Catalog::default()
        };
        let input = scope_ego(&catalog, &ItemId::new("A")).expect("known center");
        let graph = EgoAssembler::build(&input);

        let item_ids: Vec<_> = graph.nodes_of(NodeType::Item).map(|n| n.id.as_str()).collect();
        assert_eq!(item_ids, vec!["A", "B", "C"]);
        assert_eq!(graph.node("cat-G1").map(|n| n.val), Some(4.0));
        assert_eq!(
            graph
                .links
                .iter()
                .filter(|l| l.link_type == LinkType::ItemEvent)
                .count(),
            2
        );
    }
}

// =============================================================================
// SCENARIO D: DANGLING MEMBERSHIP
// =============================================================================

mod scenario_d_dangling {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            items: abc(),
            events: vec![EventGroup::new("lost", "Lost", &["ghost"])],
            ..Catalog::default()
        }
    }

    #[test]
    fn group_with_only_unknown_members_is_omitted() {
        let display = DisplayOptions {
            size_mode: SizeMode::Fixed,
            ..DisplayOptions::default()
        };
        let graph = GraphAssembler::build(&catalog(), &Toggles::new(), &display);
        assert!(graph.node("ev-lost").is_none());
        assert!(graph.links.is_empty());
        assert_eq!(graph.nodes.len(), 3);
    }

    #[test]
    fn enabling_it_filters_everything_out() {
        let toggles = Toggles::new().with(OverlayKind::Event, "lost");
        let graph = GraphAssembler::build(&catalog(), &toggles, &DisplayOptions::default());
        assert!(graph.active_ids.is_empty());
        assert!(graph.nodes.iter().all(|n| !n.active));
    }

    #[test]
    fn audit_reports_the_dangling_member() {
        let report = audit(&catalog(), &Toggles::new());
        assert_eq!(report.dangling_members.len(), 1);
        assert_eq!(report.dangling_members[0].item.as_str(), "ghost");
        assert_eq!(report.empty_groups.len(), 1);
    }
}

// =============================================================================
// SNAPSHOT ROUND TRIP
// =============================================================================

#[test]
fn decoded_snapshot_builds_expected_graph() {
    let json = r#"{
        "items": [{"_id": "A", "englishTitle": "Alpha"}, {"_id": "B", "englishTitle": "Beta"}],
        "events": [{"id": "E1", "name": "Event one", "members": ["A", "B", "A"]}]
    }"#;
    let catalog = catalog_from_json(json.as_bytes()).expect("decode");
    let graph = GraphAssembler::build(&catalog, &Toggles::new(), &DisplayOptions::default());
    let out = graph_to_json(&graph, false).expect("encode");

    assert!(out.contains("\"id\":\"ev-E1\""));
    assert_eq!(graph.links.len(), 2);
    assert_eq!(graph.node("ev-E1").map(|n| n.val), Some(2.0));
}

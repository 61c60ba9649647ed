//! # Graph Benchmarks
//!
//! Performance benchmarks for facetgraph-core graph construction.
//!
//! Run with: `cargo bench -p facetgraph-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use facetgraph_core::{
    Catalog, CategoryGroup, ClusterGroup, DisplayOptions, EgoAssembler, EventGroup, FilterMode,
    GraphAssembler, ItemId, OverlayKind, PrimaryItem, Toggles, compute_active_set, scope_ego,
};
use std::hint::black_box;

/// Create a catalog with `size` items spread over a fixed number of groups.
///
/// Every item belongs to one category, one cluster, and one event, so the
/// link count is roughly three times the item count.
fn create_catalog(size: usize) -> Catalog {
    let items: Vec<PrimaryItem> = (0..size)
        .map(|i| {
            PrimaryItem::new(format!("i{}", i), format!("Item {}", i))
                .with_attribute("length", (i % 90) as u64)
        })
        .collect();
    let ids: Vec<String> = (0..size).map(|i| format!("i{}", i)).collect();
    let members = |modulus: usize, bucket: usize| {
        ids.iter()
            .enumerate()
            .filter(|(i, _)| i % modulus == bucket)
            .map(|(_, id)| id.as_str())
            .collect::<Vec<&str>>()
    };

    Catalog {
        categories: (0..8)
            .map(|g| {
                CategoryGroup::new(format!("c{}", g), format!("Category {}", g), &members(8, g))
            })
            .collect(),
        clusters: (0..12)
            .map(|g| {
                ClusterGroup::new(format!("k{}", g), format!("Cluster {}", g), &members(12, g), &[])
            })
            .collect(),
        events: (0..20)
            .map(|g| EventGroup::new(format!("e{}", g), format!("Event {}", g), &members(20, g)))
            .collect(),
        items,
    }
}

fn toggles() -> Toggles {
    Toggles::new()
        .with(OverlayKind::Category, "c1")
        .with(OverlayKind::Category, "c2")
        .with(OverlayKind::Cluster, "k3")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_active_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("active_set");

    for size in [100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);
        let toggles = toggles();
        let union = DisplayOptions::default();
        let intersection = DisplayOptions {
            filter_mode: FilterMode::Intersection,
            ..DisplayOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("union", size), size, |b, _| {
            b.iter(|| black_box(compute_active_set(&catalog, &toggles, &union)));
        });
        group.bench_with_input(BenchmarkId::new("intersection", size), size, |b, _| {
            b.iter(|| black_box(compute_active_set(&catalog, &toggles, &intersection)));
        });
    }

    group.finish();
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);
        let toggles = toggles();
        let display = DisplayOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(GraphAssembler::build(&catalog, &toggles, &display)));
        });
    }

    group.finish();
}

fn bench_ego_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("ego_build");

    for size in [100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);
        let center = ItemId::new("i0");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let input = scope_ego(&catalog, &center);
                black_box(input.map(|input| EgoAssembler::build(&input)))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_active_set, bench_graph_build, bench_ego_build);
criterion_main!(benches);

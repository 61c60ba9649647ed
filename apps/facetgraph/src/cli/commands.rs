//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::{AppConfig, check_dim_amount, parse_filter_mode, parse_kind, parse_size_mode};
use facetgraph_core::{
    Catalog, CatalogAudit, DisplayOptions, EgoAssembler, FacetGraphError, GraphAssembler,
    MAX_SNAPSHOT_SIZE, Resolution, Toggles, audit, catalog_from_json, format_duration,
    graph_to_json, locate_center, resolve, scope_ego,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Maximum catalog file size, matching the decoder's limit.
const MAX_CATALOG_FILE_SIZE: u64 = MAX_SNAPSHOT_SIZE as u64;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), FacetGraphError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FacetGraphError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(FacetGraphError::InvalidSnapshot(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and ensure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, FacetGraphError> {
    let canonical = path.canonicalize().map_err(|e| {
        FacetGraphError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(FacetGraphError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Canonicalize the parent of an output path, which must be a directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, FacetGraphError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        FacetGraphError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(FacetGraphError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| FacetGraphError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and decode a catalog snapshot.
pub fn load_catalog(path: &Path) -> Result<Catalog, FacetGraphError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_CATALOG_FILE_SIZE)?;

    let bytes = std::fs::read(&validated_path)
        .map_err(|e| FacetGraphError::IoError(format!("Read file: {}", e)))?;
    let catalog = catalog_from_json(&bytes)?;

    tracing::info!(
        items = catalog.items.len(),
        groups = catalog.group_count(),
        "Loaded catalog from {}",
        path.display()
    );
    Ok(catalog)
}

/// Write to a file, or to stdout when no path is given.
fn write_output(output: Option<&Path>, contents: &str) -> Result<(), FacetGraphError> {
    match output {
        Some(path) => {
            let validated_path = validate_output_path(path)?;
            std::fs::write(&validated_path, contents)
                .map_err(|e| FacetGraphError::IoError(format!("Write file: {}", e)))?;
            tracing::info!("Wrote {} bytes to {}", contents.len(), path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}

// =============================================================================
// REQUEST ASSEMBLY
// =============================================================================

/// Graph-shaping flags shared by `graph` and `active`.
#[derive(Debug, Clone, Default)]
pub struct GraphRequestArgs {
    /// `kind:id` toggle specs to enable.
    pub on: Vec<String>,
    pub filter_mode: Option<String>,
    pub size_mode: Option<String>,
    /// Overlay kinds to hide.
    pub hide: Vec<String>,
    pub dim: Option<f64>,
}

impl GraphRequestArgs {
    /// Configured toggles plus the `--on` specs.
    pub fn toggles(&self, base: &Toggles) -> Result<Toggles, FacetGraphError> {
        let mut toggles = base.clone();
        for spec in &self.on {
            toggles.enable_spec(spec)?;
        }
        Ok(toggles)
    }

    /// Configured display options with the flag overrides applied.
    pub fn display(&self, base: &DisplayOptions) -> Result<DisplayOptions, FacetGraphError> {
        let mut display = base.clone();
        if let Some(mode) = &self.filter_mode {
            display.filter_mode = parse_filter_mode(mode)?;
        }
        if let Some(mode) = &self.size_mode {
            display.size_mode = parse_size_mode(mode)?;
        }
        for kind in &self.hide {
            display.set_shown(parse_kind(kind)?, false);
        }
        Ok(display)
    }
}

/// Resolve the active set, warning when the all-items fallback hides
/// toggles that name no group.
fn resolve_with_warnings(
    catalog: &Catalog,
    toggles: &Toggles,
    display: &DisplayOptions,
) -> Resolution {
    let resolution = resolve(catalog, toggles, display);
    if resolution.is_fallback() {
        for stale in audit(catalog, toggles).stale_toggles {
            tracing::warn!(kind = %stale.kind, group = %stale.group, "Enabled toggle names no group");
        }
        tracing::warn!("No enabled toggle matched a group; every item is active");
    }
    resolution
}

/// Log one warning per kind of finding.
fn log_findings(report: &CatalogAudit) {
    if !report.duplicate_items.is_empty() {
        tracing::warn!("{} duplicate item id(s); first occurrence wins", report.duplicate_items.len());
    }
    if !report.duplicate_groups.is_empty() {
        tracing::warn!("{} duplicate group id(s)", report.duplicate_groups.len());
    }
    if !report.dangling_members.is_empty() {
        tracing::warn!(
            "{} membership(s) reference unknown items and are ignored",
            report.dangling_members.len()
        );
    }
    if !report.empty_groups.is_empty() {
        tracing::warn!("{} group(s) have no valid members and are never shown", report.empty_groups.len());
    }
    if !report.id_collisions.is_empty() {
        tracing::warn!("{} group node id(s) collide with item ids and are skipped", report.id_collisions.len());
    }
    for stale in &report.stale_toggles {
        tracing::warn!(kind = %stale.kind, group = %stale.group, "Configured toggle names no group");
    }
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Build the explorer graph and write it as JSON.
pub fn cmd_graph(
    catalog_path: &Path,
    config: &AppConfig,
    request: &GraphRequestArgs,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), FacetGraphError> {
    let catalog = load_catalog(catalog_path)?;
    let toggles = request.toggles(&config.toggles)?;
    let display = request.display(&config.display)?;
    let dim = request.dim.map(check_dim_amount).transpose()?;

    let active = resolve_with_warnings(&catalog, &toggles, &display).into_active_set();
    let mut graph = GraphAssembler::build_with_active(&catalog, &toggles, &display, active);
    if let Some(amount) = dim {
        graph.dim_inactive(amount);
    }

    tracing::info!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        active = graph.active_ids.len(),
        "Built explorer graph"
    );
    write_output(output, &graph_to_json(&graph, pretty)?)
}

// =============================================================================
// ACTIVE COMMAND
// =============================================================================

/// Print the active item set.
pub fn cmd_active(
    catalog_path: &Path,
    config: &AppConfig,
    request: &GraphRequestArgs,
    json_mode: bool,
) -> Result<(), FacetGraphError> {
    let catalog = load_catalog(catalog_path)?;
    let toggles = request.toggles(&config.toggles)?;
    let display = request.display(&config.display)?;

    let resolution = resolve_with_warnings(&catalog, &toggles, &display);
    let path = match &resolution {
        Resolution::Unfiltered(_) => "unfiltered",
        Resolution::Fallback(_) => "fallback",
        Resolution::Filtered(_) => "filtered",
    };
    let active = resolution.active_set();

    if json_mode {
        let output = serde_json::json!({
            "activeIds": active,
            "count": active.len(),
            "resolution": path,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Active items: {} of {} ({})", active.len(), catalog.item_index().len(), path);
    for id in active.iter() {
        println!("  {}", id);
    }

    Ok(())
}

// =============================================================================
// EGO COMMAND
// =============================================================================

/// Scope the catalog to one item and build its ego graph.
pub fn cmd_ego(
    catalog_path: &Path,
    id: Option<&str>,
    slug: Option<&str>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), FacetGraphError> {
    let catalog = load_catalog(catalog_path)?;
    let center = locate_center(&catalog, id, slug)?;
    let input = scope_ego(&catalog, center)
        .ok_or_else(|| FacetGraphError::ItemNotFound(center.to_string()))?;
    let graph = EgoAssembler::build(&input);

    tracing::info!(
        center = %center,
        neighbors = input.neighbors.len(),
        nodes = graph.nodes.len(),
        "Built ego graph"
    );
    write_output(output, &graph_to_json(&graph, pretty)?)
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Audit the catalog against the configured toggles.
pub fn cmd_check(
    catalog_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    verbose: bool,
) -> Result<(), FacetGraphError> {
    let catalog = load_catalog(catalog_path)?;
    let report = audit(&catalog, &config.toggles);
    log_findings(&report);

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
        return Ok(());
    }

    println!("facetgraph Catalog Check");
    println!("========================");
    println!("Catalog: {}", catalog_path.display());
    println!();
    println!("Items:         {}", report.item_count);
    println!("Categories:    {}", report.category_count);
    println!("Clusters:      {}", report.cluster_count);
    println!("Events:        {}", report.event_count);
    println!("Total runtime: {}", format_duration(report.total_length));
    println!();

    if report.is_clean() {
        println!("No issues found");
        return Ok(());
    }

    println!("Issues:");
    println!("  Duplicate items:     {}", report.duplicate_items.len());
    println!("  Duplicate groups:    {}", report.duplicate_groups.len());
    println!("  Dangling members:    {}", report.dangling_members.len());
    println!("  Empty groups:        {}", report.empty_groups.len());
    println!("  Id collisions:       {}", report.id_collisions.len());
    println!("  Stale toggles:       {}", report.stale_toggles.len());

    if verbose {
        println!();
        for id in &report.duplicate_items {
            println!("  duplicate item   {}", id);
        }
        for group in &report.duplicate_groups {
            println!("  duplicate group  {}:{}", group.kind, group.group);
        }
        for member in &report.dangling_members {
            println!("  dangling member  {}:{} -> {}", member.kind, member.group, member.item);
        }
        for group in &report.empty_groups {
            println!("  empty group      {}:{}", group.kind, group.group);
        }
        for group in &report.id_collisions {
            println!("  id collision     {}:{}", group.kind, group.group);
        }
        for group in &report.stale_toggles {
            println!("  stale toggle     {}:{}", group.kind, group.group);
        }
    }

    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    catalog_path: &Path,
    config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), FacetGraphError> {
    let catalog = load_catalog(catalog_path)?;
    log_findings(&audit(&catalog, &config.toggles));

    let mut server = config.server;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    println!("facetgraph Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:    {}", server.host);
    println!("  Port:    {}", server.port);
    println!("  Catalog: {}", catalog_path.display());
    println!();
    println!("Endpoints:");
    println!("  GET  /health    - Health check");
    println!("  GET  /catalog   - Catalog audit");
    println!("  POST /graph     - Build the explorer graph");
    println!("  POST /ego       - Build an item's ego graph");
    println!("  POST /ego/input - Build an ego graph from a scoped input");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", server.host, server.port);
    let state = api::AppState::new(catalog).with_defaults(config.display, config.toggles);
    api::run_server(&addr, state, &server).await
}

//! # Application Configuration
//!
//! Loaded from an optional TOML file. Every key is optional:
//!
//! ```toml
//! [display]
//! sizeMode = "fixed"
//! filterMode = "intersection"
//! showEvents = false
//!
//! [toggles.categories]
//! "documentary" = true
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! corsOrigins = ["https://festival.example"]
//! bodyLimitBytes = 1048576
//! ```
//!
//! CLI flags override file values. `FACETGRAPH_CORS_ORIGINS` (comma-separated,
//! or `*`) overrides `server.corsOrigins`.

use facetgraph_core::{DisplayOptions, FacetGraphError, FilterMode, OverlayKind, SizeMode, Toggles};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured CORS origins.
pub const CORS_ORIGINS_ENV: &str = "FACETGRAPH_CORS_ORIGINS";

/// Default request body limit (2 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Maximum config file size (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// SERVER SECTION
// =============================================================================

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` means localhost only.
    pub cors_origins: Option<Vec<String>>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    /// CORS origins, with a raw `FACETGRAPH_CORS_ORIGINS` value taking
    /// precedence over the file.
    #[must_use]
    pub fn cors_origins_with(&self, env_value: Option<&str>) -> Option<Vec<String>> {
        match env_value {
            Some(value) => Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            None => self.cors_origins.clone(),
        }
    }

    /// CORS origins with the environment override applied.
    #[must_use]
    pub fn effective_cors_origins(&self) -> Option<Vec<String>> {
        let env_value = std::env::var(CORS_ORIGINS_ENV).ok();
        self.cors_origins_with(env_value.as_deref())
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub display: DisplayOptions,
    pub toggles: Toggles,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, FacetGraphError> {
        toml::from_str(text).map_err(|e| FacetGraphError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, FacetGraphError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            FacetGraphError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(FacetGraphError::InvalidConfig(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            FacetGraphError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load the file if a path is given, defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, FacetGraphError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

// =============================================================================
// OVERRIDE HELPERS
// =============================================================================

/// Parse an overlay kind named on the command line or in a request.
pub fn parse_kind(name: &str) -> Result<OverlayKind, FacetGraphError> {
    OverlayKind::parse(name)
        .ok_or_else(|| FacetGraphError::InvalidConfig(format!("Unknown overlay kind '{}'", name)))
}

/// Parse a `--filter-mode` value.
pub fn parse_filter_mode(name: &str) -> Result<FilterMode, FacetGraphError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "union" | "or" => Ok(FilterMode::Union),
        "intersection" | "and" => Ok(FilterMode::Intersection),
        _ => Err(FacetGraphError::InvalidConfig(format!(
            "Unknown filter mode '{}' (expected union or intersection)",
            name
        ))),
    }
}

/// Parse a `--size-mode` value.
pub fn parse_size_mode(name: &str) -> Result<SizeMode, FacetGraphError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "connections" => Ok(SizeMode::Connections),
        "fixed" => Ok(SizeMode::Fixed),
        _ => Err(FacetGraphError::InvalidConfig(format!(
            "Unknown size mode '{}' (expected connections or fixed)",
            name
        ))),
    }
}

/// Validate a dimming opacity.
pub fn check_dim_amount(amount: f64) -> Result<f64, FacetGraphError> {
    if (0.0..=1.0).contains(&amount) {
        Ok(amount)
    } else {
        Err(FacetGraphError::InvalidConfig(format!(
            "Dim amount {} is outside 0..=1",
            amount
        )))
    }
}

//! src/catalog/manifest.rs
//! ============================================================================
//! # Catalog manifests
//!
//! A manifest replaces the built-in catalog. TOML is the primary format:
//!
//! ```toml
//! [[entry]]
//! key = "hello_world.rs"
//! title = "Hello, World"
//! category = "Basics"
//! description = "Print a line and exit."
//! ```
//!
//! A `.json` file holding an array of the same objects is accepted too.

use std::path::Path;

use serde::Deserialize;
use tokio::fs as TokioFs;
use tracing::info;

use crate::catalog::entry::ContentEntry;
use crate::catalog::index::Catalog;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct TomlManifest {
    #[serde(default, rename = "entry")]
    entries: Vec<ContentEntry>,
}

pub fn parse_toml(text: &str) -> Result<Catalog, AppError> {
    let manifest: TomlManifest = toml::from_str(text)?;
    Catalog::new(manifest.entries)
}

pub fn parse_json(text: &str) -> Result<Catalog, AppError> {
    let entries: Vec<ContentEntry> = serde_json::from_str(text)?;
    Catalog::new(entries)
}

/// Reads a manifest, choosing the format from the file extension.
pub async fn load(path: &Path) -> Result<Catalog, AppError> {
    let text = TokioFs::read_to_string(path)
        .await
        .map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&text)?,
        _ => parse_toml(&text)?,
    };

    info!(
        "Loaded catalog manifest {} ({} entries)",
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

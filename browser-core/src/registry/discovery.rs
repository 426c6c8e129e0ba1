//! src/registry/discovery.rs
//! ============================================================================
//! # Asset discovery
//!
//! Walks the samples directory once at startup and registers a loader for
//! every file whose path (relative, `/`-separated) matches the configured
//! glob. `*.rs` only matches top-level files; use `**/*.rs` to descend.
//! The loaders read through a shared [`SourceCache`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::cache::source_cache::SourceCache;
use crate::error::AppError;
use crate::registry::loader::{LoadFuture, Loader, LoaderRegistry, RegistryBuilder, virtual_path};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A file found under the samples directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredAsset {
    /// Path relative to the scanned directory, `/`-separated. Acts as the key.
    pub key: String,
    pub path: PathBuf,
}

/// Lists matching files in walk order sorted by key.
#[instrument(level = "debug", skip(dir), fields(dir = %dir.display()))]
pub fn discover_assets(dir: &Path, pattern: &str) -> Result<Vec<DiscoveredAsset>, AppError> {
    let pattern = Pattern::new(pattern)
        .map_err(|e| AppError::discovery(dir, format!("bad pattern {pattern:?}: {e}")))?;

    let mut assets = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| AppError::discovery(dir, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if pattern.matches_with(&key, MATCH_OPTIONS) {
            debug!("Discovered asset {}", key);
            assets.push(DiscoveredAsset {
                key,
                path: entry.path().to_path_buf(),
            });
        }
    }

    assets.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(assets)
}

/// Loader that reads `path` through `cache`, keyed by its virtual path.
pub fn file_loader(virtual_path: String, path: PathBuf, cache: SourceCache) -> Loader {
    let key: Arc<str> = Arc::from(virtual_path);
    let path: Arc<Path> = Arc::from(path);
    Arc::new(move || -> LoadFuture {
        let key = key.clone();
        let path = path.clone();
        let cache = cache.clone();
        Box::pin(async move {
            let text = cache
                .get_or_load(key, || async move {
                    tokio::fs::read_to_string(&*path)
                        .await
                        .map_err(AppError::from)
                })
                .await?;
            Ok(text.to_string())
        })
    })
}

/// Adds one file loader per discovered asset.
pub fn register_assets(
    mut builder: RegistryBuilder,
    assets: Vec<DiscoveredAsset>,
    cache: &SourceCache,
) -> RegistryBuilder {
    for asset in assets {
        let path = virtual_path(builder.base(), &asset.key);
        let loader = file_loader(path.clone(), asset.path, cache.clone());
        builder = builder.register_path(path, loader);
    }
    builder
}

/// Scans `dir` and builds the registry in one step.
pub fn build_from_dir(
    dir: &Path,
    pattern: &str,
    base: &str,
    cache: &SourceCache,
) -> Result<LoaderRegistry, AppError> {
    let assets = discover_assets(dir, pattern)?;
    info!(
        "Discovered {} sample assets in {} matching {}",
        assets.len(),
        dir.display(),
        pattern
    );
    Ok(register_assets(LoaderRegistry::builder(base), assets, cache).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.x"), "alpha").unwrap();
        fs::write(dir.path().join("b.x"), "beta").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.x"), "gamma").unwrap();
        dir
    }

    #[test]
    fn flat_pattern_skips_nested_and_other_extensions() {
        let dir = sample_dir();
        let keys: Vec<String> = discover_assets(dir.path(), "*.x")
            .unwrap()
            .into_iter()
            .map(|a| a.key)
            .collect();
        assert_eq!(keys, vec!["a.x", "b.x"]);
    }

    #[test]
    fn recursive_pattern_uses_slash_keys() {
        let dir = sample_dir();
        let keys: Vec<String> = discover_assets(dir.path(), "**/*.x")
            .unwrap()
            .into_iter()
            .map(|a| a.key)
            .collect();
        assert_eq!(keys, vec!["a.x", "b.x", "nested/c.x"]);
    }

    #[test]
    fn invalid_pattern_is_a_discovery_error() {
        let dir = sample_dir();
        assert!(matches!(
            discover_assets(dir.path(), "[*.x"),
            Err(AppError::Discovery { .. })
        ));
    }

    #[tokio::test]
    async fn discovered_loader_reads_through_cache() {
        let dir = sample_dir();
        let cache = SourceCache::new();
        let registry = build_from_dir(dir.path(), "*.x", "samples", &cache).unwrap();

        assert_eq!(registry.paths(), vec!["samples/a.x", "samples/b.x"]);
        let loader = registry.resolve("a.x").unwrap();
        assert_eq!(loader().await.unwrap(), "alpha");

        // the file is gone but the cached text is still served
        fs::remove_file(dir.path().join("a.x")).unwrap();
        assert_eq!(loader().await.unwrap(), "alpha");
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn vanished_asset_is_a_load_error() {
        let dir = sample_dir();
        let cache = SourceCache::new();
        let registry = build_from_dir(dir.path(), "*.x", "samples", &cache).unwrap();
        fs::remove_file(dir.path().join("b.x")).unwrap();

        let loader = registry.resolve("b.x").unwrap();
        assert!(matches!(loader().await, Err(AppError::Io(_))));
    }
}

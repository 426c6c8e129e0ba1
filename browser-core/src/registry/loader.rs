//! src/registry/loader.rs
//! ============================================================================
//! # LoaderRegistry: virtual path → on-demand source loader
//!
//! Built exactly once through [`RegistryBuilder`] and shared as
//! `Arc<LoaderRegistry>`. After `build()` the map is immutable, so lookups need
//! no locking. The registry is derived from discovered assets, not from the
//! catalog; [`LoaderRegistry::audit`] reports where the two disagree.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::catalog::index::Catalog;
use crate::error::AppError;

pub type LoadFuture = BoxFuture<'static, Result<String, AppError>>;

/// Zero-argument async function producing an entry's raw source text.
pub type Loader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

pub struct LoaderRegistry {
    base: String,
    loaders: HashMap<String, Loader>,
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.loaders.keys().collect();
        paths.sort();
        f.debug_struct("LoaderRegistry")
            .field("base", &self.base)
            .field("paths", &paths)
            .finish()
    }
}

/// Virtual path for `key` under `base`: `"<base>/<key>"`.
pub fn virtual_path(base: &str, key: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}/{key}")
    }
}

impl LoaderRegistry {
    pub fn builder(base: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            base: base.into(),
            loaders: HashMap::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn virtual_path(&self, key: &str) -> String {
        virtual_path(&self.base, key)
    }

    /// Pure lookup. `None` means the key was never registered.
    pub fn resolve(&self, key: &str) -> Option<Loader> {
        self.loaders.get(&self.virtual_path(key)).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.loaders.contains_key(&self.virtual_path(key))
    }

    /// Registered virtual paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Compares catalog keys with registered paths in both directions.
    pub fn audit(&self, catalog: &Catalog) -> RegistryAudit {
        let missing_loaders: Vec<String> = catalog
            .keys()
            .filter(|key| !self.contains(key))
            .map(str::to_string)
            .collect();

        let expected: Vec<String> = catalog.keys().map(|k| self.virtual_path(k)).collect();
        let orphan_assets: Vec<String> = self
            .paths()
            .into_iter()
            .filter(|p| !expected.iter().any(|e| e == p))
            .map(str::to_string)
            .collect();

        RegistryAudit {
            missing_loaders,
            orphan_assets,
        }
    }
}

/// Result of [`LoaderRegistry::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryAudit {
    /// Catalog keys with no loader; selecting them yields a registry miss.
    pub missing_loaders: Vec<String>,
    /// Registered paths no catalog entry points at.
    pub orphan_assets: Vec<String>,
}

impl RegistryAudit {
    pub fn is_clean(&self) -> bool {
        self.missing_loaders.is_empty() && self.orphan_assets.is_empty()
    }

    /// Logs every mismatch; with `strict`, missing loaders become an error.
    pub fn enforce(&self, strict: bool) -> Result<(), AppError> {
        for key in &self.missing_loaders {
            warn!("Catalog entry {} has no registered loader", key);
        }
        for path in &self.orphan_assets {
            debug!("Asset {} is not referenced by the catalog", path);
        }

        if strict && !self.missing_loaders.is_empty() {
            return Err(AppError::RegistryDrift {
                missing: self.missing_loaders.clone(),
            });
        }
        Ok(())
    }
}

pub struct RegistryBuilder {
    base: String,
    loaders: HashMap<String, Loader>,
}

impl RegistryBuilder {
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Registers `loader` under an explicit virtual path. Later
    /// registrations for the same path replace earlier ones.
    pub fn register_path(mut self, path: impl Into<String>, loader: Loader) -> Self {
        let path = path.into();
        if self.loaders.insert(path.clone(), loader).is_some() {
            warn!("Loader for {} registered twice; keeping the last one", path);
        }
        self
    }

    /// Registers `loader` under the virtual path derived from `key`.
    pub fn register(self, key: &str, loader: Loader) -> Self {
        let path = virtual_path(&self.base, key);
        self.register_path(path, loader)
    }

    /// Registers a loader that always yields `text`.
    pub fn register_static(self, key: &str, text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let loader: Loader = Arc::new(move || -> LoadFuture {
            let text = text.clone();
            Box::pin(async move { Ok(text.to_string()) })
        });
        self.register(key, loader)
    }

    pub fn build(self) -> LoaderRegistry {
        debug!(
            "Loader registry built with {} entries under {}",
            self.loaders.len(),
            self.base
        );
        LoaderRegistry {
            base: self.base,
            loaders: self.loaders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::ContentEntry;

    fn scenario_catalog() -> Catalog {
        Catalog::new(vec![
            ContentEntry::new("a.x", "Alpha", "Basics", "first"),
            ContentEntry::new("b.x", "Beta", "Control", "second"),
        ])
        .unwrap()
    }

    #[test]
    fn virtual_path_joins_once() {
        assert_eq!(virtual_path("samples", "a.x"), "samples/a.x");
        assert_eq!(virtual_path("samples/", "a.x"), "samples/a.x");
        assert_eq!(virtual_path("", "a.x"), "a.x");
    }

    #[tokio::test]
    async fn resolve_hits_and_misses() {
        let registry = LoaderRegistry::builder("samples")
            .register_static("a.x", "alpha source")
            .build();

        let loader = registry.resolve("a.x").expect("a.x registered");
        assert_eq!(loader().await.unwrap(), "alpha source");
        assert!(registry.resolve("c.x").is_none());
        assert_eq!(registry.paths(), vec!["samples/a.x"]);
    }

    #[test]
    fn audit_reports_both_directions() {
        let registry = LoaderRegistry::builder("samples")
            .register_static("a.x", "")
            .register_static("orphan.x", "")
            .build();

        let audit = registry.audit(&scenario_catalog());
        assert_eq!(audit.missing_loaders, vec!["b.x"]);
        assert_eq!(audit.orphan_assets, vec!["samples/orphan.x"]);
        assert!(!audit.is_clean());
        assert!(audit.enforce(false).is_ok());
        assert!(matches!(
            audit.enforce(true),
            Err(AppError::RegistryDrift { ref missing }) if missing == &vec!["b.x".to_string()]
        ));
    }

    #[test]
    fn matching_registry_is_clean() {
        let registry = LoaderRegistry::builder("samples")
            .register_static("a.x", "")
            .register_static("b.x", "")
            .build();
        assert!(registry.audit(&scenario_catalog()).is_clean());
    }
}

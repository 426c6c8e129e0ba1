//! src/catalog/index.rs
//! ============================================================================
//! # Catalog: immutable, ordered index of sample descriptors
//!
//! Authoring order is significant: it is the default display order and the
//! order in which categories are first seen. A catalog is built once and then
//! shared by reference (`Arc<[ContentEntry]>`), never mutated.

use std::collections::HashSet;
use std::sync::Arc;

use compact_str::CompactString;
use indexmap::IndexSet;

use crate::catalog::entry::ContentEntry;
use crate::error::AppError;

/// Pseudo-category that matches every entry. Always listed first.
pub const ALL_CATEGORY: &str = "All";

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[ContentEntry]>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid entries and duplicate keys.
    pub fn new(entries: Vec<ContentEntry>) -> Result<Self, AppError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.key.as_str()) {
                return Err(AppError::DuplicateKey(entry.key.to_string()));
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Catalog with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    /// Every entry, in authoring order.
    #[inline]
    pub fn all(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// `"All"` followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<CompactString> {
        let mut set: IndexSet<CompactString> = IndexSet::with_capacity(8);
        set.insert(CompactString::const_new(ALL_CATEGORY));
        for entry in self.entries.iter() {
            set.insert(entry.category.clone());
        }
        set.into_iter().collect()
    }

    pub fn get(&self, key: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, category: &str) -> ContentEntry {
        ContentEntry::new(key, key.to_uppercase(), category, "")
    }

    #[test]
    fn categories_in_first_seen_order() {
        let catalog = Catalog::new(vec![
            entry("z.x", "Zeta"),
            entry("a.x", "Alpha"),
            entry("b.x", "Zeta"),
            entry("c.x", "Mid"),
            entry("d.x", "Alpha"),
        ])
        .unwrap();

        assert_eq!(catalog.categories(), vec!["All", "Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn empty_catalog_still_lists_all() {
        assert_eq!(Catalog::empty().categories(), vec![ALL_CATEGORY]);
    }

    #[test]
    fn duplicate_key_rejected() {
        let err = Catalog::new(vec![entry("a.x", "Basics"), entry("a.x", "Control")]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(ref k) if k == "a.x"));
    }

    #[test]
    fn all_preserves_authoring_order() {
        let catalog = Catalog::new(vec![entry("b.x", "B"), entry("a.x", "A")]).unwrap();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["b.x", "a.x"]);
        assert_eq!(catalog.get("a.x").map(|e| e.title.as_str()), Some("A.X"));
        assert!(catalog.get("c.x").is_none());
    }
}

//! src/catalog/entry.rs
//! ============================================================================
//! # ContentEntry: one browsable sample, metadata only

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Descriptor of a catalog item. The source text is never stored here; it is
/// fetched on demand through the loader registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Stable identifier, usually the asset file name. Unique per catalog.
    pub key: CompactString,
    pub title: String,
    pub category: CompactString,
    #[serde(default)]
    pub description: String,
}

impl ContentEntry {
    pub fn new(
        key: impl Into<CompactString>,
        title: impl Into<String>,
        category: impl Into<CompactString>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// Rejects entries that could never be resolved or grouped.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.key.trim().is_empty() {
            return Err(AppError::invalid_entry("key", "must not be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::invalid_entry(
                "category",
                format!("entry {} has no category", self.key),
            ));
        }
        Ok(())
    }

    /// Case-insensitive substring match over key, title and description.
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_lowered(&self, needle: &str) -> bool {
        self.key.to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

//! src/catalog/builtin.rs
//! ============================================================================
//! # Built-in sample catalog
//!
//! Hand-authored metadata for the programs shipped in `samples/`. The loader
//! registry is discovered from disk separately, so nothing here guarantees an
//! asset exists for each key.

use std::sync::LazyLock;

use tracing::error;

use crate::catalog::entry::ContentEntry;
use crate::catalog::index::Catalog;

/// (key, title, category, description)
const BUILTIN_ENTRIES: &[(&str, &str, &str, &str)] = &[
    (
        "hello_world.rs",
        "Hello, World",
        "Basics",
        "The smallest complete program: print a line and exit.",
    ),
    (
        "variables.rs",
        "Variables and Mutability",
        "Basics",
        "let bindings, shadowing, mut and constants.",
    ),
    (
        "fizzbuzz.rs",
        "FizzBuzz",
        "Control Flow",
        "Loops, ranges and match on tuples.",
    ),
    (
        "guessing_game.rs",
        "Guessing Game",
        "Control Flow",
        "Read stdin in a loop and compare with Ordering.",
    ),
    (
        "closures.rs",
        "Closures",
        "Functions",
        "Capturing environment, Fn traits and returning closures.",
    ),
    (
        "structs.rs",
        "Structs and Methods",
        "Data",
        "Named structs, impl blocks and associated functions.",
    ),
    (
        "enums.rs",
        "Enums and Pattern Matching",
        "Data",
        "Option, custom enums and exhaustive match.",
    ),
    (
        "traits.rs",
        "Traits",
        "Functions",
        "Shared behaviour with trait bounds and default methods.",
    ),
    (
        "error_handling.rs",
        "Error Handling",
        "Basics",
        "Result, the ? operator and custom error types.",
    ),
    (
        "iterators.rs",
        "Iterators",
        "Data",
        "Adapters, collect and writing your own Iterator.",
    ),
    (
        "threads.rs",
        "Threads and Channels",
        "Concurrency",
        "spawn, join and message passing with mpsc.",
    ),
    (
        "shared_state.rs",
        "Shared State",
        "Concurrency",
        "Arc<Mutex<T>> counters across threads.",
    ),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let entries = BUILTIN_ENTRIES
        .iter()
        .map(|&(key, title, category, description)| {
            ContentEntry::new(key, title, category, description)
        })
        .collect();
    Catalog::new(entries).unwrap_or_else(|e| {
        error!("Built-in catalog failed validation, starting empty: {}", e);
        Catalog::empty()
    })
});

/// The catalog compiled into the binary. Cheap to clone.
pub fn builtin() -> Catalog {
    BUILTIN.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid_and_complete() {
        let entries: Vec<ContentEntry> = BUILTIN_ENTRIES
            .iter()
            .map(|&(k, t, c, d)| ContentEntry::new(k, t, c, d))
            .collect();
        let catalog = Catalog::new(entries).expect("built-in catalog must validate");
        assert_eq!(builtin().len(), catalog.len());
    }

    #[test]
    fn builtin_categories() {
        assert_eq!(
            builtin().categories(),
            vec!["All", "Basics", "Control Flow", "Functions", "Data", "Concurrency"]
        );
    }

    #[test]
    fn every_builtin_key_has_a_shipped_asset() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");
        for key in builtin().keys() {
            assert!(dir.join(key).is_file(), "missing sample asset {key}");
        }
    }

    #[test]
    fn shipped_assets_cover_the_builtin_catalog() {
        use crate::cache::source_cache::SourceCache;
        use crate::registry::discovery::build_from_dir;

        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");
        let registry = build_from_dir(&dir, "*.rs", "samples", &SourceCache::new()).unwrap();
        let audit = registry.audit(&builtin());
        assert!(audit.is_clean(), "{audit:?}");
    }
}

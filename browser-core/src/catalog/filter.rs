//! src/catalog/filter.rs
//! ============================================================================
//! # Filter Engine: category chip + free-text query
//!
//! `filter` is pure and stable: it never reorders, it only drops entries.
//! `FilterState` is the interactive input to it, mutated by key presses.

use compact_str::CompactString;

use crate::catalog::entry::ContentEntry;
use crate::catalog::index::ALL_CATEGORY;

/// Entries passing both the category and the query predicate, in input order.
pub fn filter<'a>(
    entries: &'a [ContentEntry],
    category: &str,
    query: &str,
) -> Vec<&'a ContentEntry> {
    let needle = needle(query);
    entries
        .iter()
        .filter(|e| category == ALL_CATEGORY || e.category == category)
        .filter(|e| needle.as_deref().is_none_or(|n| e.matches_lowered(n)))
        .collect()
}

/// Index-returning variant of [`filter`] for views that keep a cursor.
pub fn filter_indices(entries: &[ContentEntry], category: &str, query: &str) -> Vec<usize> {
    let needle = needle(query);
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| category == ALL_CATEGORY || e.category == category)
        .filter(|(_, e)| needle.as_deref().is_none_or(|n| e.matches_lowered(n)))
        .map(|(idx, _)| idx)
        .collect()
}

/// Lower-cased query as typed; `None` when blank, which matches everything.
fn needle(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub category: CompactString,
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: CompactString::const_new(ALL_CATEGORY),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn apply_indices(&self, entries: &[ContentEntry]) -> Vec<usize> {
        filter_indices(entries, &self.category, &self.query)
    }

    pub fn set_category(&mut self, category: impl Into<CompactString>) {
        self.category = category.into();
    }

    /// Moves to the next chip, wrapping around. Unknown categories restart at "All".
    pub fn next_category(&mut self, categories: &[CompactString]) {
        self.step_category(categories, 1);
    }

    pub fn prev_category(&mut self, categories: &[CompactString]) {
        self.step_category(categories, categories.len().saturating_sub(1));
    }

    fn step_category(&mut self, categories: &[CompactString], step: usize) {
        if categories.is_empty() {
            return;
        }
        let next = match categories.iter().position(|c| *c == self.category) {
            Some(idx) => (idx + step) % categories.len(),
            None => 0,
        };
        self.category = categories[next].clone();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn is_active(&self) -> bool {
        self.category != ALL_CATEGORY || !self.query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<ContentEntry> {
        vec![
            ContentEntry::new("a.x", "Alpha", "Basics", "first"),
            ContentEntry::new("b.x", "Beta", "Control", "second"),
        ]
    }

    fn keys(found: &[&ContentEntry]) -> Vec<String> {
        found.iter().map(|e| e.key.to_string()).collect()
    }

    #[test]
    fn scenario_query_and_category() {
        let catalog = scenario();
        assert_eq!(keys(&filter(&catalog, "All", "alp")), vec!["a.x"]);
        assert_eq!(keys(&filter(&catalog, "Control", "")), vec!["b.x"]);
    }

    #[test]
    fn all_with_empty_query_is_identity() {
        let catalog = scenario();
        assert_eq!(filter(&catalog, "All", ""), catalog.iter().collect::<Vec<_>>());
        assert_eq!(filter(&catalog, "All", "   ").len(), catalog.len());
    }

    #[test]
    fn case_insensitive() {
        let catalog = vec![
            ContentEntry::new("hello.x", "Hello", "Basics", ""),
            ContentEntry::new("bye.x", "Bye", "Basics", "says hello back"),
            ContentEntry::new("other.x", "Other", "Basics", ""),
        ];
        let upper = filter(&catalog, "All", "HELLO");
        let lower = filter(&catalog, "All", "hello");
        assert_eq!(upper, lower);
        assert_eq!(keys(&upper), vec!["hello.x", "bye.x"]);
    }

    #[test]
    fn query_narrows_category_result() {
        let catalog = vec![
            ContentEntry::new("a.x", "Alpha", "Basics", "loops"),
            ContentEntry::new("b.x", "Beta", "Basics", "match"),
            ContentEntry::new("c.x", "Gamma", "Data", "loops"),
        ];
        for q in ["", "a", "loops", "zzz", "B.X"] {
            let base = keys(&filter(&catalog, "Basics", ""));
            for k in keys(&filter(&catalog, "Basics", q)) {
                assert!(base.contains(&k), "{k} not in unfiltered result for {q:?}");
            }
        }
    }

    #[test]
    fn category_is_case_sensitive() {
        assert!(filter(&scenario(), "basics", "").is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty() {
        assert!(filter(&[], "All", "").is_empty());
        assert!(filter(&scenario(), "All", "nothing matches").is_empty());
    }

    #[test]
    fn indices_follow_catalog_order() {
        let catalog = scenario();
        assert_eq!(filter_indices(&catalog, "All", "x"), vec![0, 1]);
        assert_eq!(filter_indices(&catalog, "All", "second"), vec![1]);
    }

    #[test]
    fn padded_query_is_matched_as_typed() {
        let catalog = scenario();
        assert!(filter(&catalog, "All", "alpha ").is_empty());
        assert!(filter_indices(&catalog, "All", " alpha").is_empty());
        assert_eq!(keys(&filter(&catalog, "All", "ALPHA")), vec!["a.x"]);
        assert_eq!(filter(&catalog, "All", " \t ").len(), catalog.len());
    }

    #[test]
    fn category_cycling_wraps() {
        let cats: Vec<CompactString> = ["All", "Basics", "Control"]
            .into_iter()
            .map(CompactString::from)
            .collect();
        let mut state = FilterState::default();
        state.next_category(&cats);
        assert_eq!(state.category, "Basics");
        state.next_category(&cats);
        state.next_category(&cats);
        assert_eq!(state.category, "All");
        state.prev_category(&cats);
        assert_eq!(state.category, "Control");

        state.set_category("Gone");
        state.next_category(&cats);
        assert_eq!(state.category, "All");
    }

    #[test]
    fn query_editing() {
        let mut state = FilterState::default();
        assert!(!state.is_active());
        state.push_char('a');
        state.push_char('l');
        assert!(state.is_active());
        assert!(state.pop_char());
        assert_eq!(state.query, "a");
        state.clear_query();
        assert!(!state.pop_char());
    }
}

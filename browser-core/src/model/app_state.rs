//! src/model/app_state.rs
//! ============================================================================
//! # AppState: catalog view + selection, owned by the UI task
//!
//! Ties the immutable catalog, the interactive filter, the cursor and the
//! selection controller together. The filtered list is stored as indices into
//! the catalog and recomputed whenever category or query changes.

use std::sync::Arc;
use std::time::Duration;

use compact_str::CompactString;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::catalog::entry::ContentEntry;
use crate::catalog::filter::FilterState;
use crate::catalog::index::Catalog;
use crate::controller::event_loop::TaskResult;
use crate::controller::selection::{Completion, SelectionController, SelectionState};
use crate::error::AppError;
use crate::model::ui_state::{InputMode, UIOverlay, UIState};
use crate::registry::loader::{LoaderRegistry, RegistryAudit};

pub struct AppState {
    pub catalog: Catalog,
    pub categories: Vec<CompactString>,
    pub filter: FilterState,
    /// Catalog indices passing the current filter, in catalog order.
    pub visible: Vec<usize>,
    pub ui: UIState,
    pub selection: SelectionController,
    pub redraw: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog.len())
            .field("filter", &self.filter)
            .field("visible", &self.visible.len())
            .field("selection", &self.selection)
            .field("redraw", &self.redraw)
            .finish()
    }
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        registry: Arc<LoaderRegistry>,
        load_timeout: Duration,
        ui: UIState,
        task_tx: mpsc::UnboundedSender<TaskResult>,
    ) -> Self {
        let categories = catalog.categories();
        let mut state = Self {
            catalog,
            categories,
            filter: FilterState::default(),
            visible: Vec::new(),
            ui,
            selection: SelectionController::new(registry, load_timeout, task_tx),
            redraw: true,
        };
        state.refresh_filter();
        state
    }

    pub fn input_mode(&self) -> InputMode {
        if self.ui.overlay == UIOverlay::Help {
            InputMode::Help
        } else if matches!(self.selection.state(), SelectionState::Ready { .. }) {
            InputMode::Source
        } else if self.ui.searching {
            InputMode::Search
        } else {
            InputMode::Browse
        }
    }

    // --- Filter ---
    pub fn refresh_filter(&mut self) {
        self.visible = self.filter.apply_indices(self.catalog.all());
        self.ui.clamp_selection(self.visible.len());
        debug!(
            "Filter category={} query={:?}: {} of {} entries",
            self.filter.category,
            self.filter.query,
            self.visible.len(),
            self.catalog.len()
        );
        self.redraw = true;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.filter.push_char(c);
        self.refresh_filter();
    }

    pub fn pop_query_char(&mut self) {
        if self.filter.pop_char() {
            self.refresh_filter();
        }
    }

    pub fn clear_query(&mut self) {
        self.filter.clear_query();
        self.refresh_filter();
    }

    pub fn next_category(&mut self) {
        self.filter.next_category(&self.categories);
        self.refresh_filter();
    }

    pub fn prev_category(&mut self) {
        self.filter.prev_category(&self.categories);
        self.refresh_filter();
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &ContentEntry> {
        let all = self.catalog.all();
        self.visible.iter().filter_map(move |&i| all.get(i))
    }

    /// Entry under the cursor.
    pub fn highlighted(&self) -> Option<&ContentEntry> {
        let row = self.ui.selected()?;
        let idx = *self.visible.get(row)?;
        self.catalog.all().get(idx)
    }

    // --- Selection ---
    /// Starts loading the highlighted entry.
    pub fn open_selected(&mut self) -> Option<u64> {
        let entry = self.highlighted()?.clone();
        Some(self.open_entry(&entry))
    }

    pub fn open_entry(&mut self, entry: &ContentEntry) -> u64 {
        // the previous selection's outcome, including its notice, is discarded
        if self.ui.has_error_notice() {
            self.ui.dismiss_notification();
        }
        self.ui.searching = false;
        self.ui.reset_scroll();

        let generation = self.selection.select(entry);
        self.surface_selection_error();
        self.redraw = true;
        generation
    }

    pub fn retry_selection(&mut self) -> bool {
        if self.selection.retry().is_none() {
            return false;
        }
        self.ui.dismiss_notification();
        self.surface_selection_error();
        if let SelectionState::Loading { entry, .. } = self.selection.state() {
            let message = format!("Retrying {} ({})", entry.title, entry.key);
            self.ui.show_info(message);
        }
        self.redraw = true;
        true
    }

    pub fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::SourceLoaded {
                generation,
                key,
                result,
                exec,
            } => {
                debug!("Load of {} finished in {:?}", key, exec);
                match self.selection.complete(generation, result) {
                    Completion::Ready => {
                        self.ui.reset_scroll();
                        if let Some(entry) = self.selection.state().entry() {
                            let message = format!(
                                "Loaded {} ({} lines)",
                                entry.title,
                                self.source_line_count()
                            );
                            self.ui.show_success(message);
                        }
                        self.redraw = true;
                    }
                    Completion::Failed => {
                        self.surface_selection_error();
                        self.redraw = true;
                    }
                    Completion::Stale => {}
                }
            }
        }
    }

    fn surface_selection_error(&mut self) {
        if let Some(message) = self.selection.state().error_message() {
            self.ui.show_error(message);
        }
    }

    /// Esc: help, then source panel, then error notice, then search focus.
    pub fn dismiss(&mut self) -> bool {
        if self.ui.overlay != UIOverlay::None {
            self.ui.close_all_overlays();
        } else if matches!(self.selection.state(), SelectionState::Ready { .. }) {
            self.selection.dismiss();
        } else if self.ui.notification.is_some() {
            self.ui.dismiss_notification();
            if matches!(self.selection.state(), SelectionState::Error { .. }) {
                self.selection.dismiss();
            }
        } else if self.ui.searching {
            self.ui.searching = false;
        } else {
            return false;
        }
        self.redraw = true;
        true
    }

    /// Lines in the shown source, zero when nothing is shown.
    pub fn source_line_count(&self) -> usize {
        match self.selection.state() {
            SelectionState::Ready { text, .. } => text.lines().count(),
            _ => 0,
        }
    }

    pub fn tick(&mut self) {
        if self.selection.state().is_loading() {
            self.ui.advance_spinner();
            self.redraw = true;
        }
        if self.ui.update_notification() {
            self.redraw = true;
        }
    }

    /// Startup catalog/registry mismatch, shown as a warning notice.
    pub fn report_registry_drift(&mut self, audit: &RegistryAudit) {
        if audit.missing_loaders.is_empty() {
            return;
        }
        let message = format!(
            "{} sample(s) have no source and will fail to open: {}",
            audit.missing_loaders.len(),
            audit.missing_loaders.join(", ")
        );
        self.ui.show_warning(message);
        self.redraw = true;
    }

    pub fn report_error(&mut self, error: &AppError) {
        info!("Reporting error to user: {}", error);
        self.ui.show_error(error.to_string());
        self.redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ui_state::NotificationLevel;
    use crate::registry::loader::LoadFuture;

    fn scenario_catalog() -> Catalog {
        Catalog::new(vec![
            ContentEntry::new("a.x", "Alpha", "Basics", "first"),
            ContentEntry::new("b.x", "Beta", "Control", "second"),
            ContentEntry::new("c.x", "Gamma", "Control", "third"),
        ])
        .unwrap()
    }

    fn state_with(
        registry: LoaderRegistry,
    ) -> (AppState, mpsc::UnboundedReceiver<TaskResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState::new(
            scenario_catalog(),
            Arc::new(registry),
            Duration::from_secs(1),
            UIState::default(),
            tx,
        );
        (state, rx)
    }

    fn state_with_ui(
        registry: LoaderRegistry,
        ui: UIState,
    ) -> (AppState, mpsc::UnboundedReceiver<TaskResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState::new(
            scenario_catalog(),
            Arc::new(registry),
            Duration::from_secs(1),
            ui,
            tx,
        );
        (state, rx)
    }

    fn registered_ab() -> LoaderRegistry {
        LoaderRegistry::builder("samples")
            .register_static("a.x", "alpha\nsource")
            .register_static("b.x", "beta")
            .build()
    }

    fn visible_keys(state: &AppState) -> Vec<String> {
        state.visible_entries().map(|e| e.key.to_string()).collect()
    }

    #[tokio::test]
    async fn filter_changes_update_visible_list() {
        let (mut state, _rx) = state_with(registered_ab());
        assert_eq!(visible_keys(&state), vec!["a.x", "b.x", "c.x"]);

        state.next_category();
        assert_eq!(state.filter.category, "Basics");
        assert_eq!(visible_keys(&state), vec!["a.x"]);

        state.next_category();
        state.push_query_char('T');
        state.push_query_char('H');
        assert_eq!(visible_keys(&state), vec!["c.x"]);
        assert_eq!(state.ui.selected(), Some(0));

        state.clear_query();
        assert_eq!(visible_keys(&state), vec!["b.x", "c.x"]);
    }

    #[tokio::test]
    async fn registry_miss_leaves_catalog_and_filter_alone() {
        let (mut state, _rx) = state_with(registered_ab());
        state.push_query_char('g');
        let filter_before = state.filter.clone();
        let visible_before = state.visible.clone();

        assert_eq!(state.highlighted().map(|e| e.key.as_str()), Some("c.x"));
        state.open_selected();

        let notice = state.ui.notification.as_ref().expect("error notice");
        assert_eq!(notice.level, NotificationLevel::Error);
        assert!(notice.message.contains("\"c.x\""));
        assert_eq!(state.selection.state().label(), "error");
        assert_eq!(state.filter, filter_before);
        assert_eq!(state.visible, visible_before);
        assert_eq!(state.catalog.len(), 3);
        assert_eq!(state.input_mode(), InputMode::Browse);

        // other entries stay selectable
        state.clear_query();
        state.ui.select_first(state.visible.len());
        state.open_selected();
        assert!(state.ui.notification.is_none());
        assert!(state.selection.state().is_loading());
    }

    #[tokio::test]
    async fn ready_source_switches_mode_and_dismisses() {
        let (mut state, mut rx) = state_with(registered_ab());
        state.open_selected();
        state.handle_task_result(rx.recv().await.unwrap());

        assert_eq!(state.input_mode(), InputMode::Source);
        assert_eq!(state.source_line_count(), 2);

        assert!(state.dismiss());
        assert_eq!(state.selection.state().label(), "idle");
        assert_eq!(state.input_mode(), InputMode::Browse);
    }

    #[tokio::test]
    async fn dismissing_error_notice_resets_selection() {
        let (mut state, _rx) = state_with(LoaderRegistry::builder("samples").build());
        state.open_selected();
        assert_eq!(state.selection.state().label(), "error");

        assert!(state.dismiss());
        assert!(state.ui.notification.is_none());
        assert_eq!(state.selection.state().label(), "idle");
        assert!(!state.dismiss());
    }

    #[tokio::test]
    async fn retry_after_miss_reports_again() {
        let (mut state, _rx) = state_with(LoaderRegistry::builder("samples").build());
        state.open_selected();
        let first = state.selection.generation();
        assert!(state.retry_selection());
        assert_eq!(state.selection.generation(), first + 1);
        assert!(state.ui.has_error_notice());
    }

    #[tokio::test]
    async fn search_mode_follows_flag() {
        let (mut state, _rx) = state_with(registered_ab());
        state.ui.searching = true;
        assert_eq!(state.input_mode(), InputMode::Search);
        state.ui.toggle_help_overlay();
        assert_eq!(state.input_mode(), InputMode::Help);
        assert!(state.dismiss());
        assert!(state.dismiss());
        assert_eq!(state.input_mode(), InputMode::Browse);
    }

    fn wait_past_dismiss() {
        std::thread::sleep(Duration::from_millis(5));
    }

    #[tokio::test]
    async fn loaded_source_shows_expiring_success_notice() {
        let (mut state, mut rx) = state_with_ui(registered_ab(), UIState::new(0));
        state.open_selected();
        state.handle_task_result(rx.recv().await.unwrap());

        let notice = state.ui.notification.as_ref().expect("success notice");
        assert_eq!(notice.level, NotificationLevel::Success);
        assert!(notice.message.contains("Alpha"));
        assert!(notice.message.contains("2 lines"));

        wait_past_dismiss();
        state.redraw = false;
        state.tick();
        assert!(state.ui.notification.is_none());
        assert!(state.redraw);
        assert_eq!(state.input_mode(), InputMode::Source);
    }

    #[tokio::test]
    async fn retry_of_failed_load_shows_info_notice() {
        let registry = LoaderRegistry::builder("samples")
            .register(
                "a.x",
                Arc::new(|| -> LoadFuture {
                    Box::pin(async { Err(AppError::Other("disk gone".into())) })
                }),
            )
            .build();
        let (mut state, mut rx) = state_with_ui(registry, UIState::new(0));
        state.open_selected();
        state.handle_task_result(rx.recv().await.unwrap());
        assert!(state.ui.has_error_notice());

        assert!(state.retry_selection());
        let notice = state.ui.notification.as_ref().expect("info notice");
        assert_eq!(notice.level, NotificationLevel::Info);
        assert!(notice.message.contains("Retrying Alpha"));

        wait_past_dismiss();
        state.tick();
        assert!(state.ui.notification.is_none());
        assert!(state.selection.state().is_loading());
    }

    #[tokio::test]
    async fn registry_drift_is_shown_as_expiring_warning() {
        let registry = registered_ab();
        let audit = registry.audit(&scenario_catalog());
        let (mut state, _rx) = state_with_ui(registry, UIState::new(0));

        state.report_registry_drift(&audit);
        let notice = state.ui.notification.as_ref().expect("warning notice");
        assert_eq!(notice.level, NotificationLevel::Warning);
        assert!(notice.message.contains("c.x"));
        assert!(!notice.message.contains("a.x"));

        wait_past_dismiss();
        state.tick();
        assert!(state.ui.notification.is_none());
    }

    #[tokio::test]
    async fn clean_registry_reports_no_drift() {
        let registry = LoaderRegistry::builder("samples")
            .register_static("a.x", "a")
            .register_static("b.x", "b")
            .register_static("c.x", "c")
            .build();
        let audit = registry.audit(&scenario_catalog());
        let (mut state, _rx) = state_with(registry);
        state.report_registry_drift(&audit);
        assert!(state.ui.notification.is_none());
    }
}

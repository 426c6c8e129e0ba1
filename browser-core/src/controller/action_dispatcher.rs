//! src/controller/action_dispatcher.rs
//! ============================================================================
//! # ActionDispatcher: applies actions to AppState
//!
//! The single place where actions mutate state. Returns `false` when the
//! application should stop.

use tracing::{debug, info};

use crate::controller::actions::Action;
use crate::model::app_state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherStats {
    pub total_actions: u64,
    pub selections: u64,
    pub task_results: u64,
}

#[derive(Debug, Default)]
pub struct ActionDispatcher {
    stats: DispatcherStats,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DispatcherStats {
        self.stats
    }

    pub fn handle(&mut self, state: &mut AppState, action: Action) -> bool {
        self.stats.total_actions += 1;
        if !matches!(action, Action::Tick) {
            debug!("Dispatching action: {:?}", action);
        }

        match action {
            Action::Quit => {
                info!("Quit requested");
                return false;
            }
            Action::Resize(..) => state.redraw = true,
            Action::Tick => state.tick(),

            Action::FocusSearch => {
                state.ui.searching = true;
                state.redraw = true;
            }
            Action::BlurSearch => {
                state.ui.searching = false;
                state.redraw = true;
            }
            Action::QueryInput(c) => state.push_query_char(c),
            Action::QueryBackspace => state.pop_query_char(),
            Action::ClearQuery => state.clear_query(),
            Action::NextCategory => state.next_category(),
            Action::PrevCategory => state.prev_category(),

            Action::MoveSelectionUp => {
                state.ui.move_selection_up(state.visible.len());
                state.redraw = true;
            }
            Action::MoveSelectionDown => {
                state.ui.move_selection_down(state.visible.len());
                state.redraw = true;
            }
            Action::SelectFirst => {
                state.ui.select_first(state.visible.len());
                state.redraw = true;
            }
            Action::SelectLast => {
                state.ui.select_last(state.visible.len());
                state.redraw = true;
            }
            Action::OpenSelected => {
                if state.open_selected().is_some() {
                    self.stats.selections += 1;
                }
            }
            Action::RetrySelection => {
                if state.retry_selection() {
                    self.stats.selections += 1;
                }
            }

            Action::ScrollUp => scroll(state, -1),
            Action::ScrollDown => scroll(state, 1),
            Action::PageUp => {
                let page = state.ui.page();
                scroll(state, -page);
            }
            Action::PageDown => {
                let page = state.ui.page();
                scroll(state, page);
            }

            Action::Dismiss => {
                state.dismiss();
            }
            Action::ToggleHelp => {
                state.ui.toggle_help_overlay();
                state.redraw = true;
            }

            Action::TaskResult(result) => {
                self.stats.task_results += 1;
                state.handle_task_result(result);
            }
        }

        true
    }
}

fn scroll(state: &mut AppState, delta: i32) {
    let lines = state.source_line_count();
    state.ui.scroll_by(delta, lines);
    state.redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin;
    use crate::model::ui_state::UIState;
    use crate::registry::loader::LoaderRegistry;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn keyboard_flow_opens_and_closes_a_sample() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let registry = LoaderRegistry::builder("samples")
            .register_static("fizzbuzz.rs", "fn main() {\n    // fizz\n}\n")
            .build();
        let mut state = AppState::new(
            builtin(),
            Arc::new(registry),
            Duration::from_secs(1),
            UIState::default(),
            tx,
        );
        let mut dispatcher = ActionDispatcher::new();

        for action in [
            Action::FocusSearch,
            Action::QueryInput('F'),
            Action::QueryInput('i'),
            Action::QueryInput('z'),
            Action::QueryInput('z'),
            Action::BlurSearch,
        ] {
            assert!(dispatcher.handle(&mut state, action));
        }
        assert_eq!(state.highlighted().map(|e| e.key.as_str()), Some("fizzbuzz.rs"));

        dispatcher.handle(&mut state, Action::OpenSelected);
        let result = rx.recv().await.unwrap();
        dispatcher.handle(&mut state, Action::TaskResult(result));
        assert_eq!(state.selection.state().label(), "ready");

        dispatcher.handle(&mut state, Action::ScrollDown);
        assert_eq!(state.ui.source_scroll, 1);

        dispatcher.handle(&mut state, Action::Dismiss);
        assert_eq!(state.selection.state().label(), "idle");

        assert!(!dispatcher.handle(&mut state, Action::Quit));
        let stats = dispatcher.stats();
        assert_eq!(stats.selections, 1);
        assert_eq!(stats.task_results, 1);
    }
}

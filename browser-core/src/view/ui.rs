//! src/view/ui.rs
//! ============================================================
//! Frame renderer: filter bar on top, list or source panel in the
//! middle, status bar at the bottom, overlays last.

use std::time::{Duration, Instant};

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{instrument, trace};

use crate::{
    controller::selection::SelectionState,
    model::{app_state::AppState, ui_state::UIOverlay},
    view::{
        components::{
            filter_bar::FilterBar, help_overlay::HelpOverlay, loading_overlay::LoadingOverlay,
            notification_overlay::NotificationOverlay, sample_list::SampleList,
            source_panel::SourcePanel, status_bar::StatusBar,
        },
        theme,
    },
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

#[derive(Debug, Default)]
pub struct UIRenderer {
    stats: RenderStats,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &mut AppState) {
        let start = Instant::now();
        let screen = f.area();

        if screen.width < MIN_WIDTH || screen.height < MIN_HEIGHT {
            Self::draw_too_small(f, screen);
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(screen);

            // scroll paging follows the real panel height
            app.ui.source_viewport = chunks[1].height;
            let app = &*app;

            FilterBar::render(f, app, chunks[0]);
            Self::draw_body(f, app, chunks[1]);
            StatusBar::render(f, app, chunks[2]);
            Self::draw_overlays(f, app, screen);
        }

        let dur = start.elapsed();
        self.stats.total += dur;
        if dur.as_millis() > 16 {
            self.stats.slow += 1;
        }
        self.stats.frames += 1;
        trace!("frame {} rendered in {:?}", self.stats.frames, dur);
    }

    fn draw_body(f: &mut Frame<'_>, app: &AppState, area: Rect) {
        match app.selection.state() {
            SelectionState::Ready { entry, text } => {
                SourcePanel::render(f, entry, text, app.ui.source_scroll, area);
            }
            SelectionState::Loading { entry, started } => {
                SampleList::render(f, app, area);
                LoadingOverlay::render(f, entry, app.ui.spinner_frame, started.elapsed(), area);
            }
            SelectionState::None | SelectionState::Error { .. } => {
                SampleList::render(f, app, area);
            }
        }
    }

    fn draw_overlays(f: &mut Frame<'_>, app: &AppState, screen: Rect) {
        if let Some(notification) = &app.ui.notification {
            NotificationOverlay::render(f, notification, screen);
        }
        if app.ui.overlay == UIOverlay::Help {
            HelpOverlay::render(f, screen);
        }
    }

    fn draw_too_small(f: &mut Frame<'_>, screen: Rect) {
        let msg = Paragraph::new(format!(
            "Terminal too small: need at least {MIN_WIDTH}x{MIN_HEIGHT}"
        ))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(theme::RED))
        .wrap(Wrap { trim: true });
        f.render_widget(msg, screen);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    use super::*;
    use crate::catalog::builtin::builtin;
    use crate::controller::event_loop::TaskResult;
    use crate::model::ui_state::UIState;
    use crate::registry::loader::LoaderRegistry;

    fn app_with(
        registry: LoaderRegistry,
    ) -> (AppState, mpsc::UnboundedReceiver<TaskResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = AppState::new(
            builtin(),
            Arc::new(registry),
            Duration::from_secs(1),
            UIState::default(),
            tx,
        );
        (app, rx)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_catalog_list_and_chips() {
        let (mut app, _rx) = app_with(LoaderRegistry::builder("samples").build());
        let mut renderer = UIRenderer::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| renderer.render(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Hello, World"));
        assert!(text.contains("Concurrency"));
        assert!(text.contains("Browse"));
        assert!(text.contains(" 12 samples "));
        assert_eq!(renderer.stats().frames, 1);
        assert_eq!(app.ui.source_viewport, 35);
    }

    #[test]
    fn active_filter_shows_visible_of_total() {
        let (mut app, _rx) = app_with(LoaderRegistry::builder("samples").build());
        for c in "fizz".chars() {
            app.push_query_char(c);
        }
        let mut renderer = UIRenderer::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| renderer.render(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(" 1 of 12 samples "));
        assert!(text.contains("FizzBuzz"));
    }

    #[test]
    fn registry_miss_is_shown_as_notice() {
        let (mut app, _rx) = app_with(LoaderRegistry::builder("samples").build());
        app.open_selected();

        let mut renderer = UIRenderer::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| renderer.render(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Error"));
        assert!(text.contains("No loader"));
    }

    #[test]
    fn tiny_terminal_gets_a_message() {
        let (mut app, _rx) = app_with(LoaderRegistry::builder("samples").build());
        let mut renderer = UIRenderer::new();
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();

        terminal.draw(|f| renderer.render(f, &mut app)).unwrap();

        assert!(screen_text(&terminal).contains("Terminal"));
    }
}

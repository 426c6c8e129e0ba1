//! src/view/components/status_bar.rs
//!
//! One line at the bottom: input mode, selection state, active filter with
//! visible/total counts, and a key hint for the current mode.

use crate::{
    model::{app_state::AppState, ui_state::InputMode},
    view::theme,
};
use ratatui::{prelude::*, widgets::Paragraph};

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let mode = app.input_mode();
        let mode_str = match mode {
            InputMode::Browse => "Browse",
            InputMode::Search => "Search",
            InputMode::Source => "Source",
            InputMode::Help => "Help",
        };

        let state = app.selection.state();
        let selection = match state.entry() {
            Some(entry) => format!("{} ({})", state.label(), entry.key),
            None => state.label().to_string(),
        };

        let query = if app.filter.query.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", app.filter.query)
        };
        let left_text = format!(
            " {} | {} | {}{} • {}/{} ",
            mode_str,
            selection,
            app.filter.category,
            query,
            app.visible.len(),
            app.catalog.len()
        );

        let hint = match mode {
            InputMode::Browse => "/ search  Tab category  Enter open  ? help  q quit ",
            InputMode::Search => "type to filter  Enter/Esc done ",
            InputMode::Source => "↑↓ scroll  Esc close ",
            InputMode::Help => "Esc close ",
        };

        let hint_width = hint.chars().count() as u16;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(hint_width)])
            .split(area);

        let mode_color = match mode {
            InputMode::Browse => theme::PURPLE,
            InputMode::Search => theme::YELLOW,
            InputMode::Source => theme::GREEN,
            InputMode::Help => theme::CYAN,
        };

        frame.render_widget(
            Paragraph::new(left_text)
                .style(Style::default().bg(theme::CURRENT_LINE).fg(mode_color)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(hint)
                .alignment(Alignment::Right)
                .style(Style::default().bg(theme::CURRENT_LINE).fg(theme::COMMENT)),
            chunks[1],
        );
    }
}

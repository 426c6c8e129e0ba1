//! src/view/components/filter_bar.rs
//! ============================================================================
//! # FilterBar: search box and category chips
//!
//! Two rows inside one bordered block: the query (with a cursor while in
//! search mode) and one chip per category, the active one highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::app_state::AppState;
use crate::view::theme;

pub struct FilterBar;

impl FilterBar {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let searching = app.ui.searching;

        let mut query_line = vec![
            Span::styled(
                "Search: ",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(app.filter.query.as_str()),
        ];
        if searching {
            query_line.push(Span::styled("▏", Style::default().fg(theme::YELLOW)));
        } else if app.filter.query.is_empty() {
            query_line.push(Span::styled(
                "press / to type",
                theme::description_style(),
            ));
        }

        let mut chips: Vec<Span<'_>> = Vec::with_capacity(app.categories.len() * 2);
        for category in &app.categories {
            let active = *category == app.filter.category;
            chips.push(Span::styled(format!(" {category} "), theme::chip_style(active)));
            chips.push(Span::raw(" "));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Samples ")
            .border_style(theme::border_style(searching));

        let para = Paragraph::new(vec![Line::from(query_line), Line::from(chips)])
            .block(block)
            .style(theme::panel_style());

        frame.render_widget(para, area);
    }
}

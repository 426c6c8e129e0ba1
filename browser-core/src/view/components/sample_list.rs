//! src/view/components/sample_list.rs
//! ============================================================================
//! # SampleList: the filtered catalog
//!
//! One row per visible entry: title, category tag and a dimmed description.
//! Selection is driven by `UIState::list_state`.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::model::app_state::AppState;
use crate::view::theme;

pub struct SampleList;

impl SampleList {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if app.filter.is_active() {
                format!(" {} of {} samples ", app.visible.len(), app.catalog.len())
            } else {
                format!(" {} samples ", app.catalog.len())
            })
            .border_style(theme::border_style(!app.ui.searching));

        if app.visible.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No samples match the current filter",
                theme::description_style(),
            )))
            .block(block)
            .style(theme::panel_style());
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem<'_>> = app
            .visible_entries()
            .map(|entry| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(entry.title.as_str()),
                        Span::raw("  "),
                        Span::styled(format!("[{}]", entry.category), theme::category_style()),
                        Span::styled(format!("  {}", entry.key), theme::line_number_style()),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", entry.description),
                        theme::description_style(),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .style(theme::panel_style())
            .highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ");

        let mut list_state = app.ui.list_state.clone();
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

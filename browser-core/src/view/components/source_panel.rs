//! src/view/components/source_panel.rs
//! ============================================================================
//! # SourcePanel: read-only view of a loaded sample
//!
//! Plain text with a line-number gutter; scrolling is the only interaction.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::catalog::entry::ContentEntry;
use crate::view::theme;

pub struct SourcePanel;

impl SourcePanel {
    pub fn render(frame: &mut Frame<'_>, entry: &ContentEntry, text: &str, scroll: u16, area: Rect) {
        let total = text.lines().count().max(1);
        let width = total.to_string().len();

        let lines: Vec<Line<'_>> = text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$} │ ", i + 1),
                        theme::line_number_style(),
                    ),
                    Span::raw(line),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} · {} (read-only) ", entry.title, entry.key))
            .title_bottom(Line::from(format!(
                " line {}/{}  [↑/↓] scroll  [Esc] close ",
                usize::from(scroll) + 1,
                total
            )))
            .border_style(theme::border_style(true));

        let para = Paragraph::new(lines)
            .block(block)
            .style(theme::panel_style())
            .scroll((scroll, 0));

        frame.render_widget(Clear, area);
        frame.render_widget(para, area);
    }
}

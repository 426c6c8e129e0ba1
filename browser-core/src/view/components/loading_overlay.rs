//! src/view/components/loading_overlay.rs
//! ============================================================
//! Indeterminate loading box shown while a selection is in flight.
//! The spinner frame is advanced by the tick handler, never here.

use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::catalog::entry::ContentEntry;
use crate::view::theme;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct LoadingOverlay;

impl LoadingOverlay {
    /// Draw the box centred in `rect`.
    ///
    /// * `entry`   – the selection being loaded.
    /// * `frame_n` – spinner frame counter from `UIState`.
    /// * `elapsed` – time since the selection started.
    pub fn render(
        frame: &mut Frame<'_>,
        entry: &ContentEntry,
        frame_n: usize,
        elapsed: Duration,
        rect: Rect,
    ) {
        let area = Self::centered_box(rect, 48, 5);
        frame.render_widget(Clear, area);

        let chrome = Block::default()
            .title(" Loading ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PURPLE))
            .style(Style::default().bg(theme::BACKGROUND).fg(theme::FOREGROUND));

        let spinner = SPINNER[frame_n % SPINNER.len()];
        let text = Text::from(vec![
            Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(theme::CYAN)),
                Span::styled(
                    entry.title.as_str(),
                    Style::default()
                        .fg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("{} • {:.1}s", entry.key, elapsed.as_secs_f32())),
            Line::from(Span::styled(
                "select another sample to cancel",
                theme::description_style(),
            )),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(chrome)
                .alignment(Alignment::Center),
            area,
        );
    }

    fn centered_box(r: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(r.width);
        let height = height.min(r.height);
        Rect::new(
            r.x + (r.width - width) / 2,
            r.y + (r.height - height) / 2,
            width,
            height,
        )
    }
}

//! Key reference, grouped by the mode each binding applies in.
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        let overlay_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay_area);

        let help = Paragraph::new(Text::from(Self::lines()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Sample Browser Help ")
                    .title_alignment(Alignment::Center)
                    .title_bottom(Line::from(" [Esc/?] close ").centered())
                    .border_style(Style::default().fg(theme::CYAN))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: false });

        frame.render_widget(help, overlay_area);
    }

    fn section(title: &str) -> Line<'_> {
        Line::from(Span::styled(title, Style::default().fg(theme::CYAN)))
    }

    fn lines() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Browsing",
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section("List:"),
            Line::from("  ↑↓ / j k       Move highlight"),
            Line::from("  Home/End g G   First / last sample"),
            Line::from("  Enter          Open highlighted sample"),
            Line::from("  r              Retry the failed selection"),
            Line::from(""),
            Self::section("Filter:"),
            Line::from("  /              Focus search (Enter/Esc to leave)"),
            Line::from("  Ctrl+U         Clear search text"),
            Line::from("  Tab / Shift+Tab  Next / previous category"),
            Line::from(""),
            Self::section("Source panel:"),
            Line::from("  ↑↓ / j k       Scroll one line"),
            Line::from("  PgUp/PgDn      Scroll one page"),
            Line::from("  Esc / q        Close panel"),
            Line::from(""),
            Self::section("Application:"),
            Line::from("  Esc            Dismiss notice"),
            Line::from("  ?              Toggle this help"),
            Line::from("  q / Ctrl+C     Quit"),
        ]
    }
}

/// Rect of `percent_x` × `percent_y` centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

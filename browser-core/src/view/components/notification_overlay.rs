//! src/view/components/notification_overlay.rs
//! ============================================================================
//! # NotificationOverlay: dismissible notice, separate from the main panels
//!
//! Errors from a selection are rendered here verbatim, so the list below
//! stays usable while the notice is shown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme;

pub struct NotificationOverlay;

impl NotificationOverlay {
    pub fn render(frame: &mut Frame<'_>, notification: &Notification, area: Rect) {
        let (border_style, title, icon) = match notification.level {
            NotificationLevel::Info => (Style::default().fg(theme::CYAN), "Info", "ℹ"),
            NotificationLevel::Warning => (Style::default().fg(theme::YELLOW), "Warning", "⚠"),
            NotificationLevel::Error => (Style::default().fg(theme::RED), "Error", "✕"),
            NotificationLevel::Success => (Style::default().fg(theme::GREEN), "Success", "✓"),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} {title} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(Style::default().bg(theme::BACKGROUND));
        if notification.auto_dismiss_ms.is_none() {
            block = block.title_bottom(Line::from(" [Esc] dismiss  [r] retry ").right_aligned());
        }

        let para = Paragraph::new(notification.message.as_str())
            .block(block)
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: true });

        let area = Self::notice_area(area, &notification.message);
        frame.render_widget(Clear, area);
        frame.render_widget(para, area);
    }

    /// Bottom-right box sized to the message.
    fn notice_area(full: Rect, message: &str) -> Rect {
        let width = full.width.min(60).max(20.min(full.width));
        let inner = usize::from(width.saturating_sub(2).max(1));
        let rows = u16::try_from(message.len().div_ceil(inner)).unwrap_or(u16::MAX);
        let height = rows.saturating_add(2).min(full.height);
        Rect::new(
            full.x + full.width.saturating_sub(width + 1),
            full.y + full.height.saturating_sub(height + 1),
            width,
            height,
        )
    }
}

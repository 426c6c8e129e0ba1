//! src/model/ui_state.rs
//! ============================================================================
//! # UIState: cursor, overlays, notifications
//!
//! Ephemeral view state only. What is selected/loaded lives in the selection
//! controller; what is visible lives in the filter state.

use std::time::Instant;

use ratatui::widgets::ListState;

/// How key presses are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    /// Typed characters edit the query.
    Search,
    /// A loaded source is shown.
    Source,
    Help,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UIOverlay {
    #[default]
    None,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct UIState {
    pub searching: bool,
    pub overlay: UIOverlay,
    /// Highlighted row in the filtered list.
    pub list_state: ListState,
    /// First visible line of the source panel.
    pub source_scroll: u16,
    /// Height of the source panel at the last draw, for paging.
    pub source_viewport: u16,
    pub notification: Option<Notification>,
    pub spinner_frame: usize,
    pub info_dismiss_ms: u64,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl UIState {
    pub fn new(info_dismiss_ms: u64) -> Self {
        Self {
            searching: false,
            overlay: UIOverlay::None,
            list_state: ListState::default().with_selected(Some(0)),
            source_scroll: 0,
            source_viewport: 20,
            notification: None,
            spinner_frame: 0,
            info_dismiss_ms,
        }
    }

    // --- Cursor ---
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keeps the cursor inside `0..len`, or clears it for an empty list.
    pub fn clamp_selection(&mut self, len: usize) {
        let next = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
        self.list_state.select(next);
    }

    pub fn move_selection_up(&mut self, len: usize) {
        if len > 0 {
            let next = self.selected().map_or(0, |s| s.saturating_sub(1));
            self.list_state.select(Some(next));
        }
    }

    pub fn move_selection_down(&mut self, len: usize) {
        if len > 0 {
            let next = self
                .selected()
                .map_or(0, |s| s.saturating_add(1).min(len - 1));
            self.list_state.select(Some(next));
        }
    }

    pub fn select_first(&mut self, len: usize) {
        self.list_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.list_state.select(len.checked_sub(1));
    }

    // --- Source panel ---
    pub fn reset_scroll(&mut self) {
        self.source_scroll = 0;
    }

    pub fn scroll_by(&mut self, delta: i32, line_count: usize) {
        let max = u16::try_from(line_count.saturating_sub(1)).unwrap_or(u16::MAX);
        let next = i32::from(self.source_scroll) + delta;
        self.source_scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX).min(max);
    }

    pub fn page(&self) -> i32 {
        i32::from(self.source_viewport.saturating_sub(2).max(1))
    }

    // --- Overlays ---
    pub fn toggle_help_overlay(&mut self) {
        self.overlay = match self.overlay {
            UIOverlay::Help => UIOverlay::None,
            UIOverlay::None => UIOverlay::Help,
        };
    }

    pub fn close_all_overlays(&mut self) {
        self.overlay = UIOverlay::None;
    }

    // --- Notifications ---
    pub fn show_notification(
        &mut self,
        message: String,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u64>,
    ) {
        self.notification = Some(Notification {
            message,
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
    }

    pub fn show_info(&mut self, message: String) {
        let ms = self.info_dismiss_ms;
        self.show_notification(message, NotificationLevel::Info, Some(ms));
    }

    pub fn show_warning(&mut self, message: String) {
        let ms = self.info_dismiss_ms.saturating_mul(2);
        self.show_notification(message, NotificationLevel::Warning, Some(ms));
    }

    pub fn show_success(&mut self, message: String) {
        let ms = self.info_dismiss_ms;
        self.show_notification(message, NotificationLevel::Success, Some(ms));
    }

    /// Errors stay until dismissed.
    pub fn show_error(&mut self, message: String) {
        self.show_notification(message, NotificationLevel::Error, None);
    }

    pub fn has_error_notice(&self) -> bool {
        self.notification
            .as_ref()
            .is_some_and(|n| n.level == NotificationLevel::Error)
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    /// Drops an expired notification; true if one was removed.
    pub fn update_notification(&mut self) -> bool {
        let expired = self.notification.as_ref().is_some_and(|n| {
            n.auto_dismiss_ms
                .is_some_and(|ms| n.timestamp.elapsed().as_millis() > u128::from(ms))
        });
        if expired {
            self.notification = None;
        }
        expired
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut ui = UIState::default();
        ui.move_selection_up(3);
        assert_eq!(ui.selected(), Some(0));
        ui.move_selection_down(3);
        ui.move_selection_down(3);
        ui.move_selection_down(3);
        assert_eq!(ui.selected(), Some(2));

        ui.clamp_selection(1);
        assert_eq!(ui.selected(), Some(0));
        ui.clamp_selection(0);
        assert_eq!(ui.selected(), None);
        ui.clamp_selection(4);
        assert_eq!(ui.selected(), Some(0));
        ui.select_last(4);
        assert_eq!(ui.selected(), Some(3));
    }

    #[test]
    fn errors_do_not_expire() {
        let mut ui = UIState::new(0);
        ui.show_error("boom".into());
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(!ui.update_notification());
        assert!(ui.has_error_notice());
        assert!(ui.dismiss_notification());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn info_expires() {
        let mut ui = UIState::new(0);
        ui.show_info("hi".into());
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(ui.update_notification());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn levels_carry_their_dismiss_policy() {
        let mut ui = UIState::new(1000);
        ui.show_success("loaded".into());
        assert_eq!(ui.notification.as_ref().map(|n| n.level), Some(NotificationLevel::Success));
        assert_eq!(ui.notification.as_ref().and_then(|n| n.auto_dismiss_ms), Some(1000));
        ui.show_warning("drift".into());
        assert_eq!(ui.notification.as_ref().map(|n| n.level), Some(NotificationLevel::Warning));
        assert_eq!(ui.notification.as_ref().and_then(|n| n.auto_dismiss_ms), Some(2000));
        assert!(!ui.has_error_notice());
    }

    #[test]
    fn scroll_is_clamped() {
        let mut ui = UIState::default();
        ui.scroll_by(-5, 10);
        assert_eq!(ui.source_scroll, 0);
        ui.scroll_by(50, 10);
        assert_eq!(ui.source_scroll, 9);
        ui.reset_scroll();
        assert_eq!(ui.source_scroll, 0);
    }

    #[test]
    fn help_toggles() {
        let mut ui = UIState::default();
        ui.toggle_help_overlay();
        assert_eq!(ui.overlay, UIOverlay::Help);
        ui.toggle_help_overlay();
        assert_eq!(ui.overlay, UIOverlay::None);
    }
}

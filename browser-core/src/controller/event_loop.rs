//! src/controller/event_loop.rs
//! ============================================================================
//! # EventLoop: terminal input, background results and ticks
//!
//! Multiplexes three sources with `tokio::select!` and yields one `Action` at
//! a time. Everything runs on the UI task; only loaders run elsewhere and
//! they report back through `task_rx`.

use std::sync::Arc;
use std::time::Duration;

use compact_str::CompactString;
use crossterm::event::{Event as TerminalEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{trace, warn};

use crate::controller::actions::Action;
use crate::error::AppError;
use crate::model::ui_state::InputMode;

/// Completion message from a background task.
#[derive(Debug)]
pub enum TaskResult {
    /// A source loader finished, successfully or not.
    SourceLoaded {
        generation: u64,
        key: CompactString,
        result: Result<Arc<str>, Arc<AppError>>,
        exec: Duration,
    },
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    ticker: Interval,
}

impl EventLoop {
    pub fn new(task_rx: mpsc::UnboundedReceiver<TaskResult>, tick_rate: Duration) -> Self {
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            task_rx,
            event_stream: EventStream::new(),
            ticker,
        }
    }

    /// Waits for the next actionable event. `None` when every source closed.
    pub async fn next_action(&mut self, mode: InputMode) -> Option<Action> {
        loop {
            tokio::select! {
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(action) = map_terminal_event(event, mode) {
                                return Some(action);
                            }
                        }
                        Some(Err(e)) => warn!("Terminal event error: {}", e),
                        None => return None,
                    }
                }

                Some(result) = self.task_rx.recv() => {
                    trace!("Task result received");
                    return Some(Action::TaskResult(result));
                }

                _ = self.ticker.tick() => return Some(Action::Tick),
            }
        }
    }
}

pub fn map_terminal_event(event: TerminalEvent, mode: InputMode) -> Option<Action> {
    match event {
        TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => map_key(key, mode),
        TerminalEvent::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

/// Translates a key press into an action for the current input mode.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::BlurSearch),
            KeyCode::Backspace => Some(Action::QueryBackspace),
            KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Tab => Some(Action::NextCategory),
            KeyCode::BackTab => Some(Action::PrevCategory),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearQuery)
            }
            KeyCode::Char(c) => Some(Action::QueryInput(c)),
            _ => None,
        },

        InputMode::Source => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Dismiss),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
            _ => None,
        },

        InputMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        },

        InputMode::Browse => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('r') => Some(Action::RetrySelection),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelectionUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelectionDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::SelectFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Action::SelectLast),
            KeyCode::Tab | KeyCode::Right => Some(Action::NextCategory),
            KeyCode::BackTab | KeyCode::Left => Some(Action::PrevCategory),
            KeyCode::Enter => Some(Action::OpenSelected),
            KeyCode::Esc => Some(Action::Dismiss),
            _ => None,
        },
    }
}

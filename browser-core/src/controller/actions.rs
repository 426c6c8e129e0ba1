//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Raw terminal events and background completions are translated into
//! `Action`s so the dispatcher has a single input type.

use crate::controller::event_loop::TaskResult;

#[derive(Debug)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Terminal resized.
    Resize(u16, u16),
    /// Periodic tick: spinner animation and notification expiry.
    Tick,

    // --- Filter ---
    /// Enter search mode; typed characters go to the query.
    FocusSearch,
    /// Leave search mode, keeping the query.
    BlurSearch,
    QueryInput(char),
    QueryBackspace,
    ClearQuery,
    NextCategory,
    PrevCategory,

    // --- List navigation ---
    MoveSelectionUp,
    MoveSelectionDown,
    SelectFirst,
    SelectLast,
    /// Load the highlighted entry.
    OpenSelected,
    /// Re-run the failed selection.
    RetrySelection,

    // --- Source panel ---
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    /// Close the source panel, error notice, or help overlay.
    Dismiss,
    ToggleHelp,

    /// A result from a background task.
    TaskResult(TaskResult),
}

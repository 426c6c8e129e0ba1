pub mod error;
pub use error::AppError;

pub mod config;

pub mod logging;
pub use logging::Logger;

pub mod catalog {
    pub mod entry;
    pub use entry::ContentEntry;

    pub mod index;
    pub use index::{ALL_CATEGORY, Catalog};

    pub mod builtin;

    pub mod filter;
    pub use filter::{FilterState, filter};

    pub mod manifest;
}

pub mod registry {
    pub mod loader;
    pub use loader::{LoadFuture, Loader, LoaderRegistry, RegistryAudit, RegistryBuilder};

    pub mod discovery;
}

pub mod cache {
    pub mod source_cache;
    pub use source_cache::SourceCache;
}

pub mod tasks {
    pub mod source_task;
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod selection;
    pub use selection::{SelectionController, SelectionState};

    pub mod action_dispatcher;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};
}

pub mod model {
    pub mod app_state;
    pub use app_state::AppState;

    pub mod ui_state;
    pub use ui_state::{InputMode, Notification, NotificationLevel, UIOverlay, UIState};
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod filter_bar;
        pub use filter_bar::FilterBar;
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod loading_overlay;
        pub use loading_overlay::LoadingOverlay;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod sample_list;
        pub use sample_list::SampleList;
        pub mod source_panel;
        pub use source_panel::SourcePanel;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }
}

//! src/controller/selection.rs
//! ============================================================================
//! # SelectionController: none → loading → ready | error
//!
//! Owns the only copy of [`SelectionState`]. Every `select` bumps a
//! generation counter and tags the spawned load with it; `complete` applies a
//! result only if its generation is still the newest, so the last selection
//! always decides what is shown. Registry misses and load failures both end in
//! `Error` and never escape this type.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::catalog::entry::ContentEntry;
use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::registry::loader::LoaderRegistry;
use crate::tasks::source_task::spawn_source_load;

#[derive(Debug, Clone, Default)]
pub enum SelectionState {
    #[default]
    None,
    Loading {
        entry: ContentEntry,
        started: Instant,
    },
    Ready {
        entry: ContentEntry,
        text: Arc<str>,
    },
    Error {
        entry: ContentEntry,
        error: Arc<AppError>,
    },
}

impl SelectionState {
    pub fn entry(&self) -> Option<&ContentEntry> {
        match self {
            Self::None => None,
            Self::Loading { entry, .. } | Self::Ready { entry, .. } | Self::Error { entry, .. } => {
                Some(entry)
            }
        }
    }

    /// User-facing error text, verbatim from the error.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Error { error, .. } => Some(error.to_string()),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "idle",
            Self::Loading { .. } => "loading",
            Self::Ready { .. } => "ready",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// What `complete` did with a load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Ready,
    Failed,
    /// Superseded by a newer selection; nothing changed.
    Stale,
}

pub struct SelectionController {
    registry: Arc<LoaderRegistry>,
    state: SelectionState,
    generation: u64,
    load_timeout: Duration,
    task_tx: UnboundedSender<TaskResult>,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state.label())
            .field("generation", &self.generation)
            .field("load_timeout", &self.load_timeout)
            .finish()
    }
}

impl SelectionController {
    pub fn new(
        registry: Arc<LoaderRegistry>,
        load_timeout: Duration,
        task_tx: UnboundedSender<TaskResult>,
    ) -> Self {
        Self {
            registry,
            state: SelectionState::None,
            generation: 0,
            load_timeout,
            task_tx,
        }
    }

    #[inline]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Starts a fresh load for `entry`, superseding whatever was shown or
    /// in flight. Returns the generation assigned to this request.
    pub fn select(&mut self, entry: &ContentEntry) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        self.state = SelectionState::Loading {
            entry: entry.clone(),
            started: Instant::now(),
        };

        match self.registry.resolve(&entry.key) {
            Some(loader) => {
                debug!("Selected {} (generation {})", entry.key, generation);
                spawn_source_load(
                    generation,
                    entry.key.clone(),
                    loader,
                    self.load_timeout,
                    self.task_tx.clone(),
                );
            }
            None => {
                let path = self.registry.virtual_path(&entry.key);
                warn!(
                    "Registry miss: catalog entry {} has no loader at {}",
                    entry.key, path
                );
                self.state = SelectionState::Error {
                    entry: entry.clone(),
                    error: Arc::new(AppError::registry_miss(entry.key.as_str(), path)),
                };
            }
        }

        generation
    }

    /// Re-selects the entry currently in `Error`, if any.
    pub fn retry(&mut self) -> Option<u64> {
        let SelectionState::Error { entry, .. } = &self.state else {
            return None;
        };
        let entry = entry.clone();
        info!("Retrying load of {}", entry.key);
        Some(self.select(&entry))
    }

    /// Applies a finished load. Results from an older generation are dropped.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Arc<str>, Arc<AppError>>,
    ) -> Completion {
        if generation != self.generation {
            debug!(
                "Discarding stale load result (generation {}, current {})",
                generation, self.generation
            );
            return Completion::Stale;
        }

        let SelectionState::Loading { entry, started } = &self.state else {
            debug!("Load result for generation {} arrived outside loading", generation);
            return Completion::Stale;
        };
        let entry = entry.clone();
        let elapsed = started.elapsed();

        match result {
            Ok(text) => {
                info!(
                    "Loaded {} ({} bytes in {:?})",
                    entry.key,
                    text.len(),
                    elapsed
                );
                self.state = SelectionState::Ready { entry, text };
                Completion::Ready
            }
            Err(cause) => {
                let error = AppError::load_failed(
                    entry.title.as_str(),
                    entry.key.as_str(),
                    cause.to_string(),
                );
                warn!("{}", error);
                self.state = SelectionState::Error {
                    entry,
                    error: Arc::new(error),
                };
                Completion::Failed
            }
        }
    }

    /// Closes a shown source or error. Loading cannot be dismissed.
    pub fn dismiss(&mut self) -> bool {
        match self.state {
            SelectionState::Ready { .. } | SelectionState::Error { .. } => {
                debug!("Dismissed {} selection", self.state.label());
                self.state = SelectionState::None;
                true
            }
            SelectionState::None | SelectionState::Loading { .. } => false,
        }
    }
}

//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the Sample Browser
//!
//! Every fallible operation in the crate returns `Result<T, AppError>`. The two
//! selection failures (`RegistryMiss` and `LoadFailed`) are recoverable: the
//! selection controller turns them into an error state instead of propagating.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for catalog, registry and view operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A catalog key has no registered loader.
    #[error("No loader registered for \"{key}\" (looked up {path})")]
    RegistryMiss { key: String, path: String },

    /// A loader was found but its invocation did not succeed.
    #[error("Failed to load \"{title}\" ({key}): {reason}")]
    LoadFailed {
        title: String,
        key: String,
        reason: String,
    },

    /// A loader did not finish within the configured timeout.
    #[error("Loading {key} timed out after {timeout_ms}ms")]
    LoadTimeout { key: String, timeout_ms: u64 },

    /// Two catalog entries share the same key.
    #[error("Duplicate catalog key: {0}")]
    DuplicateKey(String),

    /// A catalog entry is missing a required field.
    #[error("Invalid catalog entry: {field} - {message}")]
    InvalidEntry { field: String, message: String },

    /// Catalog keys without a loader, reported when the registry is strict.
    #[error("Catalog and registry disagree; no loader for: {}", missing.join(", "))]
    RegistryDrift { missing: Vec<String> },

    /// Asset discovery failure (bad pattern or unreadable directory).
    #[error("Asset discovery failed in {path:?}: {reason}")]
    Discovery { path: PathBuf, reason: String },

    /// TOML config or manifest parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization or deserialization error (e.g., JSON manifests).
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Create a registry miss for `key`, looked up at `path`
    pub fn registry_miss<S1: Into<String>, S2: Into<String>>(key: S1, path: S2) -> Self {
        Self::RegistryMiss {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Create a load failure naming the entry
    pub fn load_failed<S1, S2, S3>(title: S1, key: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::LoadFailed {
            title: title.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid entry error
    pub fn invalid_entry<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidEntry {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a discovery error
    pub fn discovery<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::Discovery {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the catalog/registry mismatch condition.
    pub fn is_registry_miss(&self) -> bool {
        matches!(self, Self::RegistryMiss { .. })
    }
}

// Manual Clone implementation to handle non-Clone fields
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::RegistryMiss { key, path } => Self::RegistryMiss {
                key: key.clone(),
                path: path.clone(),
            },
            Self::LoadFailed { title, key, reason } => Self::LoadFailed {
                title: title.clone(),
                key: key.clone(),
                reason: reason.clone(),
            },
            Self::LoadTimeout { key, timeout_ms } => Self::LoadTimeout {
                key: key.clone(),
                timeout_ms: *timeout_ms,
            },
            Self::DuplicateKey(key) => Self::DuplicateKey(key.clone()),
            Self::InvalidEntry { field, message } => Self::InvalidEntry {
                field: field.clone(),
                message: message.clone(),
            },
            Self::RegistryDrift { missing } => Self::RegistryDrift {
                missing: missing.clone(),
            },
            Self::Discovery { path, reason } => Self::Discovery {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::Config(e) => Self::Other(format!("Config error: {e}")),
            Self::ConfigIo { path, source } => Self::ConfigIo {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            Self::Serde(e) => Self::Other(format!("Serde error: {e}")),
            Self::Terminal(msg) => Self::Terminal(msg.clone()),
            Self::Other(msg) => Self::Other(msg.clone()),
        }
    }
}

//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader (directories only)
//!
//! Manages user-editable settings for the sample browser. Settings are read as
//! TOML from the platform config path resolved with
//! [`directories`](https://docs.rs/directories); a missing file means defaults.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::AppError;

/// Logging destination and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the rolling log files
    pub dir: PathBuf,

    /// File name prefix, files end up as `<prefix>.YYYY-MM-DD`
    pub file_prefix: String,

    /// Default level directive, `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_prefix: "samples".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for sample assets at startup.
    pub samples_dir: PathBuf,

    /// Glob matched against asset file names inside `samples_dir`.
    pub asset_pattern: String,

    /// Prefix of every virtual path in the loader registry.
    pub virtual_base: String,

    /// Optional catalog manifest replacing the built-in catalog.
    pub manifest: Option<PathBuf>,

    /// Fail at startup when a catalog key has no loader.
    pub strict_registry: bool,

    #[serde(with = "humantime_serde")]
    pub load_timeout: Duration,

    #[serde(with = "humantime_serde")]
    pub tick_rate: Duration,

    /// Auto-dismiss delay for info notices; errors always stay until dismissed.
    pub info_dismiss_ms: u64,

    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/samples")),
            asset_pattern: "*.rs".to_string(),
            virtual_base: "samples".to_string(),
            manifest: None,
            strict_registry: false,
            load_timeout: Duration::from_secs(5),
            tick_rate: Duration::from_millis(120),
            info_dismiss_ms: 3000,
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from the platform config dir, or returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/SampleBrowser/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            info!(
                "No config file found at {}, using default configuration",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Loads config from an explicit TOML file.
    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        info!("Loading config from {}", path.display());
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|source| AppError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml(&text)
    }

    /// Parses config text; unspecified fields keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the config directory (without filename).
    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("org", "example", "SampleBrowser")
            .ok_or_else(|| AppError::Other("Could not determine config directory.".into()))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = Config::from_toml(
            r#"
            strict_registry = true
            load_timeout = "750ms"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert!(cfg.strict_registry);
        assert_eq!(cfg.load_timeout, Duration::from_millis(750));
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.file_prefix, "samples");
        assert_eq!(cfg.asset_pattern, "*.rs");
        assert_eq!(cfg.virtual_base, "samples");
        assert!(cfg.manifest.is_none());
    }

    #[test]
    fn rejects_bad_duration() {
        let err = Config::from_toml(r#"tick_rate = "soon""#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn load_from_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load_from(&path).await.unwrap_err();
        match err {
            AppError::ConfigIo { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

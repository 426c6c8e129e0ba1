//! src/logging.rs
//! ============================================================================
//! # Logger: tracing setup for a terminal-owning application
//!
//! The TUI owns stdout/stderr, so events only go to a daily rolling file.
//! Each line carries a process-wide sequence number so interleaved async
//! completions can be read back in the order they were logged.

use std::{
    fs,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, daily};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
};

use crate::config::LogConfig;
use crate::error::AppError;

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`.
    pub fn init_tracing(config: &LogConfig) -> Result<(), AppError> {
        fs::create_dir_all(&config.dir)?;

        // daily rolling file appender → <dir>/<prefix>.YYYY-MM-DD
        let file: RollingFileAppender = daily(&config.dir, &config.file_prefix);

        let file_layer = fmt::layer()
            .event_format(SeqFormat)
            .with_writer(file)
            .with_ansi(false)
            .with_filter(Self::env_filter(&config.level));

        tracing_subscriber::registry()
            .with(file_layer)
            .try_init()
            .map_err(|e| AppError::Other(format!("tracing already initialised: {e}")))
    }

    /// `RUST_LOG` wins; otherwise the configured level, falling back to `info`.
    fn env_filter(level: &str) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

static SEQ: AtomicU64 = AtomicU64::new(1);

/// Compact formatter: `[SEQ] LEVEL [file:line mod::path] message`
struct SeqFormat;

impl<S, N> FormatEvent<S, N> for SeqFormat
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}

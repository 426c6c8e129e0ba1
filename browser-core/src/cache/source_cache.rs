//! `src/cache/source_cache.rs`
//! ============================================================================
//! # Source text cache
//!
//! Loaded sample sources are kept for the whole process; there is no capacity
//! bound, TTL or eviction. Failed loads are never stored, so re-selecting an
//! entry after a failure goes back to the asset.
//!
//! Concurrent requests for the same virtual path share one in-flight load
//! (moka's `try_get_with` coalescing).

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use crate::error::AppError;

/// Cache key: the registry's virtual path.
pub type SourceKey = Arc<str>;

/// Counters for cache monitoring and tests
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    load_exceptions: AtomicU64,
    total_load_time_ns: AtomicU64,
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[expect(clippy::cast_possible_truncation, reason = "load times fit in u64 ns")]
    fn record_load(&self, duration: Duration, success: bool) {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.total_load_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if !success {
            self.load_exceptions.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        let loads = self.loads.load(Ordering::Relaxed);
        let total_load_time_ns = self.total_load_time_ns.load(Ordering::Relaxed);
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads,
            load_exceptions: self.load_exceptions.load(Ordering::Relaxed),
            average_load_penalty: if loads > 0 {
                Duration::from_nanos(total_load_time_ns / loads)
            } else {
                Duration::ZERO
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub loads: u64,
    pub load_exceptions: u64,
    pub average_load_penalty: Duration,
}

#[derive(Clone)]
pub struct SourceCache {
    inner: Cache<SourceKey, Arc<str>>,
    stats: Arc<CacheStats>,
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCache")
            .field("entries", &self.inner.entry_count())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

impl SourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
            stats: Arc::new(CacheStats::default()),
        }
    }

    /// Returns the cached text for `key` or runs `loader` once to fill it.
    #[instrument(skip(self, loader), fields(cache_key = %key))]
    pub async fn get_or_load<F, Fut>(&self, key: SourceKey, loader: F) -> Result<Arc<str>, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, AppError>>,
    {
        if let Some(text) = self.inner.get(&key).await {
            self.stats.record_hit();
            debug!("Source cache hit");
            return Ok(text);
        }
        self.stats.record_miss();

        let stats = self.stats.clone();
        let result = self
            .inner
            .try_get_with(key.clone(), async move {
                let start = Instant::now();
                let loaded = loader().await;
                stats.record_load(start.elapsed(), loaded.is_ok());
                loaded.map(Arc::<str>::from)
            })
            .await;

        result.map_err(|e: Arc<AppError>| {
            warn!("Source load for {} failed: {}", key, e);
            Arc::unwrap_or_clone(e)
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn second_load_is_a_hit() {
        let cache = SourceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key: SourceKey = Arc::from("samples/a.x");

        for _ in 0..2 {
            let calls = calls.clone();
            let text = cache
                .get_or_load(key.clone(), || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("fn main() {}".to_string())
                })
                .await
                .unwrap();
            assert_eq!(&*text, "fn main() {}");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.loads), (1, 1, 1));
        assert!(cache.contains("samples/a.x"));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = SourceCache::new();
        let key: SourceKey = Arc::from("samples/flaky.x");

        let err = cache
            .get_or_load(key.clone(), || async {
                Err(AppError::Other("disk on fire".into()))
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
        assert!(!cache.contains("samples/flaky.x"));

        let text = cache
            .get_or_load(key, || async { Ok("recovered".to_string()) })
            .await
            .unwrap();
        assert_eq!(&*text, "recovered");
        assert_eq!(cache.stats().load_exceptions, 1);
    }
}

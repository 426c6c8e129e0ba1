//! src/tasks/source_task.rs
//! ============================================================================
//! # Background source loading
//!
//! Runs one registry loader off the UI path and reports back to the event loop
//! through `task_tx`. The task is never aborted; the selection controller
//! drops results whose generation is no longer current.

use std::sync::Arc;
use std::time::{Duration, Instant};

use compact_str::CompactString;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::event_loop::TaskResult;
use crate::error::AppError;
use crate::registry::loader::Loader;

/// Spawn a loader invocation tagged with the selection `generation`.
pub fn spawn_source_load(
    generation: u64,
    key: CompactString,
    loader: Loader,
    timeout: Duration,
    task_tx: UnboundedSender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start_time = Instant::now();
        debug!("Loading source {} (generation {})", key, generation);

        let result = match tokio::time::timeout(timeout, loader()).await {
            Ok(Ok(text)) => Ok(Arc::<str>::from(text)),
            Ok(Err(e)) => Err(Arc::new(e)),
            Err(_) => Err(Arc::new(AppError::LoadTimeout {
                key: key.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })),
        };

        let task_result = TaskResult::SourceLoaded {
            generation,
            key,
            result,
            exec: start_time.elapsed(),
        };

        if let Err(e) = task_tx.send(task_result) {
            warn!("Failed to deliver source load result: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::loader::LoadFuture;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn reports_success_with_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader: Loader = Arc::new(|| -> LoadFuture { Box::pin(async { Ok("text".into()) }) });

        spawn_source_load(7, "a.x".into(), loader, Duration::from_secs(1), tx)
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            TaskResult::SourceLoaded {
                generation,
                key,
                result,
                ..
            } => {
                assert_eq!(generation, 7);
                assert_eq!(key, "a.x");
                assert_eq!(&*result.unwrap(), "text");
            }
        }
    }

    #[tokio::test]
    async fn slow_loader_times_out() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader: Loader =
            Arc::new(|| -> LoadFuture { Box::pin(futures::future::pending()) });

        spawn_source_load(1, "slow.x".into(), loader, Duration::from_millis(20), tx);

        let TaskResult::SourceLoaded { result, .. } = rx.recv().await.unwrap();
        assert!(matches!(
            result.unwrap_err().as_ref(),
            AppError::LoadTimeout { key, timeout_ms: 20 } if key == "slow.x"
        ));
    }
}

//! A fixed set of asynchronous workers, one per partitioned sub-range.
//!
//! [`WorkerPool::spawn`] starts one Tokio task per [`GeoIdRange`] of a
//! partition plan. Workers share the fetcher and the storage layout but no
//! mutable state, and all of them observe the same [`CancellationToken`].
//! [`WorkerPool::join`] waits for every worker and collects their reports in
//! worker order.

use crate::scraper::{
    fetch::Fetcher,
    pool::worker::{WorkerReport, WorkerSettings, worker_loop},
    store::Storage,
};
use geoid::GeoIdRange;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct WorkerPool {
    handles: Vec<(usize, GeoIdRange, JoinHandle<WorkerReport>)>,
}

impl WorkerPool {
    /// Spawns one worker per entry of `plan`. Worker ids are 1-based and
    /// follow plan order. Cancelling `shutdown_token` asks every worker to
    /// stop after its current identifier.
    pub fn spawn<F: Fetcher>(
        plan: &[GeoIdRange],
        settings: WorkerSettings,
        fetcher: Arc<F>,
        storage: &Storage,
        shutdown_token: CancellationToken,
    ) -> Self {
        let handles = plan
            .iter()
            .enumerate()
            .map(|(i, &range)| {
                let worker_id = i + 1;
                let handle = tokio::spawn(worker_loop(
                    worker_id,
                    range,
                    settings,
                    Arc::clone(&fetcher),
                    storage.clone(),
                    shutdown_token.child_token(),
                ));
                (worker_id, range, handle)
            })
            .collect();

        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker.
    ///
    /// A worker that panicked is logged and reported as cancelled with no
    /// records, so the remaining reports are still returned.
    pub async fn join(self) -> Vec<WorkerReport> {
        let (meta, handles): (Vec<_>, Vec<_>) = self
            .handles
            .into_iter()
            .map(|(id, range, handle)| ((id, range), handle))
            .unzip();

        futures::future::join_all(handles)
            .await
            .into_iter()
            .zip(meta)
            .map(|(result, (worker_id, range))| {
                result.unwrap_or_else(|e| {
                    tracing::error!(worker_id, "worker task failed: {e}");
                    WorkerReport {
                        worker_id,
                        range,
                        records: Vec::new(),
                        unflushed: 0,
                        cancelled: true,
                    }
                })
            })
            .collect()
    }
}

use crate::scraper::{
    error::ScrapeError,
    fetch::Fetcher,
    record::ScrapeRecord,
    store::Storage,
    telemetry::{increment_errors, increment_scraped},
};
use core::{num::NonZeroU32, time::Duration};
use geoid::GeoIdRange;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

/// Knobs shared by every worker of a run.
#[derive(Clone, Copy, Debug)]
pub struct WorkerSettings {
    pub stride: NonZeroU32,
    pub request_delay: Duration,
    pub fetch_timeout: Duration,
    pub flush_every: usize,
}

/// What a worker hands back when it stops.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub range: GeoIdRange,
    pub records: Vec<ScrapeRecord>,
    /// Records that never reached the raw file because every flush attempt
    /// failed.
    pub unflushed: usize,
    pub cancelled: bool,
}

impl WorkerReport {
    pub fn successful(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }
}

/// Walks one sub-range and feeds every identifier to `fetcher`.
///
/// The token is checked between identifiers and during the politeness delay,
/// so cancellation takes effect once the current fetch returns. A failed
/// fetch becomes an error record and the walk continues. Records are appended
/// to the worker's raw file every `flush_every` results and once more before
/// returning; a failed append is logged and retried on the next flush.
pub async fn worker_loop<F: Fetcher>(
    worker_id: usize,
    range: GeoIdRange,
    settings: WorkerSettings,
    fetcher: Arc<F>,
    storage: Storage,
    token: CancellationToken,
) -> WorkerReport {
    let expected = range.count_step(settings.stride);
    tracing::debug!(worker_id, %range, expected, "worker started");

    let mut records = Vec::with_capacity(initial_capacity(expected));
    let mut flushed = 0;
    let mut cancelled = false;

    for (i, id) in range.iter_step(settings.stride).enumerate() {
        if token.is_cancelled() {
            cancelled = true;
            break;
        }

        let record = match timeout(settings.fetch_timeout, fetcher.fetch(id)).await {
            Ok(Ok(sources)) => ScrapeRecord::success(id, sources),
            Ok(Err(err)) => failed(worker_id, id, &err),
            Err(_) => {
                let err = ScrapeError::Timeout {
                    geoid: id,
                    timeout_ms: u64::try_from(settings.fetch_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                };
                failed(worker_id, id, &err)
            }
        };
        records.push(record);
        increment_scraped();

        if records.len() - flushed >= settings.flush_every {
            flushed = flush(worker_id, &storage, &records, flushed).await;
        }

        let is_last = i + 1 == expected as usize;
        if !is_last && !settings.request_delay.is_zero() {
            tokio::select! {
                () = token.cancelled() => {
                    cancelled = true;
                    break;
                }
                () = sleep(settings.request_delay) => {}
            }
        }
    }

    flushed = flush(worker_id, &storage, &records, flushed).await;

    if cancelled {
        tracing::info!(worker_id, done = records.len(), expected, "worker cancelled");
    } else {
        tracing::debug!(worker_id, done = records.len(), "worker finished");
    }

    WorkerReport {
        worker_id,
        range,
        unflushed: records.len() - flushed,
        records,
        cancelled,
    }
}

/// Upper bound on the records reserved before the walk starts.
const MAX_INITIAL_RECORDS: u32 = 1024;

fn initial_capacity(expected: u32) -> usize {
    expected.min(MAX_INITIAL_RECORDS) as usize
}

fn failed(worker_id: usize, id: geoid::GeoId, err: &ScrapeError) -> ScrapeRecord {
    increment_errors();
    tracing::warn!(worker_id, geoid = %id, "{err}");
    ScrapeRecord::failure(id, err)
}

/// Appends `records[flushed..]` and returns the new flushed watermark.
async fn flush(
    worker_id: usize,
    storage: &Storage,
    records: &[ScrapeRecord],
    flushed: usize,
) -> usize {
    let pending = &records[flushed..];
    if pending.is_empty() {
        return flushed;
    }
    match storage.append_raw(worker_id, pending).await {
        Ok(()) => {
            tracing::trace!(
                worker_id,
                count = pending.len(),
                through = %pending[pending.len() - 1].geoid(),
                "flushed"
            );
            records.len()
        }
        Err(err) => {
            tracing::error!(worker_id, "flush failed, will retry: {err}");
            flushed
        }
    }
}

//! The three subcommands, minus process-level concerns (signals, exit codes).

use crate::scraper::{
    config::ScrapeConfig,
    fetch::{Fetcher, LinkFetcher},
    manifest::write_manifest,
    pool::{manager::WorkerPool, worker::WorkerSettings},
    record::{ScrapeRecord, unix_millis},
    report::{PlanReport, RunSummary},
    store::{SavedFiles, Storage},
    telemetry::report_progress,
};
use anyhow::Context;
use core::time::Duration;
use std::{
    fs::File,
    io::BufWriter,
    path::Path,
    sync::Arc,
};
use tokio_util::sync::CancellationToken;

const PROGRESS_EVERY: Duration = Duration::from_secs(30);

/// Partitions the configured range and describes the result.
pub fn plan(config: &ScrapeConfig) -> anyhow::Result<PlanReport> {
    let plan = config
        .generator
        .partition(config.num_workers)
        .with_context(|| format!("cannot split the range across {} workers", config.num_workers))?;
    Ok(PlanReport::new(config.generator, config.stride, &plan))
}

/// Writes the URL manifest for every identifier of the configured range.
/// Returns the number of rows written.
///
/// The file is written on the blocking pool so the runtime threads stay free.
pub async fn urls(config: &ScrapeConfig, output: &Path) -> anyhow::Result<u64> {
    let config = config.clone();
    let output = output.to_path_buf();
    tokio::task::spawn_blocking(move || write_urls(&config, &output))
        .await
        .context("URL manifest writer stopped unexpectedly")?
}

fn write_urls(config: &ScrapeConfig, output: &Path) -> anyhow::Result<u64> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let file = File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    let links = LinkFetcher::new(&config.base_url);
    let rows = write_manifest(
        BufWriter::new(file),
        config.generator.iter_step(config.stride),
        &links,
    )
    .with_context(|| format!("cannot write {}", output.display()))?;
    tracing::info!(rows, path = %output.display(), "URL manifest written");
    Ok(rows)
}

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub files: SavedFiles,
}

/// Runs the worker pool over the partition plan and persists the results.
///
/// Cancelling `token` stops every worker after its current identifier; the
/// records gathered so far are still saved.
pub async fn run<F: Fetcher>(
    config: &ScrapeConfig,
    fetcher: F,
    token: CancellationToken,
) -> anyhow::Result<RunOutcome> {
    let report = plan(config)?;
    tracing::info!("Partition plan:\n{report}");

    let storage = Storage::new(&config.data_dir);
    storage.prepare().await?;

    let settings = WorkerSettings {
        stride: config.stride,
        request_delay: config.request_delay,
        fetch_timeout: config.fetch_timeout,
        flush_every: config.flush_every,
    };
    let plan: Vec<_> = report.rows.iter().map(|row| row.range).collect();

    let started_at_ms = unix_millis();
    let progress_token = token.child_token();
    let progress = tokio::spawn(report_progress(
        report.total(),
        PROGRESS_EVERY,
        progress_token.clone(),
    ));

    let pool = WorkerPool::spawn(&plan, settings, Arc::new(fetcher), &storage, token);
    tracing::info!("Spawned {} workers", pool.len());
    let reports = pool.join().await;

    progress_token.cancel();
    if let Err(e) = progress.await {
        tracing::warn!("progress reporter failed: {e}");
    }
    let finished_at_ms = unix_millis();

    for r in &reports {
        tracing::debug!(
            worker_id = r.worker_id,
            range = %r.range,
            done = r.records.len(),
            successful = r.successful(),
            cancelled = r.cancelled,
            "worker report"
        );
    }

    let summary = RunSummary::new(&report, &reports, started_at_ms, finished_at_ms);
    let records: Vec<ScrapeRecord> = reports.into_iter().flat_map(|r| r.records).collect();
    let files = storage
        .save_processed(finished_at_ms, &records, &summary)
        .await?;

    tracing::info!(
        scraped = summary.scraped,
        successful = summary.successful,
        errors = summary.errors,
        duration_ms = summary.duration_ms,
        "Run {} ({:.1} ids/s), results in {}",
        if summary.cancelled { "interrupted" } else { "complete" },
        summary.ids_per_second,
        files.results.display()
    );
    if let Some(errors) = &files.errors {
        tracing::info!("Error records in {}", errors.display());
    }
    tracing::info!("Summary in {}", files.summary.display());
    if summary.unflushed > 0 {
        tracing::warn!(
            unflushed = summary.unflushed,
            "some records are missing from the raw files"
        );
    }

    Ok(RunOutcome { summary, files })
}

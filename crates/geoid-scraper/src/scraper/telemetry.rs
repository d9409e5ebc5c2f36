//! Log output and run-wide progress counters.
//!
//! Logs go to stderr through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG` (default `info`). Counters are process-global atomics that
//! workers bump after each identifier and that the progress reporter reads.

use core::time::Duration;
use portable_atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true),
        )
        .try_init()?;
    Ok(())
}

static SCRAPED: AtomicU64 = AtomicU64::new(0);
static ERRORS: AtomicU64 = AtomicU64::new(0);

pub fn increment_scraped() {
    SCRAPED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_errors() {
    ERRORS.fetch_add(1, Ordering::Relaxed);
}

/// Identifiers processed so far, successful or not.
pub fn scraped_total() -> u64 {
    SCRAPED.load(Ordering::Relaxed)
}

pub fn errors_total() -> u64 {
    ERRORS.load(Ordering::Relaxed)
}

/// Logs progress against `expected` every `every` until `token` is cancelled.
pub async fn report_progress(expected: u64, every: Duration, token: CancellationToken) {
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = ticker.tick() => {
                let done = scraped_total();
                #[allow(clippy::cast_precision_loss)]
                let pct = if expected == 0 { 100.0 } else { done as f64 * 100.0 / expected as f64 };
                tracing::info!(done, expected, errors = errors_total(), "progress {pct:.1}%");
            }
        }
    }
}

//! Human-readable partition plans and machine-readable run summaries.

use crate::scraper::pool::worker::WorkerReport;
use core::{fmt, num::NonZeroU32};
use geoid::{GeoIdGenerator, GeoIdRange};
use serde::Serialize;

/// One line of a [`PlanReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanRow {
    pub worker_id: usize,
    pub range: GeoIdRange,
    pub count: u32,
}

/// How a range is split across workers and how many identifiers each one
/// will visit at the chosen stride.
#[derive(Clone, Debug)]
pub struct PlanReport {
    pub generator: GeoIdGenerator,
    pub stride: NonZeroU32,
    pub rows: Vec<PlanRow>,
}

impl PlanReport {
    pub fn new(generator: GeoIdGenerator, stride: NonZeroU32, plan: &[GeoIdRange]) -> Self {
        let rows = plan
            .iter()
            .enumerate()
            .map(|(i, &range)| PlanRow {
                worker_id: i + 1,
                range,
                count: range.count_step(stride),
            })
            .collect();
        Self {
            generator,
            stride,
            rows,
        }
    }

    /// Identifiers visited by all workers together.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.count)).sum()
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} at stride {} across {} workers",
            self.generator.range(),
            self.stride,
            self.rows.len()
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "  worker {:>3}  {:<21} {:>9} ids",
                row.worker_id,
                row.range.to_string(),
                row.count
            )?;
        }
        write!(f, "  total       {:<21} {:>9} ids", "", self.total())
    }
}

/// Statistics of one `run`, written to `summary_<ms>.json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub start: String,
    pub end: String,
    pub stride: u32,
    pub workers: usize,
    pub expected: u64,
    pub scraped: u64,
    pub successful: u64,
    pub errors: u64,
    pub unflushed: u64,
    pub cancelled: bool,
    pub started_at_ms: u64,
    pub finished_at_ms: u64,
    pub duration_ms: u64,
    pub ids_per_second: f64,
}

impl RunSummary {
    pub fn new(
        plan: &PlanReport,
        reports: &[WorkerReport],
        started_at_ms: u64,
        finished_at_ms: u64,
    ) -> Self {
        let scraped: u64 = reports.iter().map(|r| r.records.len() as u64).sum();
        let successful: u64 = reports.iter().map(|r| r.successful() as u64).sum();
        let unflushed: u64 = reports.iter().map(|r| r.unflushed as u64).sum();
        let duration_ms = finished_at_ms.saturating_sub(started_at_ms);

        #[allow(clippy::cast_precision_loss)]
        let ids_per_second = if duration_ms == 0 {
            0.0
        } else {
            scraped as f64 * 1000.0 / duration_ms as f64
        };

        Self {
            start: plan.generator.start().to_string(),
            end: plan.generator.end().to_string(),
            stride: plan.stride.get(),
            workers: plan.rows.len(),
            expected: plan.total(),
            scraped,
            successful,
            errors: scraped - successful,
            unflushed,
            cancelled: reports.iter().any(|r| r.cancelled),
            started_at_ms,
            finished_at_ms,
            duration_ms,
            ids_per_second,
        }
    }

    /// True when a run that was allowed to finish produced no successful
    /// record. Interrupted runs never count as failed.
    pub fn failed_outright(&self) -> bool {
        !self.cancelled && self.expected > 0 && self.successful == 0
    }
}

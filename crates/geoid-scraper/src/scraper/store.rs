//! On-disk layout for scrape output.
//!
//! ```text
//! <data-dir>/
//!   raw/worker-<n>.jsonl          appended by worker n on every flush
//!   processed/results_<ms>.json   every record of the run
//!   processed/errors_<ms>.json    error records only (omitted when empty)
//!   processed/summary_<ms>.json   run statistics
//! ```
//!
//! Each worker owns its raw file, so appends never contend.

use crate::scraper::{
    error::{Result, ScrapeError},
    record::ScrapeRecord,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

#[derive(Clone, Debug)]
pub struct Storage {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

/// Files written by [`Storage::save_processed`].
#[derive(Debug)]
pub struct SavedFiles {
    pub results: PathBuf,
    pub errors: Option<PathBuf>,
    pub summary: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            raw_dir: data_dir.join("raw"),
            processed_dir: data_dir.join("processed"),
        }
    }

    /// Creates the `raw` and `processed` directories if they are missing.
    pub async fn prepare(&self) -> Result<()> {
        for dir in [&self.raw_dir, &self.processed_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ScrapeError::io(dir, e))?;
        }
        Ok(())
    }

    pub fn raw_path(&self, worker_id: usize) -> PathBuf {
        self.raw_dir.join(format!("worker-{worker_id}.jsonl"))
    }

    /// Appends `records` to the worker's raw file, one JSON object per line.
    ///
    /// The batch is encoded up front and written with a single call, so an
    /// encoding failure leaves the file untouched.
    pub async fn append_raw(&self, worker_id: usize, records: &[ScrapeRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut buf = Vec::with_capacity(records.len() * 256);
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let path = self.raw_path(worker_id);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| ScrapeError::io(&path, e))?;
        file.write_all(&buf)
            .await
            .map_err(|e| ScrapeError::io(&path, e))?;
        file.flush().await.map_err(|e| ScrapeError::io(&path, e))
    }

    /// Writes the consolidated results, the error subset and the summary of a
    /// run, all stamped with `stamp_ms`.
    pub async fn save_processed<S: Serialize>(
        &self,
        stamp_ms: u64,
        records: &[ScrapeRecord],
        summary: &S,
    ) -> Result<SavedFiles> {
        let results = self.processed_dir.join(format!("results_{stamp_ms}.json"));
        write_json(&results, &records).await?;

        let failed: Vec<&ScrapeRecord> = records.iter().filter(|r| !r.is_success()).collect();
        let errors = if failed.is_empty() {
            None
        } else {
            let path = self.processed_dir.join(format!("errors_{stamp_ms}.json"));
            write_json(&path, &failed).await?;
            Some(path)
        };

        let summary_path = self.processed_dir.join(format!("summary_{stamp_ms}.json"));
        write_json(&summary_path, summary).await?;

        Ok(SavedFiles {
            results,
            errors,
            summary: summary_path,
        })
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes)
        .await
        .map_err(|e| ScrapeError::io(path, e))
}

#[cfg(test)]
pub(crate) fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "geoid-scraper-{name}-{}-{}",
        std::process::id(),
        crate::scraper::record::unix_millis()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

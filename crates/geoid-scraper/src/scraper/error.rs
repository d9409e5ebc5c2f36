//! Error types for the scrape driver.
//!
//! [`ScrapeError`] covers every failure a worker can hit while processing one
//! identifier or persisting its results. Per-identifier failures never abort a
//! worker: they are turned into an error record whose `kind` comes from
//! [`ErrorKind::from`].
//!
//! ## Error Cases
//! - `Fetch`: the fetcher could not produce data for an identifier.
//! - `Timeout`: the fetcher did not answer within the configured budget.
//! - `Io`: reading or writing under the data directory failed.
//! - `Encode`: a record or summary could not be serialized.

use geoid::GeoId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, ScrapeError>;

/// Unified error type for fetchers, workers and storage.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The fetcher reported a failure for this identifier. [`LinkFetcher`]
    /// never fails; this is what other [`Fetcher`] implementations return.
    ///
    /// [`LinkFetcher`]: crate::scraper::fetch::LinkFetcher
    /// [`Fetcher`]: crate::scraper::fetch::Fetcher
    #[error("fetch failed for {geoid}: {reason}")]
    Fetch { geoid: GeoId, reason: String },

    /// The fetcher exceeded its time budget.
    #[error("fetch for {geoid} timed out after {timeout_ms} ms")]
    Timeout { geoid: GeoId, timeout_ms: u64 },

    /// Filesystem failure while persisting results.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Coarse failure category stored in error records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Fetch,
    Timeout,
    Io,
    Encode,
}

impl From<&ScrapeError> for ErrorKind {
    fn from(err: &ScrapeError) -> Self {
        match err {
            ScrapeError::Fetch { .. } => Self::Fetch,
            ScrapeError::Timeout { .. } => Self::Timeout,
            ScrapeError::Io { .. } => Self::Io,
            ScrapeError::Encode(_) => Self::Encode,
        }
    }
}

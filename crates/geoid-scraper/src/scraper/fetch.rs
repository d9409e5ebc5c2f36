//! The per-identifier data source used by workers.
//!
//! Workers only depend on the [`Fetcher`] trait, so the source of county data
//! can be swapped without touching the pool. [`LinkFetcher`] is the shipped
//! implementation: it resolves the public SLOPE pages for a county and reports
//! them as the record's sources.

use crate::scraper::{error::Result, record::Source};
use geoid::GeoId;

/// Energy snapshot page name, as used in URLs and record sources.
pub const ENERGY_SNAPSHOT: &str = "energy-snapshot";

/// Data viewer page name, as used in URLs and record sources.
pub const DATA_VIEWER: &str = "data-viewer";

/// Produces the data for one county.
///
/// Implementations are shared by every worker through an `Arc`, so they must
/// be `Send + Sync`. Timeouts and cancellation are applied by the caller.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, id: GeoId) -> impl Future<Output = Result<Vec<Source>>> + Send;
}

/// Resolves the energy snapshot and data viewer URLs for a county.
#[derive(Clone, Debug)]
pub struct LinkFetcher {
    base_url: String,
}

impl LinkFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self, page: &str, id: GeoId) -> String {
        format!("{}/{page}?geoId={id}", self.base_url)
    }

    pub fn energy_snapshot_url(&self, id: GeoId) -> String {
        self.page_url(ENERGY_SNAPSHOT, id)
    }

    pub fn data_viewer_url(&self, id: GeoId) -> String {
        self.page_url(DATA_VIEWER, id)
    }
}

impl Fetcher for LinkFetcher {
    async fn fetch(&self, id: GeoId) -> Result<Vec<Source>> {
        Ok(vec![
            Source::new(ENERGY_SNAPSHOT, self.energy_snapshot_url(id)),
            Source::new(DATA_VIEWER, self.data_viewer_url(id)),
        ])
    }
}

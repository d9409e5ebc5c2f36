use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use core::{num::NonZeroU32, time::Duration};
use geoid::{GeoId, GeoIdGenerator};
use std::path::PathBuf;

/// Worker counts above this tend to get throttled by the remote site.
pub const MAX_RECOMMENDED_WORKERS: usize = 25;

/// Worker counts below this leave most of the run time on the table.
pub const MIN_RECOMMENDED_WORKERS: usize = 5;

/// Command-line interface for the `geoid-scraper` binary.
///
/// Every option can also be set through the environment variable named in its
/// help text, and a `.env` file in the working directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "geoid-scraper",
    version,
    about = "Partitioned county scraper for NREL SLOPE"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// First county identifier of the scrape range (inclusive).
    ///
    /// Environment variable: `START_GEOID`
    #[arg(long, global = true, env = "START_GEOID", default_value = "G0100010")]
    pub start: String,

    /// Last county identifier of the scrape range (inclusive).
    ///
    /// Environment variable: `END_GEOID`
    #[arg(long, global = true, env = "END_GEOID", default_value = "G5600450")]
    pub end: String,

    /// Number of concurrent workers. The range is split into this many
    /// contiguous sub-ranges.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, global = true, env = "NUM_WORKERS", default_value_t = 15)]
    pub workers: usize,

    /// Distance between consecutive identifiers visited inside a sub-range.
    ///
    /// Environment variable: `STRIDE`
    #[arg(long, global = true, env = "STRIDE", default_value_t = geoid::DEFAULT_STRIDE)]
    pub stride: NonZeroU32,

    /// Directory receiving `raw/` and `processed/` output.
    ///
    /// Environment variable: `DATA_DIR`
    #[arg(long, global = true, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Base URL of the SLOPE site.
    ///
    /// Environment variable: `SLOPE_BASE_URL`
    #[arg(
        long,
        global = true,
        env = "SLOPE_BASE_URL",
        default_value = "https://maps.nrel.gov/slope"
    )]
    pub base_url: String,

    /// Pause between two identifiers on the same worker, in milliseconds.
    ///
    /// Environment variable: `REQUEST_DELAY_MS`
    #[arg(long, global = true, env = "REQUEST_DELAY_MS", default_value_t = 500)]
    pub request_delay_ms: u64,

    /// Time budget for a single fetch, in milliseconds.
    ///
    /// Environment variable: `FETCH_TIMEOUT_MS`
    #[arg(long, global = true, env = "FETCH_TIMEOUT_MS", default_value_t = 15_000)]
    pub fetch_timeout_ms: u64,

    /// Number of new records a worker buffers before appending them to its
    /// raw file.
    ///
    /// Environment variable: `FLUSH_EVERY`
    #[arg(long, global = true, env = "FLUSH_EVERY", default_value_t = 10)]
    pub flush_every: usize,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print how the range is split across workers.
    Plan,
    /// Write the energy snapshot and data viewer URL of every county to a CSV.
    Urls {
        /// Output path.
        ///
        /// Environment variable: `URLS_CSV`
        #[arg(long, env = "URLS_CSV", default_value = "urls.csv")]
        output: PathBuf,
    },
    /// Scrape every county of the range with the worker pool.
    Run,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub command: Command,
    pub generator: GeoIdGenerator,
    pub num_workers: usize,
    pub stride: NonZeroU32,
    pub data_dir: PathBuf,
    pub base_url: String,
    pub request_delay: Duration,
    pub fetch_timeout: Duration,
    pub flush_every: usize,
}

impl ScrapeConfig {
    /// Advice about the worker count, if it falls outside the recommended
    /// band.
    pub fn worker_count_advice(&self) -> Option<String> {
        if self.num_workers > MAX_RECOMMENDED_WORKERS {
            Some(format!(
                "{} workers may trigger rate limiting; consider {MAX_RECOMMENDED_WORKERS} or fewer",
                self.num_workers
            ))
        } else if self.num_workers < MIN_RECOMMENDED_WORKERS {
            Some(format!(
                "{} workers will make a full run slow; consider at least {MIN_RECOMMENDED_WORKERS}",
                self.num_workers
            ))
        } else {
            None
        }
    }
}

impl TryFrom<CliArgs> for ScrapeConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let start = GeoId::decode(&args.start).context("invalid START_GEOID")?;
        let end = GeoId::decode(&args.end).context("invalid END_GEOID")?;

        if start > end {
            bail!("START_GEOID ({start}) must not be after END_GEOID ({end})");
        }

        if args.workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.flush_every == 0 {
            bail!("FLUSH_EVERY must be greater than 0");
        }

        if args.fetch_timeout_ms == 0 {
            bail!("FETCH_TIMEOUT_MS must be greater than 0");
        }

        let base_url = args.base_url.trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("SLOPE_BASE_URL must be an http(s) URL, got {:?}", args.base_url);
        }

        Ok(Self {
            command: args.command,
            generator: GeoIdGenerator::new(start, end),
            num_workers: args.workers,
            stride: args.stride,
            data_dir: args.data_dir,
            base_url,
            request_delay: Duration::from_millis(args.request_delay_ms),
            fetch_timeout: Duration::from_millis(args.fetch_timeout_ms),
            flush_every: args.flush_every,
        })
    }
}

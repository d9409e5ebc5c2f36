//! Scrape driver built on the `geoid` partitioner.
//!
//! ## Structure
//!
//! - [`config`] - CLI arguments and validated run configuration.
//! - [`commands`] - `plan`, `urls` and `run`.
//! - [`pool`] - worker pool and per-range worker loop.
//! - [`fetch`] - the `Fetcher` seam and the shipped link resolver.
//! - [`record`] / [`store`] - result records and their on-disk layout.
//! - [`manifest`] - `urls.csv` writer.
//! - [`report`] - plan report and run summary.
//! - [`telemetry`] - log subscriber and progress counters.

pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod pool;
pub mod record;
pub mod report;
pub mod store;
pub mod telemetry;

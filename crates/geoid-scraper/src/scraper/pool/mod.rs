//! Worker pool driving a partition plan.
//!
//! - [`manager`] - spawns and joins one task per sub-range (`WorkerPool`).
//! - [`worker`] - the per-range loop (`worker_loop`).

pub mod manager;
pub mod worker;

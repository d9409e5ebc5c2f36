//! # geoid
//!
//! Codec, enumerator and work partitioner for SLOPE county identifiers.
//!
//! A county identifier ([`GeoId`]) is the letter `G` followed by seven
//! zero-padded decimal digits. This crate converts identifiers to and from
//! their numeric payload, walks an identifier range at a fixed stride, and
//! splits a range into contiguous sub-ranges for a fixed number of concurrent
//! workers.
//!
//! Everything here is pure computation over immutable values: a
//! [`GeoIdGenerator`] can be shared by reference with any number of threads or
//! tasks without synchronization.
//!
//! ```
//! use geoid::GeoIdGenerator;
//!
//! let generator = GeoIdGenerator::parse("G0100010", "G0100050")?;
//! for (worker, range) in generator.partition(4)?.iter().enumerate() {
//!     for id in range.iter() {
//!         // fetch `id` on worker `worker`
//!         # let _ = (worker, id);
//!     }
//! }
//! # Ok::<(), geoid::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`GeoId`] and `Serialize` for
//!   [`GeoIdRange`].
//! - `tracing`: trace-level spans around partitioning.

mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::as_raw;

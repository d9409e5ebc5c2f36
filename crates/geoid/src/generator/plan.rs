use super::range::GeoIdRange;
use super::step::{DEFAULT_STRIDE, StepIter};
use crate::{Error, GeoId, Result};
use core::iter::Take;
use core::num::NonZeroU32;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Enumerates and partitions the identifiers between two inclusive bounds.
///
/// A generator is an immutable value: construct it once per run and share it
/// by reference (or copy it) into every worker. None of its methods block,
/// allocate shared state, or need synchronization.
///
/// # Example
///
/// ```
/// use geoid::GeoIdGenerator;
///
/// let generator = GeoIdGenerator::parse("G0100010", "G0100050")?;
///
/// let ids: Vec<String> = generator.iter().map(|id| id.to_string()).collect();
/// assert_eq!(ids, ["G0100010", "G0100020", "G0100030", "G0100040", "G0100050"]);
/// assert_eq!(generator.count(), 5);
///
/// let plan = generator.partition(4)?;
/// assert_eq!(plan[0].to_string(), "G0100010..=G0100019");
/// assert_eq!(plan[3].to_string(), "G0100040..=G0100050");
/// # Ok::<(), geoid::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeoIdGenerator {
    start: GeoId,
    end: GeoId,
}

impl GeoIdGenerator {
    /// First county identifier on the platform.
    pub const DEFAULT_START: GeoId = GeoId::from_raw_unchecked(100_010);

    /// Last county identifier on the platform.
    pub const DEFAULT_END: GeoId = GeoId::from_raw_unchecked(5_600_450);

    /// Creates a generator over `start..=end`.
    ///
    /// Inverted bounds are accepted here: enumeration treats them as empty and
    /// [`GeoIdGenerator::partition`] rejects them.
    pub const fn new(start: GeoId, end: GeoId) -> Self {
        Self { start, end }
    }

    /// Decodes both bounds and creates a generator over them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if either bound fails to decode.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(GeoId::decode(start)?, GeoId::decode(end)?))
    }

    pub const fn start(&self) -> GeoId {
        self.start
    }

    pub const fn end(&self) -> GeoId {
        self.end
    }

    /// The bounds as a [`GeoIdRange`]; empty when `start > end`.
    pub fn range(&self) -> GeoIdRange {
        GeoIdRange::new(self.start, self.end)
    }

    /// Walks `start..=end` at the default stride of 10.
    pub fn iter(&self) -> StepIter {
        self.iter_step(DEFAULT_STRIDE)
    }

    /// Walks `start..=end` at `stride`.
    ///
    /// The start is always yielded when `start <= end`; the end only when
    /// `(end - start) % stride == 0`. Inverted bounds yield nothing.
    pub fn iter_step(&self, stride: NonZeroU32) -> StepIter {
        self.range().iter_step(stride)
    }

    /// Length of [`GeoIdGenerator::iter`], in O(1).
    pub fn count(&self) -> u32 {
        self.count_step(DEFAULT_STRIDE)
    }

    /// Length of [`GeoIdGenerator::iter_step`], in O(1):
    /// `max(0, (end - start) / stride + 1)`.
    pub fn count_step(&self, stride: NonZeroU32) -> u32 {
        self.range().count_step(stride)
    }

    /// Up to `batch_size` identifiers of [`GeoIdGenerator::iter`], skipping
    /// the first `offset`.
    ///
    /// The skip is arithmetic; nothing before `offset` is materialised.
    pub fn batch(&self, batch_size: usize, offset: usize) -> Take<StepIter> {
        let mut iter = self.iter();
        if offset > 0 {
            // Advance by `offset` items without yielding them.
            let _ = iter.nth(offset - 1);
        }
        iter.take(batch_size)
    }

    /// Splits `start..=end` into `num_workers` contiguous sub-ranges, in
    /// worker order.
    ///
    /// With `total = end - start` and `chunk = total / num_workers`, worker
    /// `i` starts at `start + i * chunk`. Every worker but the last covers
    /// exactly `chunk` identifiers; the last one runs through `end` and so
    /// absorbs whatever the floor division left over. Load is therefore
    /// uneven when `total % num_workers` is large relative to `chunk`.
    ///
    /// One entry is returned per worker even when `chunk == 0`, in which case
    /// all but the last entry are empty.
    ///
    /// # Errors
    ///
    /// - [`Error::WorkerCountInvalid`] if `num_workers` is zero or exceeds the
    ///   number of identifiers in the range at stride 1.
    /// - [`Error::DegenerateRange`] if `start > end`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self), fields(start = %self.start, end = %self.end))
    )]
    pub fn partition(&self, num_workers: usize) -> Result<Vec<GeoIdRange>> {
        if self.start > self.end {
            return Err(Error::DegenerateRange {
                start: self.start,
                end: self.end,
            });
        }

        let start = self.start.get();
        let end = self.end.get();
        let total = end - start;
        let max = u64::from(total) + 1;

        let workers = match u32::try_from(num_workers) {
            Ok(workers) if workers > 0 && u64::from(workers) <= max => workers,
            _ => {
                return Err(Error::WorkerCountInvalid {
                    workers: num_workers,
                    max,
                });
            }
        };

        let chunk = total / workers;
        let last = workers - 1;

        // `i * chunk <= total` for every `i < workers`, and `end + 1` is at
        // most `MAX_RAW + 1`, so none of this can overflow.
        let plan = (0..workers)
            .map(|i| {
                let chunk_start = start + i * chunk;
                let stop = if i == last {
                    end + 1
                } else {
                    chunk_start + chunk
                };
                GeoIdRange::from_bounds(chunk_start, stop)
            })
            .collect();

        Ok(plan)
    }
}

impl Default for GeoIdGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START, Self::DEFAULT_END)
    }
}

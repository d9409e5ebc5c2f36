use super::step::{DEFAULT_STRIDE, StepIter, steps_between};
use crate::GeoId;
use core::fmt;
use core::num::NonZeroU32;

/// A contiguous run of identifiers, possibly empty.
///
/// This is the unit of work handed to a single worker. Bounds are kept
/// half-open internally so that an empty sub-range can sit at any position,
/// including `G0000000`, without an "end before start" identifier.
///
/// ```
/// use geoid::{GeoId, GeoIdRange};
///
/// let range = GeoIdRange::new("G0100010".parse()?, "G0100019".parse()?);
/// assert_eq!(range.len(), 10);
/// assert_eq!(range.end().unwrap().to_string(), "G0100019");
/// assert_eq!(range.to_string(), "G0100010..=G0100019");
/// # Ok::<(), geoid::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoIdRange {
    start: u32,
    stop: u32,
}

impl GeoIdRange {
    /// The inclusive range `start..=end`.
    ///
    /// An inverted pair (`start > end`) yields an empty range positioned at
    /// `start`, matching how enumeration treats inverted bounds.
    pub fn new(start: GeoId, end: GeoId) -> Self {
        let start = start.get();
        let stop = end.get() + 1;
        Self {
            start,
            stop: stop.max(start),
        }
    }

    /// An empty range positioned at `start`.
    pub const fn empty_at(start: GeoId) -> Self {
        Self {
            start: start.get(),
            stop: start.get(),
        }
    }

    /// Half-open payload bounds; caller guarantees
    /// `start <= stop <= GeoId::MAX_RAW + 1`.
    pub(crate) const fn from_bounds(start: u32, stop: u32) -> Self {
        debug_assert!(start <= stop && stop <= GeoId::MAX_RAW + 1);
        Self { start, stop }
    }

    /// First identifier of the range (the position, for an empty range).
    pub const fn start(&self) -> GeoId {
        GeoId::from_raw_unchecked(self.start)
    }

    /// Last identifier of the range, or `None` if it is empty.
    pub const fn end(&self) -> Option<GeoId> {
        if self.is_empty() {
            None
        } else {
            Some(GeoId::from_raw_unchecked(self.stop - 1))
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Number of identifiers at stride 1.
    pub const fn len(&self) -> u32 {
        self.stop - self.start
    }

    pub const fn contains(&self, id: GeoId) -> bool {
        self.start <= id.get() && id.get() < self.stop
    }

    /// Walks the range at the default stride of 10.
    pub const fn iter(&self) -> StepIter {
        self.iter_step(DEFAULT_STRIDE)
    }

    /// Walks the range at `stride`, starting from [`GeoIdRange::start`].
    pub const fn iter_step(&self, stride: NonZeroU32) -> StepIter {
        StepIter::new(self.start, self.stop, stride)
    }

    /// Number of identifiers [`GeoIdRange::iter`] yields, in O(1).
    pub const fn count(&self) -> u32 {
        self.count_step(DEFAULT_STRIDE)
    }

    /// Number of identifiers [`GeoIdRange::iter_step`] yields, in O(1).
    pub const fn count_step(&self, stride: NonZeroU32) -> u32 {
        steps_between(self.start, self.stop, stride.get())
    }
}

impl fmt::Display for GeoIdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end() {
            Some(end) => write!(f, "{}..={}", self.start(), end),
            None => write!(f, "{0}..{0}", self.start()),
        }
    }
}

impl fmt::Debug for GeoIdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoIdRange({self})")
    }
}

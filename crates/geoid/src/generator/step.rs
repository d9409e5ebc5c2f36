use crate::GeoId;
use core::iter::FusedIterator;
use core::num::NonZeroU32;

/// Spacing between consecutive county identifiers on the platform.
pub const DEFAULT_STRIDE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(stride) => stride,
    None => unreachable!(),
};

/// Number of stride steps in the half-open payload interval `[next, stop)`.
#[inline]
pub(crate) const fn steps_between(next: u32, stop: u32, stride: u32) -> u32 {
    if next >= stop {
        0
    } else {
        (stop - 1 - next) / stride + 1
    }
}

/// Lazy, strictly ascending walk over a payload interval at a fixed stride.
///
/// Produced by [`crate::GeoIdRange::iter_step`] and
/// [`crate::GeoIdGenerator::iter_step`]. The iterator is finite and exact-size;
/// cloning it (or asking the range again) restarts the walk.
#[derive(Clone, Debug)]
pub struct StepIter {
    next: u32,
    stop: u32,
    stride: u32,
}

impl StepIter {
    /// `stop` is exclusive and at most `GeoId::MAX_RAW + 1`.
    pub(crate) const fn new(next: u32, stop: u32, stride: NonZeroU32) -> Self {
        Self {
            next,
            stop,
            stride: stride.get(),
        }
    }

    /// The stride this iterator advances by.
    pub const fn stride(&self) -> NonZeroU32 {
        match NonZeroU32::new(self.stride) {
            Some(stride) => stride,
            None => unreachable!(),
        }
    }
}

impl Iterator for StepIter {
    type Item = GeoId;

    #[inline]
    fn next(&mut self) -> Option<GeoId> {
        if self.next >= self.stop {
            return None;
        }
        let id = GeoId::from_raw_unchecked(self.next);
        // Saturating keeps the cursor past `stop` instead of wrapping.
        self.next = self.next.saturating_add(self.stride);
        Some(id)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = steps_between(self.next, self.stop, self.stride) as usize;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<GeoId> {
        let skip = u32::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(self.stride))
            .unwrap_or(u32::MAX);
        self.next = self.next.saturating_add(skip);
        self.next()
    }

    #[inline]
    fn last(mut self) -> Option<GeoId> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.nth(len - 1)
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl ExactSizeIterator for StepIter {}

impl FusedIterator for StepIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn stride(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn steps_between_matches_manual_count() {
        assert_eq!(steps_between(10, 31, 10), 3);
        assert_eq!(steps_between(10, 30, 10), 2);
        assert_eq!(steps_between(10, 11, 10), 1);
        assert_eq!(steps_between(10, 10, 10), 0);
        assert_eq!(steps_between(30, 10, 10), 0);
        assert_eq!(steps_between(0, 10_000_000, 1), 10_000_000);
    }

    #[test]
    fn walks_at_stride() {
        let ids: Vec<u32> = StepIter::new(100_010, 100_031, stride(10))
            .map(GeoId::get)
            .collect();
        assert_eq!(ids, [100_010, 100_020, 100_030]);
    }

    #[test]
    fn len_shrinks_as_items_are_consumed() {
        let mut iter = StepIter::new(0, 50, stride(7));
        assert_eq!(iter.len(), 8);
        iter.next();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.by_ref().count(), 7);
    }

    #[test]
    fn nth_skips_without_walking() {
        let mut iter = StepIter::new(100, 200, stride(10));
        assert_eq!(iter.nth(3).map(GeoId::get), Some(130));
        assert_eq!(iter.next().map(GeoId::get), Some(140));
        assert_eq!(iter.nth(100), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn last_is_the_final_reachable_payload() {
        assert_eq!(
            StepIter::new(10, 26, stride(10)).last().map(GeoId::get),
            Some(20)
        );
        assert_eq!(StepIter::new(10, 10, stride(10)).last(), None);
    }

    #[test]
    fn huge_stride_does_not_wrap() {
        let mut iter = StepIter::new(GeoId::MAX_RAW, GeoId::MAX_RAW + 1, stride(u32::MAX));
        assert_eq!(iter.next(), Some(GeoId::MAX));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn stride_is_reported() {
        assert_eq!(StepIter::new(0, 1, DEFAULT_STRIDE).stride().get(), 10);
    }
}

use core::num::NonZeroU32;
use geoid::{GeoId, GeoIdGenerator, GeoIdRange};
use proptest::prelude::*;

fn arb_raw() -> impl Strategy<Value = u32> {
    0u32..=GeoId::MAX_RAW
}

/// A non-inverted range no wider than 20k identifiers, so enumeration stays
/// cheap at stride 1.
fn arb_bounds() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=GeoId::MAX_RAW).prop_flat_map(|start| {
        let widest = (GeoId::MAX_RAW - start).min(20_000);
        (Just(start), start..=start + widest)
    })
}

fn arb_stride() -> impl Strategy<Value = NonZeroU32> {
    prop_oneof![Just(1u32), Just(5), Just(10), Just(100), 1u32..=1_000]
        .prop_map(|s| NonZeroU32::new(s).unwrap())
}

fn generator(start: u32, end: u32) -> GeoIdGenerator {
    GeoIdGenerator::new(GeoId::new(start).unwrap(), GeoId::new(end).unwrap())
}

proptest! {
    #[test]
    fn decode_of_encode_is_identity(raw in arb_raw()) {
        let id = GeoId::new(raw).unwrap();
        prop_assert_eq!(GeoId::decode(&id.encode()).unwrap().get(), raw);
    }

    #[test]
    fn encode_of_decode_is_identity(s in "G[0-9]{7}") {
        prop_assert_eq!(GeoId::decode(&s).unwrap().encode(), s);
    }

    #[test]
    fn decode_rejects_other_prefixes(s in "[A-FH-Za-z0-9][0-9]{7}") {
        prop_assert!(GeoId::decode(&s).is_err());
    }

    #[test]
    fn count_equals_enumerated_length(
        (start, end) in arb_bounds(),
        stride in arb_stride(),
    ) {
        let generator = generator(start, end);
        let ids: Vec<GeoId> = generator.iter_step(stride).collect();
        prop_assert_eq!(generator.count_step(stride) as usize, ids.len());

        // Start always present; end present iff it lies on the stride.
        prop_assert_eq!(ids.first().copied(), Some(generator.start()));
        let end_on_stride = (end - start) % stride.get() == 0;
        prop_assert_eq!(ids.last() == Some(&generator.end()), end_on_stride);
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn inverted_bounds_enumerate_nothing((lo, hi) in arb_bounds(), stride in arb_stride()) {
        prop_assume!(lo < hi);
        let generator = generator(hi, lo);
        prop_assert_eq!(generator.iter_step(stride).next(), None);
        prop_assert_eq!(generator.count_step(stride), 0);
    }

    #[test]
    fn partition_tiles_parent_range((start, end) in arb_bounds(), workers in 1usize..=64) {
        let generator = generator(start, end);
        prop_assume!(workers as u64 <= u64::from(end - start) + 1);

        let plan = generator.partition(workers).unwrap();
        prop_assert_eq!(plan.len(), workers);

        // Contiguous and non-overlapping: each range starts where the
        // previous one stopped.
        let mut cursor = start;
        for range in &plan {
            prop_assert_eq!(range.start().get(), cursor);
            cursor += range.len();
        }
        // Exhaustive: the cursor lands one past the parent end.
        prop_assert_eq!(cursor, end + 1);
        prop_assert_eq!(plan.last().and_then(GeoIdRange::end), Some(generator.end()));

        // Every non-last worker gets exactly `total / workers` identifiers.
        let chunk = (end - start) / workers as u32;
        prop_assert!(plan[..workers - 1].iter().all(|r| r.len() == chunk));
    }

    #[test]
    fn partition_membership_is_unique(
        (start, end) in arb_bounds(),
        workers in 1usize..=16,
        probe in any::<prop::sample::Index>(),
    ) {
        let generator = generator(start, end);
        prop_assume!(workers as u64 <= u64::from(end - start) + 1);
        let plan = generator.partition(workers).unwrap();

        let width = (end - start) as usize + 1;
        let id = GeoId::new(start + probe.index(width) as u32).unwrap();
        prop_assert_eq!(plan.iter().filter(|r| r.contains(id)).count(), 1);
    }
}

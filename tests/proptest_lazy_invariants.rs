//! Property tests for the caching invariants of lazy attributes.

use std::cell::Cell;

use lazy_attr::{computation, AttributeError, LazyAttribute, LazyWritableAttribute, Slot};
use proptest::prelude::*;

#[derive(Default)]
struct Sample {
    seed: u64,
    computes: Cell<u32>,
    hash: Slot<u64>,
    label: Slot<String>,
}

impl Sample {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    const HASH: LazyAttribute<Self, u64> = LazyAttribute::new(
        computation! {
            infallible fn hash(sample: &Sample) -> u64 {
                sample.computes.set(sample.computes.get() + 1);
                sample.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
            }
        },
        |s| &s.hash,
        |s| &mut s.hash,
    );

    const LABEL: LazyWritableAttribute<Self, String> = LazyWritableAttribute::new(
        computation! {
            infallible fn label(sample: &Sample) -> String {
                sample.computes.set(sample.computes.get() + 1);
                format!("sample-{}", sample.seed)
            }
        },
        |s| &s.label,
        |s| &mut s.label,
    );
}

fn expected_hash(seed: u64) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Repeated reads compute once and return the same value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_reads_compute_once(seed in any::<u64>(), reads in 1usize..32) {
        let sample = Sample::new(seed);
        let expected = expected_hash(seed);

        for _ in 0..reads {
            prop_assert_eq!(Sample::HASH.get(&sample), Ok(&expected));
        }
        prop_assert_eq!(sample.computes.get(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Caching on one instance never touches another
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn instances_are_isolated(
        seeds in prop::collection::vec(any::<u64>(), 2..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let samples: Vec<_> = seeds.iter().copied().map(Sample::new).collect();
        let read = pick.index(samples.len());

        Sample::HASH.get(&samples[read]).unwrap();

        for (i, sample) in samples.iter().enumerate() {
            prop_assert_eq!(Sample::HASH.is_cached(sample), i == read);
            prop_assert_eq!(sample.computes.get(), u32::from(i == read));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Read-only attributes reject every write and keep their value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn read_only_rejects_writes(
        seed in any::<u64>(),
        writes in prop::collection::vec(any::<u64>(), 1..8),
    ) {
        let mut sample = Sample::new(seed);
        Sample::HASH.get(&sample).unwrap();

        for value in writes {
            prop_assert_eq!(
                Sample::HASH.set(&mut sample, value),
                Err(AttributeError::ReadOnly { name: "hash" })
            );
        }
        let expected = expected_hash(seed);
        prop_assert_eq!(Sample::HASH.get(&sample), Ok(&expected));
        prop_assert_eq!(sample.computes.get(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. The last write wins and writes never compute
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn last_write_wins(
        seed in any::<u64>(),
        read_first in any::<bool>(),
        writes in prop::collection::vec("[a-z]{0,12}", 1..8),
    ) {
        let mut sample = Sample::new(seed);
        if read_first {
            let computed = format!("sample-{seed}");
            prop_assert_eq!(Sample::LABEL.get(&sample), Ok(&computed));
        }

        for value in &writes {
            Sample::LABEL.set(&mut sample, value.clone()).unwrap();
        }

        prop_assert_eq!(Sample::LABEL.get(&sample), Ok(writes.last().unwrap()));
        prop_assert_eq!(sample.computes.get(), u32::from(read_first));
    }
}

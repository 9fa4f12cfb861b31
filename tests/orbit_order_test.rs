// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Orbit comparison agrees with lexicographic order of the legs.

mod common;

use collatz_orbits::orbit::{OrbitSequence, BLOCK_LEGS};
use common::{legs, path};
use proptest::prelude::*;
use std::cmp::Ordering;

fn orbit(values: &[u8]) -> OrbitSequence {
    OrbitSequence::from_legs(values.iter().map(|&leg| u32::from(leg))).unwrap()
}

/// Leg vectors biased towards long shared prefixes.
fn arb_pair() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (
        prop::collection::vec(0u8..4, 0..3 * BLOCK_LEGS),
        prop::collection::vec(0u8..4, 0..BLOCK_LEGS),
        prop::collection::vec(0u8..4, 0..BLOCK_LEGS),
    )
        .prop_map(|(prefix, a, b)| {
            let mut left = prefix.clone();
            left.extend(a);
            let mut right = prefix;
            right.extend(b);
            (left, right)
        })
}

proptest! {
    #[test]
    fn ordering_matches_leg_vectors((a, b) in arb_pair()) {
        prop_assert_eq!(orbit(&a).cmp(&orbit(&b)), a.cmp(&b));
        prop_assert_eq!(orbit(&a) == orbit(&b), a == b);
    }

    #[test]
    fn ordering_of_full_range_legs(
        a in prop::collection::vec(any::<u8>(), 0..40),
        b in prop::collection::vec(any::<u8>(), 0..40),
    ) {
        prop_assert_eq!(orbit(&a).cmp(&orbit(&b)), a.cmp(&b));
    }

    #[test]
    fn display_and_legs_round_trip(values in prop::collection::vec(any::<u8>(), 0..30)) {
        let seq = orbit(&values);
        prop_assert_eq!(seq.len(), values.len());
        let shown = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(seq.to_string(), shown);
    }

    #[test]
    fn paths_order_by_orbit(a in 1i64..100_000, b in 1i64..100_000) {
        let (pa, pb) = (path(a), path(b));
        prop_assert_eq!(pa.cmp(&pb), legs(pa.orbit()).cmp(&legs(pb.orbit())));
    }
}

#[test]
fn test_prefix_sorts_first() {
    assert_eq!(orbit(&[0, 1]).cmp(&orbit(&[0, 1, 0])), Ordering::Less);
    assert_eq!(orbit(&[]).cmp(&orbit(&[0])), Ordering::Less);
}

#[test]
fn test_block_key_is_most_significant_first() {
    let seq = orbit(&[1, 2, 3]);
    let key = seq.blocks().next().map(|block| block.key());
    assert_eq!(key, Some(0x0102_0300_0000_0000));
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Frequency tree behaviour seen from outside the crate.

mod common;

use collatz_orbits::tree::{Direction, FrequencyTree};
use collatz_orbits::OrbitSequence;
use common::path;

#[test]
fn test_sorted_inserts_do_not_recurse() {
    // A degenerate chain: every insert extends the right spine.
    let mut tree = FrequencyTree::new();
    for key in 0..20_000u32 {
        tree.insert(key);
    }
    let copy = tree.clone();
    assert_eq!(copy.nodes(), 20_000);
    assert_eq!(copy.iter_rev().next(), Some((&19_999, 1)));
    drop(tree);
    let mut copy = copy;
    assert_eq!(copy.destroy(), 20_000);
    assert!(copy.is_empty());
}

#[test]
fn test_traverse_sum_equals_inserts() {
    let keys = [5u64, 1, 5, 9, 1, 1, 3];
    let tree: FrequencyTree<u64> = keys.iter().copied().collect();
    let mut visited = Vec::new();
    let mut record = |key: &u64, count: u64| visited.push((*key, count));
    let total = tree.traverse(Direction::Forward, Some(&mut record));
    assert_eq!(total, keys.len() as u64);
    assert_eq!(visited, vec![(1, 3), (3, 1), (5, 2), (9, 1)]);
}

#[test]
fn test_histogram_of_orbits() {
    let tree: FrequencyTree<OrbitSequence> =
        (1..=48i64).map(|n| path(n).orbit().clone()).collect();
    let even = OrbitSequence::from_legs([1]).unwrap();
    let quarter = OrbitSequence::from_legs([0, 2]).unwrap();
    assert_eq!(tree.search(&even), 24);
    assert_eq!(tree.search(&quarter), 12);
    assert_eq!(tree.total(), 48);
    // "0 ..." orbits sort before "1".
    assert_eq!(tree.iter_rev().next(), Some((&even, 24)));
}

#[test]
fn test_histogram_of_paths() {
    let tree: FrequencyTree<_> = (1..=48i64).map(path).collect();
    assert_eq!(tree.search(&path(3)), tree.search(&path(19)));
    assert_eq!(tree.search(&path(2)), 24);
}

#[test]
fn test_merge_of_split_histograms() {
    let whole: FrequencyTree<usize> = (1..=192i64).map(|n| path(n).path_length()).collect();
    let mut low: FrequencyTree<usize> = (1..=96i64).map(|n| path(n).path_length()).collect();
    let high: FrequencyTree<usize> = (97..=192i64).map(|n| path(n).path_length()).collect();
    low.merge(high);
    assert_eq!(low.iter().collect::<Vec<_>>(), whole.iter().collect::<Vec<_>>());
}

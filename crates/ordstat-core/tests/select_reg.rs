//! Selection regression test
//!
//! Tests median-of-medians selection against a sort-based reference:
//!   (1) select() for every rank of random sequences with heavy duplication
//!   (2) partition3() preserves the input multiset
//!   (3) order independence under permutation
//!   (4) linear growth of the comparison count
//!   (5) floating-point data through OrderedFloat

use ordered_float::OrderedFloat;
use ordstat_core::{Error, median, median_of_medians, partition3, select};
use ordstat_test::{RegParams, random_sequence, sorted_rank};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cell::Cell;
use std::cmp::Ordering;

/// Sample sizes and value ranges, small enough to check every rank.
const SAMPLE_SIZES: [usize; 6] = [1, 5, 6, 26, 100, 300];
const POPULATION_SIZES: [u32; 4] = [1, 3, 100, 4000];

#[test]
fn select_reg_matches_sorted() {
    let mut rp = RegParams::new("select_sorted");

    let mut seed = 0;
    for &n in &SAMPLE_SIZES {
        for &pop in &POPULATION_SIZES {
            seed += 1;
            let seq = random_sequence(n, pop, seed);
            let mut sorted = seq.clone();
            sorted.sort_unstable();
            let all_ok = (0..n).all(|rank| select(&seq, rank) == Ok(sorted[rank]));
            rp.check(all_ok);
        }
    }

    assert!(rp.cleanup(), "select_sorted regression test failed");
}

#[test]
fn select_reg_known_values() {
    let mut rp = RegParams::new("select_known");

    let seq = [9, 1, 8, 2, 7, 3, 6, 4, 5];
    rp.compare_values(5.0, select(&seq, 4).unwrap() as f64, 0.0);
    rp.compare_values(5.0, median(&seq).unwrap() as f64, 0.0);
    rp.compare_values(1.0, select(&seq, 0).unwrap() as f64, 0.0);
    rp.compare_values(9.0, select(&seq, 8).unwrap() as f64, 0.0);

    // Sorted and reverse-sorted inputs
    let ascending: Vec<i64> = (0..1000).collect();
    let descending: Vec<i64> = (0..1000).rev().collect();
    for rank in [0usize, 1, 499, 500, 998, 999] {
        rp.compare_values(rank as f64, select(&ascending, rank).unwrap() as f64, 0.0);
        rp.compare_values(rank as f64, select(&descending, rank).unwrap() as f64, 0.0);
    }

    assert!(rp.cleanup(), "select_known regression test failed");
}

#[test]
fn select_reg_invalid_rank() {
    let mut rp = RegParams::new("select_invalid");

    let seq = random_sequence(10, 50, 99);
    rp.check(select(&seq, 10) == Err(Error::InvalidRank { rank: 10, len: 10 }));
    rp.check(select(&seq, usize::MAX).is_err());
    let empty: Vec<u32> = Vec::new();
    rp.check(select(&empty, 0) == Err(Error::InvalidRank { rank: 0, len: 0 }));

    assert!(rp.cleanup(), "select_invalid regression test failed");
}

#[test]
fn select_reg_partition_multiset() {
    let mut rp = RegParams::new("select_partition");

    for seed in 0..10 {
        let seq = random_sequence(200, 20, 100 + seed);
        let pivot = median_of_medians(&seq).expect("non-empty");
        let part = partition3(&seq, pivot);

        rp.compare_values(seq.len() as f64, part.len() as f64, 0.0);
        rp.check(part.low.iter().all(|&v| v < pivot));
        rp.check(part.middle.iter().all(|&v| v == pivot));
        rp.check(part.high.iter().all(|&v| v > pivot));

        let mut merged: Vec<u32> = part
            .low
            .iter()
            .chain(&part.middle)
            .chain(&part.high)
            .copied()
            .collect();
        merged.sort_unstable();
        let mut sorted = seq.clone();
        sorted.sort_unstable();
        rp.check(merged == sorted);

        // The pivot is guaranteed to leave at least ~3/10 on each side
        let bound = seq.len() * 3 / 10 - 6;
        rp.check(part.low.len() + part.middle.len() >= bound);
        rp.check(part.high.len() + part.middle.len() >= bound);
    }

    assert!(rp.cleanup(), "select_partition regression test failed");
}

#[test]
fn select_reg_permutation_invariant() {
    let mut rp = RegParams::new("select_permutation");

    let mut rng = StdRng::seed_from_u64(42);
    let mut seq = random_sequence(513, 64, 7);
    let ranks = [0usize, 17, 256, 400, 512];
    let expected: Vec<u32> = ranks.iter().map(|&r| sorted_rank(&seq, r).unwrap()).collect();

    for _ in 0..8 {
        seq.shuffle(&mut rng);
        let got: Vec<u32> = ranks.iter().map(|&r| select(&seq, r).unwrap()).collect();
        rp.check(got == expected);
    }

    assert!(rp.cleanup(), "select_permutation regression test failed");
}

#[test]
fn select_reg_floats() {
    let mut rp = RegParams::new("select_floats");

    let seq: Vec<OrderedFloat<f64>> = [2.5, -1.0, 3.75, 0.0, 2.5, 10.0, -7.25]
        .into_iter()
        .map(OrderedFloat)
        .collect();
    rp.compare_values(2.5, median(&seq).unwrap().into_inner(), 0.0);
    rp.compare_values(-7.25, select(&seq, 0).unwrap().into_inner(), 0.0);
    rp.compare_values(10.0, select(&seq, 6).unwrap().into_inner(), 0.0);

    assert!(rp.cleanup(), "select_floats regression test failed");
}

thread_local! {
    static COMPARISONS: Cell<usize> = const { Cell::new(0) };
}

/// Integer wrapper that counts every comparison made on this thread.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Counted(u32);

impl Ord for Counted {
    fn cmp(&self, other: &Self) -> Ordering {
        COMPARISONS.with(|c| c.set(c.get() + 1));
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Counted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn count_comparisons(n: usize, seed: u64) -> usize {
    let seq: Vec<Counted> = random_sequence(n, 4000, seed)
        .into_iter()
        .map(Counted)
        .collect();
    COMPARISONS.with(|c| c.set(0));
    let _ = select(&seq, n / 2).unwrap();
    COMPARISONS.with(|c| c.get())
}

#[test]
fn select_reg_linear_comparisons() {
    let mut rp = RegParams::new("select_linear");

    let sizes = [1000usize, 2000, 4000, 8000, 16000];
    let counts: Vec<usize> = sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| count_comparisons(n, 500 + i as u64))
        .collect();

    for (&n, &count) in sizes.iter().zip(&counts) {
        if rp.display() {
            eprintln!(
                "  n = {:6}: {:8} comparisons ({:.2} per element)",
                n,
                count,
                count as f64 / n as f64
            );
        }
        // Bounded constant per element
        rp.check(count <= 40 * n);
    }

    // 16x the input must cost far less than 16x squared
    let growth = counts[4] as f64 / counts[0] as f64;
    rp.check(growth < 24.0);

    assert!(rp.cleanup(), "select_linear regression test failed");
}

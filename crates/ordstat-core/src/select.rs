//! Order statistics by deterministic selection
//!
//! Finds the element of a given zero-based rank without sorting the whole
//! sequence, using the median-of-medians (BFPRT) pivot rule. The pivot is
//! guaranteed to discard a constant fraction of the candidates at every
//! step, so the worst case is linear in the input length.
//!
//! The input slice is never modified. Each narrowing step copies the
//! surviving candidates into fresh `low` / `middle` / `high` buckets.
//!
//! # Examples
//!
//! ```
//! use ordstat_core::select::{median, select};
//!
//! let values = [9, 1, 8, 2, 7, 3, 6, 4, 5];
//! assert_eq!(select(&values, 0).unwrap(), 1);
//! assert_eq!(median(&values).unwrap(), 5);
//! ```

use crate::error::{Error, Result};
use log::trace;

/// Number of elements per group when computing the median of medians.
///
/// Sequences of at most this length are sorted directly.
pub const GROUP_SIZE: usize = 5;

/// Three-way split of a sequence around a pivot value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Elements strictly less than the pivot
    pub low: Vec<T>,
    /// Elements equal to the pivot
    pub middle: Vec<T>,
    /// Elements strictly greater than the pivot
    pub high: Vec<T>,
}

impl<T> Partition<T> {
    /// Total number of elements across the three buckets.
    pub fn len(&self) -> usize {
        self.low.len() + self.middle.len() + self.high.len()
    }

    /// Returns `true` if all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Return the element that would sit at `rank` if `seq` were sorted ascending.
///
/// # Arguments
///
/// * `seq` - Input values; duplicates are allowed
/// * `rank` - Zero-based position in sorted order
///
/// # Errors
///
/// Returns `Error::InvalidRank` if `rank >= seq.len()`, which includes
/// every rank into an empty sequence.
pub fn select<T: Copy + Ord>(seq: &[T], rank: usize) -> Result<T> {
    if rank >= seq.len() {
        return Err(Error::InvalidRank {
            rank,
            len: seq.len(),
        });
    }
    Ok(select_owned(seq.to_vec(), rank, 0))
}

/// Return the median of `seq`, i.e. the element at rank `len / 2`.
///
/// For even lengths this is the upper of the two middle elements
/// (index `len / 2`), matching the window median used by the filters.
pub fn median<T: Copy + Ord>(seq: &[T]) -> Result<T> {
    select(seq, seq.len() / 2)
}

/// Compute the median-of-medians pivot for `seq`.
///
/// Splits the sequence into consecutive groups of [`GROUP_SIZE`], takes the
/// middle element (index `group_len / 2`) of each sorted group, and returns
/// the median of those medians. Returns `None` for an empty sequence.
pub fn median_of_medians<T: Copy + Ord>(seq: &[T]) -> Option<T> {
    if seq.is_empty() {
        return None;
    }
    Some(pivot_of(seq, 0))
}

/// Split `seq` into elements less than, equal to, and greater than `pivot`.
///
/// Relative order inside each bucket follows the input order.
pub fn partition3<T: Copy + Ord>(seq: &[T], pivot: T) -> Partition<T> {
    let mut low = Vec::new();
    let mut middle = Vec::new();
    let mut high = Vec::new();
    for &value in seq {
        match value.cmp(&pivot) {
            std::cmp::Ordering::Less => low.push(value),
            std::cmp::Ordering::Equal => middle.push(value),
            std::cmp::Ordering::Greater => high.push(value),
        }
    }
    Partition { low, middle, high }
}

/// Sort a short slice in place by straight insertion.
///
/// Used for groups and for the base case, where the length never exceeds
/// [`GROUP_SIZE`]. Equal elements keep their relative order.
pub fn insertion_sort<T: Ord>(data: &mut [T]) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && data[j] < data[j - 1] {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Selection over an owned candidate set. `rank` must be in range.
///
/// Narrowing into `low` or `high` is a loop; only the pivot computation
/// recurses, and that recursion works on a fifth of the input.
fn select_owned<T: Copy + Ord>(mut candidates: Vec<T>, mut rank: usize, depth: usize) -> T {
    loop {
        if candidates.len() <= GROUP_SIZE {
            insertion_sort(&mut candidates);
            return candidates[rank];
        }

        let pivot = pivot_of(&candidates, depth);
        let Partition { low, middle, high } = partition3(&candidates, pivot);
        trace!(
            "select depth={} n={} low={} middle={} high={} rank={}",
            depth,
            candidates.len(),
            low.len(),
            middle.len(),
            high.len(),
            rank
        );

        let k = low.len();
        if rank < k {
            candidates = low;
        } else if rank < k + middle.len() {
            return pivot;
        } else {
            rank -= k + middle.len();
            candidates = high;
        }
    }
}

/// Median of group medians. `seq` must be non-empty.
fn pivot_of<T: Copy + Ord>(seq: &[T], depth: usize) -> T {
    let mut medians: Vec<T> = seq
        .chunks(GROUP_SIZE)
        .map(|chunk| {
            let mut group = [chunk[0]; GROUP_SIZE];
            let group = &mut group[..chunk.len()];
            group.copy_from_slice(chunk);
            insertion_sort(group);
            group[group.len() / 2]
        })
        .collect();

    if medians.len() <= GROUP_SIZE {
        insertion_sort(&mut medians);
        medians[medians.len() / 2]
    } else {
        let mid = medians.len() / 2;
        select_owned(medians, mid, depth + 1)
    }
}

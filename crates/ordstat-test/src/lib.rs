//! ordstat-test - Regression test framework for ordstat
//!
//! Shared helpers for the `*_reg.rs` regression tests of every crate:
//!
//! - [`RegParams`] collects numbered comparisons and reports all failures
//!   at the end instead of stopping at the first one
//! - seeded random fixtures ([`random_sequence`], [`random_grid`])
//! - sort-based reference implementations ([`sorted_rank`],
//!   [`reference_rank_filter`]) to check the linear-time kernels against
//!
//! # Usage
//!
//! ```ignore
//! use ordstat_test::RegParams;
//!
//! let mut rp = RegParams::new("select");
//! rp.compare_values(5.0, value as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use ordstat_core::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate `len` values uniformly drawn from `1..=max`.
///
/// The same seed always yields the same sequence.
pub fn random_sequence(len: usize, max: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(1..=max.max(1))).collect()
}

/// Generate a `rows x cols` grid of random 8-bit samples.
pub fn random_grid(rows: usize, cols: usize, seed: u64) -> Grid<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols).map(|_| rng.random::<u8>()).collect();
    Grid::from_data(rows, cols, data).unwrap_or_default()
}

/// Reference order statistic: sort a copy and index it.
pub fn sorted_rank<T: Copy + Ord>(seq: &[T], rank: usize) -> Option<T> {
    let mut sorted = seq.to_vec();
    sorted.sort_unstable();
    sorted.get(rank).copied()
}

/// Reference windowed rank filter.
///
/// Builds every zero-padded `window x window` neighborhood with signed
/// coordinates, sorts it, and picks index
/// `min(floor(rank * window^2), window^2 - 1)`.
pub fn reference_rank_filter<T: Copy + Ord + Default>(
    grid: &Grid<T>,
    window: usize,
    rank: f32,
) -> TestResult<Grid<T>> {
    if window == 0 || grid.is_empty() || !(0.0..=1.0).contains(&rank) {
        return Err(TestError::InvalidFixture(format!(
            "window {} rank {} on {:?} grid",
            window,
            rank,
            grid.dimensions()
        )));
    }

    let (rows, cols) = grid.dimensions();
    let area = window * window;
    let index = ((rank * area as f32) as usize).min(area - 1);
    let before = (window / 2) as isize;

    let mut out = Grid::new(rows, cols);
    let mut buf = Vec::with_capacity(area);
    for i in 0..rows {
        for j in 0..cols {
            buf.clear();
            for di in 0..window as isize {
                for dj in 0..window as isize {
                    let r = i as isize + di - before;
                    let c = j as isize + dj - before;
                    let inside = r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols;
                    buf.push(if inside {
                        grid.get_unchecked(r as usize, c as usize)
                    } else {
                        T::default()
                    });
                }
            }
            buf.sort_unstable();
            out.set(i, j, buf[index])?;
        }
    }
    Ok(out)
}

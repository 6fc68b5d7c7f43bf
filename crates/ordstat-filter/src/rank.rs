//! Rank filtering operations
//!
//! Provides windowed rank (order-statistic) filters: median, min, max,
//! and arbitrary rank in `[0.0, 1.0]`.
//!
//! Every output cell is the selected order statistic of the
//! `window_size x window_size` neighborhood centered on the same cell of
//! the input. Neighbors that fall outside the grid count as
//! `T::default()` (zero), so cells near the border are pulled toward
//! zero and a window larger than the grid is dominated by padding.
//!
//! The input grid is only read; results go to a new grid. Rows are
//! independent, so large grids are split across the rayon thread pool
//! by output row.
//!
//! For an even `window_size` the window covers `window_size / 2` cells
//! before the center and `window_size / 2 - 1` after it, keeping the
//! window at exactly `window_size^2` cells.

use crate::{FilterError, FilterResult};
use log::debug;
use ordstat_core::{Grid, Raster, select};
use rayon::prelude::*;

/// Grids with at least this many cells are filtered in parallel.
pub const PARALLEL_CELL_THRESHOLD: usize = 256 * 256;

/// Apply a median filter.
///
/// Each cell becomes element `window_size^2 / 2` of its sorted
/// zero-padded neighborhood.
///
/// # Arguments
/// * `grid` - Input grid; not modified
/// * `window_size` - Side of the square window (odd values center it exactly)
///
/// # Errors
///
/// `FilterError::InvalidWindowSize` for a zero window or one whose area
/// does not fit in `usize`, `FilterError::EmptyGrid` for a grid with a
/// zero dimension.
///
/// # Examples
///
/// ```
/// use ordstat_core::Grid;
/// use ordstat_filter::median_filter;
///
/// // One real value among eight zero-padded neighbors
/// let grid = Grid::from_data(1, 1, vec![5u8]).unwrap();
/// let out = median_filter(&grid, 3).unwrap();
/// assert_eq!(out.data(), &[0]);
/// ```
pub fn median_filter<T>(grid: &Grid<T>, window_size: usize) -> FilterResult<Grid<T>>
where
    T: Copy + Ord + Default + Send + Sync,
{
    let area = check_filter_input(grid, window_size)?;
    filter_at_index(grid, window_size, area, area / 2)
}

/// Apply a rank filter.
///
/// # Arguments
/// * `grid` - Input grid; not modified
/// * `window_size` - Side of the square window
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
///
/// The selected index is `min(floor(rank * window_size^2), window_size^2 - 1)`.
pub fn rank_filter<T>(grid: &Grid<T>, window_size: usize, rank: f32) -> FilterResult<Grid<T>>
where
    T: Copy + Ord + Default + Send + Sync,
{
    let area = check_filter_input(grid, window_size)?;
    check_rank(rank)?;
    filter_at_index(grid, window_size, area, rank_index(area, rank))
}

/// Apply minimum filter (rank = 0.0).
///
/// Convenience wrapper for `rank_filter`.
pub fn min_filter<T>(grid: &Grid<T>, window_size: usize) -> FilterResult<Grid<T>>
where
    T: Copy + Ord + Default + Send + Sync,
{
    rank_filter(grid, window_size, 0.0)
}

/// Apply maximum filter (rank = 1.0).
///
/// Convenience wrapper for `rank_filter`.
pub fn max_filter<T>(grid: &Grid<T>, window_size: usize) -> FilterResult<Grid<T>>
where
    T: Copy + Ord + Default + Send + Sync,
{
    rank_filter(grid, window_size, 1.0)
}

/// Apply a median filter to every channel of a raster independently.
pub fn median_filter_raster(raster: &Raster, window_size: usize) -> FilterResult<Raster> {
    let planes = raster
        .planes()
        .iter()
        .map(|plane| median_filter(plane, window_size))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(Raster::from_planes(planes)?)
}

/// Apply a rank filter to every channel of a raster independently.
pub fn rank_filter_raster(raster: &Raster, window_size: usize, rank: f32) -> FilterResult<Raster> {
    let planes = raster
        .planes()
        .iter()
        .map(|plane| rank_filter(plane, window_size, rank))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(Raster::from_planes(planes)?)
}

/// Map a fractional rank to an index into a sorted window of `area` cells.
///
/// `rank` is expected in [0.0, 1.0]; the result is clamped to `area - 1`
/// so that `rank = 1.0` selects the maximum.
pub fn rank_index(area: usize, rank: f32) -> usize {
    ((rank * area as f32) as usize).min(area.saturating_sub(1))
}

/// Fill `buf` with the zero-padded window centered at `(row, col)`.
///
/// The window is written in row-major order and always holds exactly
/// `window_size^2` values, whatever the distance to the border. `buf` is
/// cleared first so one buffer can be reused across cells.
///
/// # Panics
///
/// Panics if `col >= grid.cols()`. Rows outside the grid are all padding.
pub fn extract_window<T: Copy + Default>(
    grid: &Grid<T>,
    row: usize,
    col: usize,
    window_size: usize,
    buf: &mut Vec<T>,
) {
    buf.clear();
    let (rows, cols) = grid.dimensions();
    let before = window_size / 2;

    // Column span is the same for every window row
    let first = col.saturating_sub(before);
    let end = (col + window_size - before).min(cols);
    let lo_pad = before.saturating_sub(col);
    let hi_pad = window_size - lo_pad - (end - first);

    for k in 0..window_size {
        let src = (row + k)
            .checked_sub(before)
            .filter(|&r| r < rows);
        match src {
            Some(r) => {
                buf.extend(std::iter::repeat_n(T::default(), lo_pad));
                buf.extend_from_slice(&grid.row(r)[first..end]);
                buf.extend(std::iter::repeat_n(T::default(), hi_pad));
            }
            None => buf.extend(std::iter::repeat_n(T::default(), window_size)),
        }
    }
}

/// Validate filter arguments and return the window area.
fn check_filter_input<T>(grid: &Grid<T>, window_size: usize) -> FilterResult<usize> {
    let area = window_size
        .checked_mul(window_size)
        .filter(|&area| area > 0)
        .ok_or(FilterError::InvalidWindowSize(window_size))?;
    if grid.is_empty() {
        let (rows, cols) = grid.dimensions();
        return Err(FilterError::EmptyGrid { rows, cols });
    }
    Ok(area)
}

fn check_rank(rank: f32) -> FilterResult<()> {
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0.0, 1.0], got {rank}"
        )));
    }
    Ok(())
}

/// Filter every cell, selecting `index` from each sorted window.
fn filter_at_index<T>(
    grid: &Grid<T>,
    window_size: usize,
    area: usize,
    index: usize,
) -> FilterResult<Grid<T>>
where
    T: Copy + Ord + Default + Send + Sync,
{
    let (rows, cols) = grid.dimensions();
    let parallel = rows * cols >= PARALLEL_CELL_THRESHOLD;
    debug!(
        "rank filter: {}x{} grid, window {}, index {}/{}, parallel={}",
        rows, cols, window_size, index, area, parallel
    );

    let filter_row = |(i, out_row): (usize, &mut [T])| -> FilterResult<()> {
        let mut window = Vec::new();
        window
            .try_reserve_exact(area)
            .map_err(|_| FilterError::InvalidWindowSize(window_size))?;
        for (j, cell) in out_row.iter_mut().enumerate() {
            extract_window(grid, i, j, window_size, &mut window);
            *cell = select(&window, index)?;
        }
        Ok(())
    };

    let mut out = vec![T::default(); rows * cols];
    if parallel {
        out.par_chunks_mut(cols).enumerate().try_for_each(filter_row)?;
    } else {
        out.chunks_mut(cols).enumerate().try_for_each(filter_row)?;
    }

    Ok(Grid::from_data(rows, cols, out)?)
}

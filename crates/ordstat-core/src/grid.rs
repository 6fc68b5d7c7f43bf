//! Grid - Two-dimensional scalar array
//!
//! `Grid<T>` is the in-memory input and output of the windowed rank
//! filters: one scalar per cell, addressed by `(row, col)`.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The cell at
//! `(row, col)` is at index `row * cols + col`.
//!
//! # Examples
//!
//! ```
//! use ordstat_core::Grid;
//!
//! let mut grid = Grid::<u8>::new(3, 4);
//! grid.set(1, 2, 200).unwrap();
//! assert_eq!(grid.get(1, 2).unwrap(), 200);
//! assert_eq!(grid.dimensions(), (3, 4));
//! ```

use crate::error::{Error, Result};

/// Row-major two-dimensional array of scalar cells.
///
/// A grid may have a zero dimension; operations that need at least one
/// cell (such as filtering) reject it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid with every cell set to `T::default()` (zero for numbers).
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::new_with_value(rows, cols, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn new_with_value(rows: usize, cols: usize, value: T) -> Self {
        Grid {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Get the value at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Get the value at `(row, col)` without a recoverable bounds check.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the backing buffer.
    #[inline]
    pub fn get_unchecked(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Set the value at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Set the value at `(row, col)` without a recoverable bounds check.
    #[inline]
    pub fn set_unchecked(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Copy the grid out as nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: Fn(T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl<T> Grid<T> {
    /// Create a grid from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `Error::DataLength` if `data.len() != rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Grid { rows, cols, data })
    }

    /// Create a grid from nested rows.
    ///
    /// All rows must have the same length. An empty outer vector yields a
    /// `0 x 0` grid.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(Error::DataLength {
                    expected: ncols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Grid {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row-major cell data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major cell data
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its row-major data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks() rejects a zero chunk size; a zero-column grid has no cells
        let cols = self.cols.max(1);
        self.data.chunks(cols).take(self.rows)
    }

    /// Check that another grid has the same shape.
    pub fn check_same_shape<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::<u8>::new(2, 3);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.len(), 6);
        assert!(grid.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_grid_from_data() {
        let grid = Grid::from_data(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), 1);
        assert_eq!(grid.get(0, 2).unwrap(), 3);
        assert_eq!(grid.get(1, 0).unwrap(), 4);
        assert_eq!(grid.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_grid_from_data_wrong_size() {
        assert_eq!(
            Grid::from_data(2, 2, vec![1, 2, 3]),
            Err(Error::DataLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4], vec![5, 6]]);

        assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_err());

        let empty = Grid::<u8>::from_rows(vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.iter_rows().count(), 0);
    }

    #[test]
    fn test_grid_out_of_bounds() {
        let mut grid = Grid::<i32>::new(2, 2);
        assert!(grid.get(2, 0).is_err());
        assert!(grid.get(0, 2).is_err());
        assert!(grid.set(5, 5, 1).is_err());
    }

    #[test]
    fn test_grid_map_and_shape() {
        let grid = Grid::from_data(1, 3, vec![1u8, 2, 3]).unwrap();
        let doubled = grid.map(|v| v as u32 * 2);
        assert_eq!(doubled.data(), &[2, 4, 6]);
        assert!(grid.check_same_shape(&doubled).is_ok());
        assert!(grid.check_same_shape(&Grid::<u8>::new(3, 1)).is_err());
    }
}

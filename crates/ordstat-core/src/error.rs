//! Error types for ordstat-core
//!
//! Provides a unified error type for selection and grid operations.
//! Every variant is a precondition violation: the kernel fails at the
//! bad call instead of clamping or substituting a default.

use thiserror::Error;

/// ordstat-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Rank outside `[0, len - 1]`, including any rank into an empty sequence
    #[error("invalid rank: {rank} for sequence of length {len}")]
    InvalidRank { rank: usize, len: usize },

    /// Invalid raster dimensions or channel count
    #[error("invalid dimensions: {width}x{height}x{channels}")]
    InvalidDimension {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Backing buffer does not match the declared shape
    #[error("data length {actual} does not match expected {expected}")]
    DataLength { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({row}, {col}) in {rows}x{cols} grid")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Grids that must share a shape do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Result type alias for ordstat-core operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for ordstat-filter
//!
//! Filter preconditions are checked up front; a failing call returns
//! one of these instead of clamping the window or the rank.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ordstat_core::Error),

    /// Window size must be positive
    #[error("invalid window size: {0}")]
    InvalidWindowSize(usize),

    /// Grid with a zero dimension
    #[error("empty grid: {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture parameters that cannot produce a valid input
    #[error("invalid fixture parameters: {0}")]
    InvalidFixture(String),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Grid comparison failed
    #[error("grid comparison failed at index {index}: first difference at ({row}, {col})")]
    GridMismatch {
        index: usize,
        row: usize,
        col: usize,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ordstat_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

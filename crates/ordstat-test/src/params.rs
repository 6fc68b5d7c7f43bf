//! Regression test parameters and operations

use crate::error::TestError;
use ordstat_core::Grid;
use std::fmt::Debug;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and record failures (default)
    #[default]
    Compare,
    /// Compare and also print intermediate results for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the running
/// comparison index, the mode, and every recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "select")
    pub test_name: String,
    /// Current comparison index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Record a boolean check as a value comparison (`1.0` expected).
    pub fn check(&mut self, condition: bool) -> bool {
        self.compare_values(1.0, if condition { 1.0 } else { 0.0 }, 0.0)
    }

    /// Compare two grids for exact equality
    ///
    /// # Returns
    ///
    /// `true` if shapes and every cell match, `false` otherwise.
    pub fn compare_grids<T: PartialEq + Debug>(
        &mut self,
        expected: &Grid<T>,
        actual: &Grid<T>,
    ) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let (row, col) = actual.dimensions();
            self.fail(TestError::GridMismatch {
                index: self.index,
                row,
                col,
            });
            return false;
        }

        let cols = expected.cols().max(1);
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);

        match mismatch {
            Some(i) => {
                let (row, col) = (i / cols, i % cols);
                if self.display() {
                    eprintln!(
                        "  expected {:?}, got {:?}",
                        expected.data()[i],
                        actual.data()[i]
                    );
                }
                self.fail(TestError::GridMismatch {
                    index: self.index,
                    row,
                    col,
                });
                false
            }
            None => true,
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.failures.is_empty()
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }

    fn fail(&mut self, err: TestError) {
        eprintln!("Failure in {}_reg: {}", self.test_name, err);
        self.failures.push(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_grids() {
        let mut rp = RegParams::new("test");
        let a = Grid::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Grid::from_data(2, 2, vec![1, 2, 0, 4]).unwrap();
        assert!(rp.compare_grids(&a, &a));
        assert!(!rp.compare_grids(&a, &b));
        assert!(matches!(
            rp.failures()[0],
            TestError::GridMismatch {
                index: 2,
                row: 1,
                col: 0
            }
        ));
    }
}

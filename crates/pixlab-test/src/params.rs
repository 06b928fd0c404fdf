//! Regression test parameters and operations

use crate::TestResult;
use crate::regout_dir;
use pixlab_core::Image;
use std::fs;

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the index of the
/// current check, and every failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        // NaN never passes
        if diff.is_nan() || diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record a boolean condition as a check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Compare two images sample by sample within `delta`
    ///
    /// Returns `true` if the shapes match and every sample pair differs by
    /// at most `delta`.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image, delta: f32) -> bool {
        self.index += 1;

        if expected.shape() != actual.shape() {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - shape mismatch {} vs {}",
                self.test_name,
                self.index,
                expected.shape(),
                actual.shape()
            ));
            return false;
        }

        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(&a, &b)| (a - b).is_nan() || (a - b).abs() > delta);

        if let Some(i) = mismatch {
            let plane = expected.plane_len();
            let w = expected.width() as usize;
            let (c, rem) = (i / plane, i % plane);
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - sample mismatch at ({}, {}, {}): \
                 expected {}, got {}",
                self.test_name,
                self.index,
                rem % w,
                rem / w,
                c,
                expected.data()[i],
                actual.data()[i]
            ));
            return false;
        }

        true
    }

    /// Path for an output file of this test, creating the output
    /// directory if needed
    ///
    /// The file name is prefixed with the test name, e.g.
    /// `ioformats_gray.png` for `outfile("gray.png")` in `ioformats`.
    pub fn outfile(&self, name: &str) -> TestResult<String> {
        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        Ok(format!("{}/{}_{}", dir, self.test_name, name))
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

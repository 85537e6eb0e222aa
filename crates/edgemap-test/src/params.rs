//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use edgemap_core::{GrayImage, ScalarField};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare against expectations (default)
    #[default]
    Compare,
    /// Compare and also write images for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "sobel")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters, configured from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two fields sample by sample
    ///
    /// Returns `true` if dimensions match and every sample pair differs by
    /// at most `delta`.
    pub fn compare_fields(
        &mut self,
        expected: &ScalarField,
        actual: &ScalarField,
        delta: f64,
    ) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            let msg = format!(
                "Failure in {}_reg: field comparison for index {} - dimension mismatch \
                 {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            return self.fail(msg);
        }

        let width = expected.width() as usize;
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(&e, &a)| !((e - a).abs() <= delta));
        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: field comparison for index {} - sample mismatch at \
                 ({}, {}): expected {}, actual {}, delta {}",
                self.test_name,
                self.index,
                i % width,
                i / width,
                expected.data()[i],
                actual.data()[i],
                delta
            );
            return self.fail(msg);
        }

        true
    }

    /// Compare two 8-bit images for exact equality
    pub fn compare_gray(&mut self, expected: &GrayImage, actual: &GrayImage) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: gray comparison for index {} ({:?} vs {:?})",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Write a field as PNG to the regout directory in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `{test_name}.{index:02}.png`.
    pub fn write_field(&mut self, field: &ScalarField) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let local_path = format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index);
        edgemap_io::write_field_png(field, &local_path).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", local_path);
        Ok(())
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

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(!rp.compare_values(1.0, 1.5, 0.1));
        assert!(!rp.compare_values(1.0, f64::NAN, 0.1));
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_fields() {
        let mut rp = RegParams::new("params_fields");
        let a = ScalarField::from_rows(&[[0.0, 0.5], [1.0, 0.25]]).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_fields(&a, &b, 0.0));
        b.set_pixel(1, 1, 0.3).unwrap();
        assert!(rp.compare_fields(&a, &b, 0.1));
        assert!(!rp.compare_fields(&a, &b, 0.01));
        assert!(rp.failures()[0].contains("(1, 1)"));
        let c = ScalarField::new(3, 2).unwrap();
        assert!(!rp.compare_fields(&a, &c, 1.0));
        assert!(!rp.is_success());
    }

    #[test]
    fn test_compare_gray() {
        let mut rp = RegParams::new("params_gray");
        let a = GrayImage::from_data(2, 1, vec![1, 2]).unwrap();
        let b = GrayImage::from_data(2, 1, vec![1, 3]).unwrap();
        assert!(rp.compare_gray(&a, &a.clone()));
        assert!(!rp.compare_gray(&a, &b));
    }
}

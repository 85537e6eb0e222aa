//! edgemap-test - Regression test framework for edgemap
//!
//! Supports two modes:
//!
//! - **Compare**: Check computed values and fields against expectations
//! - **Display**: Additionally write intermediate edge maps as PNG to
//!   `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use edgemap_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("sobel");
//! let field = synthetic::step(32, 32, 16).unwrap();
//! rp.compare_values(0.0, field.min_value(), 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // edgemap-test is at crates/edgemap-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

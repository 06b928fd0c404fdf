//! pixlab-test - Regression test framework for pixlab
//!
//! [`RegParams`] numbers every check made by a regression test, records
//! failures with enough context to locate them, and reports a summary in
//! [`RegParams::cleanup`]. Inputs come from [`synth`], so tests need no
//! image files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use pixlab_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("resize");
//! let im = synth::ramp(16, 8, 1).unwrap();
//! rp.compare_values(16.0, im.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Files written by tests go to `tests/regout` under the workspace root;
//! see [`RegParams::outfile`].

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixlab-test is at crates/pixlab-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

//! Benchmark setup error type.
//!
//! Lets fixture builders propagate failures with `?` instead of `.expect()`.

use scalefree_core::ScaleFreeError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Parameter validation, generation, or sampling failed.
    #[error("fixture construction failed: {0}")]
    Core(#[from] ScaleFreeError),
}

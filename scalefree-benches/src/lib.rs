//! Benchmark support crate for scalefree.
//!
//! Provides parameter types and fixture builders shared by the Criterion
//! benchmarks for network growth, weighted sampling, and power-law fitting.

pub mod error;
pub mod fixtures;
pub mod params;

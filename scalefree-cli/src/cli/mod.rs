//! Command-line interface for generating, comparing, and fitting scale-free
//! networks.
//!
//! `generate` grows a preferential-attachment network, `compare` sets it
//! against a random baseline, and `fit` measures the degree distribution of
//! an interaction file.

mod commands;
mod render;

pub use commands::{
    BaselineArgs, Cli, CliError, Command, CompareArgs, CompareSummary, DistributionView,
    ExecutionSummary, FitArgs, FitSummary, GenerateArgs, GenerateSummary, InputLayout,
    OutputFormat, SizeArgs, Topology, run_cli,
};
pub use render::render_summary;

#[cfg(test)]
mod test_helpers;

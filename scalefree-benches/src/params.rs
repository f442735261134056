//! Benchmark parameter types.
//!
//! Each type renders as the Criterion benchmark id for one input size.

use std::fmt;

/// Parameters for a network growth benchmark run.
#[derive(Clone, Debug)]
pub struct GenerateBenchParams {
    /// Number of nodes in the grown network.
    pub final_size: usize,
    /// Edges attached per new node.
    pub edges_per_step: usize,
}

impl fmt::Display for GenerateBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.final_size, self.edges_per_step)
    }
}

/// Parameters for a power-law fitting benchmark run.
#[derive(Clone, Debug)]
pub struct FitBenchParams {
    /// Number of degrees drawn from the reference power law.
    pub sample_count: usize,
    /// Minimum degree of the reference power law.
    pub k_min: usize,
}

impl fmt::Display for FitBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "samples={},k_min={}", self.sample_count, self.k_min)
    }
}

/// Parameters for a weighted sampling benchmark run.
#[derive(Clone, Debug)]
pub struct SamplerBenchParams {
    /// Number of nodes registered with the sampler.
    pub node_count: usize,
    /// Distinct nodes drawn per call.
    pub draws: usize,
}

impl fmt::Display for SamplerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},draws={}", self.node_count, self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn ids_name_every_dimension() {
        let generate = GenerateBenchParams {
            final_size: 1_000,
            edges_per_step: 2,
        };
        let fit = FitBenchParams {
            sample_count: 10_000,
            k_min: 5,
        };
        let sampler = SamplerBenchParams {
            node_count: 500,
            draws: 3,
        };
        assert_eq!(generate.to_string(), "n=1000,m=2");
        assert_eq!(fit.to_string(), "samples=10000,k_min=5");
        assert_eq!(sampler.to_string(), "n=500,draws=3");
    }
}

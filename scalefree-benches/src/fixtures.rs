//! Fixture builders for the benchmarks.

use rand::{SeedableRng, rngs::SmallRng};
use scalefree_core::{
    DegreeHistogram, DegreeSampler, DegreeSequence, GeneratorParams, degree_sequence,
    generate_seeded, sample_discrete_power_law,
};

use crate::error::BenchSetupError;
use crate::params::{FitBenchParams, SamplerBenchParams};

/// Exponent of the reference power law used by the fitting benchmarks.
pub const REFERENCE_EXPONENT: f64 = 2.5;

/// Seed-network size for sampler fixtures.
const SAMPLER_INITIAL_SIZE: usize = 5;

/// Draws `params.sample_count` degrees from the reference power law and
/// returns their histogram.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when the sampler rejects `params`.
pub fn power_law_histogram(
    params: &FitBenchParams,
    seed: u64,
) -> Result<DegreeHistogram, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let degrees =
        sample_discrete_power_law(params.sample_count, REFERENCE_EXPONENT, params.k_min, &mut rng)?;
    Ok(DegreeSequence::from_degrees(degrees).histogram())
}

/// Grows a network of `params.node_count` nodes and loads its degrees into a
/// fresh sampler.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when the network cannot be grown.
pub fn grown_sampler(params: &SamplerBenchParams, seed: u64) -> Result<DegreeSampler, BenchSetupError> {
    let generator = GeneratorParams::new(params.node_count, SAMPLER_INITIAL_SIZE, 2)?.with_rng_seed(seed);
    let graph = generate_seeded(&generator)?;
    Ok(DegreeSampler::initialize(degree_sequence(&graph).degrees()))
}

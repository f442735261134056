//! Side-by-side comparison of a grown scale-free network and a random
//! baseline with the same node count.
//!
//! Each comparison draws the two graphs from independent random streams
//! derived from one seed, so a report is reproducible from its seed alone.

mod report;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    GeneratorParams, KMinCandidates, RandomGraphModel, Result, SeedTopology, build_random_graph,
    degree_sequence, generate_with, histogram_ks_distance, powerlaw,
    rng::{mix_seed, stream_rng},
    theoretical_power_law,
};

pub use self::report::ComparisonReport;

const SCALE_FREE_STREAM: usize = 0;
const RANDOM_STREAM: usize = 1;

/// Default node count for comparisons.
pub const DEFAULT_FINAL_SIZE: usize = 1_000;
/// Default seed network size for comparisons.
pub const DEFAULT_INITIAL_SIZE: usize = 5;
/// Default number of edges attached per new node.
pub const DEFAULT_EDGES_PER_STEP: usize = 2;

/// Configures and validates a [`Comparison`].
///
/// Without an explicit random model the baseline is `G(n, p)` with `p`
/// chosen so its expected edge count equals the scale-free edge count.
///
/// # Examples
/// ```
/// use scalefree_core::{ComparisonBuilder, RandomGraphModel};
///
/// let comparison = ComparisonBuilder::new()
///     .with_sizes(300, 4, 2)
///     .with_random_model(RandomGraphModel::EdgeCount(600))
///     .with_seed(9)
///     .build()?;
/// let report = comparison.run()?;
/// assert_eq!(report.random_edges, 600);
/// assert_eq!(report.scale_free_edges, 6 + 296 * 2);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ComparisonBuilder {
    final_size: usize,
    initial_size: usize,
    edges_per_step: usize,
    seed_topology: SeedTopology,
    random_model: Option<RandomGraphModel>,
    candidates: KMinCandidates,
    seed: u64,
}

impl Default for ComparisonBuilder {
    fn default() -> Self {
        Self {
            final_size: DEFAULT_FINAL_SIZE,
            initial_size: DEFAULT_INITIAL_SIZE,
            edges_per_step: DEFAULT_EDGES_PER_STEP,
            seed_topology: SeedTopology::default(),
            random_model: None,
            candidates: KMinCandidates::default(),
            seed: crate::DEFAULT_RNG_SEED,
        }
    }
}

impl ComparisonBuilder {
    /// Creates a builder populated with the default sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the final node count, seed size, and edges per new node.
    #[must_use]
    pub fn with_sizes(mut self, final_size: usize, initial_size: usize, edges_per_step: usize) -> Self {
        self.final_size = final_size;
        self.initial_size = initial_size;
        self.edges_per_step = edges_per_step;
        self
    }

    /// Selects the seed topology of the scale-free network.
    #[must_use]
    pub fn with_seed_topology(mut self, topology: SeedTopology) -> Self {
        self.seed_topology = topology;
        self
    }

    /// Uses `model` for the random baseline.
    #[must_use]
    pub fn with_random_model(mut self, model: RandomGraphModel) -> Self {
        self.random_model = Some(model);
        self
    }

    /// Restricts the `k_min` candidates used for both fits.
    #[must_use]
    pub fn with_candidates(mut self, candidates: KMinCandidates) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the seed both random streams derive from.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`crate::ScaleFreeError::InvalidParameters`] when the sizes or
    /// the random model are invalid.
    pub fn build(self) -> Result<Comparison> {
        let generator = GeneratorParams::new(self.final_size, self.initial_size, self.edges_per_step)?
            .with_seed_topology(self.seed_topology)
            .with_rng_seed(self.seed);
        let random_model = self
            .random_model
            .unwrap_or_else(|| matched_probability(&generator));
        random_model.validate(self.final_size)?;
        Ok(Comparison {
            generator,
            random_model,
            candidates: self.candidates,
        })
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "edge density is a probability"
)]
fn matched_probability(generator: &GeneratorParams) -> RandomGraphModel {
    let n = generator.final_size() as f64;
    let pairs = n * (n - 1.0) / 2.0;
    RandomGraphModel::EdgeProbability((generator.expected_edge_count() as f64 / pairs).min(1.0))
}

/// A validated comparison ready to run.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    generator: GeneratorParams,
    random_model: RandomGraphModel,
    candidates: KMinCandidates,
}

impl Comparison {
    /// Returns the scale-free generator parameters, including the seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn generator(&self) -> &GeneratorParams { &self.generator }

    /// Returns the random baseline model.
    #[must_use]
    #[rustfmt::skip]
    pub fn random_model(&self) -> RandomGraphModel { self.random_model }

    /// Returns the `k_min` candidates.
    #[must_use]
    #[rustfmt::skip]
    pub fn candidates(&self) -> &KMinCandidates { &self.candidates }

    /// Returns the seed both random streams derive from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.generator.rng_seed()
    }

    /// Returns a copy that derives its streams from `seed`.
    #[must_use]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            generator: self.generator.clone().with_rng_seed(seed),
            ..self.clone()
        }
    }

    /// Builds both graphs, their distributions, and their fits.
    ///
    /// A fit that fails on either side is stored in the report rather than
    /// aborting the run.
    ///
    /// # Errors
    /// Propagates graph construction errors.
    #[instrument(
        name = "evaluator.compare",
        err,
        skip(self),
        fields(
            final_size = self.generator.final_size(),
            random_model = ?self.random_model,
            seed = self.seed(),
        ),
    )]
    pub fn run(&self) -> Result<ComparisonReport> {
        let seed = self.seed();
        let scale_free =
            generate_with(&self.generator, &mut stream_rng(seed, SCALE_FREE_STREAM))?;
        let random = build_random_graph(
            self.generator.final_size(),
            self.random_model,
            &mut stream_rng(seed, RANDOM_STREAM),
        )?;

        let scale_free_distribution = degree_sequence(&scale_free).histogram();
        let random_distribution = degree_sequence(&random).histogram();
        let scale_free_fit = powerlaw::fit(&scale_free_distribution, &self.candidates);
        let random_fit = powerlaw::fit(&random_distribution, &self.candidates);

        let random_density = random_distribution.normalized();
        let distribution_ks_distance =
            histogram_ks_distance(&scale_free_distribution.normalized(), &random_density)?;
        let random_vs_theoretical_ks = match &scale_free_fit {
            Ok(fit) => {
                let law = theoretical_power_law(random_distribution.max_degree(), fit.exponent)?;
                Some(histogram_ks_distance(&random_density, &law)?)
            }
            Err(_) => None,
        };

        debug!(
            distribution_ks_distance,
            scale_free_fitted = scale_free_fit.is_ok(),
            random_fitted = random_fit.is_ok(),
            "comparison finished"
        );
        Ok(ComparisonReport {
            seed,
            scale_free_edges: scale_free.edge_count(),
            random_edges: random.edge_count(),
            scale_free_distribution,
            random_distribution,
            scale_free_fit,
            random_fit,
            distribution_ks_distance,
            random_vs_theoretical_ks,
        })
    }
}

/// Runs a default-candidate comparison of a `G(n, p)` baseline against a
/// grown network.
///
/// # Errors
/// Returns [`crate::ScaleFreeError::InvalidParameters`] for invalid sizes or
/// a probability outside `[0, 1]`.
///
/// # Examples
/// ```
/// use scalefree_core::compare;
///
/// let report = compare(200, 3, 2, 0.02, 5)?;
/// assert_eq!(report.scale_free_edges, 3 + 197 * 2);
/// assert!(report.scale_free_fit.is_ok());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
pub fn compare(
    final_size: usize,
    initial_size: usize,
    edges_per_step: usize,
    random_edge_probability: f64,
    seed: u64,
) -> Result<ComparisonReport> {
    ComparisonBuilder::new()
        .with_sizes(final_size, initial_size, edges_per_step)
        .with_random_model(RandomGraphModel::EdgeProbability(random_edge_probability))
        .with_seed(seed)
        .build()?
        .run()
}

/// Runs every comparison with its seed replaced by
/// `mix_seed(base_seed, index)`, returning reports in input order.
///
/// Runs execute on the rayon pool when the `parallel` feature is enabled.
#[must_use]
pub fn compare_many(comparisons: &[Comparison], base_seed: u64) -> Vec<Result<ComparisonReport>> {
    let run = |(index, comparison): (usize, &Comparison)| {
        comparison.with_seed(mix_seed(base_seed, index)).run()
    };
    #[cfg(feature = "parallel")]
    {
        comparisons.par_iter().enumerate().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        comparisons.iter().enumerate().map(run).collect()
    }
}

//! Scale-free network growth by preferential attachment.
//!
//! Growth starts from a deterministic seed network and adds one node at a
//! time. Each new node links to `edges_per_step` distinct existing nodes drawn
//! in proportion to their degree, so well-connected nodes keep attracting
//! edges and the degree distribution develops a heavy tail.

mod params;

use rand::Rng;
use tracing::{debug, instrument};

use crate::{Graph, Result, rng::stream_rng, sampler::DegreeSampler};

pub use self::params::{DEFAULT_RNG_SEED, GeneratorParams, SeedTopology};

/// Grows a scale-free graph with the RNG seeded from
/// [`GeneratorParams::rng_seed`].
///
/// # Errors
/// Propagates sampler or graph errors, which indicate a broken internal
/// invariant rather than bad input once `params` has been validated.
///
/// # Examples
/// ```
/// use scalefree_core::{GeneratorParams, generate_seeded};
///
/// let params = GeneratorParams::new(50, 3, 2)?.with_rng_seed(1);
/// let graph = generate_seeded(&params)?;
/// assert_eq!(graph.node_count(), 50);
/// assert_eq!(graph.edge_count(), params.expected_edge_count());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
pub fn generate_seeded(params: &GeneratorParams) -> Result<Graph> {
    let mut rng = stream_rng(params.rng_seed(), 0);
    generate_with(params, &mut rng)
}

/// Validates the sizes and grows a clique-seeded scale-free graph with `rng`.
///
/// # Errors
/// Returns [`crate::ScaleFreeError::InvalidParameters`] unless
/// `final_size > initial_size >= 1` and `1 <= edges_per_step <= initial_size`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::generate;
///
/// let mut rng = SmallRng::seed_from_u64(5);
/// let graph = generate(200, 5, 2, &mut rng)?;
/// assert_eq!(graph.edge_count(), 10 + 195 * 2);
/// assert!(generate(5, 5, 2, &mut rng).is_err());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
pub fn generate<R: Rng>(
    final_size: usize,
    initial_size: usize,
    edges_per_step: usize,
    rng: &mut R,
) -> Result<Graph> {
    let params = GeneratorParams::new(final_size, initial_size, edges_per_step)?;
    generate_with(&params, rng)
}

/// Grows the graph described by `params`, drawing randomness from `rng`.
///
/// The sampler lives only for the duration of this call.
///
/// # Errors
/// Propagates sampler or graph errors, which indicate a broken internal
/// invariant rather than bad input once `params` has been validated.
#[instrument(
    name = "generator.generate",
    err,
    skip(params, rng),
    fields(
        final_size = params.final_size(),
        initial_size = params.initial_size(),
        edges_per_step = params.edges_per_step(),
        topology = ?params.seed_topology(),
    ),
)]
pub fn generate_with<R: Rng>(params: &GeneratorParams, rng: &mut R) -> Result<Graph> {
    let final_size = params.final_size();
    let initial_size = params.initial_size();
    let edges_per_step = params.edges_per_step();

    let mut graph = Graph::new(final_size);
    params.seed_topology().build(&mut graph, initial_size)?;

    let seed_degrees: Vec<usize> = (0..initial_size)
        .map(|node| graph.degree(node).unwrap_or(0))
        .collect();
    let mut sampler = DegreeSampler::initialize(&seed_degrees);
    sampler.reserve(final_size, initial_size + 2 * params.expected_edge_count());

    for node in initial_size..final_size {
        let targets = sampler.sample_distinct(edges_per_step, rng)?;
        for &target in &targets {
            graph.add_edge(node, target)?;
            sampler.increment(target, 1)?;
        }
        sampler.register(node, edges_per_step)?;
    }

    #[cfg(feature = "metrics")]
    metrics::counter!("scalefree_generated_edges").increment(graph.edge_count() as u64);
    debug!(
        edges = graph.edge_count(),
        slots = sampler.total_slots(),
        "scale-free growth completed"
    );
    Ok(graph)
}

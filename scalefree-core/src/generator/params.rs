//! Parameter handling for preferential-attachment growth.

use crate::{Graph, Result, error::ScaleFreeError};

/// Default seed used when callers do not pick one.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_CAFE;

/// Topology of the seed network grown by the generator.
///
/// Both shapes are deterministic and connected, so every node added later is
/// reachable from the seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SeedTopology {
    /// Every pair of seed nodes is connected (`m0 * (m0 - 1) / 2` edges).
    #[default]
    Clique,
    /// Seed nodes form the path `0 - 1 - ... - (m0 - 1)` (`m0 - 1` edges).
    Path,
}

impl SeedTopology {
    /// Returns the number of edges the topology creates on `initial_size`
    /// nodes.
    #[must_use]
    pub const fn edge_count(self, initial_size: usize) -> usize {
        match self {
            Self::Clique => initial_size * initial_size.saturating_sub(1) / 2,
            Self::Path => initial_size.saturating_sub(1),
        }
    }

    /// Adds the seed edges over nodes `0..initial_size` of `graph`.
    pub(crate) fn build(self, graph: &mut Graph, initial_size: usize) -> Result<()> {
        match self {
            Self::Clique => {
                for left in 0..initial_size {
                    for right in (left + 1)..initial_size {
                        graph.add_edge(left, right)?;
                    }
                }
            }
            Self::Path => {
                for node in 1..initial_size {
                    graph.add_edge(node - 1, node)?;
                }
            }
        }
        Ok(())
    }
}

/// Validated configuration for scale-free network growth.
///
/// # Examples
/// ```
/// use scalefree_core::{GeneratorParams, SeedTopology};
///
/// let params = GeneratorParams::new(100, 4, 2)?
///     .with_seed_topology(SeedTopology::Path)
///     .with_rng_seed(7);
/// assert_eq!(params.expected_edge_count(), 3 + 96 * 2);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneratorParams {
    final_size: usize,
    initial_size: usize,
    edges_per_step: usize,
    seed_topology: SeedTopology,
    rng_seed: u64,
}

impl GeneratorParams {
    /// Creates a parameter set for growing `final_size` nodes from a seed of
    /// `initial_size` nodes, attaching `edges_per_step` edges per new node.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::InvalidParameters`] unless
    /// `final_size > initial_size >= 1` and
    /// `1 <= edges_per_step <= initial_size`.
    pub fn new(final_size: usize, initial_size: usize, edges_per_step: usize) -> Result<Self> {
        if initial_size == 0 {
            return Err(ScaleFreeError::invalid("initial_size must be at least 1"));
        }
        if final_size <= initial_size {
            return Err(ScaleFreeError::invalid(format!(
                "final_size ({final_size}) must exceed initial_size ({initial_size})"
            )));
        }
        if edges_per_step == 0 || edges_per_step > initial_size {
            return Err(ScaleFreeError::invalid(format!(
                "edges_per_step ({edges_per_step}) must be in 1..={initial_size}"
            )));
        }
        Ok(Self {
            final_size,
            initial_size,
            edges_per_step,
            seed_topology: SeedTopology::default(),
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Selects the seed network topology.
    #[must_use]
    pub fn with_seed_topology(mut self, topology: SeedTopology) -> Self {
        self.seed_topology = topology;
        self
    }

    /// Seeds the generator RNG to make growth reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the target node count.
    #[must_use]
    #[rustfmt::skip]
    pub fn final_size(&self) -> usize { self.final_size }

    /// Returns the seed network size.
    #[must_use]
    #[rustfmt::skip]
    pub fn initial_size(&self) -> usize { self.initial_size }

    /// Returns the number of edges each new node attaches.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_per_step(&self) -> usize { self.edges_per_step }

    /// Returns the seed topology.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed_topology(&self) -> SeedTopology { self.seed_topology }

    /// Returns the RNG seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn rng_seed(&self) -> u64 { self.rng_seed }

    /// Returns the number of edges in the seed network.
    #[must_use]
    pub fn seed_edge_count(&self) -> usize {
        self.seed_topology.edge_count(self.initial_size)
    }

    /// Returns the number of edges added during growth.
    #[must_use]
    pub fn growth_edge_count(&self) -> usize {
        (self.final_size - self.initial_size) * self.edges_per_step
    }

    /// Returns the total number of edges in the generated graph.
    #[must_use]
    pub fn expected_edge_count(&self) -> usize {
        self.seed_edge_count() + self.growth_edge_count()
    }
}

//! Erdős–Rényi random graphs used as the null model for comparisons.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{Graph, Result, error::ScaleFreeError};

/// Random-graph baseline model.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::{RandomGraphModel, build_random_graph};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let graph = build_random_graph(100, RandomGraphModel::EdgeCount(250), &mut rng)?;
/// assert_eq!(graph.edge_count(), 250);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RandomGraphModel {
    /// `G(n, p)`: every unordered pair is linked independently with this
    /// probability.
    EdgeProbability(f64),
    /// `G(n, m)`: exactly this many distinct edges chosen uniformly.
    EdgeCount(usize),
}

impl RandomGraphModel {
    /// Checks the model against a graph of `node_count` nodes.
    ///
    /// # Errors
    /// Returns [`ScaleFreeError::InvalidParameters`] for a probability outside
    /// `[0, 1]` or an edge count above `node_count * (node_count - 1) / 2`.
    pub fn validate(self, node_count: usize) -> Result<()> {
        match self {
            Self::EdgeProbability(p) if !(0.0..=1.0).contains(&p) => Err(ScaleFreeError::invalid(
                format!("edge probability {p} must be within [0, 1]"),
            )),
            Self::EdgeCount(edges) if edges > max_edges(node_count) => {
                Err(ScaleFreeError::invalid(format!(
                    "{edges} edges exceed the {} possible on {node_count} nodes",
                    max_edges(node_count)
                )))
            }
            Self::EdgeProbability(_) | Self::EdgeCount(_) => Ok(()),
        }
    }
}

const fn max_edges(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}

/// Builds a random graph over `node_count` nodes according to `model`.
///
/// `EdgeProbability` runs one Bernoulli trial per pair, which is quadratic in
/// `node_count`. `EdgeCount` rejects already-present pairs until the target
/// count is reached and builds the complete graph directly when every pair is
/// requested.
///
/// # Errors
/// Returns [`ScaleFreeError::InvalidParameters`] when the model is invalid
/// for `node_count`.
#[instrument(name = "random.build", err, skip(rng))]
pub fn build_random_graph<R: Rng>(
    node_count: usize,
    model: RandomGraphModel,
    rng: &mut R,
) -> Result<Graph> {
    model.validate(node_count)?;
    let mut graph = Graph::new(node_count);
    match model {
        RandomGraphModel::EdgeProbability(p) => {
            for left in 0..node_count {
                for right in (left + 1)..node_count {
                    if rng.gen_bool(p) {
                        graph.add_edge(left, right)?;
                    }
                }
            }
        }
        RandomGraphModel::EdgeCount(edges) if edges == max_edges(node_count) => {
            for left in 0..node_count {
                for right in (left + 1)..node_count {
                    graph.add_edge(left, right)?;
                }
            }
        }
        RandomGraphModel::EdgeCount(edges) => {
            while graph.edge_count() < edges {
                let left = rng.gen_range(0..node_count);
                let right = rng.gen_range(0..node_count);
                if left != right && !graph.contains_edge(left, right) {
                    graph.add_edge(left, right)?;
                }
            }
        }
    }
    debug!(edges = graph.edge_count(), "random graph built");
    Ok(graph)
}

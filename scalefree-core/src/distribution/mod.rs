//! Degree sequences and the distributions derived from them.
//!
//! Everything here is a pure function of its input: the analyser never
//! mutates a graph and every distribution is immutable once produced.

mod compare;

use std::cmp::Reverse;

use crate::Graph;

pub use self::compare::{histogram_ks_distance, theoretical_power_law};

/// Per-node degrees, indexed by node id.
///
/// # Examples
/// ```
/// use scalefree_core::{DegreeSequence, Graph, degree_sequence};
///
/// let mut graph = Graph::new(3);
/// graph.add_edge(0, 1)?;
/// graph.add_edge(0, 2)?;
/// let sequence = degree_sequence(&graph);
/// assert_eq!(sequence.degrees(), &[2, 1, 1]);
/// assert_eq!(sequence.total_degree(), 2 * graph.edge_count());
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DegreeSequence {
    degrees: Vec<usize>,
}

impl DegreeSequence {
    /// Wraps raw degree values, such as synthetic power-law samples.
    #[must_use]
    pub fn from_degrees(degrees: Vec<usize>) -> Self {
        Self { degrees }
    }

    /// Returns the degrees indexed by node id.
    #[must_use]
    #[rustfmt::skip]
    pub fn degrees(&self) -> &[usize] { &self.degrees }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.degrees.len() }

    /// Returns `true` when the sequence has no nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.degrees.is_empty() }

    /// Returns the sum of all degrees.
    #[must_use]
    pub fn total_degree(&self) -> usize {
        self.degrees.iter().sum()
    }

    /// Returns the largest degree, or zero for an empty sequence.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.degrees.iter().copied().max().unwrap_or(0)
    }

    /// Returns the mean degree, or zero for an empty sequence.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "mean degree is reported as a floating-point statistic"
    )]
    pub fn mean_degree(&self) -> f64 {
        if self.degrees.is_empty() {
            return 0.0;
        }
        self.total_degree() as f64 / self.degrees.len() as f64
    }

    /// Returns up to `count` `(node, degree)` pairs with the highest degree.
    ///
    /// Ties are ordered by ascending node id.
    #[must_use]
    pub fn highest_degree_nodes(&self, count: usize) -> Vec<(usize, usize)> {
        let mut ranked: Vec<(usize, usize)> = self.degrees.iter().copied().enumerate().collect();
        ranked.sort_unstable_by_key(|&(node, degree)| (Reverse(degree), node));
        ranked.truncate(count);
        ranked
    }

    /// Counts how many nodes have each degree.
    #[must_use]
    pub fn histogram(&self) -> DegreeHistogram {
        let mut counts = vec![0_usize; self.max_degree() + 1];
        for &degree in &self.degrees {
            counts[degree] += 1;
        }
        DegreeHistogram {
            counts,
            node_count: self.degrees.len(),
        }
    }
}

/// Node counts per degree, indexed from degree 0 to the maximum degree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DegreeHistogram {
    counts: Vec<usize>,
    node_count: usize,
}

impl DegreeHistogram {
    /// Builds a histogram from per-degree counts; index `k` holds the number
    /// of nodes with degree `k`.
    #[must_use]
    pub fn from_counts(counts: Vec<usize>) -> Self {
        let node_count = counts.iter().sum();
        let counts = if counts.is_empty() { vec![0] } else { counts };
        Self { counts, node_count }
    }

    /// Returns the per-degree counts.
    #[must_use]
    #[rustfmt::skip]
    pub fn counts(&self) -> &[usize] { &self.counts }

    /// Returns the number of nodes with degree `degree`.
    #[must_use]
    pub fn count(&self, degree: usize) -> usize {
        self.counts.get(degree).copied().unwrap_or(0)
    }

    /// Returns the number of nodes counted.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the highest degree with a non-zero count, or zero.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.counts.iter().rposition(|&count| count > 0).unwrap_or(0)
    }

    /// Iterates `(degree, count)` for every degree with a non-zero count.
    pub fn observed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
    }

    /// Returns the number of distinct observed degrees at least `k_min`.
    #[must_use]
    pub fn distinct_degrees_from(&self, k_min: usize) -> usize {
        self.observed().filter(|&(degree, _)| degree >= k_min).count()
    }

    /// Returns `P(k)`, the fraction of nodes with each degree.
    ///
    /// An empty histogram yields `[1.0]`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "probabilities are ratios of counts"
    )]
    pub fn normalized(&self) -> Vec<f64> {
        if self.node_count == 0 {
            return vec![1.0];
        }
        let total = self.node_count as f64;
        self.counts
            .iter()
            .map(|&count| count as f64 / total)
            .collect()
    }

    /// Returns `P(X >= k)` for `k = 0..=max_degree`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "probabilities are ratios of counts"
    )]
    pub fn complementary_cdf(&self) -> ComplementaryCdf {
        if self.node_count == 0 {
            return ComplementaryCdf {
                probabilities: vec![1.0],
            };
        }
        let total = self.node_count as f64;
        let mut remaining = self.node_count;
        let probabilities = self
            .counts
            .iter()
            .map(|&count| {
                let at_least = remaining as f64 / total;
                remaining -= count;
                at_least
            })
            .collect();
        ComplementaryCdf { probabilities }
    }
}

/// Complementary cumulative distribution `P(X >= k)`, indexed by `k`.
///
/// Values start at `1.0` for `k = 0` and never increase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComplementaryCdf {
    probabilities: Vec<f64>,
}

impl ComplementaryCdf {
    /// Returns the probabilities indexed by degree.
    #[must_use]
    #[rustfmt::skip]
    pub fn probabilities(&self) -> &[f64] { &self.probabilities }

    /// Returns `P(X >= degree)`; degrees beyond the maximum have probability
    /// zero.
    #[must_use]
    pub fn at(&self, degree: usize) -> f64 {
        self.probabilities.get(degree).copied().unwrap_or(0.0)
    }
}

/// Which view of the degree distribution to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DistributionMode {
    /// Node counts per degree.
    #[default]
    Histogram,
    /// Fraction of nodes with degree at least `k`.
    ComplementaryCdf,
}

/// A degree distribution in one of the supported views.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Distribution {
    /// Node counts per degree.
    Histogram(DegreeHistogram),
    /// `P(X >= k)` per degree.
    ComplementaryCdf(ComplementaryCdf),
}

impl Distribution {
    /// Returns the view this distribution holds.
    #[must_use]
    pub const fn mode(&self) -> DistributionMode {
        match self {
            Self::Histogram(_) => DistributionMode::Histogram,
            Self::ComplementaryCdf(_) => DistributionMode::ComplementaryCdf,
        }
    }

    /// Returns `(degree, value)` rows suitable for tabular output.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "counts are rendered alongside probabilities"
    )]
    pub fn rows(&self) -> Vec<(usize, f64)> {
        match self {
            Self::Histogram(histogram) => histogram
                .counts()
                .iter()
                .enumerate()
                .map(|(degree, &count)| (degree, count as f64))
                .collect(),
            Self::ComplementaryCdf(ccdf) => {
                ccdf.probabilities().iter().copied().enumerate().collect()
            }
        }
    }
}

/// Reads the degree of every node in `graph`.
#[must_use]
pub fn degree_sequence(graph: &Graph) -> DegreeSequence {
    DegreeSequence::from_degrees(
        (0..graph.node_count())
            .map(|node| graph.degree(node).unwrap_or(0))
            .collect(),
    )
}

/// Computes the distribution of `sequence` in the requested `mode`.
///
/// # Examples
/// ```
/// use scalefree_core::{Distribution, DistributionMode, DegreeSequence, distribution};
///
/// let sequence = DegreeSequence::from_degrees(vec![1, 1, 2, 4]);
/// let Distribution::ComplementaryCdf(ccdf) =
///     distribution(&sequence, DistributionMode::ComplementaryCdf)
/// else {
///     unreachable!("mode selects the view");
/// };
/// assert_eq!(ccdf.probabilities(), &[1.0, 1.0, 0.5, 0.25, 0.25]);
/// ```
#[must_use]
pub fn distribution(sequence: &DegreeSequence, mode: DistributionMode) -> Distribution {
    let histogram = sequence.histogram();
    match mode {
        DistributionMode::Histogram => Distribution::Histogram(histogram),
        DistributionMode::ComplementaryCdf => {
            Distribution::ComplementaryCdf(histogram.complementary_cdf())
        }
    }
}

#[cfg(test)]
mod tests;

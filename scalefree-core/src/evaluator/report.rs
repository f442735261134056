use crate::{DegreeHistogram, PowerLawFit, Result, StatisticValue, StatisticsSink};

/// Everything a [`Comparison`](super::Comparison) measured.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonReport {
    /// Seed both graphs were derived from.
    pub seed: u64,
    /// Edge count of the scale-free network.
    pub scale_free_edges: usize,
    /// Edge count of the random baseline.
    pub random_edges: usize,
    /// Degree histogram of the scale-free network.
    pub scale_free_distribution: DegreeHistogram,
    /// Degree histogram of the random baseline.
    pub random_distribution: DegreeHistogram,
    /// Power-law fit of the scale-free network.
    pub scale_free_fit: Result<PowerLawFit>,
    /// Power-law fit of the random baseline; often degenerate.
    pub random_fit: Result<PowerLawFit>,
    /// KS distance between the two normalised histograms.
    pub distribution_ks_distance: f64,
    /// KS distance between the random histogram and the power law with the
    /// scale-free exponent, when that fit succeeded.
    pub random_vs_theoretical_ks: Option<f64>,
}

impl ComparisonReport {
    /// Hands every statistic in the report to `sink`.
    ///
    /// Scopes are `scale_free`, `random`, and `comparison`.
    pub fn emit<S: StatisticsSink>(&self, mut sink: S) {
        emit_side(
            &mut sink,
            "scale_free",
            self.scale_free_edges,
            &self.scale_free_distribution,
            &self.scale_free_fit,
        );
        emit_side(
            &mut sink,
            "random",
            self.random_edges,
            &self.random_distribution,
            &self.random_fit,
        );
        sink.record(
            "comparison",
            "distribution_ks_distance",
            StatisticValue::Real(self.distribution_ks_distance),
        );
        if let Some(ks) = self.random_vs_theoretical_ks {
            sink.record("comparison", "random_vs_theoretical_ks", StatisticValue::Real(ks));
        }
    }
}

fn emit_side<S: StatisticsSink>(
    sink: &mut S,
    scope: &str,
    edges: usize,
    distribution: &DegreeHistogram,
    fit: &Result<PowerLawFit>,
) {
    sink.record(scope, "nodes", StatisticValue::Count(distribution.node_count()));
    sink.record(scope, "edges", StatisticValue::Count(edges));
    sink.record(scope, "max_degree", StatisticValue::Count(distribution.max_degree()));
    match fit {
        Ok(fit) => {
            sink.record(scope, "exponent", StatisticValue::Real(fit.exponent));
            sink.record(scope, "standard_error", StatisticValue::Real(fit.standard_error));
            sink.record(scope, "ks_distance", StatisticValue::Real(fit.ks_distance));
            sink.record(scope, "k_min", StatisticValue::Count(fit.k_min));
            sink.record(scope, "tail_size", StatisticValue::Count(fit.tail_size));
        }
        Err(err) => sink.record(scope, "exponent", StatisticValue::Unavailable(err.code())),
    }
}

//! Discrete power-law fitting by maximum likelihood.
//!
//! For a minimum degree `k_min` the exponent estimate uses the continuous
//! approximation of the discrete likelihood,
//! `alpha = 1 + N / sum(ln(k_i / (k_min - 0.5)))`, over the `N` observations
//! with `k_i >= k_min`. Each candidate `k_min` is scored by the
//! Kolmogorov–Smirnov distance between the empirical tail and the fitted
//! complementary CDF `((k - 0.5) / (k_min - 0.5))^(1 - alpha)`, and the
//! lowest distance wins.

mod sample;

use tracing::{debug, instrument};

use crate::{DegreeHistogram, Result, error::ScaleFreeError};

pub use self::sample::sample_discrete_power_law;

/// Fewest distinct degrees at or above `k_min` needed to score a candidate.
pub const MIN_DISTINCT_DEGREES: usize = 2;

/// Minimum degrees the fitter should try.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KMinCandidates {
    /// Every observed degree of at least one.
    #[default]
    All,
    /// Only the listed minimum degrees; each must be at least one.
    Explicit(Vec<usize>),
}

impl KMinCandidates {
    fn resolve(&self, histogram: &DegreeHistogram) -> Result<Vec<usize>> {
        match self {
            Self::All => Ok(histogram
                .observed()
                .map(|(degree, _)| degree)
                .filter(|&degree| degree >= 1)
                .collect()),
            Self::Explicit(values) => {
                if values.contains(&0) {
                    return Err(ScaleFreeError::invalid("k_min candidates must be at least 1"));
                }
                let mut sorted = values.clone();
                sorted.sort_unstable();
                sorted.dedup();
                Ok(sorted)
            }
        }
    }
}

/// Power-law model fitted to the tail of a degree distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PowerLawFit {
    /// Estimated exponent, always greater than one.
    pub exponent: f64,
    /// KS distance between the tail and the fitted model.
    pub ks_distance: f64,
    /// Minimum degree of the fitted tail.
    pub k_min: usize,
    /// Largest degree in the fitted tail.
    pub k_max: usize,
    /// Number of observations with degree at least `k_min`.
    pub tail_size: usize,
    /// Asymptotic standard error of the exponent, `(alpha - 1) / sqrt(N)`.
    pub standard_error: f64,
}

/// Power-law fitter configured with its `k_min` candidates.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::{DegreeSequence, KMinCandidates, PowerLawFitter, sample_discrete_power_law};
///
/// let mut rng = SmallRng::seed_from_u64(8);
/// let degrees = sample_discrete_power_law(5_000, 2.5, 4, &mut rng)?;
/// let histogram = DegreeSequence::from_degrees(degrees).histogram();
/// let fit = PowerLawFitter::new()
///     .with_candidates(KMinCandidates::Explicit(vec![4]))
///     .fit(&histogram)?;
/// assert_eq!(fit.k_min, 4);
/// assert!((fit.exponent - 2.5).abs() < 0.2);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PowerLawFitter {
    candidates: KMinCandidates,
}

impl PowerLawFitter {
    /// Creates a fitter that scans every observed degree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the `k_min` scan.
    #[must_use]
    pub fn with_candidates(mut self, candidates: KMinCandidates) -> Self {
        self.candidates = candidates;
        self
    }

    /// Returns the configured candidates.
    #[must_use]
    #[rustfmt::skip]
    pub fn candidates(&self) -> &KMinCandidates { &self.candidates }

    /// Fits `histogram`; see [`fit`].
    ///
    /// # Errors
    /// See [`fit`].
    pub fn fit(&self, histogram: &DegreeHistogram) -> Result<PowerLawFit> {
        fit(histogram, &self.candidates)
    }
}

/// Fits a discrete power law to `histogram`, choosing `k_min` from
/// `candidates` by minimum KS distance. Ties go to the smaller `k_min`.
///
/// # Errors
/// Returns [`ScaleFreeError::InvalidParameters`] for an explicit candidate of
/// zero and [`ScaleFreeError::DegenerateDistribution`] when no candidate
/// leaves [`MIN_DISTINCT_DEGREES`] distinct degrees with a usable likelihood.
#[instrument(
    name = "powerlaw.fit",
    err,
    skip(histogram, candidates),
    fields(nodes = histogram.node_count(), max_degree = histogram.max_degree()),
)]
pub fn fit(histogram: &DegreeHistogram, candidates: &KMinCandidates) -> Result<PowerLawFit> {
    let k_mins = candidates.resolve(histogram)?;
    let fits = k_mins.iter().filter_map(|&k_min| fit_tail(histogram, k_min));

    select_best(fits).ok_or_else(|| {
        let k_min_low = k_mins.first().copied().unwrap_or(1);
        ScaleFreeError::DegenerateDistribution {
            k_min_low,
            k_min_high: k_mins.last().copied().unwrap_or(k_min_low),
            distinct_degrees: histogram.distinct_degrees_from(1),
        }
    })
    .inspect(|fit| {
        debug!(
            exponent = fit.exponent,
            k_min = fit.k_min,
            ks_distance = fit.ks_distance,
            tail_size = fit.tail_size,
            "power law fitted"
        );
    })
}

/// Keeps the lowest KS distance; on equal distances the earlier fit wins, so
/// fits must arrive in ascending `k_min` order.
fn select_best(fits: impl IntoIterator<Item = PowerLawFit>) -> Option<PowerLawFit> {
    fits.into_iter().fold(None, |best, candidate| {
        if best.is_none_or(|current| candidate.ks_distance < current.ks_distance) {
            Some(candidate)
        } else {
            best
        }
    })
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "likelihood and KS statistics are floating point"
)]
fn fit_tail(histogram: &DegreeHistogram, k_min: usize) -> Option<PowerLawFit> {
    if histogram.distinct_degrees_from(k_min) < MIN_DISTINCT_DEGREES {
        return None;
    }
    let shift = k_min as f64 - 0.5;
    let tail: Vec<(usize, usize)> = histogram
        .observed()
        .filter(|&(degree, _)| degree >= k_min)
        .collect();
    let tail_size: usize = tail.iter().map(|&(_, count)| count).sum();
    let log_sum: f64 = tail
        .iter()
        .map(|&(degree, count)| count as f64 * (degree as f64 / shift).ln())
        .sum();
    if !log_sum.is_finite() || log_sum <= 0.0 {
        debug!(k_min, log_sum, "skipping k_min with unusable log sum");
        return None;
    }
    let n = tail_size as f64;
    let exponent = 1.0 + n / log_sum;
    if !exponent.is_finite() {
        return None;
    }

    // The empirical CCDF is flat between observed degrees while the model
    // decays, so the supremum lies at an observed degree or just after one.
    let model = |degree: usize| ((degree as f64 - 0.5) / shift).powf(1.0 - exponent);
    let mut remaining = tail_size;
    let mut ks_distance = 0.0_f64;
    for &(degree, count) in &tail {
        let at_degree = remaining as f64 / n;
        remaining -= count;
        let past_degree = remaining as f64 / n;
        ks_distance = ks_distance
            .max((at_degree - model(degree)).abs())
            .max((past_degree - model(degree + 1)).abs());
    }

    let k_max = tail.last().map_or(k_min, |&(degree, _)| degree);
    Some(PowerLawFit {
        exponent,
        ks_distance,
        k_min,
        k_max,
        tail_size,
        standard_error: (exponent - 1.0) / n.sqrt(),
    })
}

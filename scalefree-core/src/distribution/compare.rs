//! Reference distributions and distances between histograms.

use crate::{Result, error::ScaleFreeError};

/// Returns the discrete power law `P(k) ∝ k^-exponent` for
/// `k = 0..=max_degree`, normalised to sum to one.
///
/// `P(0)` is always zero. A `max_degree` of zero yields `[0.0]`.
///
/// # Errors
/// Returns [`ScaleFreeError::InvalidParameters`] when `exponent` is not
/// finite.
///
/// # Examples
/// ```
/// use scalefree_core::theoretical_power_law;
///
/// let law = theoretical_power_law(3, 2.0)?;
/// assert_eq!(law.len(), 4);
/// assert_eq!(law[0], 0.0);
/// assert!((law.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!(law[1] > law[2] && law[2] > law[3]);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the reference law is a floating-point density"
)]
pub fn theoretical_power_law(max_degree: usize, exponent: f64) -> Result<Vec<f64>> {
    if !exponent.is_finite() {
        return Err(ScaleFreeError::invalid(format!(
            "power-law exponent must be finite, got {exponent}"
        )));
    }
    let mut law: Vec<f64> = std::iter::once(0.0)
        .chain((1..=max_degree).map(|degree| (degree as f64).powf(-exponent)))
        .collect();
    let total: f64 = law.iter().sum();
    if total > 0.0 {
        for value in &mut law {
            *value /= total;
        }
    }
    Ok(law)
}

/// Returns the Kolmogorov–Smirnov distance between two histograms.
///
/// Both inputs are read as densities indexed by degree. The distance is the
/// largest absolute gap between their running sums over the common prefix.
///
/// # Errors
/// Returns [`ScaleFreeError::InvalidParameters`] when either histogram is
/// empty.
///
/// # Examples
/// ```
/// use scalefree_core::histogram_ks_distance;
///
/// let distance = histogram_ks_distance(&[0.5, 0.5], &[1.0, 0.0])?;
/// assert!((distance - 0.5).abs() < 1e-12);
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "running sums of densities are floating point"
)]
pub fn histogram_ks_distance(left: &[f64], right: &[f64]) -> Result<f64> {
    if left.is_empty() || right.is_empty() {
        return Err(ScaleFreeError::invalid(
            "histogram KS distance needs two non-empty histograms",
        ));
    }
    let mut left_sum = 0.0_f64;
    let mut right_sum = 0.0_f64;
    let mut distance = 0.0_f64;
    for (&l, &r) in left.iter().zip(right) {
        left_sum += l;
        right_sum += r;
        distance = distance.max((left_sum - right_sum).abs());
    }
    Ok(distance)
}

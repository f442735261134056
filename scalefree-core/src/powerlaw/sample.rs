//! Synthetic discrete power-law draws.

use rand::Rng;

use crate::{Result, error::ScaleFreeError};

/// Draws `count` degrees from a discrete power law with the given exponent
/// and minimum degree.
///
/// Uses inverse-transform sampling of the continuous approximation,
/// `floor((k_min - 0.5) * (1 - u)^(-1 / (alpha - 1)) + 0.5)`, which matches
/// the approximation [`fit`](crate::fit) assumes.
///
/// # Errors
/// Returns [`ScaleFreeError::InvalidParameters`] unless `exponent` is finite
/// and greater than one and `k_min` is at least one.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use scalefree_core::sample_discrete_power_law;
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let degrees = sample_discrete_power_law(100, 2.5, 3, &mut rng)?;
/// assert_eq!(degrees.len(), 100);
/// assert!(degrees.iter().all(|&k| k >= 3));
/// # Ok::<(), scalefree_core::ScaleFreeError>(())
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "inverse-transform sampling maps uniform floats onto degrees"
)]
pub fn sample_discrete_power_law<R: Rng>(
    count: usize,
    exponent: f64,
    k_min: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if !exponent.is_finite() || exponent <= 1.0 {
        return Err(ScaleFreeError::invalid(format!(
            "power-law exponent must be finite and greater than 1, got {exponent}"
        )));
    }
    if k_min == 0 {
        return Err(ScaleFreeError::invalid("k_min must be at least 1"));
    }
    let shift = k_min as f64 - 0.5;
    let power = -1.0 / (exponent - 1.0);
    Ok((0..count)
        .map(|_| {
            let u = rng.gen_range(0.0..1.0_f64);
            // Float-to-int casts saturate, so extreme draws cannot wrap.
            (shift * (1.0 - u).powf(power) + 0.5).floor() as usize
        })
        .collect())
}

//! Gaussian observational scatter on luminosity distances.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{GwError, GwResult};

/// Draw from `N(distance, error)` until the draw is non-negative.
///
/// With a non-negative mean each draw succeeds with probability ≥ 1/2.
pub fn scattered_distance<R: Rng + ?Sized>(distance: f64, error: f64, rng: &mut R) -> GwResult<f64> {
    if !(distance.is_finite() && distance >= 0.0) {
        return Err(GwError::InvalidInput {
            message: format!("cannot scatter an unphysical distance {distance}"),
        });
    }
    if !(error.is_finite() && error >= 0.0) {
        return Err(GwError::InvalidInput {
            message: format!("distance error must be finite and non-negative, got {error}"),
        });
    }
    if error == 0.0 {
        return Ok(distance);
    }
    let normal = Normal::new(distance, error).map_err(|e| GwError::InvalidInput {
        message: format!("invalid distance error {error}: {e}"),
    })?;
    loop {
        let draw = normal.sample(rng);
        if draw >= 0.0 {
            return Ok(draw);
        }
    }
}

/// Replace each distance with a scattered draw around it.
pub fn apply_scatter<R: Rng + ?Sized>(distances: &mut [f64], errors: &[f64], rng: &mut R) -> GwResult<()> {
    if distances.len() != errors.len() {
        return Err(GwError::InvalidInput {
            message: format!(
                "{} distances but {} errors",
                distances.len(),
                errors.len()
            ),
        });
    }
    for (d, &e) in distances.iter_mut().zip(errors.iter()) {
        *d = scattered_distance(*d, e, rng)?;
    }
    Ok(())
}

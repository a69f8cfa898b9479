//! LSST SNIa error from the distance modulus (eq. A.1 of arXiv:2007.14335).

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::cosmology::Cosmology;
use crate::error::{GwError, GwResult};

use super::quadrature_sum;

/// Floors in magnitudes: flux calibration, systematics, intrinsic scatter.
const MU_FLOORS: [f64; 3] = [0.01, 0.025, 0.12];

/// Distance modulus error with a stochastic redshift-dependent term.
pub fn modulus_error<R: Rng + ?Sized>(z: f64, rng: &mut R) -> GwResult<f64> {
    let normal = Normal::new(0.0, 0.01).map_err(|e| GwError::InvalidInput {
        message: format!("SNIa stochastic term: {e}"),
    })?;
    let delta = normal.sample(rng) * z;
    Ok(quadrature_sum(&[delta, MU_FLOORS[0], MU_FLOORS[1], MU_FLOORS[2]]))
}

pub fn error<R: Rng + ?Sized>(z: f64, cosmology: &Cosmology, rng: &mut R) -> GwResult<f64> {
    let dl = cosmology.luminosity_distance(z)?;
    Ok(std::f64::consts::LN_10 / 5.0 * dl * modulus_error(z, rng)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn modulus_error_is_bounded_below_by_floors() {
        let floor = quadrature_sum(&MU_FLOORS);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let e = modulus_error(0.8, &mut rng).unwrap();
            assert!(e >= floor);
            assert!(e < floor + 0.01);
        }
    }

    #[test]
    fn same_seed_same_error() {
        let c = Cosmology::fiducial();
        let a = error(0.5, &c, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = error(0.5, &c, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }
}

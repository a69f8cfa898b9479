//! Einstein Telescope BNS error: instrumental calibration fit plus weak lensing.

use crate::cosmology::Cosmology;
use crate::error::GwResult;

use super::quadrature_sum;

/// Polynomial fit of the instrumental relative error.
pub fn instrumental_fraction(z: f64) -> f64 {
    0.1449 * z - 0.0118 * z * z + 0.0012 * z.powi(3)
}

/// Weak lensing relative error.
pub fn lensing_fraction(z: f64) -> f64 {
    0.05 * z
}

pub fn error(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    let dl = cosmology.luminosity_distance(z)?;
    Ok(dl * quadrature_sum(&[instrumental_fraction(z), lensing_fraction(z)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_error_at_unit_redshift() {
        let c = Cosmology::fiducial();
        let dl = c.luminosity_distance(1.0).unwrap();
        let expected = (0.1343_f64.powi(2) + 0.05_f64.powi(2)).sqrt();
        assert!((error(1.0, &c).unwrap() / dl - expected).abs() < 1e-12);
    }

    #[test]
    fn vanishes_at_origin() {
        assert_eq!(error(0.0, &Cosmology::fiducial()).unwrap(), 0.0);
    }
}

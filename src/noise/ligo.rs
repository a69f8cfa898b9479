//! LIGO A+ error (arXiv:2007.13791): a distance term plus the redshift
//! measurement error propagated through `d dL / dz`.

use crate::cosmology::Cosmology;
use crate::error::GwResult;

use super::quadrature_sum;

pub fn distance_term(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    let dl = cosmology.luminosity_distance(z)?;
    Ok(0.5625 * dl * dl)
}

pub fn redshift_error(z: f64) -> f64 {
    0.005 * (1.0 + z)
}

pub fn propagated_redshift_term(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    Ok(cosmology.distance_derivative(z)? * redshift_error(z))
}

pub fn error(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    Ok(quadrature_sum(&[
        distance_term(z, cosmology)?,
        propagated_redshift_term(z, cosmology)?,
    ]))
}

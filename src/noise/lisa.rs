//! LISA MBHB error budget (arXiv:1607.08755 and follow-ups).
//!
//! Four independent contributions are summed in quadrature:
//!
//! - lensing, reduced by a delensing factor
//! - peculiar velocities
//! - the instrument
//! - photometric redshifts, only for `z ≥ 2`
//!
//! The undelensed lensing term is reported for diagnostics but does not
//! enter the total.

use serde::Serialize;

use crate::cosmology::{Cosmology, SPEED_OF_LIGHT};
use crate::error::GwResult;

use super::quadrature_sum;

/// RMS peculiar velocity in Gpc/s (500 km/s).
pub const PECULIAR_VELOCITY_RMS: f64 = 1.6203896e-20;

/// Redshift above which host redshifts are photometric.
pub const PHOTOMETRIC_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LisaErrorBreakdown {
    pub redshift: f64,
    pub distance: f64,
    pub lens: f64,
    pub delens: f64,
    pub v: f64,
    pub lisa: f64,
    pub photo: f64,
    pub total: f64,
}

impl LisaErrorBreakdown {
    pub fn at(z: f64, cosmology: &Cosmology) -> GwResult<Self> {
        let dl = cosmology.luminosity_distance(z)?;
        let lens = lensing(z, dl);
        let delens = lens * delensing_factor(z);
        let v = peculiar_velocity(z, dl, cosmology);
        let lisa = instrumental(dl);
        let photo = photometric(z, cosmology)?;
        Ok(Self {
            redshift: z,
            distance: dl,
            lens,
            delens,
            v,
            lisa,
            photo,
            total: quadrature_sum(&[delens, v, lisa, photo]),
        })
    }
}

pub fn lensing(z: f64, dl: f64) -> f64 {
    0.066 * ((1.0 - (1.0 + z).powf(-0.25)) / 0.25).powf(1.8) * dl
}

pub fn delensing_factor(z: f64) -> f64 {
    1.0 - 2.0 * 0.3 / std::f64::consts::PI * (z / 0.073).atan()
}

pub fn peculiar_velocity(z: f64, dl: f64, cosmology: &Cosmology) -> f64 {
    if dl == 0.0 {
        return 0.0;
    }
    let c = SPEED_OF_LIGHT;
    (1.0 + c * (1.0 + z).powi(2) / (cosmology.hubble(z) * dl)) * PECULIAR_VELOCITY_RMS / c * dl
}

pub fn instrumental(dl: f64) -> f64 {
    0.05 * dl * dl / 36.6
}

pub fn photometric(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    if z < PHOTOMETRIC_THRESHOLD {
        return Ok(0.0);
    }
    Ok(cosmology.distance_derivative(z)? * 0.03 * (1.0 + z))
}

pub fn error(z: f64, cosmology: &Cosmology) -> GwResult<f64> {
    Ok(LisaErrorBreakdown::at(z, cosmology)?.total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photometric_term_switches_on_at_two() {
        let c = Cosmology::fiducial();
        assert_eq!(photometric(1.99, &c).unwrap(), 0.0);
        assert!(photometric(2.0, &c).unwrap() > 0.0);
    }

    #[test]
    fn delensing_reduces_lensing() {
        for &z in &[0.5, 2.0, 8.0] {
            let f = delensing_factor(z);
            assert!(f > 0.0 && f < 1.0);
        }
        assert_eq!(delensing_factor(0.0), 1.0);
    }

    #[test]
    fn total_excludes_raw_lensing() {
        let c = Cosmology::fiducial();
        let b = LisaErrorBreakdown::at(3.0, &c).unwrap();
        let expected = (b.delens.powi(2) + b.v.powi(2) + b.lisa.powi(2) + b.photo.powi(2)).sqrt();
        assert!((b.total - expected).abs() < 1e-15);
        assert!(b.lens > b.delens);
        assert_eq!(error(3.0, &c).unwrap(), b.total);
    }

    #[test]
    fn instrument_dominates_at_high_redshift() {
        let c = Cosmology::fiducial();
        let b = LisaErrorBreakdown::at(8.5, &c).unwrap();
        assert!(b.lisa > b.v);
    }
}

//! Catalogs built from observed events (GWTC-style luminosity distances).
//!
//! Observed distances come with asymmetric credible intervals in Mpc. Each
//! event is symmetrised, converted to Gpc and assigned a redshift by table
//! inversion over `z ∈ [0, 1]`.

use log::info;
use rand::Rng;
use serde::Deserialize;

use crate::cosmology::{Cosmology, Inversion};
use crate::domain::Catalog;
use crate::error::{GwError, GwResult};
use crate::sampling::scattered_distance;

/// One observed event: median distance and signed offsets to the interval
/// bounds, all in Mpc.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GwtcRecord {
    pub luminosity_distance: f64,
    pub luminosity_distance_lower: f64,
    pub luminosity_distance_upper: f64,
}

impl GwtcRecord {
    /// Symmetrised distance in Gpc.
    pub fn distance(&self) -> f64 {
        (self.luminosity_distance + (self.luminosity_distance_upper + self.luminosity_distance_lower) / 2.0)
            / 1000.0
    }

    /// Half-width of the interval in Gpc.
    pub fn error(&self) -> f64 {
        (self.luminosity_distance_upper - self.luminosity_distance_lower) / 2.0 / 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GwtcOptions {
    /// Scales every error.
    pub multiplier: f64,
    pub ideal: bool,
}

impl Default for GwtcOptions {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            ideal: false,
        }
    }
}

pub fn gwtc_catalog<R: Rng + ?Sized>(
    records: &[GwtcRecord],
    options: &GwtcOptions,
    cosmology: &Cosmology,
    rng: &mut R,
) -> GwResult<Catalog> {
    if !(options.multiplier.is_finite() && options.multiplier >= 0.0) {
        return Err(GwError::InvalidInput {
            message: format!("error multiplier must be non-negative, got {}", options.multiplier),
        });
    }

    let mut distances: Vec<f64> = records.iter().map(GwtcRecord::distance).collect();
    let errors: Vec<f64> = records.iter().map(|r| options.multiplier * r.error()).collect();
    if let Some(e) = errors.iter().find(|e| !(**e >= 0.0)) {
        return Err(GwError::InvalidInput {
            message: format!("observed interval gives a negative error {e}, check the lower/upper columns"),
        });
    }

    let redshifts = Inversion::table().redshifts(cosmology, &distances)?;

    if !options.ideal {
        for (d, &e) in distances.iter_mut().zip(errors.iter()) {
            *d = round3(scattered_distance(*d, e, rng)?);
        }
    }

    info!("built {} observed events (multiplier={})", records.len(), options.multiplier);
    Catalog::from_columns(&redshifts, &distances, &errors)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(mid: f64, lower: f64, upper: f64) -> GwtcRecord {
        GwtcRecord {
            luminosity_distance: mid,
            luminosity_distance_lower: lower,
            luminosity_distance_upper: upper,
        }
    }

    #[test]
    fn symmetrises_intervals() {
        let r = record(440.0, -170.0, 180.0);
        assert!((r.distance() - 0.445).abs() < 1e-12);
        assert!((r.error() - 0.175).abs() < 1e-12);
    }

    #[test]
    fn ideal_catalog_keeps_distances() {
        let c = Cosmology::fiducial();
        let records = [record(440.0, -170.0, 180.0), record(40.0, -15.0, 7.0)];
        let options = GwtcOptions {
            multiplier: 2.0,
            ideal: true,
        };
        let catalog = gwtc_catalog(&records, &options, &c, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!((catalog.events[0].distance - 0.445).abs() < 1e-12);
        assert!((catalog.events[0].error - 0.35).abs() < 1e-12);
        let z = catalog.events[0].redshift;
        assert!(z > 0.08 && z < 0.11, "z={z}");
        assert_eq!((z * 1000.0).round() / 1000.0, z);
    }

    #[test]
    fn scattered_distances_are_rounded() {
        let c = Cosmology::fiducial();
        let records = [record(1000.0, -300.0, 300.0); 10];
        let catalog =
            gwtc_catalog(&records, &GwtcOptions::default(), &c, &mut StdRng::seed_from_u64(5)).unwrap();
        for e in &catalog.events {
            assert!(e.distance >= 0.0);
            assert!((e.distance * 1000.0 - (e.distance * 1000.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn distances_beyond_unit_redshift_are_out_of_range() {
        let c = Cosmology::fiducial();
        let records = [record(9000.0, -1000.0, 1000.0)];
        let options = GwtcOptions {
            multiplier: 1.0,
            ideal: true,
        };
        assert!(matches!(
            gwtc_catalog(&records, &options, &c, &mut StdRng::seed_from_u64(1)),
            Err(GwError::OutOfRange { .. })
        ));
    }
}

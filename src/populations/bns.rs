//! Binary neutron star redshift distribution for the Einstein Telescope.
//!
//! ```text
//! p(z) ∝ r(z) dL(z)² / (H(z) (1+z)³)
//! ```
//!
//! with the piecewise-linear coalescence rate `r(z)` (arXiv:1805.08731, p. 13).
//! The density is normalised to unit area over the sampling window.

use log::debug;

use crate::cosmology::{Cosmology, linspace};
use crate::error::GwResult;
use crate::math::{QuadConfig, try_integrate};

pub const BNS_ZMIN: f64 = 0.07;
pub const BNS_ZMAX: f64 = 2.0;

/// Headroom applied to the sampled maximum when sizing the rejection box.
const CEILING_HEADROOM: f64 = 1.05;
const CEILING_GRID: usize = 256;

/// Coalescence rate proxy.
pub fn coalescence_rate(z: f64) -> f64 {
    if !(0.0..=5.0).contains(&z) {
        0.0
    } else if z <= 1.0 {
        1.0 + 2.0 * z
    } else {
        (15.0 - 3.0 * z) / 4.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BnsDensity {
    cosmology: Cosmology,
    zmin: f64,
    zmax: f64,
    norm: f64,
    ceiling: f64,
}

impl BnsDensity {
    pub fn new(cosmology: Cosmology) -> GwResult<Self> {
        Self::with_window(cosmology, BNS_ZMIN, BNS_ZMAX)
    }

    /// Normalise over `[zmin, zmax]`; the integral is split at the rate's
    /// kink so each piece is smooth.
    pub fn with_window(cosmology: Cosmology, zmin: f64, zmax: f64) -> GwResult<Self> {
        let shape = |z: f64| unnormalized(&cosmology, z);
        let cfg = QuadConfig::default();
        let area = if zmin < 1.0 && zmax > 1.0 {
            try_integrate(shape, zmin, 1.0, &cfg)?.value + try_integrate(shape, 1.0, zmax, &cfg)?.value
        } else {
            try_integrate(shape, zmin, zmax, &cfg)?.value
        };
        let norm = 1.0 / area;

        let mut peak = 0.0_f64;
        for z in linspace(zmin, zmax, CEILING_GRID) {
            peak = peak.max(norm * unnormalized(&cosmology, z)?);
        }
        let ceiling = peak * CEILING_HEADROOM;
        debug!("BNS density on [{zmin}, {zmax}]: area={area:e}, ceiling={ceiling}");

        Ok(Self {
            cosmology,
            zmin,
            zmax,
            norm,
            ceiling,
        })
    }

    pub fn eval(&self, z: f64) -> GwResult<f64> {
        if z < self.zmin || z > self.zmax {
            return Ok(0.0);
        }
        Ok(self.norm * unnormalized(&self.cosmology, z)?)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.zmin, self.zmax)
    }

    pub fn codomain(&self) -> (f64, f64) {
        (0.0, self.ceiling)
    }
}

fn unnormalized(cosmology: &Cosmology, z: f64) -> GwResult<f64> {
    let dl = cosmology.luminosity_distance(z)?;
    Ok(coalescence_rate(z) * dl * dl / (cosmology.hubble(z) * (1.0 + z).powi(3)))
}

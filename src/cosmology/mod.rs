//! Flat ΛCDM background cosmology.
//!
//! A [`Cosmology`] is an immutable `(H0, Ωm)` pair. Everything that needs a
//! Hubble rate or a luminosity distance receives one explicitly; there is no
//! process-wide model.
//!
//! Units: `H0` and `H(z)` in s⁻¹, distances in Gpc, speed of light in Gpc/s.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GwError, GwResult};
use crate::math::{BrentConfig, QuadConfig, brent, central_difference, integrate};

pub mod inversion;

pub use inversion::*;

/// Speed of light in Gpc/s.
pub const SPEED_OF_LIGHT: f64 = 9.7156118908e-18;

/// Step used for numerical derivatives of `dL(z)`.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Fiducial dimensionless Hubble parameter.
pub const FIDUCIAL_LITTLE_H: f64 = 0.7;

/// Fiducial matter density fraction.
pub const FIDUCIAL_OMEGA_M: f64 = 0.284;

/// `(km/s)/Mpc` expressed in s⁻¹.
const KM_S_MPC_IN_HZ: f64 = 3.240779289e-20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cosmology {
    h0: f64,
    omega_m: f64,
}

impl Cosmology {
    /// Build a model from `H0` in s⁻¹ and `Ωm`.
    pub fn new(h0: f64, omega_m: f64) -> GwResult<Self> {
        if !(h0.is_finite() && h0 > 0.0) {
            return Err(GwError::InvalidCosmology {
                message: format!("H0 must be finite and positive, got {h0}"),
            });
        }
        if !(0.0..=1.0).contains(&omega_m) {
            return Err(GwError::InvalidCosmology {
                message: format!("Ωm must lie in [0, 1], got {omega_m}"),
            });
        }
        Ok(Self { h0, omega_m })
    }

    /// Build a model from the dimensionless Hubble parameter `h`, using
    /// `c/H0 = 2.9979 Gpc / h`.
    pub fn from_little_h(h: f64, omega_m: f64) -> GwResult<Self> {
        Self::new(299_792_458.0 * h / (2.9979 * 3.085678e25), omega_m)
    }

    /// Build a model from `H0` in (km/s)/Mpc.
    pub fn from_km_s_mpc(h0: f64, omega_m: f64) -> GwResult<Self> {
        Self::new(h0 * KM_S_MPC_IN_HZ, omega_m)
    }

    /// `h = 0.7`, `Ωm = 0.284`.
    pub fn fiducial() -> Self {
        Self {
            h0: 299_792_458.0 * FIDUCIAL_LITTLE_H / (2.9979 * 3.085678e25),
            omega_m: FIDUCIAL_OMEGA_M,
        }
    }

    /// Read `GWC_LITTLE_H` and `GWC_OMEGA_M` (a `.env` file is honoured),
    /// falling back to the fiducial values for whichever is unset.
    pub fn from_env() -> GwResult<Self> {
        dotenvy::dotenv().ok();
        let h = env_f64("GWC_LITTLE_H")?.unwrap_or(FIDUCIAL_LITTLE_H);
        let omega_m = env_f64("GWC_OMEGA_M")?.unwrap_or(FIDUCIAL_OMEGA_M);
        let cosmology = Self::from_little_h(h, omega_m)?;
        debug!("cosmology from environment: h={h}, Ωm={omega_m}");
        Ok(cosmology)
    }

    pub fn h0(&self) -> f64 {
        self.h0
    }

    pub fn omega_m(&self) -> f64 {
        self.omega_m
    }

    /// Dimensionless Hubble parameter `h`.
    pub fn little_h(&self) -> f64 {
        self.h0 * 2.9979 * 3.085678e25 / 299_792_458.0
    }

    /// Hubble rate `H(z)` in s⁻¹.
    pub fn hubble(&self, z: f64) -> f64 {
        self.h0 * (self.omega_m * (1.0 + z).powi(3) + 1.0 - self.omega_m).sqrt()
    }

    /// Luminosity distance `dL(z) = (1+z) c ∫₀^z dz'/H(z')` in Gpc.
    pub fn luminosity_distance(&self, z: f64) -> GwResult<f64> {
        let q = integrate(|zp| 1.0 / self.hubble(zp), 0.0, z, &QuadConfig::default())?;
        Ok((1.0 + z) * SPEED_OF_LIGHT * q.value)
    }

    /// `d dL / dz` by central difference.
    pub fn distance_derivative(&self, z: f64) -> GwResult<f64> {
        central_difference(|x| self.luminosity_distance(x), z, DERIVATIVE_STEP)
    }

    /// `n` evenly spaced redshifts in `[zmin, zmax]` with their distances.
    pub fn distance_line(&self, zmin: f64, zmax: f64, n: usize) -> GwResult<(Vec<f64>, Vec<f64>)> {
        if zmin < 0.0 || zmax < 0.0 || zmax < zmin {
            return Err(GwError::InvalidInput {
                message: format!("please specify a valid interval for redshifts, got [{zmin}, {zmax}]"),
            });
        }
        let line = linspace(zmin, zmax, n);
        let distances = line
            .iter()
            .map(|&z| self.luminosity_distance(z))
            .collect::<GwResult<Vec<f64>>>()?;
        Ok((line, distances))
    }

    /// Redshift whose luminosity distance equals `distance`, found with
    /// Brent's method. `guess` seeds the upper end of the bracket.
    pub fn redshift_at(&self, distance: f64, guess: f64) -> GwResult<f64> {
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(GwError::RootNotFound {
                target: distance,
                reason: "distance must be finite and non-negative".to_string(),
            });
        }
        if distance == 0.0 {
            return Ok(0.0);
        }

        let mut hi = if guess.is_finite() && guess > 0.0 { guess } else { 1.0 };
        while self.luminosity_distance(hi)? < distance {
            hi *= 2.0;
            if hi > MAX_BRACKET_REDSHIFT {
                return Err(GwError::RootNotFound {
                    target: distance,
                    reason: format!("distance exceeds dL(z={MAX_BRACKET_REDSHIFT})"),
                });
            }
        }
        let lo = if self.luminosity_distance(0.5 * hi)? <= distance {
            0.5 * hi
        } else {
            0.0
        };

        brent(
            |z| self.luminosity_distance(z),
            distance,
            lo,
            hi,
            &BrentConfig::default(),
        )
    }
}

const MAX_BRACKET_REDSHIFT: f64 = 1e4;

impl Default for Cosmology {
    fn default() -> Self {
        Self::fiducial()
    }
}

/// `n` evenly spaced points on `[min, max]` (endpoints included).
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n as f64 - 1.0);
            (0..n).map(|i| min + step * i as f64).collect()
        }
    }
}

fn env_f64(key: &str) -> GwResult<Option<f64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| GwError::InvalidCosmology {
                message: format!("{key}='{raw}' is not a number: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

//! Per-source distance error models.
//!
//! Every model returns a one-sigma luminosity distance error in Gpc for an
//! event at redshift `z`, combining independent contributions in quadrature.
//! The models are pure functions of `(z, cosmology)`; the SNIa model also
//! draws a stochastic term from an explicitly passed RNG.

use rand::Rng;

use crate::cosmology::Cosmology;
use crate::domain::Source;
use crate::error::GwResult;

pub mod bns;
pub mod ligo;
pub mod lisa;
pub mod snia;

pub use lisa::LisaErrorBreakdown;

/// Distance error for an event of `source` at redshift `z`.
pub fn distance_error<R: Rng + ?Sized>(
    source: Source,
    z: f64,
    cosmology: &Cosmology,
    rng: &mut R,
) -> GwResult<f64> {
    match source {
        Source::Bns => bns::error(z, cosmology),
        Source::Ligo => ligo::error(z, cosmology),
        Source::Lisa => lisa::error(z, cosmology),
        Source::Snia => snia::error(z, cosmology, rng),
    }
}

/// Root sum of squares.
pub(crate) fn quadrature_sum(terms: &[f64]) -> f64 {
    terms.iter().map(|t| t * t).sum::<f64>().sqrt()
}

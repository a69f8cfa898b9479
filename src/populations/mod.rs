//! Population distributions: where in redshift (or distance) events come from.
//!
//! The set of populations is closed, so they are modelled as an enum rather
//! than trait objects. Each variant exposes:
//!
//! - the sampling variable (redshift, or distance for LIGO)
//! - the domain and the codomain box used by the rejection sampler
//! - the redshift range accepted for explicit redshift lists
//! - for binned populations, the expected count over a reference duration

use crate::cosmology::{Cosmology, Inversion};
use crate::domain::{MbhbPopulation, Source};
use crate::error::{GwError, GwResult};

pub mod bns;
pub mod histogram;
pub mod ligo;

pub use bns::*;
pub use histogram::*;
pub use ligo::*;

/// Variable a population density is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Redshift,
    /// Luminosity distance in Gpc.
    Distance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopulationDensity {
    Bns(BnsDensity),
    Ligo(LigoDensity),
    Lisa(HistogramDensity),
    Snia(HistogramDensity),
}

impl PopulationDensity {
    /// Build the distribution for `source`. LISA requires a population.
    pub fn for_source(
        source: Source,
        population: Option<MbhbPopulation>,
        cosmology: &Cosmology,
    ) -> GwResult<Self> {
        match source {
            Source::Bns => Ok(PopulationDensity::Bns(BnsDensity::new(*cosmology)?)),
            Source::Ligo => Ok(PopulationDensity::Ligo(LigoDensity::new()?)),
            Source::Lisa => {
                let population = population.ok_or_else(|| GwError::InvalidSelector {
                    message: "the population of MBHB must be provided, available populations are: 'Pop III', 'Delay' and 'No Delay'".to_string(),
                })?;
                Ok(PopulationDensity::Lisa(HistogramDensity::lisa(population)))
            }
            Source::Snia => Ok(PopulationDensity::Snia(HistogramDensity::snia())),
        }
    }

    pub fn source(&self) -> Source {
        match self {
            PopulationDensity::Bns(_) => Source::Bns,
            PopulationDensity::Ligo(_) => Source::Ligo,
            PopulationDensity::Lisa(_) => Source::Lisa,
            PopulationDensity::Snia(_) => Source::Snia,
        }
    }

    pub fn variable(&self) -> Variable {
        match self {
            PopulationDensity::Ligo(_) => Variable::Distance,
            _ => Variable::Redshift,
        }
    }

    pub fn eval(&self, x: f64) -> GwResult<f64> {
        match self {
            PopulationDensity::Bns(d) => d.eval(x),
            PopulationDensity::Ligo(d) => Ok(d.eval(x)),
            PopulationDensity::Lisa(h) | PopulationDensity::Snia(h) => Ok(h.eval(x)),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            PopulationDensity::Bns(d) => d.domain(),
            PopulationDensity::Ligo(d) => d.domain(),
            PopulationDensity::Lisa(h) | PopulationDensity::Snia(h) => h.domain(),
        }
    }

    pub fn codomain(&self) -> (f64, f64) {
        match self {
            PopulationDensity::Bns(d) => d.codomain(),
            PopulationDensity::Ligo(d) => d.codomain(),
            PopulationDensity::Lisa(h) | PopulationDensity::Snia(h) => h.codomain(),
        }
    }

    /// Redshifts an explicit redshift list may contain.
    pub fn redshift_domain(&self, cosmology: &Cosmology, inversion: &Inversion) -> GwResult<(f64, f64)> {
        match self {
            PopulationDensity::Ligo(d) => d.redshift_domain(cosmology, inversion),
            other => Ok(other.domain()),
        }
    }

    /// `(expected count, reference years)` for populations sized by duration.
    pub fn reference_rate(&self) -> Option<(f64, f64)> {
        match self {
            PopulationDensity::Lisa(h) | PopulationDensity::Snia(h) => {
                Some((h.total(), h.reference_years()))
            }
            _ => None,
        }
    }

    /// Number of events expected over `years`, truncated.
    pub fn events_over(&self, years: f64) -> GwResult<usize> {
        let (total, reference) = self.reference_rate().ok_or_else(|| GwError::InvalidSelector {
            message: format!(
                "{} catalogs cannot be sized by observation time, specify the number of events or their redshifts",
                self.source()
            ),
        })?;
        let expected = total * years / reference;
        if !(expected.is_finite() && expected >= 0.0 && expected < usize::MAX as f64) {
            return Err(GwError::InvalidSelector {
                message: format!(
                    "{years} years of {} observations is not a representable number of events",
                    self.source()
                ),
            });
        }
        Ok(expected as usize)
    }

    /// Fail with the valid bounds if any redshift falls outside them.
    pub fn validate_redshifts(
        &self,
        redshifts: &[f64],
        cosmology: &Cosmology,
        inversion: &Inversion,
    ) -> GwResult<()> {
        let (min, max) = self.redshift_domain(cosmology, inversion)?;
        match redshifts.iter().find(|&&z| !(z >= min && z <= max)) {
            Some(&value) => Err(GwError::DomainViolation {
                source_name: self.source().display_name().to_string(),
                what: "redshift",
                value,
                min,
                max,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lisa_requires_population() {
        let c = Cosmology::fiducial();
        assert!(matches!(
            PopulationDensity::for_source(Source::Lisa, None, &c),
            Err(GwError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn duration_sizing_scales_reference_count() {
        let c = Cosmology::fiducial();
        let lisa = PopulationDensity::for_source(Source::Lisa, Some(MbhbPopulation::PopIii), &c).unwrap();
        assert_eq!(lisa.events_over(5.0).unwrap(), 28);
        assert_eq!(lisa.events_over(10.0).unwrap(), 56);

        let snia = PopulationDensity::for_source(Source::Snia, None, &c).unwrap();
        assert_eq!(snia.events_over(2.0).unwrap(), 8800);
        assert_eq!(snia.events_over(1.0).unwrap(), 4400);

        let ligo = PopulationDensity::for_source(Source::Ligo, None, &c).unwrap();
        assert!(matches!(ligo.events_over(1.0), Err(GwError::InvalidSelector { .. })));
    }

    #[test]
    fn duration_sizing_rejects_unrepresentable_counts() {
        let c = Cosmology::fiducial();
        let lisa = PopulationDensity::for_source(Source::Lisa, Some(MbhbPopulation::PopIii), &c).unwrap();
        assert!(matches!(lisa.events_over(1e20), Err(GwError::InvalidSelector { .. })));
        assert!(matches!(lisa.events_over(f64::INFINITY), Err(GwError::InvalidSelector { .. })));
        assert_eq!(lisa.events_over(0.0).unwrap(), 0);
    }

    #[test]
    fn out_of_domain_redshift_names_the_bounds() {
        let c = Cosmology::fiducial();
        let snia = PopulationDensity::for_source(Source::Snia, None, &c).unwrap();
        let err = snia
            .validate_redshifts(&[0.5, 1.5], &c, &Inversion::Brent)
            .unwrap_err();
        match &err {
            GwError::DomainViolation { value, min, max, .. } => {
                assert_eq!(*value, 1.5);
                assert_eq!(*min, 0.1);
                assert_eq!(*max, 1.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("0.1") && msg.contains('1'), "{msg}");
        assert!(snia.validate_redshifts(&[0.1, 0.5, 1.0], &c, &Inversion::Brent).is_ok());
    }

    #[test]
    fn ligo_samples_in_distance() {
        let c = Cosmology::fiducial();
        let ligo = PopulationDensity::for_source(Source::Ligo, None, &c).unwrap();
        assert_eq!(ligo.variable(), Variable::Distance);
        assert_eq!(ligo.domain(), (0.0, 0.96));
    }
}

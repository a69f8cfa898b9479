//! Reporting utilities: catalog statistics, density and error-budget tables.
//!
//! Computation lives here; text layout lives in [`format`].

use rand::Rng;

use crate::cosmology::{Cosmology, Inversion, linspace};
use crate::domain::{Catalog, Source};
use crate::error::GwResult;
use crate::noise::{LisaErrorBreakdown, bns, distance_error, ligo};
use crate::populations::PopulationDensity;

pub mod format;

pub use format::*;

/// Summary numbers for a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub events: usize,
    pub redshift_range: Option<(f64, f64)>,
    pub distance_range: Option<(f64, f64)>,
    /// Median of `error / distance` over events with a positive distance.
    pub median_relative_error: Option<f64>,
}

pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut relative: Vec<f64> = catalog
        .events
        .iter()
        .filter(|e| e.distance > 0.0)
        .map(|e| e.error / e.distance)
        .filter(|r| r.is_finite())
        .collect();
    relative.sort_by(f64::total_cmp);
    CatalogStats {
        events: catalog.len(),
        redshift_range: catalog.redshift_range(),
        distance_range: catalog.distance_range(),
        median_relative_error: median_sorted(&relative),
    }
}

fn median_sorted(v: &[f64]) -> Option<f64> {
    match v.len() {
        0 => None,
        n if n % 2 == 1 => Some(v[n / 2]),
        n => Some(0.5 * (v[n / 2 - 1] + v[n / 2])),
    }
}

/// A density sampled over its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    pub source: Source,
    pub points: Vec<(f64, f64)>,
    /// Trapezoidal area under the sampled curve.
    pub area: f64,
    /// Published count over the reference years, for binned populations.
    pub reference: Option<(f64, f64)>,
}

pub fn density_table(density: &PopulationDensity, n: usize) -> GwResult<DensityTable> {
    let (lo, hi) = density.domain();
    let points = linspace(lo, hi, n)
        .into_iter()
        .map(|x| Ok((x, density.eval(x)?)))
        .collect::<GwResult<Vec<_>>>()?;
    Ok(DensityTable {
        source: density.source(),
        area: trapezoid(&points),
        reference: density.reference_rate(),
        points,
    })
}

fn trapezoid(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| 0.5 * (w[1].0 - w[0].0) * (w[1].1 + w[0].1))
        .sum()
}

/// Error contributions at one redshift.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBudget {
    pub redshift: f64,
    pub distance: f64,
    /// Named contributions; empty when the model has no separable terms.
    pub terms: Vec<(&'static str, f64)>,
    pub total: f64,
}

pub fn error_budget<R: Rng + ?Sized>(
    source: Source,
    z: f64,
    cosmology: &Cosmology,
    rng: &mut R,
) -> GwResult<ErrorBudget> {
    let distance = cosmology.luminosity_distance(z)?;
    let budget = match source {
        Source::Lisa => {
            let b = LisaErrorBreakdown::at(z, cosmology)?;
            ErrorBudget {
                redshift: z,
                distance,
                terms: vec![
                    ("lens", b.lens),
                    ("delens", b.delens),
                    ("v", b.v),
                    ("lisa", b.lisa),
                    ("photo", b.photo),
                ],
                total: b.total,
            }
        }
        Source::Ligo => ErrorBudget {
            redshift: z,
            distance,
            terms: vec![
                ("distance", ligo::distance_term(z, cosmology)?),
                ("redshift", ligo::propagated_redshift_term(z, cosmology)?),
            ],
            total: ligo::error(z, cosmology)?,
        },
        Source::Bns => ErrorBudget {
            redshift: z,
            distance,
            terms: vec![
                ("instrument", distance * bns::instrumental_fraction(z)),
                ("lensing", distance * bns::lensing_fraction(z)),
            ],
            total: bns::error(z, cosmology)?,
        },
        Source::Snia => ErrorBudget {
            redshift: z,
            distance,
            terms: Vec::new(),
            total: distance_error(source, z, cosmology, rng)?,
        },
    };
    Ok(budget)
}

/// Error budgets on `n` redshifts spanning the source's redshift range.
pub fn error_table<R: Rng + ?Sized>(
    density: &PopulationDensity,
    cosmology: &Cosmology,
    inversion: &Inversion,
    n: usize,
    rng: &mut R,
) -> GwResult<Vec<ErrorBudget>> {
    let (zmin, zmax) = density.redshift_domain(cosmology, inversion)?;
    linspace(zmin, zmax, n)
        .into_iter()
        .map(|z| error_budget(density.source(), z, cosmology, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MbhbPopulation;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn stats_median_relative_error() {
        let c = Catalog::from_columns(&[0.1, 0.2, 0.3], &[1.0, 2.0, 4.0], &[0.1, 0.4, 0.4]).unwrap();
        let s = catalog_stats(&c);
        assert_eq!(s.events, 3);
        assert_eq!(s.median_relative_error, Some(0.1));
        assert_eq!(s.distance_range, Some((1.0, 4.0)));

        let empty = catalog_stats(&Catalog::default());
        assert_eq!(empty.median_relative_error, None);
        assert_eq!(empty.redshift_range, None);
    }

    #[test]
    fn bns_density_area_is_near_one() {
        let d = PopulationDensity::for_source(Source::Bns, None, &Cosmology::fiducial()).unwrap();
        let t = density_table(&d, 1000).unwrap();
        assert!((t.area - 1.0).abs() < 1e-3, "area {}", t.area);
        assert_eq!(t.reference, None);
    }

    #[test]
    fn lisa_budget_lists_every_term() {
        let c = Cosmology::fiducial();
        let mut rng = StdRng::seed_from_u64(1);
        let b = error_budget(Source::Lisa, 3.0, &c, &mut rng).unwrap();
        let names: Vec<&str> = b.terms.iter().map(|t| t.0).collect();
        assert_eq!(names, vec!["lens", "delens", "v", "lisa", "photo"]);

        let d = PopulationDensity::for_source(Source::Lisa, Some(MbhbPopulation::Delay), &c).unwrap();
        let rows = error_table(&d, &c, &Inversion::Brent, 5, &mut rng).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].redshift, 0.1);
        assert_eq!(rows[4].redshift, 9.0);
    }
}

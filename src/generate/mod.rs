//! Catalog generation shared by every source.
//!
//! The workflow is the same for all populations:
//! resolve distribution -> size from the selector -> sample or validate
//! redshifts -> distances and errors -> optional Gaussian scatter.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Catalog, GenerateConfig, Selector};
use crate::error::GwResult;
use crate::noise::distance_error;
use crate::populations::{PopulationDensity, Variable};
use crate::sampling::apply_scatter;

pub mod gwtc;

pub use gwtc::*;

/// Generate a catalog with a freshly seeded RNG (`config.seed`, or entropy).
pub fn generate_with_seed(config: &GenerateConfig) -> GwResult<Catalog> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate(config, &mut rng)
}

/// Generate a catalog for `config`, drawing all randomness from `rng`.
pub fn generate<R: Rng + ?Sized>(config: &GenerateConfig, rng: &mut R) -> GwResult<Catalog> {
    let cosmology = &config.cosmology;

    // 1) Distribution for the source.
    let density = PopulationDensity::for_source(config.source, config.population, cosmology)?;

    // 2) Redshifts.
    let redshifts = match &config.selector {
        Selector::Redshifts(zs) => {
            density.validate_redshifts(zs, cosmology, &config.inversion)?;
            debug!("{}: propagating {} given redshifts", config.source, zs.len());
            zs.clone()
        }
        Selector::Events(n) => sample(&density, config, *n, rng)?,
        Selector::Years(years) => {
            let n = density.events_over(*years)?;
            debug!("{}: {years} years -> {n} events", config.source);
            sample(&density, config, n, rng)?
        }
    };

    // 3) Theoretical distances and errors. Distance-domain draws are
    // recomputed from their inverted redshifts so every row satisfies dL(z).
    let mut distances = redshifts
        .iter()
        .map(|&z| cosmology.luminosity_distance(z))
        .collect::<GwResult<Vec<f64>>>()?;
    let errors = redshifts
        .iter()
        .map(|&z| distance_error(config.source, z, cosmology, rng))
        .collect::<GwResult<Vec<f64>>>()?;

    // 4) Observational scatter.
    if !config.ideal {
        apply_scatter(&mut distances, &errors, rng)?;
    }

    info!(
        "generated {} {} events ({}, ideal={})",
        redshifts.len(),
        config.source,
        config.selector.name(),
        config.ideal
    );
    Catalog::from_columns(&redshifts, &distances, &errors)
}

/// Draw `n` redshifts from `density`. Distance-domain draws are inverted
/// with the configured strategy.
fn sample<R: Rng + ?Sized>(
    density: &PopulationDensity,
    config: &GenerateConfig,
    n: usize,
    rng: &mut R,
) -> GwResult<Vec<f64>> {
    let draws = config
        .sampler
        .sample(|x| density.eval(x), density.domain(), density.codomain(), n, rng)?;
    match density.variable() {
        Variable::Redshift => Ok(draws),
        Variable::Distance => config.inversion.redshifts(&config.cosmology, &draws),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::Inversion;
    use crate::domain::{MbhbPopulation, Source};
    use crate::error::GwError;

    fn config(source: Source, selector: Selector) -> GenerateConfig {
        let mut cfg = GenerateConfig::new(source, selector);
        cfg.seed = Some(2024);
        cfg
    }

    #[test]
    fn bns_hundred_events_within_window() {
        let catalog = generate_with_seed(&config(Source::Bns, Selector::Events(100))).unwrap();
        assert_eq!(catalog.len(), 100);
        for e in &catalog.events {
            assert!((0.07..=2.0).contains(&e.redshift), "z={}", e.redshift);
            assert!(e.distance > 0.0);
            assert!(e.error > 0.0);
        }
    }

    #[test]
    fn lisa_years_scale_reference_count() {
        let mut cfg = config(Source::Lisa, Selector::Years(5.0));
        cfg.population = Some(MbhbPopulation::PopIii);
        assert_eq!(generate_with_seed(&cfg).unwrap().len(), 28);

        cfg.selector = Selector::Years(10.0);
        assert_eq!(generate_with_seed(&cfg).unwrap().len(), 56);
    }

    #[test]
    fn lisa_without_population_fails() {
        let cfg = config(Source::Lisa, Selector::Events(3));
        assert!(matches!(
            generate_with_seed(&cfg),
            Err(GwError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn snia_rejects_redshift_outside_domain() {
        let cfg = config(Source::Snia, Selector::Redshifts(vec![1.5]));
        let err = generate_with_seed(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, GwError::DomainViolation { .. }));
        assert!(msg.contains("0.1"), "{msg}");
        assert!(msg.contains("1]"), "{msg}");
    }

    #[test]
    fn ideal_distances_are_theoretical() {
        let mut cfg = config(Source::Bns, Selector::Redshifts(vec![0.5, 1.0, 1.5]));
        cfg.ideal = true;
        let catalog = generate_with_seed(&cfg).unwrap();
        for e in &catalog.events {
            let expected = cfg.cosmology.luminosity_distance(e.redshift).unwrap();
            assert_eq!(e.distance, expected);
        }
        assert_eq!(catalog.redshifts(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn scattered_distances_are_non_negative() {
        let cfg = config(Source::Snia, Selector::Events(200));
        let catalog = generate_with_seed(&cfg).unwrap();
        assert_eq!(catalog.len(), 200);
        assert!(catalog.events.iter().all(|e| e.distance >= 0.0));
        assert!(catalog.events.iter().all(|e| (0.1..1.0).contains(&e.redshift)));
    }

    #[test]
    fn ligo_redshifts_come_from_sampled_distances() {
        let mut cfg = config(Source::Ligo, Selector::Events(50));
        cfg.ideal = true;
        let catalog = generate_with_seed(&cfg).unwrap();
        assert_eq!(catalog.len(), 50);
        for e in &catalog.events {
            assert!(e.distance > 0.0 && e.distance <= 0.96 + 1e-9);
            assert_eq!(e.distance, cfg.cosmology.luminosity_distance(e.redshift).unwrap());
        }
    }

    #[test]
    fn ideal_ligo_table_rows_match_their_redshift() {
        let mut cfg = config(Source::Ligo, Selector::Events(50));
        cfg.ideal = true;
        cfg.seed = Some(7);
        cfg.inversion = Inversion::table();
        let catalog = generate_with_seed(&cfg).unwrap();
        assert_eq!(catalog.len(), 50);
        for e in &catalog.events {
            assert_eq!(e.distance, cfg.cosmology.luminosity_distance(e.redshift).unwrap());
        }
    }

    #[test]
    fn overflowing_duration_is_rejected() {
        let mut cfg = config(Source::Lisa, Selector::Years(1e20));
        cfg.population = Some(MbhbPopulation::PopIii);
        assert!(matches!(
            generate_with_seed(&cfg),
            Err(GwError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn ligo_table_inversion_rounds_redshifts() {
        let mut cfg = config(Source::Ligo, Selector::Events(20));
        cfg.inversion = Inversion::table();
        let catalog = generate_with_seed(&cfg).unwrap();
        for z in catalog.redshifts() {
            assert!(((z * 1000.0).round() / 1000.0 - z).abs() < 1e-12);
        }
    }

    #[test]
    fn duration_selector_rejected_for_bns() {
        let cfg = config(Source::Bns, Selector::Years(1.0));
        assert!(matches!(
            generate_with_seed(&cfg),
            Err(GwError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn zero_events_is_an_empty_catalog() {
        let catalog = generate_with_seed(&config(Source::Snia, Selector::Events(0))).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn same_seed_same_catalog() {
        let cfg = config(Source::Snia, Selector::Events(25));
        assert_eq!(generate_with_seed(&cfg).unwrap(), generate_with_seed(&cfg).unwrap());
    }
}

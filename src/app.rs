//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration (flags, then environment, then defaults)
//! - runs the generators
//! - prints summaries, tables and plots
//! - writes catalogs
//!
//! When a catalog goes to stdout, everything else goes to stderr so the
//! catalog can be piped.

use clap::Parser;
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::{
    Cli, Command, CosmologyArgs, DistArgs, ErrorArgs, GenerateArgs, GwtcArgs, OutputArgs, PlotArgs, PlotSize,
};
use crate::cosmology::{Cosmology, Inversion};
use crate::domain::{Catalog, CatalogFile, GenerateConfig, InversionKind, MbhbPopulation, Selector, Source};
use crate::error::AppError;
use crate::generate::{GwtcOptions, generate_with_seed, gwtc_catalog};
use crate::io::{load_catalog, load_gwtc_records, save_catalog, save_catalog_json};
use crate::plot::{Curve, render_catalogs, render_curves};
use crate::populations::{PopulationDensity, Variable};
use crate::report::{density_table, error_table, format_catalog_summary, format_density_table, format_error_table};
use crate::sampling::RejectionSampler;

/// Entry point for the `gwc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Gwtc(args) => handle_gwtc(args),
        Command::Plot(args) => handle_plot(args),
        Command::Dist(args) => handle_dist(args),
        Command::Error(args) => handle_error(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = generate_config_from_args(&args)?;
    let catalog = generate_with_seed(&config)?.with_label(config.source.display_name());

    let title = match config.population {
        Some(pop) if config.source == Source::Lisa => format!("{} {pop}", config.source),
        _ => config.source.to_string(),
    };
    finish_catalog(&catalog, &title, &args.output, &config.cosmology, &args.size, || {
        CatalogFile::from_run(&config, catalog.clone())
    })
}

fn handle_gwtc(args: GwtcArgs) -> Result<(), AppError> {
    let cosmology = resolve_cosmology(&args.cosmology)?;
    let records = load_gwtc_records(&args.input)?;
    let options = GwtcOptions {
        multiplier: args.multiplier,
        ideal: args.ideal,
    };
    let mut rng = seeded_rng(args.seed);
    let catalog = gwtc_catalog(&records, &options, &cosmology, &mut rng)?.with_label("GWTC");

    finish_catalog(&catalog, "GWTC", &args.output, &cosmology, &args.size, || {
        CatalogFile::observed(catalog.clone(), cosmology, args.ideal, args.seed)
    })
}

/// Write the catalog (and optional JSON), then the summary and plot.
fn finish_catalog(
    catalog: &Catalog,
    title: &str,
    output: &OutputArgs,
    cosmology: &Cosmology,
    size: &PlotSize,
    json: impl FnOnce() -> CatalogFile,
) -> Result<(), AppError> {
    save_catalog(output.output.as_deref(), catalog, output.info.as_deref())?;
    if let Some(path) = &output.json {
        save_catalog_json(path, &json())?;
    }

    let to_stdout = output.output.is_some();
    emit(&format_catalog_summary(catalog, title), to_stdout);
    if output.plot {
        emit(&render_catalogs(std::slice::from_ref(catalog), Some(cosmology), size.width, size.height)?, to_stdout);
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let catalogs = args
        .catalogs
        .iter()
        .map(|p| load_catalog(p))
        .collect::<Result<Vec<_>, _>>()?;
    let cosmology = if args.theoretical {
        Some(resolve_cosmology(&args.cosmology)?)
    } else {
        None
    };
    let plot = render_catalogs(&catalogs, cosmology.as_ref(), args.size.width, args.size.height)?;
    println!("{plot}");
    Ok(())
}

fn handle_dist(args: DistArgs) -> Result<(), AppError> {
    let cosmology = resolve_cosmology(&args.cosmology)?;
    let populations: Vec<Option<MbhbPopulation>> = match (args.source, args.population) {
        (Source::Lisa, None) => MbhbPopulation::ALL.iter().copied().map(Some).collect(),
        (_, population) => vec![population],
    };

    let mut curves = Vec::new();
    let mut axis = "z";
    for population in populations {
        let density = PopulationDensity::for_source(args.source, population, &cosmology)?;
        if density.variable() == Variable::Distance {
            axis = "dL";
        }
        let table = density_table(&density, args.samples)?;
        if let Some(pop) = population {
            println!("Population: {pop}");
        }
        println!("{}", format_density_table(&table, args.every));
        let label = population.map_or_else(|| args.source.to_string(), |p| p.to_string());
        curves.push(Curve::new(label, table.points));
    }

    if args.plot {
        println!("{}", render_curves(&curves, (axis, "p"), args.size.width, args.size.height));
    }
    Ok(())
}

fn handle_error(args: ErrorArgs) -> Result<(), AppError> {
    let cosmology = resolve_cosmology(&args.cosmology)?;
    // The error budget does not depend on the MBHB population.
    let density = PopulationDensity::for_source(args.source, Some(MbhbPopulation::PopIii), &cosmology)?;
    let mut rng = seeded_rng(args.seed);
    let rows = error_table(&density, &cosmology, &inversion_for(args.inversion), args.samples, &mut rng)?;

    println!("Distance error budget for {}", args.source);
    println!("{}", format_error_table(&rows));

    if args.plot {
        let relative: Vec<_> = rows.iter().filter(|r| r.distance > 0.0).collect();
        let mut curves: Vec<Curve> = relative
            .first()
            .map(|r| r.terms.iter().map(|t| Curve::new(format!("σ_{}/dL", t.0), Vec::new())).collect())
            .unwrap_or_default();
        let mut total = Curve::new("σ/dL", Vec::new());
        for r in &relative {
            for (curve, &(_, v)) in curves.iter_mut().zip(r.terms.iter()) {
                curve.points.push((r.redshift, v / r.distance));
            }
            total.points.push((r.redshift, r.total / r.distance));
        }
        curves.insert(0, total);
        println!("{}", render_curves(&curves, ("z", "σ/dL"), args.size.width, args.size.height));
    }
    Ok(())
}

pub fn generate_config_from_args(args: &GenerateArgs) -> Result<GenerateConfig, AppError> {
    let selector = Selector::from_options(args.events, args.redshifts.clone(), args.years)?;
    if args.population.is_some() && args.source != Source::Lisa {
        warn!("--population only applies to LISA, ignoring it for {}", args.source);
    }
    let sampler = match args.max_rejections {
        Some(0) => return Err(AppError::new(2, "--max-rejections must be at least 1")),
        Some(n) => RejectionSampler::new(n),
        None => RejectionSampler::from_env()?,
    };

    Ok(GenerateConfig {
        source: args.source,
        selector,
        population: args.population,
        ideal: args.ideal,
        seed: args.seed,
        cosmology: resolve_cosmology(&args.cosmology)?,
        inversion: inversion_for(args.inversion),
        sampler,
    })
}

/// Flags override the environment, which overrides the fiducial model.
pub fn resolve_cosmology(args: &CosmologyArgs) -> Result<Cosmology, AppError> {
    let env = Cosmology::from_env()?;
    if args.little_h.is_none() && args.omega_m.is_none() {
        return Ok(env);
    }
    let h = args.little_h.unwrap_or_else(|| env.little_h());
    let omega_m = args.omega_m.unwrap_or_else(|| env.omega_m());
    Ok(Cosmology::from_little_h(h, omega_m)?)
}

fn inversion_for(kind: InversionKind) -> Inversion {
    match kind {
        InversionKind::Brent => Inversion::Brent,
        InversionKind::Table => Inversion::table(),
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn emit(text: &str, to_stdout: bool) {
    if to_stdout {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_generate(argv: &[&str]) -> GenerateArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Generate(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn conflicting_selectors_are_rejected() {
        let args = parse_generate(&["gwc", "generate", "bns", "--events", "10", "--years", "2"]);
        let err = generate_config_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn flags_build_a_table_inversion_config() {
        let args = parse_generate(&[
            "gwc", "generate", "ligo", "-n", "5", "--inversion", "table", "--max-rejections", "500", "--seed", "3",
        ]);
        let config = generate_config_from_args(&args).unwrap();
        assert_eq!(config.selector, Selector::Events(5));
        assert_eq!(config.inversion, Inversion::table());
        assert_eq!(config.sampler, RejectionSampler::new(500));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn zero_rejection_cap_is_invalid() {
        let args = parse_generate(&["gwc", "generate", "snia", "-n", "5", "--max-rejections", "0"]);
        assert!(generate_config_from_args(&args).is_err());
    }

    #[test]
    fn cosmology_flags_override_defaults() {
        let args = CosmologyArgs {
            little_h: Some(0.68),
            omega_m: Some(0.31),
        };
        let c = resolve_cosmology(&args).unwrap();
        assert!((c.little_h() - 0.68).abs() < 1e-12);
        assert_eq!(c.omega_m(), 0.31);

        let bad = CosmologyArgs {
            little_h: Some(0.7),
            omega_m: Some(1.5),
        };
        assert_eq!(resolve_cosmology(&bad).unwrap_err().exit_code(), 2);
    }
}

//! Command-line parsing for the standard siren catalog generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{InversionKind, MbhbPopulation, Source};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gwc", version, about = "Mock catalogs of gravitational-wave standard sirens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a forecast catalog for a source.
    Generate(GenerateArgs),
    /// Build a catalog from observed events (GWTC-style CSV, distances in Mpc).
    Gwtc(GwtcArgs),
    /// Plot saved catalogs in the (z, dL) plane.
    Plot(PlotArgs),
    /// Tabulate (and optionally plot) a source's population distribution.
    Dist(DistArgs),
    /// Tabulate (and optionally plot) a source's distance error budget.
    Error(ErrorArgs),
}

/// Cosmology overrides. Unset values fall back to `GWC_LITTLE_H` /
/// `GWC_OMEGA_M`, then to the fiducial model.
#[derive(Debug, Args, Clone, Default)]
pub struct CosmologyArgs {
    /// Dimensionless Hubble parameter h (H0 = 100 h km/s/Mpc).
    #[arg(long = "h", value_name = "H")]
    pub little_h: Option<f64>,

    /// Matter density fraction Ωm.
    #[arg(long)]
    pub omega_m: Option<f64>,
}

/// Terminal plot size.
#[derive(Debug, Args, Clone)]
pub struct PlotSize {
    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Where a catalog goes once built.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Catalog file to write (stdout when omitted).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Also write the catalog with its run metadata as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Free-form info line written at the top of the catalog file.
    #[arg(long)]
    pub info: Option<String>,

    /// Render an ASCII plot of the catalog.
    #[arg(long)]
    pub plot: bool,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Source population / instrument.
    #[arg(value_enum)]
    pub source: Source,

    /// Number of events to sample.
    #[arg(short = 'n', long)]
    pub events: Option<usize>,

    /// Comma-separated redshifts to propagate without sampling.
    #[arg(short = 'z', long, value_delimiter = ',', num_args = 1..)]
    pub redshifts: Option<Vec<f64>>,

    /// Observation time in years (LISA and SNIa).
    #[arg(short = 'y', long)]
    pub years: Option<f64>,

    /// MBHB population (LISA only).
    #[arg(short = 'p', long, value_enum)]
    pub population: Option<MbhbPopulation>,

    /// Keep theoretical distances (no Gaussian scatter).
    #[arg(long)]
    pub ideal: bool,

    /// Random seed (entropy when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance to redshift inversion used for LIGO.
    #[arg(long, value_enum, default_value_t = InversionKind::Brent)]
    pub inversion: InversionKind,

    /// Cap on consecutive rejections before the sampler gives up.
    #[arg(long)]
    pub max_rejections: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub cosmology: CosmologyArgs,

    #[command(flatten)]
    pub size: PlotSize,
}

#[derive(Debug, Args, Clone)]
pub struct GwtcArgs {
    /// CSV with luminosity_distance, luminosity_distance_lower and
    /// luminosity_distance_upper columns (Mpc).
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Scale every error by this factor.
    #[arg(long, default_value_t = 1.0)]
    pub multiplier: f64,

    /// Keep the observed distances (no Gaussian scatter).
    #[arg(long)]
    pub ideal: bool,

    /// Random seed (entropy when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub cosmology: CosmologyArgs,

    #[command(flatten)]
    pub size: PlotSize,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Catalog files written by `gwc generate` or `gwc gwtc`.
    #[arg(required = true)]
    pub catalogs: Vec<PathBuf>,

    /// Overlay the theoretical dL(z) line.
    #[arg(long)]
    pub theoretical: bool,

    #[command(flatten)]
    pub cosmology: CosmologyArgs,

    #[command(flatten)]
    pub size: PlotSize,
}

#[derive(Debug, Args, Clone)]
pub struct DistArgs {
    #[arg(value_enum)]
    pub source: Source,

    /// MBHB population (LISA only; all three when omitted).
    #[arg(short = 'p', long, value_enum)]
    pub population: Option<MbhbPopulation>,

    /// Points sampled across the domain.
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// Print every n-th sample in the table.
    #[arg(long, default_value_t = 50)]
    pub every: usize,

    /// Render an ASCII plot of the distribution.
    #[arg(long)]
    pub plot: bool,

    #[command(flatten)]
    pub cosmology: CosmologyArgs,

    #[command(flatten)]
    pub size: PlotSize,
}

#[derive(Debug, Args, Clone)]
pub struct ErrorArgs {
    #[arg(value_enum)]
    pub source: Source,

    /// Redshifts tabulated across the source's range.
    #[arg(long, default_value_t = 20)]
    pub samples: usize,

    /// Random seed for stochastic error terms.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance to redshift inversion used for the LIGO range.
    #[arg(long, value_enum, default_value_t = InversionKind::Brent)]
    pub inversion: InversionKind,

    /// Render an ASCII plot of σ/dL per term.
    #[arg(long)]
    pub plot: bool,

    #[command(flatten)]
    pub cosmology: CosmologyArgs,

    #[command(flatten)]
    pub size: PlotSize,
}

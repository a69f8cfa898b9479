//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the generators
//! - written to CSV/JSON
//! - reloaded later for plotting or comparisons

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cosmology::{Cosmology, Inversion};
use crate::error::{GwError, GwResult};
use crate::sampling::RejectionSampler;

/// Source population / instrument forecast a catalog is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Binary neutron stars observed by the Einstein Telescope.
    #[value(alias = "et")]
    Bns,
    /// LIGO A+ design sensitivity.
    Ligo,
    /// Massive black-hole binaries observed by LISA.
    Lisa,
    /// Type Ia supernovae from the LSST deep drilling fields.
    Snia,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Bns, Source::Ligo, Source::Lisa, Source::Snia];

    /// Human-readable label for terminal output and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Source::Bns => "BNS (ET)",
            Source::Ligo => "LIGO",
            Source::Lisa => "LISA",
            Source::Snia => "SNIa",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Massive black-hole binary formation scenario for LISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MbhbPopulation {
    /// Light seeds from Population III stars.
    #[serde(rename = "Pop III")]
    #[value(name = "pop-iii", alias = "Pop III")]
    PopIii,
    /// Heavy seeds with a delay between galaxy and MBH merger.
    #[serde(rename = "Delay")]
    #[value(name = "delay", alias = "Delay")]
    Delay,
    /// Heavy seeds without delay.
    #[serde(rename = "No Delay")]
    #[value(name = "no-delay", alias = "No Delay")]
    NoDelay,
}

impl MbhbPopulation {
    pub const ALL: [MbhbPopulation; 3] = [
        MbhbPopulation::PopIii,
        MbhbPopulation::Delay,
        MbhbPopulation::NoDelay,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            MbhbPopulation::PopIii => "Pop III",
            MbhbPopulation::Delay => "Delay",
            MbhbPopulation::NoDelay => "No Delay",
        }
    }
}

impl fmt::Display for MbhbPopulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MbhbPopulation {
    type Err = GwError;

    /// Accepts the published labels ("Pop III", "Delay", "No Delay") as well
    /// as the CLI spellings ("pop-iii", "delay", "no-delay").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "popiii" => Ok(MbhbPopulation::PopIii),
            "delay" => Ok(MbhbPopulation::Delay),
            "nodelay" => Ok(MbhbPopulation::NoDelay),
            _ => Err(GwError::UnknownPopulation {
                name: s.to_string(),
            }),
        }
    }
}

/// How the size (or content) of a catalog is chosen. Exactly one per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Sample this many events from the population distribution.
    Events(usize),
    /// Propagate these redshifts without sampling.
    Redshifts(Vec<f64>),
    /// Sample the number of events expected over this many years.
    Years(f64),
}

impl Selector {
    /// Resolve optional CLI/API inputs into a single selector.
    pub fn from_options(
        events: Option<usize>,
        redshifts: Option<Vec<f64>>,
        years: Option<f64>,
    ) -> GwResult<Self> {
        match (events, redshifts, years) {
            (Some(n), None, None) => Ok(Selector::Events(n)),
            (None, Some(zs), None) => Ok(Selector::Redshifts(zs)),
            (None, None, Some(y)) => {
                if !(y.is_finite() && y >= 0.0) {
                    return Err(GwError::InvalidSelector {
                        message: format!("observation duration must be a non-negative number of years, got {y}"),
                    });
                }
                Ok(Selector::Years(y))
            }
            (None, None, None) => Err(GwError::InvalidSelector {
                message: "please specify the number of events, their redshifts or the observation years"
                    .to_string(),
            }),
            _ => Err(GwError::InvalidSelector {
                message: "more than one of events, redshifts and years were specified, please pick one"
                    .to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Selector::Events(_) => "events",
            Selector::Redshifts(_) => "redshifts",
            Selector::Years(_) => "years",
        }
    }
}

/// A single standard siren: redshift, luminosity distance (Gpc) and its
/// one-sigma error (Gpc).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub redshift: f64,
    #[serde(rename = "luminosity_distance")]
    pub distance: f64,
    pub error: f64,
}

/// An ordered set of events with an optional label (used in plot legends).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub label: Option<String>,
    pub events: Vec<Event>,
}

impl Catalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            label: None,
            events,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build a catalog from parallel columns.
    pub fn from_columns(redshifts: &[f64], distances: &[f64], errors: &[f64]) -> GwResult<Self> {
        if redshifts.len() != distances.len() || redshifts.len() != errors.len() {
            return Err(GwError::InvalidInput {
                message: format!(
                    "catalog columns differ in length: {} redshifts, {} distances, {} errors",
                    redshifts.len(),
                    distances.len(),
                    errors.len()
                ),
            });
        }
        let events = redshifts
            .iter()
            .zip(distances.iter())
            .zip(errors.iter())
            .map(|((&redshift, &distance), &error)| Event {
                redshift,
                distance,
                error,
            })
            .collect();
        Ok(Self::new(events))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn redshifts(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.redshift).collect()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.distance).collect()
    }

    pub fn errors(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.error).collect()
    }

    /// Events ordered by ascending redshift (stable for ties).
    pub fn sorted_by_redshift(&self) -> Vec<Event> {
        let mut events = self.events.clone();
        events.sort_by(|a, b| a.redshift.total_cmp(&b.redshift));
        events
    }

    pub fn redshift_range(&self) -> Option<(f64, f64)> {
        finite_range(self.events.iter().map(|e| e.redshift))
    }

    pub fn distance_range(&self) -> Option<(f64, f64)> {
        finite_range(self.events.iter().map(|e| e.distance))
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Which distance → redshift inversion to use (CLI-facing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InversionKind {
    /// Root finding on `dL(z) = d`.
    Brent,
    /// Nearest-below lookup on a tabulated `dL(z)` line.
    Table,
}

/// A full generation run as understood by the generators.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub source: Source,
    pub selector: Selector,
    /// Required for LISA, ignored elsewhere.
    pub population: Option<MbhbPopulation>,
    /// Skip Gaussian scatter on the distances.
    pub ideal: bool,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub cosmology: Cosmology,
    pub inversion: Inversion,
    pub sampler: RejectionSampler,
}

impl GenerateConfig {
    pub fn new(source: Source, selector: Selector) -> Self {
        Self {
            source,
            selector,
            population: None,
            ideal: false,
            seed: None,
            cosmology: Cosmology::fiducial(),
            inversion: Inversion::default(),
            sampler: RejectionSampler::default(),
        }
    }
}

/// A saved catalog file (JSON): the events plus how they were made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub tool: String,
    pub source: Option<Source>,
    pub population: Option<MbhbPopulation>,
    pub ideal: bool,
    pub seed: Option<u64>,
    pub cosmology: Cosmology,
    pub catalog: Catalog,
}

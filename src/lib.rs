//! `gwcatalog` library crate.
//!
//! Mock catalogs of gravitational-wave standard sirens: redshift sampling,
//! luminosity distances from a flat ΛCDM background, and per-source error
//! models. The binary (`gwc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - generators can be driven from other Rust code with an explicit RNG

pub mod app;
pub mod cli;
pub mod cosmology;
pub mod domain;
pub mod error;
pub mod generate;
pub mod io;
pub mod math;
pub mod noise;
pub mod plot;
pub mod populations;
pub mod report;
pub mod sampling;

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`Source`, `MbhbPopulation`, `Selector`, `InversionKind`)
//! - generated events and catalogs (`Event`, `Catalog`, `CatalogFile`)
//! - the resolved run configuration (`GenerateConfig`)

pub mod types;

pub use types::*;

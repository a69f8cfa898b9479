//! Terminal plots of catalogs, densities and error budgets.

pub mod ascii;

pub use ascii::*;

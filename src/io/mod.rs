//! Input/output helpers.
//!
//! - plain-text catalog save/load (`catalog`)
//! - JSON export with run metadata (`export`)
//! - observed-event CSV input (`gwtc`)

pub mod catalog;
pub mod export;
pub mod gwtc;

pub use catalog::*;
pub use export::*;
pub use gwtc::*;

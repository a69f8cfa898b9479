//! Random draws: rejection sampling from bounded densities and Gaussian
//! observational scatter.

pub mod rejection;
pub mod scatter;

pub use rejection::*;
pub use scatter::*;

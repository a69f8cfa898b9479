//! Numerical building blocks: quadrature, root finding, splines and
//! finite differences.

pub mod diff;
pub mod quad;
pub mod roots;
pub mod spline;

pub use diff::*;
pub use quad::*;
pub use roots::*;
pub use spline::*;

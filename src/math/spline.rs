//! Cubic spline interpolation.
//!
//! The spline is stored as knot values plus second derivatives ("moments")
//! `M_i`. Interior knots enforce continuity of the first and second
//! derivatives; the end conditions are *not-a-knot* (third derivative
//! continuous across the second and penultimate knots), which reproduces any
//! cubic exactly. With three knots the ends fall back to natural conditions
//! (`M = 0`), with two the spline is the straight line through them.
//!
//! Evaluation outside the knot range extrapolates the first/last polynomial
//! piece.

use nalgebra::{DMatrix, DVector};

use crate::error::{GwError, GwResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Build a spline through `(xs[i], ys[i])`; `xs` must be strictly increasing.
    pub fn new(xs: &[f64], ys: &[f64]) -> GwResult<Self> {
        if xs.len() != ys.len() {
            return Err(GwError::InvalidInput {
                message: format!(
                    "spline needs matching knots and values, got {} and {}",
                    xs.len(),
                    ys.len()
                ),
            });
        }
        if xs.len() < 2 {
            return Err(GwError::InvalidInput {
                message: "spline needs at least two knots".to_string(),
            });
        }
        if xs.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(GwError::InvalidInput {
                message: "spline knots must be strictly increasing".to_string(),
            });
        }

        let moments = solve_moments(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            moments,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    pub fn knots(&self) -> (&[f64], &[f64]) {
        (&self.xs, &self.ys)
    }

    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let i = self
            .xs
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(n - 2);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);
        let h = x1 - x0;
        let left = x1 - x;
        let right = x - x0;

        m0 * left.powi(3) / (6.0 * h)
            + m1 * right.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * left
            + (y1 / h - m1 * h / 6.0) * right
    }
}

fn solve_moments(xs: &[f64], ys: &[f64]) -> GwResult<Vec<f64>> {
    let n = xs.len();
    if n == 2 {
        return Ok(vec![0.0, 0.0]);
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    if n == 3 {
        a[(0, 0)] = 1.0;
        a[(n - 1, n - 1)] = 1.0;
    } else {
        // (M1 - M0)/h0 = (M2 - M1)/h1
        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];
        let k = n - 2;
        a[(n - 1, n - 3)] = h[k];
        a[(n - 1, n - 2)] = -(h[k - 1] + h[k]);
        a[(n - 1, n - 1)] = h[k - 1];
    }

    let moments = a.lu().solve(&rhs).ok_or_else(|| GwError::InvalidInput {
        message: "spline system is singular".to_string(),
    })?;
    Ok(moments.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_knots() {
        let xs = [0.0, 0.5, 1.2, 2.0, 3.1];
        let ys = [1.0, -0.5, 0.3, 2.2, 0.0];
        let s = CubicSpline::new(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            assert!((s.eval(x) - y).abs() < 1e-12, "at {x}: {} vs {y}", s.eval(x));
        }
    }

    #[test]
    fn not_a_knot_reproduces_cubics() {
        let f = |x: f64| x * x * x - 2.0 * x + 0.5;
        let xs: Vec<f64> = (0..7).map(|i| i as f64 * 0.7).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let s = CubicSpline::new(&xs, &ys).unwrap();
        for &x in &[0.1, 1.05, 2.5, 3.9] {
            assert!((s.eval(x) - f(x)).abs() < 1e-9, "at {x}");
        }
    }

    #[test]
    fn two_knots_is_linear() {
        let s = CubicSpline::new(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert!((s.eval(0.5) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_unsorted_knots() {
        assert!(CubicSpline::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).is_err());
    }
}

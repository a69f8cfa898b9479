//! Bracketed root finding (Brent's method).

use log::{debug, error};

use crate::error::{GwError, GwResult};

/// Solver settings for [`brent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentConfig {
    /// Absolute tolerance on the abscissa.
    pub x_tol: f64,
    pub max_iter: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            x_tol: 1e-12,
            max_iter: 100,
        }
    }
}

/// Solve `f(x) = target` for `x` in `[lo, hi]`.
///
/// `f(lo) - target` and `f(hi) - target` must have opposite signs (or one of
/// them must vanish). Combines bisection, secant and inverse quadratic
/// interpolation steps so convergence is guaranteed once bracketed.
pub fn brent<F>(mut f: F, target: f64, lo: f64, hi: f64, config: &BrentConfig) -> GwResult<f64>
where
    F: FnMut(f64) -> GwResult<f64>,
{
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a)? - target;
    let mut fb = f(b)? - target;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(GwError::RootNotFound {
            target,
            reason: format!("root is not bracketed by [{lo}, {hi}]"),
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iter in 0..config.max_iter {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.x_tol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            debug!("brent converged to {b} after {iter} iterations (target {target})");
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let bound_interp = 3.0 * xm * q - (tol * q).abs();
            let bound_prev = (e * q).abs();
            if 2.0 * p < bound_interp.min(bound_prev) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(xm) };
        fb = f(b)? - target;
    }

    error!("Brent solver failed after {} iterations", config.max_iter);
    Err(GwError::RootNotFound {
        target,
        reason: format!("no convergence after {} iterations", config.max_iter),
    })
}

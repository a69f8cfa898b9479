//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each interval is evaluated with the 15-point Kronrod rule; the embedded
//! 7-point Gauss rule gives the error estimate. The interval with the largest
//! error estimate is bisected until the total estimate satisfies
//!
//! ```text
//! error <= max(abs_tol, rel_tol * |integral|)
//! ```
//!
//! or the subdivision limit is reached, in which case the integral is
//! reported as non-convergent rather than silently returned.

use log::{debug, trace};

use crate::error::{GwError, GwResult};

/// Kronrod abscissae on `[-1, 1]` (non-negative half, descending).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for the odd Kronrod abscissae (`XGK[1]`, `XGK[3]`, `XGK[5]`)
/// followed by the centre weight.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Tolerances and limits for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadConfig {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

/// Integral value with its error estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub error: f64,
    pub subdivisions: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate an infallible integrand over `[a, b]`.
pub fn integrate<F>(mut f: F, a: f64, b: f64, config: &QuadConfig) -> GwResult<Quadrature>
where
    F: FnMut(f64) -> f64,
{
    try_integrate(|x| Ok(f(x)), a, b, config)
}

/// Integrate an integrand that may itself fail (e.g. one that evaluates other
/// integrals). `b < a` yields the negated integral over `[b, a]`.
pub fn try_integrate<F>(mut f: F, a: f64, b: f64, config: &QuadConfig) -> GwResult<Quadrature>
where
    F: FnMut(f64) -> GwResult<f64>,
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(GwError::InvalidInput {
            message: format!("integration bounds must be finite, got [{a}, {b}]"),
        });
    }
    if a == b {
        return Ok(Quadrature {
            value: 0.0,
            error: 0.0,
            subdivisions: 0,
        });
    }
    if b < a {
        let q = try_integrate(f, b, a, config)?;
        return Ok(Quadrature {
            value: -q.value,
            ..q
        });
    }

    let (value, error) = kronrod15(&mut f, a, b)?;
    let mut segments = vec![Segment { a, b, value, error }];
    let mut subdivisions = 0;

    loop {
        let total: f64 = segments.iter().map(|s| s.value).sum();
        let total_error: f64 = segments.iter().map(|s| s.error).sum();
        let tolerance = config.abs_tol.max(config.rel_tol * total.abs());

        if total_error <= tolerance && total.is_finite() {
            trace!("quadrature [{a}, {b}] = {total} (err {total_error:e}, {subdivisions} splits)");
            return Ok(Quadrature {
                value: total,
                error: total_error,
                subdivisions,
            });
        }
        if subdivisions >= config.max_subdivisions || !total.is_finite() {
            debug!("quadrature [{a}, {b}] failed: estimate {total_error:e} > {tolerance:e}");
            return Err(GwError::NumericalIntegration {
                a,
                b,
                subdivisions,
                estimate: total_error,
            });
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let seg = segments.swap_remove(worst);
        let mid = 0.5 * (seg.a + seg.b);

        let (left_value, left_error) = kronrod15(&mut f, seg.a, mid)?;
        let (right_value, right_error) = kronrod15(&mut f, mid, seg.b)?;
        segments.push(Segment {
            a: seg.a,
            b: mid,
            value: left_value,
            error: left_error,
        });
        segments.push(Segment {
            a: mid,
            b: seg.b,
            value: right_value,
            error: right_error,
        });
        subdivisions += 1;
    }
}

fn kronrod15<F>(f: &mut F, a: f64, b: f64) -> GwResult<(f64, f64)>
where
    F: FnMut(f64) -> GwResult<f64>,
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(centre)?;
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(centre - dx)? + f(centre + dx)?;
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Ok((kronrod * half, ((kronrod - gauss) * half).abs()))
}

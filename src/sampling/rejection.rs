//! Rejection sampling over a bounded 2D box.
//!
//! Points `(x, y)` are drawn uniformly from `[xmin, xmax] × [ymin, ymax]` and
//! `x` is accepted when `y < f(x)`. The density does not need to be
//! normalised, but `ymax` must bound it from above for the draws to follow
//! `f`; values above `ymax` are reported with a warning.
//!
//! A density that sits below `ymin` everywhere would never accept. The
//! sampler counts consecutive rejections and fails with
//! [`GwError::SamplerCalibration`] once `max_rejections` is reached.

use log::{debug, warn};
use rand::Rng;

use crate::error::{GwError, GwResult};

/// Default cap on consecutive rejections.
pub const DEFAULT_MAX_REJECTIONS: usize = 1_000_000;

/// Upper bound on the up-front allocation for accepted samples.
const PREALLOCATE_LIMIT: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionSampler {
    pub max_rejections: usize,
}

impl Default for RejectionSampler {
    fn default() -> Self {
        Self {
            max_rejections: DEFAULT_MAX_REJECTIONS,
        }
    }
}

impl RejectionSampler {
    pub fn new(max_rejections: usize) -> Self {
        Self { max_rejections }
    }

    /// Cap from `GWC_MAX_REJECTIONS` (a `.env` file is honoured), or the default.
    pub fn from_env() -> GwResult<Self> {
        dotenvy::dotenv().ok();
        match std::env::var("GWC_MAX_REJECTIONS") {
            Ok(raw) => {
                let max_rejections = raw.trim().parse::<usize>().map_err(|e| GwError::InvalidInput {
                    message: format!("GWC_MAX_REJECTIONS='{raw}' is not a positive integer: {e}"),
                })?;
                if max_rejections == 0 {
                    return Err(GwError::InvalidInput {
                        message: "GWC_MAX_REJECTIONS must be at least 1".to_string(),
                    });
                }
                Ok(Self::new(max_rejections))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Draw exactly `n` samples of `x` from `density` on `domain`, using
    /// `codomain` as the vertical extent of the bounding box.
    pub fn sample<R, F>(
        &self,
        mut density: F,
        domain: (f64, f64),
        codomain: (f64, f64),
        n: usize,
        rng: &mut R,
    ) -> GwResult<Vec<f64>>
    where
        R: Rng + ?Sized,
        F: FnMut(f64) -> GwResult<f64>,
    {
        let (xmin, xmax) = domain;
        let (ymin, ymax) = codomain;
        if !(xmin.is_finite() && xmax.is_finite() && xmax > xmin) {
            return Err(GwError::InvalidInput {
                message: format!("rejection sampling needs a non-empty domain, got [{xmin}, {xmax}]"),
            });
        }
        if !(ymin.is_finite() && ymax.is_finite() && ymax > ymin) {
            return Err(GwError::InvalidInput {
                message: format!("rejection sampling needs a non-empty codomain, got [{ymin}, {ymax}]"),
            });
        }

        let mut accepted = Vec::with_capacity(n.min(PREALLOCATE_LIMIT));
        let mut rejections = 0usize;
        let mut total_draws = 0usize;
        let mut warned = false;

        while accepted.len() < n {
            let x = rng.gen_range(xmin..xmax);
            let y = rng.gen_range(ymin..ymax);
            let fx = density(x)?;
            total_draws += 1;

            if fx > ymax && !warned {
                warn!("density {fx} at x={x} exceeds the declared maximum {ymax}; samples are biased");
                warned = true;
            }

            if y < fx {
                accepted.push(x);
                rejections = 0;
            } else {
                rejections += 1;
                if rejections >= self.max_rejections {
                    return Err(GwError::SamplerCalibration {
                        attempts: rejections,
                        accepted: accepted.len(),
                        requested: n,
                    });
                }
            }
        }

        if n > 0 {
            debug!(
                "rejection sampler: {n} accepted from {total_draws} draws ({:.1}%)",
                100.0 * n as f64 / total_draws as f64
            );
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_samples_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = RejectionSampler::default()
            .sample(|_| Ok(1.0), (0.0, 1.0), (0.0, 1.0), 0, &mut rng)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn returns_exact_count_within_domain() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = RejectionSampler::default()
            .sample(|x| Ok(x * x), (0.5, 2.0), (0.0, 4.0), 500, &mut rng)
            .unwrap();
        assert_eq!(out.len(), 500);
        assert!(out.iter().all(|&x| (0.5..=2.0).contains(&x)));
    }

    #[test]
    fn follows_a_linear_density() {
        // f(x) = x on [0, 1]: mean 2/3.
        let mut rng = StdRng::seed_from_u64(42);
        let out = RejectionSampler::default()
            .sample(|x| Ok(x), (0.0, 1.0), (0.0, 1.0), 20_000, &mut rng)
            .unwrap();
        let mean = out.iter().sum::<f64>() / out.len() as f64;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn miscalibrated_codomain_fails_instead_of_hanging() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = RejectionSampler::new(1000)
            .sample(|_| Ok(0.1), (0.0, 1.0), (0.5, 1.0), 10, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            GwError::SamplerCalibration {
                attempts: 1000,
                accepted: 0,
                requested: 10
            }
        ));
    }

    #[test]
    fn huge_request_fails_without_allocating_it() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = RejectionSampler::new(100)
            .sample(|_| Ok(0.0), (0.0, 1.0), (0.5, 1.0), usize::MAX, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            GwError::SamplerCalibration {
                accepted: 0,
                requested: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn rejects_degenerate_boxes() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampler = RejectionSampler::default();
        assert!(sampler.sample(|_| Ok(1.0), (1.0, 1.0), (0.0, 1.0), 1, &mut rng).is_err());
        assert!(sampler.sample(|_| Ok(1.0), (0.0, 1.0), (0.0, 0.0), 1, &mut rng).is_err());
    }
}

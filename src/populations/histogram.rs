//! Binned redshift distributions (LISA MBHB populations, LSST SNIa).
//!
//! Each table holds published event counts per redshift bin. The density is
//! the step function `bins[floor(z · bins_per_unit) - first_bin] / N` on
//! `[zmin, zmax)`, where `N` is the total count; `N` is also the number of
//! events expected over the table's reference observation time.

use crate::domain::MbhbPopulation;

/// LISA MBHB counts per unit redshift bin over 5 years of the L6A2M5N2
/// configuration (arXiv:1607.08755, fig. 9 middle panel), with no events
/// below z = 0.1.
const LISA_POP_III: [f64; 9] = [2.012, 7.002, 8.169, 5.412, 3.300, 1.590, 0.624, 0.141, 0.000];
const LISA_DELAY: [f64; 9] = [0.926, 4.085, 5.976, 5.131, 4.769, 2.656, 1.710, 0.644, 0.362];
const LISA_NO_DELAY: [f64; 9] = [3.682, 10.28, 9.316, 7.646, 4.909, 2.817, 1.187, 0.362, 0.161];

/// LSST DDF supernova counts per 0.1 redshift bin over two years
/// (arXiv:1409.8562, fig. 12).
const SNIA_LSST_DDF: [f64; 9] = [64.0, 258.0, 480.0, 758.0, 1049.0, 1369.0, 1683.0, 2009.0, 1130.0];

pub const LISA_ZMIN: f64 = 0.1;
pub const LISA_ZMAX: f64 = 9.0;
pub const LISA_REFERENCE_YEARS: f64 = 5.0;

pub const SNIA_ZMIN: f64 = 0.1;
pub const SNIA_ZMAX: f64 = 1.0;
pub const SNIA_REFERENCE_YEARS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramDensity {
    zmin: f64,
    zmax: f64,
    bins_per_unit: f64,
    first_bin: usize,
    /// Normalised so the bins sum to one.
    bins: Vec<f64>,
    total: f64,
    reference_years: f64,
}

impl HistogramDensity {
    fn from_counts(
        counts: &[f64],
        zmin: f64,
        zmax: f64,
        bins_per_unit: f64,
        first_bin: usize,
        reference_years: f64,
    ) -> Self {
        let total: f64 = counts.iter().sum();
        Self {
            zmin,
            zmax,
            bins_per_unit,
            first_bin,
            bins: counts.iter().map(|c| c / total).collect(),
            total,
            reference_years,
        }
    }

    pub fn lisa(population: MbhbPopulation) -> Self {
        let counts: &[f64] = match population {
            MbhbPopulation::PopIii => &LISA_POP_III,
            MbhbPopulation::Delay => &LISA_DELAY,
            MbhbPopulation::NoDelay => &LISA_NO_DELAY,
        };
        Self::from_counts(counts, LISA_ZMIN, LISA_ZMAX, 1.0, 0, LISA_REFERENCE_YEARS)
    }

    pub fn snia() -> Self {
        Self::from_counts(&SNIA_LSST_DDF, SNIA_ZMIN, SNIA_ZMAX, 10.0, 1, SNIA_REFERENCE_YEARS)
    }

    pub fn eval(&self, z: f64) -> f64 {
        if z < self.zmin || z >= self.zmax {
            return 0.0;
        }
        let raw = (z * self.bins_per_unit).floor() as usize;
        let idx = raw.saturating_sub(self.first_bin).min(self.bins.len() - 1);
        self.bins[idx]
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.zmin, self.zmax)
    }

    /// The rejection box always starts at zero so every bin is reachable.
    pub fn codomain(&self) -> (f64, f64) {
        (0.0, self.bins.iter().copied().fold(0.0, f64::max))
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Total published count over the reference time.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn reference_years(&self) -> f64 {
        self.reference_years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalised_bins_sum_to_one() {
        for pop in MbhbPopulation::ALL {
            let h = HistogramDensity::lisa(pop);
            let sum: f64 = h.bins().iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "{pop}: {sum}");
        }
        let sum: f64 = HistogramDensity::snia().bins().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lisa_step_function() {
        let h = HistogramDensity::lisa(MbhbPopulation::PopIii);
        assert!((h.total() - 28.25).abs() < 1e-9);
        assert_eq!(h.eval(0.05), 0.0);
        assert_eq!(h.eval(9.0), 0.0);
        assert!((h.eval(2.7) - 8.169 / 28.25).abs() < 1e-12);
        assert!((h.eval(0.1) - 2.012 / 28.25).abs() < 1e-12);
    }

    #[test]
    fn snia_bins_are_a_tenth_wide() {
        let h = HistogramDensity::snia();
        assert_eq!(h.total(), 8800.0);
        assert!((h.eval(0.1) - 64.0 / 8800.0).abs() < 1e-15);
        assert!((h.eval(0.3) - 480.0 / 8800.0).abs() < 1e-15);
        assert!((h.eval(0.95) - 1130.0 / 8800.0).abs() < 1e-15);
        assert_eq!(h.eval(1.0), 0.0);
        assert_eq!(h.codomain(), (0.0, 2009.0 / 8800.0));
    }
}

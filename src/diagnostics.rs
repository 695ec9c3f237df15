//! Synthetic residual diagnostics for the dashboard.
//!
//! The model ships without its training residuals, so the diagnostic panels
//! render illustrative series instead: a residuals-vs-fitted scatter around a
//! fitted-value sweep, and a normal Q-Q comparison of those residuals. Both
//! are drawn from a seeded RNG, so the series for a given prediction and seed
//! is reproducible frame to frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Points per diagnostic series.
pub const DIAGNOSTIC_SAMPLES: usize = 50;

/// Spread of the illustrative residuals, in GB.
pub const RESIDUAL_STD_GB: f64 = 2.0;

/// Evenly spaced values from `start` to `stop` inclusive.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One standard normal draw via the Box-Muller transform.
fn sample_standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Both diagnostic series for one prediction, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticSeries {
    /// (fitted value, residual) pairs over a sweep from 0 to 1.5x the
    /// prediction.
    pub residuals_vs_fitted: Vec<(f64, f64)>,
    /// (theoretical standard-normal quantile, ordered residual) pairs.
    pub normal_qq: Vec<(f64, f64)>,
}

impl DiagnosticSeries {
    /// Draws both series around `prediction` from a seeded RNG.
    #[must_use]
    pub fn synthesize(prediction: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let span = f64::from(prediction).max(0.0) * 1.5;

        let fitted = linspace(0.0, span, DIAGNOSTIC_SAMPLES);
        let residuals: Vec<f64> = (0..DIAGNOSTIC_SAMPLES)
            .map(|_| sample_standard_normal(&mut rng) * RESIDUAL_STD_GB)
            .collect();

        let residuals_vs_fitted: Vec<(f64, f64)> =
            fitted.into_iter().zip(residuals.iter().copied()).collect();

        let mut ordered = residuals;
        ordered.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut theoretical: Vec<f64> = (0..DIAGNOSTIC_SAMPLES)
            .map(|_| sample_standard_normal(&mut rng))
            .collect();
        theoretical.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let normal_qq: Vec<(f64, f64)> =
            theoretical.into_iter().zip(ordered).collect();

        Self {
            residuals_vs_fitted,
            normal_qq,
        }
    }

    /// Largest absolute residual, for symmetric chart bounds.
    #[must_use]
    pub fn residual_extent(&self) -> f64 {
        self.residuals_vs_fitted
            .iter()
            .map(|(_, r)| r.abs())
            .fold(0.0, f64::max)
    }
}

//! Variance reduction: antithetic pairing and the delta-hedge control variate.
//!
//! # Control variate
//!
//! The hedge statistic of a path stopped at step τ is
//!
//! ```text
//! H = Σ_{i<τ} Δ(S_i, T − t_i) · (e^{−r t_{i+1}} S_{i+1} − e^{−r t_i} S_i)
//! ```
//!
//! The discounted price is a martingale and Δ is known at t_i, so every term
//! has zero conditional mean and E[H] = 0, also for a stopping time τ. The
//! per-path estimator is `discounted payoff + β·H` with β =
//! [`CONTROL_VARIATE_BETA`]; everything is discounted to t = 0 before the
//! sample statistics are taken.

use pricer_models::analytical::closed_form_delta;
use pricer_models::instruments::OptionKind;
use rayon::prelude::*;

use super::config::{SimulationConfig, VarianceReduction};
use super::paths::PricePath;

/// Weight of the hedge statistic in the control-variate estimator.
pub const CONTROL_VARIATE_BETA: f64 = -1.0;

/// Number of independent shock vectors needed for `paths` paths.
///
/// Antithetic sampling draws ⌈M/2⌉ vectors and mirrors each one, so an odd
/// path count is rounded up to the next even number of simulated paths.
#[inline]
pub fn shock_draws(variance_reduction: VarianceReduction, paths: usize) -> usize {
    match variance_reduction {
        VarianceReduction::Antithetic => paths.div_ceil(2),
        VarianceReduction::None | VarianceReduction::ControlVariate => paths,
    }
}

/// Averages column `j` with its mirror `j + pairs`.
///
/// `samples` must hold the base half followed by the mirrored half.
pub fn pair_averages(samples: &[f64]) -> Vec<f64> {
    let pairs = samples.len() / 2;
    let (base, mirrored) = samples.split_at(pairs);
    base.par_iter()
        .zip(mirrored.par_iter())
        .map(|(a, b)| 0.5 * (a + b))
        .collect()
}

/// Discretely rebalanced Black-Scholes delta hedge.
#[derive(Clone, Debug)]
pub struct DeltaHedge {
    strike: f64,
    kind: OptionKind,
    rate: f64,
    volatility: f64,
    maturity: f64,
    dt: f64,
    discounts: Vec<f64>,
}

impl DeltaHedge {
    /// Builds the hedge for a configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let dt = config.dt();
        let discounts = (0..=config.steps())
            .map(|i| (-config.rate() * i as f64 * dt).exp())
            .collect();
        Self {
            strike: config.strike(),
            kind: config.option_kind(),
            rate: config.rate(),
            volatility: config.volatility(),
            maturity: config.maturity(),
            dt,
            discounts,
        }
    }

    /// Hedge statistic of one path (prices at steps `0..=N`) stopped at `stop`.
    pub fn statistic(&self, path: &[f64], stop: usize) -> f64 {
        let mut hedge = 0.0;
        for i in 0..stop {
            let remaining = self.maturity - i as f64 * self.dt;
            let delta = closed_form_delta(
                path[i],
                self.strike,
                self.volatility,
                self.rate,
                remaining,
                self.kind,
            );
            hedge += delta * (self.discounts[i + 1] * path[i + 1] - self.discounts[i] * path[i]);
        }
        hedge
    }

    /// Hedge statistics of every path, each stopped at `stop(path)`.
    pub fn statistics<F>(&self, paths: &PricePath, stop: F) -> Vec<f64>
    where
        F: Fn(usize) -> usize + Sync,
    {
        paths
            .par_paths()
            .enumerate()
            .map(|(m, row)| self.statistic(row, stop(m)))
            .collect()
    }
}

/// Adds β·H to every sample.
pub fn apply_control_variate(samples: &mut [f64], hedge: &[f64]) {
    samples
        .par_iter_mut()
        .zip(hedge.par_iter())
        .for_each(|(s, h)| *s += CONTROL_VARIATE_BETA * h);
}

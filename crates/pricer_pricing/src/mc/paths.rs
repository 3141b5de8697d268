//! Shock generation and GBM path construction.
//!
//! Paths follow the exact log-space discretisation
//!
//! ```text
//! ln S(t+Δt) = ln S(t) + (r − ½σ²)Δt + σ√Δt · Z
//! ```
//!
//! Prices are obtained by exponentiating the cumulative sum of the log
//! increments, so they stay strictly positive.
//!
//! # Memory Layout
//!
//! Both matrices are stored path-major: shocks as
//! `shocks[draw * steps + step]`, prices as `prices[path * (steps + 1) + step]`,
//! with `step = 0` holding the initial spot.
//!
//! # Reproducibility
//!
//! Shocks are drawn in fixed chunks of [`SHOCK_CHUNK`] draws; chunk `c` uses
//! [`PricerRng::substream`]`(seed, c)`. The matrix for a given seed is
//! therefore identical whatever the size of the rayon pool.

use rayon::prelude::*;

use super::config::SimulationConfig;
use super::error::PricingError;
use crate::rng::{PricerRng, ShockDistribution};

/// Number of shock vectors drawn from one substream.
pub const SHOCK_CHUNK: usize = 1024;

/// Parameters of the risk-neutral GBM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Extracts the process parameters from a configuration.
    #[inline]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            spot: config.spot(),
            rate: config.rate(),
            volatility: config.volatility(),
            maturity: config.maturity(),
        }
    }

    /// Log-drift per step, (r − ½σ²)Δt.
    #[inline]
    pub fn drift(&self, dt: f64) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * dt
    }

    /// Diffusion per step, σ√Δt.
    #[inline]
    pub fn diffusion(&self, dt: f64) -> f64 {
        self.volatility * dt.sqrt()
    }
}

/// Matrix of standard shocks, one vector of `steps` shocks per draw.
///
/// Generated once and passed explicitly to every simulation that must share
/// random numbers (for example all reprices of one Greek).
#[derive(Clone, Debug, PartialEq)]
pub struct ShockMatrix {
    steps: usize,
    draws: usize,
    seed: u64,
    values: Vec<f64>,
}

impl ShockMatrix {
    /// Draws `draws` shock vectors of length `steps` from `distribution`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidConfig` for zero steps or draws, or invalid
    /// distribution parameters.
    pub fn generate(
        steps: usize,
        draws: usize,
        seed: u64,
        distribution: &ShockDistribution,
    ) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::invalid("steps", "must be at least 1, got 0"));
        }
        if draws == 0 {
            return Err(PricingError::invalid("paths", "no shock vectors to draw"));
        }
        let sampler = distribution
            .sampler()
            .map_err(|reason| PricingError::invalid("shock_distribution", reason))?;

        let mut values = vec![0.0; steps * draws];
        values
            .par_chunks_mut(SHOCK_CHUNK * steps)
            .enumerate()
            .for_each(|(chunk, block)| {
                PricerRng::substream(seed, chunk as u64).fill_shocks(block, &sampler);
            });

        tracing::trace!(steps, draws, seed, "shock matrix generated");
        Ok(Self {
            steps,
            draws,
            seed,
            values,
        })
    }

    /// Wraps caller-provided shocks laid out as `values[draw * steps + step]`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidConfig` if the length is not a positive multiple
    /// of `steps` or a value is not finite.
    pub fn from_values(steps: usize, values: Vec<f64>) -> Result<Self, PricingError> {
        if steps == 0 || values.is_empty() || values.len() % steps != 0 {
            return Err(PricingError::invalid(
                "shocks",
                format!("{} values do not form vectors of {steps} steps", values.len()),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PricingError::invalid("shocks", "values must be finite"));
        }
        Ok(Self {
            steps,
            draws: values.len() / steps,
            seed: 0,
            values,
        })
    }

    /// Shocks per draw.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of independent shock vectors.
    #[inline]
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Seed the matrix was generated from (0 for caller-provided values).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shock vector of draw `draw`.
    #[inline]
    pub fn draw(&self, draw: usize) -> &[f64] {
        &self.values[draw * self.steps..(draw + 1) * self.steps]
    }

    /// Shock driving the move from `step` to `step + 1` on draw `draw`.
    #[inline]
    pub fn shock(&self, step: usize, draw: usize) -> f64 {
        self.values[draw * self.steps + step]
    }
}

/// Dense (N+1) × M matrix of simulated prices.
///
/// Row 0 is the spot for every path; row `t` is the price at `t · T/N`.
/// Never mutated after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePath {
    steps: usize,
    paths: usize,
    values: Vec<f64>,
}

impl PricePath {
    /// Builds paths from `shocks`.
    ///
    /// With `antithetic` set the path count is `2 · shocks.draws()`: column
    /// `j` uses draw `j` and column `j + draws` uses its negation.
    pub fn simulate(params: &GbmParams, shocks: &ShockMatrix, antithetic: bool) -> Self {
        let steps = shocks.steps();
        let draws = shocks.draws();
        let paths = if antithetic { 2 * draws } else { draws };
        let dt = params.maturity / steps as f64;
        let drift = params.drift(dt);
        let diffusion = params.diffusion(dt);
        let spot = params.spot;

        let mut values = vec![0.0; paths * (steps + 1)];
        values
            .par_chunks_mut(steps + 1)
            .enumerate()
            .for_each(|(path, row)| {
                let (draw, sign) = if path >= draws {
                    (path - draws, -1.0)
                } else {
                    (path, 1.0)
                };
                let z = shocks.draw(draw);

                row[0] = spot;
                let mut log_return = 0.0;
                for (step, shock) in z.iter().enumerate() {
                    log_return += drift + diffusion * sign * shock;
                    row[step + 1] = spot * log_return.exp();
                }
            });

        Self {
            steps,
            paths,
            values,
        }
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of paths M.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.paths
    }

    /// Matrix shape `(N + 1, M)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.steps + 1, self.paths)
    }

    /// Price at `step` on `path`.
    #[inline]
    pub fn price(&self, step: usize, path: usize) -> f64 {
        self.values[path * (self.steps + 1) + step]
    }

    /// Prices of one path, steps `0..=N`.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        let width = self.steps + 1;
        &self.values[path * width..(path + 1) * width]
    }

    /// Terminal price S_N of `path`.
    #[inline]
    pub fn terminal(&self, path: usize) -> f64 {
        self.price(self.steps, path)
    }

    /// Iterator over all paths.
    pub fn iter_paths(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.steps + 1)
    }

    /// Parallel iterator over all paths, in path order.
    pub fn par_paths(&self) -> rayon::slice::ChunksExact<'_, f64> {
        self.values.par_chunks_exact(self.steps + 1)
    }
}

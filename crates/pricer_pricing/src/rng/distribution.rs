//! Shock distributions for path simulation.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal, StudentT};
use serde::{Deserialize, Serialize};

/// Distribution of the per-step shocks `Z`.
///
/// Every variant has zero mean and unit variance, so the GBM drift and
/// diffusion terms keep their meaning. Student-t shocks are rescaled by
/// `sqrt((ν - 2) / ν)`; they fatten the tails of the log returns and are a
/// stress tool rather than a risk-neutral model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShockDistribution {
    /// Standard normal shocks.
    #[default]
    StandardNormal,
    /// Student-t shocks with `degrees_of_freedom > 2`, rescaled to unit variance.
    StudentT {
        /// Degrees of freedom ν.
        degrees_of_freedom: f64,
    },
}

impl ShockDistribution {
    /// Checks the distribution parameters.
    ///
    /// Returns a description of the problem on failure.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            ShockDistribution::StandardNormal => Ok(()),
            ShockDistribution::StudentT { degrees_of_freedom } => {
                if degrees_of_freedom.is_finite() && degrees_of_freedom > 2.0 {
                    Ok(())
                } else {
                    Err(format!(
                        "Student-t degrees of freedom must be finite and > 2, got {degrees_of_freedom}"
                    ))
                }
            }
        }
    }

    /// Builds a sampler for this distribution.
    pub fn sampler(&self) -> Result<ShockSampler, String> {
        self.validate()?;
        match *self {
            ShockDistribution::StandardNormal => Ok(ShockSampler::Normal),
            ShockDistribution::StudentT { degrees_of_freedom } => {
                let dist = StudentT::new(degrees_of_freedom).map_err(|e| e.to_string())?;
                Ok(ShockSampler::StudentT {
                    dist,
                    scale: ((degrees_of_freedom - 2.0) / degrees_of_freedom).sqrt(),
                })
            }
        }
    }
}

/// Ready-to-use sampler built from a [`ShockDistribution`].
#[derive(Clone, Copy, Debug)]
pub enum ShockSampler {
    /// Ziggurat standard normal.
    Normal,
    /// Unit-variance Student-t.
    StudentT {
        /// Underlying Student-t distribution.
        dist: StudentT<f64>,
        /// Rescaling factor to unit variance.
        scale: f64,
    },
}

impl Distribution<f64> for ShockSampler {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ShockSampler::Normal => StandardNormal.sample(rng),
            ShockSampler::StudentT { dist, scale } => scale * dist.sample(rng),
        }
    }
}

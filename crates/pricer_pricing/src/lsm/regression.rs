//! Continuation-value regression.

use pricer_core::math::interpolators::{Extrapolation, Interpolator, LinearInterpolator};
use pricer_core::math::regression::{Smoother, SmootherFit};
use pricer_core::types::RegressionError;

/// Strategy that turns in-the-money observations into a continuation curve.
///
/// Every [`Smoother`] from `pricer_core` is a continuation smoother.
pub trait ContinuationSmoother: Send + Sync {
    /// Fewest observations the fit accepts.
    fn min_observations(&self) -> usize;

    /// Regresses discounted continuation `values` on `spots`.
    fn fit(&self, spots: &[f64], values: &[f64]) -> Result<ContinuationCurve, RegressionError>;
}

impl<T> ContinuationSmoother for T
where
    T: Smoother + Send + Sync,
{
    fn min_observations(&self) -> usize {
        Smoother::min_observations(self)
    }

    fn fit(&self, spots: &[f64], values: &[f64]) -> Result<ContinuationCurve, RegressionError> {
        ContinuationCurve::from_fit(self.smooth(spots, values)?)
    }
}

/// Fitted spot → continuation mapping of one decision step.
#[derive(Clone, Debug)]
pub enum ContinuationCurve {
    /// Piecewise-linear through the fitted values, flat outside the data.
    Interpolated(LinearInterpolator<f64>),
    /// All observations share one spot; the curve is its fitted level.
    Constant(f64),
}

impl ContinuationCurve {
    /// Builds the curve through a smoother's fitted values.
    pub fn from_fit(fit: SmootherFit) -> Result<Self, RegressionError> {
        let (xs, fitted) = fit.into_parts();
        match (xs.first(), xs.last()) {
            (Some(lo), Some(hi)) if lo < hi => LinearInterpolator::new(&xs, &fitted)
                .map(ContinuationCurve::Interpolated)
                .map_err(|e| RegressionError::InvalidInput(e.to_string())),
            (Some(_), Some(_)) => Ok(ContinuationCurve::Constant(
                fitted.iter().sum::<f64>() / fitted.len() as f64,
            )),
            _ => Err(RegressionError::InsufficientData { got: 0, need: 2 }),
        }
    }

    /// Continuation value at `spot` and whether the lookup was extrapolated.
    pub fn evaluate(&self, spot: f64) -> (f64, bool) {
        match self {
            ContinuationCurve::Interpolated(curve) => {
                let extrapolated = !curve.contains(spot);
                // flat evaluation only fails for a non-finite spot: never exercise
                let value = curve
                    .evaluate(spot, Extrapolation::Flat)
                    .unwrap_or(f64::INFINITY);
                (value, extrapolated)
            }
            ContinuationCurve::Constant(value) => (*value, false),
        }
    }

    /// Spot range the curve was trained on.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match self {
            ContinuationCurve::Interpolated(curve) => Some(curve.domain()),
            ContinuationCurve::Constant(_) => None,
        }
    }
}

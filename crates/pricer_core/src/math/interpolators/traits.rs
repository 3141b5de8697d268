//! Interpolator trait and extrapolation policy.

use crate::types::InterpolationError;
use num_traits::Float;

/// Behaviour of an interpolator outside its domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extrapolation {
    /// Reject out-of-domain queries with [`InterpolationError::OutOfBounds`].
    #[default]
    Error,
    /// Hold the nearest boundary value constant.
    Flat,
}

/// One-dimensional interpolator.
///
/// Implementors provide a strict in-domain lookup and their domain; the
/// extrapolating [`evaluate`](Interpolator::evaluate) is derived from those.
pub trait Interpolator<T: Float> {
    /// Interpolates at `x`, failing when `x` is outside [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Returns the closed interval `(x_min, x_max)` covered by the data.
    fn domain(&self) -> (T, T);

    /// Returns `true` when `x` lies inside the domain.
    #[inline]
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// Interpolates at `x`, applying `extrapolation` outside the domain.
    ///
    /// With [`Extrapolation::Flat`] the query is clamped to the domain, so this
    /// never fails for a finite `x`.
    fn evaluate(&self, x: T, extrapolation: Extrapolation) -> Result<T, InterpolationError> {
        match extrapolation {
            Extrapolation::Error => self.interpolate(x),
            Extrapolation::Flat => {
                let (lo, hi) = self.domain();
                self.interpolate(x.max(lo).min(hi))
            }
        }
    }
}

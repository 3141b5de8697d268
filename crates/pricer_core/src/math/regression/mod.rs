//! Scatterplot smoothers used for continuation-value regression.
//!
//! ## Available Smoothers
//!
//! - [`Lowess`]: Cleveland's locally weighted linear regression (tricube kernel,
//!   optional bisquare robustness iterations, delta-anchored evaluation)
//! - [`PolynomialRegression`]: global least-squares polynomial fit
//!
//! Both implement [`Smoother`]: fit on a set of observations and return the
//! fitted values at the (sorted) observation abscissae as a [`SmootherFit`].
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::regression::{PolynomialRegression, Smoother};
//!
//! let xs = [1.0, 2.0, 3.0, 4.0];
//! let ys = [1.0, 4.0, 9.0, 16.0];
//! let fit = PolynomialRegression::new(2).unwrap().smooth(&xs, &ys).unwrap();
//! assert!((fit.fitted()[2] - 9.0).abs() < 1e-9);
//! ```

mod lowess;
mod polynomial;

pub use lowess::Lowess;
pub use polynomial::PolynomialRegression;

use crate::types::RegressionError;

/// Fitted values of a smoother, ordered by ascending abscissa.
#[derive(Clone, Debug, PartialEq)]
pub struct SmootherFit {
    xs: Vec<f64>,
    fitted: Vec<f64>,
}

impl SmootherFit {
    /// Sorted abscissae of the observations.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Fitted values, aligned with [`xs`](Self::xs).
    #[inline]
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    /// Number of fitted points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns `true` when the fit holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Consumes the fit, returning `(xs, fitted)`.
    #[inline]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.xs, self.fitted)
    }
}

/// A scatterplot smoother.
pub trait Smoother {
    /// Minimum number of observations [`smooth`](Smoother::smooth) accepts.
    fn min_observations(&self) -> usize;

    /// Fits `ys` against `xs`.
    ///
    /// # Errors
    ///
    /// - `RegressionError::InsufficientData` below [`min_observations`](Smoother::min_observations)
    /// - `RegressionError::InvalidInput` for mismatched lengths or non-finite data
    /// - `RegressionError::Singular` when a global fit cannot be solved
    fn smooth(&self, xs: &[f64], ys: &[f64]) -> Result<SmootherFit, RegressionError>;
}

/// Validates observations and returns them sorted by abscissa.
fn sorted_observations(
    xs: &[f64],
    ys: &[f64],
    need: usize,
) -> Result<(Vec<f64>, Vec<f64>), RegressionError> {
    if xs.len() != ys.len() {
        return Err(RegressionError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < need {
        return Err(RegressionError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(RegressionError::InvalidInput(
            "observations must be finite".to_string(),
        ));
    }

    let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(pairs.into_iter().unzip())
}

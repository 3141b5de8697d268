//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from interpolation operations
//! - `RegressionError`: Errors from regression and smoothing operations

use thiserror::Error;

/// Interpolation-related errors.
///
/// # Variants
/// - `OutOfBounds`: Query point outside valid interpolation domain
/// - `InsufficientData`: Not enough data points for interpolation
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Regression and smoothing errors.
///
/// Raised by the local (LOWESS) and global (polynomial least-squares)
/// smoothers. Callers in the pricing layer treat every variant as a
/// degenerate regression step rather than a hard failure.
///
/// # Examples
/// ```
/// use pricer_core::types::RegressionError;
///
/// let err = RegressionError::InsufficientData { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("got 1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegressionError {
    /// Fewer observations than the smoother needs.
    #[error("Insufficient observations: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of observations provided
        got: usize,
        /// Minimum number of observations required
        need: usize,
    },

    /// The normal equations could not be solved.
    #[error("Singular design matrix (pivot {pivot:e})")]
    Singular {
        /// Pivot value at which elimination broke down
        pivot: f64,
    },

    /// Invalid smoother settings or observations.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_error_display() {
        let err = InterpolationError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient data points: got 1, need at least 2"
        );

        let err = InterpolationError::InvalidInput("xs and ys differ".to_string());
        assert_eq!(err.to_string(), "Invalid input: xs and ys differ");
    }

    #[test]
    fn test_regression_error_display() {
        let err = RegressionError::Singular { pivot: 0.0 };
        assert_eq!(err.to_string(), "Singular design matrix (pivot 0e0)");

        let err = RegressionError::InvalidInput("frac must lie in (0, 1]".to_string());
        assert!(err.to_string().contains("frac"));
    }
}

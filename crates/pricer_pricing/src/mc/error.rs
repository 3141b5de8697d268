//! Error types for the Monte Carlo pricing engine.
//!
//! Configuration problems are reported before any simulation work starts.
//! Regression degeneracy and out-of-domain continuation lookups are handled
//! inside the LSM engine and only show up in its diagnostics.

use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Pricing engine errors.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingError;
///
/// let err = PricingError::InvalidConfig {
///     field: "volatility",
///     reason: "must be positive and finite, got -0.2".to_string(),
/// };
/// assert!(err.to_string().contains("volatility"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A configuration field failed validation.
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Option kind text outside {call, put}.
    #[error("Invalid option kind: {0}")]
    InvalidOptionKind(String),

    /// A regression step could not produce a continuation estimate.
    ///
    /// Raised inside the LSM engine and resolved there by carrying cash
    /// flows forward; never returned from a pricing call.
    #[error("Degenerate regression at step {step}: {reason}")]
    NumericalDegenerate {
        /// Time step index.
        step: usize,
        /// Why the fit was skipped.
        reason: String,
    },

    /// Model/product combination that the engine does not price.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// The cancellation token fired.
    #[error("Pricing cancelled during {stage}")]
    Cancelled {
        /// Stage at which cancellation was observed.
        stage: &'static str,
    },
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidConfig`].
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::InvalidOptionKind { value } => PricingError::InvalidOptionKind(value),
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        let field = match err {
            AnalyticalError::InvalidSpot { .. } => "spot",
            AnalyticalError::InvalidVolatility { .. } => "volatility",
            AnalyticalError::InvalidRate { .. } => "rate",
        };
        PricingError::InvalidConfig {
            field,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::invalid("paths", "must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration 'paths': must be at least 2, got 1"
        );

        let err = PricingError::Cancelled { stage: "paths" };
        assert_eq!(err.to_string(), "Pricing cancelled during paths");

        let err = PricingError::NumericalDegenerate {
            step: 12,
            reason: "1 in-the-money path".to_string(),
        };
        assert!(err.to_string().contains("step 12"));
    }

    #[test]
    fn test_from_instrument_error() {
        let err: PricingError = "straddle"
            .parse::<pricer_models::instruments::OptionKind>()
            .unwrap_err()
            .into();
        assert_eq!(err, PricingError::InvalidOptionKind("straddle".to_string()));
    }

    #[test]
    fn test_from_analytical_error_names_field() {
        let err: PricingError = AnalyticalError::InvalidVolatility { volatility: 0.0 }.into();
        assert!(matches!(
            err,
            PricingError::InvalidConfig {
                field: "volatility",
                ..
            }
        ));
    }
}

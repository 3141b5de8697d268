//! Finite-difference Greeks with common random numbers.
//!
//! This module provides:
//! - [`GreekEstimator`]: bump-and-revalue driver over the Monte Carlo pricer
//! - [`GreekResult`]: value of one sensitivity with the scheme and bump used
//! - [`Greek`], [`Product`], [`DifferenceScheme`], [`PricingModel`],
//!   [`RandomNumberPolicy`]: closed selector enums
//!
//! Under the default [`RandomNumberPolicy::Common`] one shock matrix is drawn
//! per Greek and every reprice reuses it, so the Monte Carlo noise largely
//! cancels in the difference quotient.

mod config;
mod estimator;
mod result;

pub use config::{DifferenceScheme, Greek, PricingModel, Product, RandomNumberPolicy};
pub use estimator::GreekEstimator;
pub use result::GreekResult;

#[cfg(test)]
mod tests;

//! Greek result type.

use serde::Serialize;

use super::config::{DifferenceScheme, Greek, PricingModel};

/// One estimated sensitivity.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{DifferenceScheme, Greek, GreekResult, PricingModel};
///
/// let result = GreekResult {
///     metric: Greek::Delta,
///     value: 0.637,
///     scheme: Some(DifferenceScheme::Central),
///     bump: Some(0.01),
///     seed: Some(42),
///     reprices: 2,
///     model: PricingModel::MonteCarlo,
/// };
/// assert_eq!(result.metric.to_string(), "delta");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GreekResult {
    /// Estimated sensitivity.
    pub metric: Greek,
    /// Sensitivity value.
    pub value: f64,
    /// Stencil actually used (after any fallback); `None` for closed form.
    pub scheme: Option<DifferenceScheme>,
    /// Absolute bump actually used; `None` for closed form.
    pub bump: Option<f64>,
    /// Seed of the shared shock matrix; `None` for closed form.
    pub seed: Option<u64>,
    /// Number of pricing runs behind the value.
    pub reprices: usize,
    /// Model that produced the value.
    pub model: PricingModel,
}

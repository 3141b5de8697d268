//! # Pricer Engine (Layer 3: Monte Carlo)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing simulates geometric Brownian motion paths and prices
//! options on them:
//! - European and arithmetic-average Asian payoffs (`mc`)
//! - American exercise by Longstaff-Schwartz regression (`lsm`)
//! - Finite-difference Greeks with common random numbers (`greeks`)
//!
//! It builds on Layer 1 (`pricer_core`: interpolation and smoothers) and
//! Layer 2 (`pricer_models`: option kind and Black-Scholes closed forms).
//!
//! ## Determinism
//!
//! Shocks are drawn from seeded substreams in fixed-size chunks and every
//! reduction combines partial sums in a fixed order, so a seeded pricing call
//! returns the same bits on any number of threads.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per pricing call, `trace` per
//! backward-induction step, `warn` for bump fallbacks and option values with
//! no early exercise) and never installs a subscriber.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::greeks::{Greek, Product};
//! use pricer_pricing::mc::{SimulationConfig, VarianceReduction};
//! use pricer_models::instruments::OptionKind;
//!
//! let config = SimulationConfig::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .volatility(0.2)
//!     .rate(0.05)
//!     .maturity(1.0)
//!     .option_kind(OptionKind::Put)
//!     .steps(20)
//!     .paths(10_000)
//!     .variance_reduction(VarianceReduction::Antithetic)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let european = pricer_pricing::price_european(&config).unwrap();
//! let american = pricer_pricing::price_american(&config).unwrap();
//! assert!(american.price >= european.price - 3.0 * european.std_error);
//!
//! let delta = pricer_pricing::greek(Greek::Delta, Product::European, &config, None).unwrap();
//! assert!(delta.value < 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cancel;
pub mod greeks;
pub mod lsm;
pub mod mc;
pub mod rng;

pub use cancel::CancellationToken;
pub use greeks::{Greek, GreekEstimator, GreekResult, Product};
pub use mc::{MonteCarloPricer, PricingError, PricingResult, SimulationConfig, VarianceReduction};

/// Prices the European option described by `config`.
///
/// # Errors
///
/// `PricingError::InvalidConfig` if the configuration is invalid.
pub fn price_european(config: &SimulationConfig) -> Result<PricingResult, PricingError> {
    MonteCarloPricer::new(config.clone())?.price_european()
}

/// Prices the American option described by `config` with the default
/// LOWESS continuation smoother.
///
/// # Errors
///
/// `PricingError::InvalidConfig` if the configuration is invalid.
pub fn price_american(config: &SimulationConfig) -> Result<PricingResult, PricingError> {
    MonteCarloPricer::new(config.clone())?.price_american()
}

/// Prices the arithmetic-average Asian option described by `config`.
///
/// # Errors
///
/// `PricingError::InvalidConfig` if the configuration is invalid.
pub fn price_asian(config: &SimulationConfig) -> Result<PricingResult, PricingError> {
    MonteCarloPricer::new(config.clone())?.price_asian()
}

/// Estimates one Greek by Monte Carlo with common random numbers.
///
/// `bump` is absolute in the metric's unit; `None` selects the default.
///
/// # Errors
///
/// See [`GreekEstimator::estimate`].
pub fn greek(
    metric: Greek,
    product: Product,
    config: &SimulationConfig,
    bump: Option<f64>,
) -> Result<GreekResult, PricingError> {
    GreekEstimator::new().estimate(metric, product, config, bump)
}

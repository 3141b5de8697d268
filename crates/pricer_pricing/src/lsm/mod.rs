//! Longstaff-Schwartz least-squares Monte Carlo for American exercise.
//!
//! # Overview
//!
//! Backward induction over the decision steps `N − 1, …, 1`:
//!
//! 1. collect the in-the-money paths at step `t`
//! 2. regress their cash flows (discounted to `t`) on spot with a
//!    [`ContinuationSmoother`]
//! 3. evaluate the [`ContinuationCurve`] at every path's spot, holding the
//!    boundary value constant outside the training range
//! 4. exercise where the intrinsic value is positive, above continuation
//!    and above the closed-form European value of holding
//!
//! Cash flows live in a [`CashFlowMatrix`] that stores one exercise cell per
//! path. Steps where the regression cannot be fitted carry the existing cash
//! flows forward and are counted in [`LsmDiagnostics`].
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::math::regression::PolynomialRegression;
//! use pricer_pricing::lsm::LsmEngine;
//! use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
//! use pricer_models::instruments::OptionKind;
//!
//! let config = SimulationConfig::builder()
//!     .spot(36.0)
//!     .strike(40.0)
//!     .volatility(0.2)
//!     .rate(0.06)
//!     .maturity(1.0)
//!     .option_kind(OptionKind::Put)
//!     .steps(50)
//!     .paths(4_000)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let pricer = MonteCarloPricer::new(config).unwrap();
//! let shocks = pricer.generate_shocks().unwrap();
//! let engine = LsmEngine::new(PolynomialRegression::new(3).unwrap());
//! let result = pricer.price_american_with(&shocks, &engine).unwrap();
//!
//! // Longstaff and Schwartz (2001), Table 1: 4.478
//! assert!((result.price - 4.478).abs() < 0.25);
//! ```

mod cash_flow;
mod engine;
mod regression;

pub use cash_flow::CashFlowMatrix;
pub use engine::{ExerciseBoundaryPoint, LsmDiagnostics, LsmEngine, LsmOutcome};
pub use regression::{ContinuationCurve, ContinuationSmoother};

//! # Pricer Models (L2: Business Logic)
//!
//! Option contract definitions and closed-form reference formulas.
//!
//! This crate provides:
//! - [`instruments::OptionKind`]: call/put flag with intrinsic value
//! - [`analytical::BlackScholes`]: European prices and Greeks under lognormal dynamics
//! - Standard normal distribution functions used by the closed forms
//!
//! The Monte Carlo engine in `pricer_pricing` uses the closed forms both as
//! the `ClosedForm` pricing model and to compute hedge ratios for the
//! control-variate estimator.
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::OptionKind;
//!
//! let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
//! let call = bs.price(OptionKind::Call, 100.0, 1.0);
//! assert!((call - 10.4506).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;

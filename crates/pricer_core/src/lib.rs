//! # pricer_core: Numerical Foundation for the Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides the
//! numerical building blocks used by the Monte Carlo engine:
//! - One-dimensional interpolation with explicit extrapolation policy (`math::interpolators`)
//! - Local and global regression smoothers (`math::regression`)
//! - Error types: `InterpolationError`, `RegressionError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::interpolators::{Extrapolation, Interpolator, LinearInterpolator};
//! use pricer_core::math::regression::Lowess;
//!
//! let xs = [80.0, 85.0, 90.0, 95.0, 100.0];
//! let ys = [19.0, 14.5, 10.2, 6.1, 2.9];
//!
//! let fit = Lowess::default().smooth(&xs, &ys).unwrap();
//! let curve = LinearInterpolator::new(fit.xs(), fit.fitted()).unwrap();
//!
//! // Flat extrapolation beyond the fitted range
//! let left = curve.evaluate(60.0, Extrapolation::Flat).unwrap();
//! assert_eq!(left, curve.ys()[0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types and smoother settings

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//!
//! ## Core Trait
//!
//! All 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: strict in-domain lookup
//! - `domain() -> (T, T)`: valid interpolation range
//! - `evaluate(x, Extrapolation)`: lookup with an explicit out-of-domain policy
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Extrapolation, Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
//!
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
//! assert!(interp.interpolate(3.0).is_err());
//! assert_eq!(interp.evaluate(3.0, Extrapolation::Flat).unwrap(), 4.0);
//! ```

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::{Extrapolation, Interpolator};

//! Numerical methods.
//!
//! - [`interpolators`]: one-dimensional interpolation with extrapolation policy
//! - [`regression`]: local (LOWESS) and global (polynomial) smoothers

pub mod interpolators;
pub mod regression;

//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for interpolation and regression operations
//!
//! # Re-exports
//!
//! - [`InterpolationError`], [`RegressionError`] from `error`

pub mod error;

pub use error::{InterpolationError, RegressionError};

//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions used as reference values and
//! as hedge ratios inside the Monte Carlo engine:
//! - Black-Scholes prices and Greeks (Delta, Gamma, Vega, Theta)
//! - Standard normal CDF and PDF
//!
//! ## Design Principles
//!
//! - **Double precision CDF**: Hart's rational approximation, accurate to
//!   about 1e-14 over the real line
//! - **Degenerate inputs**: zero time to expiry collapses to intrinsic value

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{closed_form_delta, closed_form_price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;

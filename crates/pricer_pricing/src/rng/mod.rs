//! # Random Number Generation Infrastructure
//!
//! Random number generation for Monte Carlo simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; the same seed gives the
//!   same shocks on any machine and any thread count
//! - **Substreams**: parallel workers never share a generator; chunk `c` of a
//!   simulation draws from [`PricerRng::substream`]`(seed, c)`
//! - **Efficiency**: batch operations fill caller-owned `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`PricerRng`]: seeded PRNG wrapper with substream derivation
//! - [`ShockDistribution`]: distribution of the per-step shocks
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, ShockDistribution};
//!
//! let sampler = ShockDistribution::StandardNormal.sampler().unwrap();
//!
//! // Independent streams for two chunks of the same simulation
//! let mut first = PricerRng::substream(12345, 0);
//! let mut second = PricerRng::substream(12345, 1);
//!
//! let mut buffer = vec![0.0; 1000];
//! first.fill_shocks(&mut buffer, &sampler);
//! second.fill_shocks(&mut buffer, &sampler);
//! ```

mod distribution;
mod prng;

pub use distribution::{ShockDistribution, ShockSampler};
pub use prng::PricerRng;

#[cfg(test)]
mod tests;

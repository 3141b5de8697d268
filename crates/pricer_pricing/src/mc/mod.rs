//! Monte Carlo pricing engine.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── SimulationConfig  (validated inputs, TOML or builder)
//! ├── ShockMatrix       (seeded substreams, fixed chunking)
//! ├── PricePath         ((N+1) × M GBM prices)
//! ├── payoff            (discounted European / Asian payoffs)
//! ├── variance          (antithetic pairs, delta-hedge control variate)
//! └── Estimate          (deterministic parallel mean / standard error)
//! ```
//!
//! American exercise is priced by [`crate::lsm`] on the same paths.
//!
//! # Example
//!
//! ```rust
//! use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig, VarianceReduction};
//!
//! let config = SimulationConfig::from_toml_str(
//!     r#"
//!     spot = 100.0
//!     strike = 95.0
//!     volatility = 0.25
//!     rate = 0.03
//!     maturity = 0.5
//!     option_kind = "put"
//!     steps = 20
//!     paths = 10000
//!     seed = 9
//!     variance_reduction = "antithetic"
//!     "#,
//! )
//! .unwrap();
//!
//! let result = MonteCarloPricer::new(config).unwrap().price_european().unwrap();
//! assert_eq!(result.variance_reduction, VarianceReduction::Antithetic);
//! assert!(result.price > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod paths;
pub mod payoff;
pub mod pricer;
pub mod variance;

pub use config::{SimulationConfig, SimulationConfigBuilder, VarianceReduction};
pub use error::PricingError;
pub use estimator::Estimate;
pub use paths::{GbmParams, PricePath, ShockMatrix};
pub use pricer::{MonteCarloPricer, PricingResult};
pub use crate::rng::ShockDistribution;

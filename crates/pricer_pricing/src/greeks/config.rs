//! Greek selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mc::PricingError;

/// Sensitivity to estimate.
///
/// | Greek | Bumped input | Default bump | Default scheme |
/// |-------|--------------|--------------|----------------|
/// | `Delta` | spot | 0.01 | central |
/// | `Gamma` | spot | 0.01 | central |
/// | `Theta` | maturity | T / N | backward |
/// | `Vega` | volatility | σ · T / N | central |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Greek {
    /// ∂V/∂S.
    Delta,
    /// ∂²V/∂S².
    Gamma,
    /// Calendar decay −∂V/∂T.
    Theta,
    /// ∂V/∂σ.
    Vega,
}

impl Greek {
    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Theta => "theta",
            Greek::Vega => "vega",
        }
    }

    /// Scheme used when none is requested.
    pub fn default_scheme(&self) -> DifferenceScheme {
        match self {
            Greek::Theta => DifferenceScheme::Backward,
            Greek::Delta | Greek::Gamma | Greek::Vega => DifferenceScheme::Central,
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Greek {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delta" => Ok(Greek::Delta),
            "gamma" => Ok(Greek::Gamma),
            "theta" => Ok(Greek::Theta),
            "vega" => Ok(Greek::Vega),
            _ => Err(PricingError::invalid(
                "metric",
                format!("unknown greek '{s}'"),
            )),
        }
    }
}

/// Finite-difference stencil.
///
/// For theta the direction refers to calendar time: `Backward` shortens the
/// maturity, `Forward` lengthens it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScheme {
    /// Uses the input and the input plus the bump.
    Forward,
    /// Uses the input plus and minus the bump.
    Central,
    /// Uses the input and the input minus the bump.
    Backward,
}

/// How reprices of one Greek draw their shocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomNumberPolicy {
    /// One shock matrix shared by every reprice.
    #[default]
    Common,
    /// A fresh seed per reprice. Only useful to measure what `Common` saves.
    Independent,
}

/// Valuation model behind a Greek.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Bump-and-revalue on the Monte Carlo pricer.
    #[default]
    MonteCarlo,
    /// Black-Scholes closed form, European products only.
    ClosedForm,
    /// Binomial lattice; not implemented.
    Lattice,
}

/// Priced product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Exercise at maturity on the terminal price.
    European,
    /// Exercise at any step, priced by least-squares Monte Carlo.
    American,
    /// Exercise at maturity on the arithmetic average of all N + 1 prices.
    AsianArithmetic,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Product::European => "european",
            Product::American => "american",
            Product::AsianArithmetic => "asian_arithmetic",
        })
    }
}

//! Monte Carlo simulation configuration.
//!
//! [`SimulationConfig`] is an immutable value object carrying every input of
//! a pricing call. It is built through [`SimulationConfigBuilder`], either in
//! code or from a TOML document; both routes run the same validation.

use pricer_models::instruments::OptionKind;
use serde::{Deserialize, Serialize};

use super::error::PricingError;
use crate::rng::ShockDistribution;

/// Default number of time steps.
pub const DEFAULT_STEPS: usize = 1000;

/// Default number of simulated paths.
pub const DEFAULT_PATHS: usize = 10_000;

/// Variance reduction technique. Only one is active at a time.
///
/// - `None`: plain Monte Carlo
/// - `Antithetic`: every shock vector is also simulated negated; pair
///   averages are the samples
/// - `ControlVariate`: a discretely rebalanced Black-Scholes delta hedge is
///   combined with the payoff
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceReduction {
    /// Plain Monte Carlo.
    #[default]
    None,
    /// Antithetic variates.
    Antithetic,
    /// Delta-hedge control variate.
    ControlVariate,
}

/// Monte Carlo simulation configuration.
///
/// Use [`SimulationConfig::builder`] or [`SimulationConfig::from_toml_str`]
/// to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationConfig, VarianceReduction};
/// use pricer_models::instruments::OptionKind;
///
/// let config = SimulationConfig::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .volatility(0.2)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_kind(OptionKind::Put)
///     .steps(50)
///     .paths(20_000)
///     .variance_reduction(VarianceReduction::Antithetic)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 50);
/// assert!((config.dt() - 0.02).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimulationConfigBuilder")]
pub struct SimulationConfig {
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    maturity: f64,
    option_kind: OptionKind,
    steps: usize,
    paths: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    variance_reduction: VarianceReduction,
    shock_distribution: ShockDistribution,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Parses and validates a TOML document.
    ///
    /// ```rust
    /// use pricer_pricing::mc::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_toml_str(r#"
    ///     spot = 100.0
    ///     strike = 95.0
    ///     volatility = 0.25
    ///     rate = 0.03
    ///     maturity = 0.5
    ///     option_kind = "put"
    ///     variance_reduction = "antithetic"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.paths(), 10_000);
    /// ```
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidConfig` with field `"document"` for malformed
    /// TOML or unknown keys; otherwise the same errors as
    /// [`SimulationConfigBuilder::build`].
    pub fn from_toml_str(document: &str) -> Result<Self, PricingError> {
        let builder: SimulationConfigBuilder = toml::from_str(document)
            .map_err(|e| PricingError::invalid("document", e.to_string()))?;
        builder.build()
    }

    /// Returns a builder pre-populated with this configuration.
    #[inline]
    pub fn to_builder(&self) -> SimulationConfigBuilder {
        SimulationConfigBuilder {
            spot: Some(self.spot),
            strike: Some(self.strike),
            volatility: Some(self.volatility),
            rate: Some(self.rate),
            maturity: Some(self.maturity),
            option_kind: Some(self.option_kind.as_str().to_string()),
            steps: Some(self.steps),
            paths: Some(self.paths),
            seed: self.seed,
            variance_reduction: self.variance_reduction,
            shock_distribution: self.shock_distribution,
        }
    }

    /// Returns a copy with the seed fixed.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Initial spot price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Volatility σ (annualised).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free rate r (annualised, continuously compounded).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Maturity T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Call or put.
    #[inline]
    pub fn option_kind(&self) -> OptionKind {
        self.option_kind
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Requested number of paths M.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Variance reduction technique.
    #[inline]
    pub fn variance_reduction(&self) -> VarianceReduction {
        self.variance_reduction
    }

    /// Distribution of the per-step shocks.
    #[inline]
    pub fn shock_distribution(&self) -> ShockDistribution {
        self.shock_distribution
    }

    /// Step length Δt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    /// Time of step `step`, t = step · Δt.
    #[inline]
    pub fn time(&self, step: usize) -> f64 {
        step as f64 * self.dt()
    }

    /// Discount factor to t = 0 from maturity, e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// One-step discount factor e^(−rΔt).
    #[inline]
    pub fn step_discount(&self) -> f64 {
        (-self.rate * self.dt()).exp()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfig` if:
    /// - spot, strike, volatility or maturity is not positive and finite
    /// - rate is not finite
    /// - steps < 1 or paths < 2
    /// - the shock distribution parameters are invalid
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("spot", self.spot)?;
        positive("strike", self.strike)?;
        positive("volatility", self.volatility)?;
        positive("maturity", self.maturity)?;
        if !self.rate.is_finite() {
            return Err(PricingError::invalid(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if self.steps < 1 {
            return Err(PricingError::invalid("steps", "must be at least 1, got 0"));
        }
        if self.paths < 2 {
            return Err(PricingError::invalid(
                "paths",
                format!("must be at least 2, got {}", self.paths),
            ));
        }
        self.shock_distribution
            .validate()
            .map_err(|reason| PricingError::invalid("shock_distribution", reason))
    }
}

impl TryFrom<SimulationConfigBuilder> for SimulationConfig {
    type Error = PricingError;

    fn try_from(builder: SimulationConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(
            field,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Builder for [`SimulationConfig`].
///
/// Spot, strike, volatility, rate, maturity and option kind are required;
/// steps default to 1000, paths to 10 000, variance reduction to none and
/// shocks to standard normal.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfigBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    volatility: Option<f64>,
    rate: Option<f64>,
    maturity: Option<f64>,
    option_kind: Option<String>,
    steps: Option<usize>,
    paths: Option<usize>,
    seed: Option<u64>,
    #[serde(default)]
    variance_reduction: VarianceReduction,
    #[serde(default)]
    shock_distribution: ShockDistribution,
}

impl SimulationConfigBuilder {
    /// Sets the initial spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the option kind.
    #[inline]
    pub fn option_kind(mut self, kind: OptionKind) -> Self {
        self.option_kind = Some(kind.as_str().to_string());
        self
    }

    /// Sets the option kind from text ("call" or "put", any case).
    ///
    /// The text is parsed by [`build`](Self::build), which reports
    /// `PricingError::InvalidOptionKind` for anything else.
    #[inline]
    pub fn option_kind_name(mut self, name: impl Into<String>) -> Self {
        self.option_kind = Some(name.into());
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the number of paths.
    #[inline]
    pub fn paths(mut self, paths: usize) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clears the seed; a fresh one is drawn per pricing call.
    #[inline]
    pub fn random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Sets the variance reduction technique.
    #[inline]
    pub fn variance_reduction(mut self, variance_reduction: VarianceReduction) -> Self {
        self.variance_reduction = variance_reduction;
        self
    }

    /// Sets the shock distribution.
    #[inline]
    pub fn shock_distribution(mut self, shock_distribution: ShockDistribution) -> Self {
        self.shock_distribution = shock_distribution;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidConfig` for a missing required field or any
    ///   failure of [`SimulationConfig::validate`]
    /// - `PricingError::InvalidOptionKind` for option kind text outside {call, put}
    pub fn build(self) -> Result<SimulationConfig, PricingError> {
        let option_kind: OptionKind = required("option_kind", self.option_kind)?.parse()?;

        let config = SimulationConfig {
            spot: required("spot", self.spot)?,
            strike: required("strike", self.strike)?,
            volatility: required("volatility", self.volatility)?,
            rate: required("rate", self.rate)?,
            maturity: required("maturity", self.maturity)?,
            option_kind,
            steps: self.steps.unwrap_or(DEFAULT_STEPS),
            paths: self.paths.unwrap_or(DEFAULT_PATHS),
            seed: self.seed,
            variance_reduction: self.variance_reduction,
            shock_distribution: self.shock_distribution,
        };

        config.validate()?;
        Ok(config)
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, PricingError> {
    value.ok_or_else(|| PricingError::invalid(field, "must be specified"))
}

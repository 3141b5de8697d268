//! Bump-and-revalue Greek estimation.

use pricer_core::math::regression::Lowess;
use pricer_models::analytical::BlackScholes;

use super::config::{DifferenceScheme, Greek, PricingModel, Product, RandomNumberPolicy};
use super::result::GreekResult;
use crate::cancel::CancellationToken;
use crate::lsm::LsmEngine;
use crate::mc::{MonteCarloPricer, PricingError, ShockMatrix, SimulationConfig, SimulationConfigBuilder};

/// Default absolute spot bump for delta and gamma.
pub const DEFAULT_SPOT_BUMP: f64 = 0.01;

/// Finite-difference Greek estimator.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | model | [`PricingModel::MonteCarlo`] |
/// | random numbers | [`RandomNumberPolicy::Common`] |
/// | scheme | per metric, see [`Greek::default_scheme`] |
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{Greek, GreekEstimator, Product};
/// use pricer_pricing::mc::SimulationConfig;
/// use pricer_models::instruments::OptionKind;
///
/// let config = SimulationConfig::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .volatility(0.2)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_kind(OptionKind::Call)
///     .steps(10)
///     .paths(20_000)
///     .seed(1)
///     .build()
///     .unwrap();
///
/// let delta = GreekEstimator::default()
///     .estimate(Greek::Delta, Product::European, &config, None)
///     .unwrap();
/// assert!((delta.value - 0.6368).abs() < 0.02);
/// assert_eq!(delta.reprices, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GreekEstimator {
    model: PricingModel,
    policy: RandomNumberPolicy,
    scheme: Option<DifferenceScheme>,
    cancel: CancellationToken,
}

impl GreekEstimator {
    /// Creates an estimator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the valuation model.
    pub fn with_model(mut self, model: PricingModel) -> Self {
        self.model = model;
        self
    }

    /// Selects how reprices draw their shocks.
    pub fn with_policy(mut self, policy: RandomNumberPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the per-metric default stencil.
    pub fn with_scheme(mut self, scheme: DifferenceScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Attaches a cancellation token checked before every reprice.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Estimates `metric` of `product` under `config`.
    ///
    /// `bump` is an absolute bump in the metric's unit; `None` selects the
    /// metric default (see [`Greek`]).
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidConfig` (field `bump`) for a non-positive or
    ///   non-finite bump, or a spot bump reaching zero
    /// - `PricingError::UnsupportedModel` for the lattice model, or the
    ///   closed form on a non-European product
    /// - `PricingError::Cancelled` if the token fires
    pub fn estimate(
        &self,
        metric: Greek,
        product: Product,
        config: &SimulationConfig,
        bump: Option<f64>,
    ) -> Result<GreekResult, PricingError> {
        if let Some(h) = bump {
            if !(h > 0.0 && h.is_finite()) {
                return Err(PricingError::invalid(
                    "bump",
                    format!("must be positive and finite, got {h}"),
                ));
            }
        }

        match self.model {
            PricingModel::MonteCarlo => self.monte_carlo(metric, product, config, bump),
            PricingModel::ClosedForm => closed_form(metric, product, config),
            PricingModel::Lattice => Err(PricingError::UnsupportedModel(
                "lattice pricing is not implemented".to_string(),
            )),
        }
    }

    fn monte_carlo(
        &self,
        metric: Greek,
        product: Product,
        config: &SimulationConfig,
        bump: Option<f64>,
    ) -> Result<GreekResult, PricingError> {
        let seed = match config.seed() {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::debug!(seed, "no seed configured, drew a fresh one");
                seed
            }
        };
        let base = config.with_seed(seed);

        let shocks = match self.policy {
            RandomNumberPolicy::Common => Some(
                MonteCarloPricer::new(base.clone())?
                    .with_cancellation(self.cancel.clone())
                    .generate_shocks()?,
            ),
            RandomNumberPolicy::Independent => None,
        };
        let mut repricer = Repricer {
            product,
            seed,
            shocks,
            cancel: &self.cancel,
            runs: 0,
        };

        let scheme = self.scheme.unwrap_or_else(|| metric.default_scheme());
        let (value, scheme, h) = match metric {
            Greek::Delta => {
                let h = bump.unwrap_or(DEFAULT_SPOT_BUMP);
                let s = base.spot();
                let value = match scheme {
                    DifferenceScheme::Forward => {
                        let up = repricer.price(bumped(&base, |b| b.spot(s + h))?)?;
                        let mid = repricer.price(base.clone())?;
                        (up - mid) / h
                    }
                    DifferenceScheme::Central => {
                        spot_floor(s - h, h)?;
                        let up = repricer.price(bumped(&base, |b| b.spot(s + h))?)?;
                        let down = repricer.price(bumped(&base, |b| b.spot(s - h))?)?;
                        (up - down) / (2.0 * h)
                    }
                    DifferenceScheme::Backward => {
                        spot_floor(s - h, h)?;
                        let mid = repricer.price(base.clone())?;
                        let down = repricer.price(bumped(&base, |b| b.spot(s - h))?)?;
                        (mid - down) / h
                    }
                };
                (value, scheme, h)
            }
            Greek::Gamma => {
                let h = bump.unwrap_or(DEFAULT_SPOT_BUMP);
                let s = base.spot();
                let (upper, lower) = match scheme {
                    DifferenceScheme::Forward => (s + 2.0 * h, s),
                    DifferenceScheme::Central => (s + h, s - h),
                    DifferenceScheme::Backward => (s, s - 2.0 * h),
                };
                spot_floor(lower, h)?;
                let middle = lower + h;
                let up = repricer.price(bumped(&base, |b| b.spot(upper))?)?;
                let mid = repricer.price(bumped(&base, |b| b.spot(middle))?)?;
                let down = repricer.price(bumped(&base, |b| b.spot(lower))?)?;
                ((up - 2.0 * mid + down) / (h * h), scheme, h)
            }
            Greek::Theta => {
                let t = base.maturity();
                let h = bump.unwrap_or(t / base.steps() as f64);
                let scheme = match scheme {
                    DifferenceScheme::Backward | DifferenceScheme::Central if t - h <= 0.0 => {
                        tracing::warn!(
                            maturity = t,
                            bump = h,
                            "theta bump reaches expiry, using forward difference"
                        );
                        DifferenceScheme::Forward
                    }
                    other => other,
                };
                let value = match scheme {
                    DifferenceScheme::Backward => {
                        let sooner = repricer.price(bumped(&base, |b| b.maturity(t - h))?)?;
                        let now = repricer.price(base.clone())?;
                        (sooner - now) / h
                    }
                    DifferenceScheme::Forward => {
                        let now = repricer.price(base.clone())?;
                        let later = repricer.price(bumped(&base, |b| b.maturity(t + h))?)?;
                        (now - later) / h
                    }
                    DifferenceScheme::Central => {
                        let sooner = repricer.price(bumped(&base, |b| b.maturity(t - h))?)?;
                        let later = repricer.price(bumped(&base, |b| b.maturity(t + h))?)?;
                        (sooner - later) / (2.0 * h)
                    }
                };
                (value, scheme, h)
            }
            Greek::Vega => {
                let sigma = base.volatility();
                let h = bump.unwrap_or(sigma * base.maturity() / base.steps() as f64);
                let scheme = match scheme {
                    DifferenceScheme::Backward | DifferenceScheme::Central if sigma - h <= 0.0 => {
                        tracing::warn!(
                            volatility = sigma,
                            bump = h,
                            "vega bump reaches zero volatility, using forward difference"
                        );
                        DifferenceScheme::Forward
                    }
                    other => other,
                };
                let value = match scheme {
                    DifferenceScheme::Forward => {
                        let up = repricer.price(bumped(&base, |b| b.volatility(sigma + h))?)?;
                        let mid = repricer.price(base.clone())?;
                        (up - mid) / h
                    }
                    DifferenceScheme::Central => {
                        let up = repricer.price(bumped(&base, |b| b.volatility(sigma + h))?)?;
                        let down = repricer.price(bumped(&base, |b| b.volatility(sigma - h))?)?;
                        (up - down) / (2.0 * h)
                    }
                    DifferenceScheme::Backward => {
                        let mid = repricer.price(base.clone())?;
                        let down = repricer.price(bumped(&base, |b| b.volatility(sigma - h))?)?;
                        (mid - down) / h
                    }
                };
                (value, scheme, h)
            }
        };

        tracing::debug!(
            metric = %metric,
            product = %product,
            value,
            bump = h,
            seed,
            reprices = repricer.runs,
            "greek estimated"
        );
        Ok(GreekResult {
            metric,
            value,
            scheme: Some(scheme),
            bump: Some(h),
            seed: Some(seed),
            reprices: repricer.runs,
            model: PricingModel::MonteCarlo,
        })
    }
}

/// Prices one product repeatedly, counting the runs.
struct Repricer<'a> {
    product: Product,
    seed: u64,
    shocks: Option<ShockMatrix>,
    cancel: &'a CancellationToken,
    runs: usize,
}

impl Repricer<'_> {
    fn price(&mut self, config: SimulationConfig) -> Result<f64, PricingError> {
        self.cancel.check("greek reprice")?;
        let config = match self.shocks {
            Some(_) => config,
            None => config.with_seed(independent_seed(self.seed, self.runs)),
        };
        let pricer = MonteCarloPricer::new(config)?.with_cancellation(self.cancel.clone());
        let generated;
        let shocks = match &self.shocks {
            Some(shocks) => shocks,
            None => {
                generated = pricer.generate_shocks()?;
                &generated
            }
        };

        let result = match self.product {
            Product::European => pricer.price_european_with(shocks)?,
            Product::AsianArithmetic => pricer.price_asian_with(shocks)?,
            Product::American => {
                pricer.price_american_with(shocks, &LsmEngine::<Lowess>::default())?
            }
        };
        self.runs += 1;
        Ok(result.price)
    }
}

fn independent_seed(seed: u64, run: usize) -> u64 {
    seed ^ (run as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn bumped<F>(base: &SimulationConfig, bump: F) -> Result<SimulationConfig, PricingError>
where
    F: FnOnce(SimulationConfigBuilder) -> SimulationConfigBuilder,
{
    bump(base.to_builder()).build()
}

/// Rejects a spot bump whose lowest repriced spot is not positive.
fn spot_floor(lowest: f64, h: f64) -> Result<(), PricingError> {
    if lowest > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(
            "bump",
            format!("bump {h} takes the spot to {lowest}"),
        ))
    }
}

fn closed_form(
    metric: Greek,
    product: Product,
    config: &SimulationConfig,
) -> Result<GreekResult, PricingError> {
    if product != Product::European {
        return Err(PricingError::UnsupportedModel(format!(
            "closed form is only available for european options, got {product}"
        )));
    }

    let bs = BlackScholes::new(config.spot(), config.rate(), config.volatility())?;
    let (kind, strike, expiry) = (config.option_kind(), config.strike(), config.maturity());
    let value = match metric {
        Greek::Delta => bs.delta(kind, strike, expiry),
        Greek::Gamma => bs.gamma(strike, expiry),
        Greek::Theta => bs.theta(kind, strike, expiry),
        Greek::Vega => bs.vega(strike, expiry),
    };
    Ok(GreekResult {
        metric,
        value,
        scheme: None,
        bump: None,
        seed: None,
        reprices: 0,
        model: PricingModel::ClosedForm,
    })
}

//! Monte Carlo pricing orchestration.
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Shock generation (via [`ShockMatrix::generate`])
//! 2. Path construction (via [`PricePath::simulate`])
//! 3. Per-path discounted payoffs, or backward induction for American exercise
//! 4. Variance reduction and aggregation (via [`Estimate`])
//!
//! Every `price_*` method has a `price_*_with` variant taking an explicit
//! [`ShockMatrix`]; repricing with the same matrix under bumped parameters
//! gives common random numbers.

use pricer_core::math::regression::Lowess;
use serde::Serialize;

use super::config::{SimulationConfig, VarianceReduction};
use super::error::PricingError;
use super::estimator::Estimate;
use super::paths::{GbmParams, PricePath, ShockMatrix};
use super::payoff::{asian_payoffs, european_payoffs};
use super::variance::{apply_control_variate, pair_averages, shock_draws, DeltaHedge};
use crate::cancel::CancellationToken;
use crate::lsm::{ContinuationSmoother, ExerciseBoundaryPoint, LsmDiagnostics, LsmEngine};

/// Outcome of a pricing call.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PricingResult, VarianceReduction};
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     std_dev: 15.8,
///     seed: 42,
///     n_paths: 100_000,
///     variance_reduction: VarianceReduction::None,
///     exercise_boundary: None,
///     diagnostics: None,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Sample standard deviation of the per-path (or per-pair) samples.
    pub std_dev: f64,
    /// Seed the shocks were drawn from.
    pub seed: u64,
    /// Simulated paths, including antithetic mirrors.
    pub n_paths: usize,
    /// Variance reduction applied.
    pub variance_reduction: VarianceReduction,
    /// Exercise boundary, American engine only.
    pub exercise_boundary: Option<Vec<ExerciseBoundaryPoint>>,
    /// Backward-induction counters, American engine only.
    pub diagnostics: Option<LsmDiagnostics>,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricing engine for one [`SimulationConfig`].
///
/// A missing seed is drawn once at construction; every pricing call of the
/// same pricer reuses it.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
/// use pricer_models::instruments::OptionKind;
///
/// let config = SimulationConfig::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .volatility(0.2)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_kind(OptionKind::Call)
///     .steps(12)
///     .paths(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(config).unwrap();
/// let result = pricer.price_european().unwrap();
/// assert!((result.price - 10.4506).abs() < 4.0 * result.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: SimulationConfig,
    seed: u64,
    cancel: CancellationToken,
}

impl MonteCarloPricer {
    /// Creates a pricer, resolving the seed.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, PricingError> {
        config.validate()?;
        let seed = match config.seed() {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                tracing::debug!(seed, "no seed configured, drew a fresh one");
                seed
            }
        };
        Ok(Self {
            config,
            seed,
            cancel: CancellationToken::new(),
        })
    }

    /// Attaches a cancellation token checked between stages.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed used for shock generation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shock vectors one pricing call needs.
    #[inline]
    pub fn shock_draws(&self) -> usize {
        shock_draws(self.config.variance_reduction(), self.config.paths())
    }

    /// Draws the shock matrix for this configuration and seed.
    pub fn generate_shocks(&self) -> Result<ShockMatrix, PricingError> {
        self.cancel.check("shocks")?;
        ShockMatrix::generate(
            self.config.steps(),
            self.shock_draws(),
            self.seed,
            &self.config.shock_distribution(),
        )
    }

    /// Builds the price paths driven by `shocks`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidConfig` (field `shocks`) if the matrix does not
    /// match the configured steps and draws.
    pub fn simulate_paths(&self, shocks: &ShockMatrix) -> Result<PricePath, PricingError> {
        if shocks.steps() != self.config.steps() || shocks.draws() != self.shock_draws() {
            return Err(PricingError::invalid(
                "shocks",
                format!(
                    "expected {} draws of {} steps, got {} draws of {} steps",
                    self.shock_draws(),
                    self.config.steps(),
                    shocks.draws(),
                    shocks.steps()
                ),
            ));
        }
        self.cancel.check("paths")?;
        let antithetic = self.config.variance_reduction() == VarianceReduction::Antithetic;
        Ok(PricePath::simulate(
            &GbmParams::from_config(&self.config),
            shocks,
            antithetic,
        ))
    }

    /// Prices the European option.
    pub fn price_european(&self) -> Result<PricingResult, PricingError> {
        let shocks = self.generate_shocks()?;
        self.price_european_with(&shocks)
    }

    /// Prices the European option on the given shocks.
    pub fn price_european_with(&self, shocks: &ShockMatrix) -> Result<PricingResult, PricingError> {
        let paths = self.simulate_paths(shocks)?;
        self.cancel.check("payoff")?;
        let samples = european_payoffs(
            &paths,
            self.config.option_kind(),
            self.config.strike(),
            self.config.discount_factor(),
        );
        let result = self.aggregate(samples, &paths, None);
        tracing::debug!(
            product = "european",
            price = result.price,
            std_error = result.std_error,
            seed = result.seed,
            "priced"
        );
        Ok(result)
    }

    /// Prices the arithmetic-average Asian option.
    pub fn price_asian(&self) -> Result<PricingResult, PricingError> {
        let shocks = self.generate_shocks()?;
        self.price_asian_with(&shocks)
    }

    /// Prices the arithmetic-average Asian option on the given shocks.
    pub fn price_asian_with(&self, shocks: &ShockMatrix) -> Result<PricingResult, PricingError> {
        let paths = self.simulate_paths(shocks)?;
        self.cancel.check("payoff")?;
        let samples = asian_payoffs(
            &paths,
            self.config.option_kind(),
            self.config.strike(),
            self.config.discount_factor(),
        );
        let result = self.aggregate(samples, &paths, None);
        tracing::debug!(
            product = "asian_arithmetic",
            price = result.price,
            std_error = result.std_error,
            seed = result.seed,
            "priced"
        );
        Ok(result)
    }

    /// Prices the American option with the default LOWESS engine.
    pub fn price_american(&self) -> Result<PricingResult, PricingError> {
        let shocks = self.generate_shocks()?;
        self.price_american_with(&shocks, &LsmEngine::<Lowess>::default())
    }

    /// Prices the American option on the given shocks with `engine`.
    pub fn price_american_with<S: ContinuationSmoother>(
        &self,
        shocks: &ShockMatrix,
        engine: &LsmEngine<S>,
    ) -> Result<PricingResult, PricingError> {
        let paths = self.simulate_paths(shocks)?;
        let outcome = engine.run(
            &paths,
            &GbmParams::from_config(&self.config),
            self.config.option_kind(),
            self.config.strike(),
            &self.cancel,
        )?;

        let mut result = self.aggregate(outcome.samples, &paths, Some(outcome.exercise_steps.as_slice()));
        result.exercise_boundary = Some(outcome.exercise_boundary);
        result.diagnostics = Some(outcome.diagnostics);
        tracing::debug!(
            product = "american",
            price = result.price,
            std_error = result.std_error,
            seed = result.seed,
            degenerate_steps = outcome.diagnostics.degenerate_steps,
            extrapolated_lookups = outcome.diagnostics.extrapolated_lookups,
            "priced"
        );
        Ok(result)
    }

    /// Applies variance reduction to discounted per-path samples and
    /// computes the statistics. `stops` holds per-path exercise steps.
    fn aggregate(&self, mut samples: Vec<f64>, paths: &PricePath, stops: Option<&[usize]>) -> PricingResult {
        let variance_reduction = self.config.variance_reduction();
        match variance_reduction {
            VarianceReduction::None => {}
            VarianceReduction::Antithetic => samples = pair_averages(&samples),
            VarianceReduction::ControlVariate => {
                let steps = paths.steps();
                let hedge = DeltaHedge::from_config(&self.config)
                    .statistics(paths, |m| stops.map_or(steps, |s| s[m]));
                apply_control_variate(&mut samples, &hedge);
            }
        }

        let estimate = Estimate::from_samples(&samples);
        PricingResult {
            price: estimate.mean,
            std_error: estimate.std_error,
            std_dev: estimate.std_dev,
            seed: self.seed,
            n_paths: paths.n_paths(),
            variance_reduction,
            exercise_boundary: None,
            diagnostics: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::OptionKind;

    fn builder(kind: OptionKind) -> crate::mc::SimulationConfigBuilder {
        SimulationConfig::builder()
            .spot(100.0)
            .strike(100.0)
            .volatility(0.2)
            .rate(0.05)
            .maturity(1.0)
            .option_kind(kind)
            .steps(10)
            .paths(20_000)
            .seed(42)
    }

    fn price(builder: crate::mc::SimulationConfigBuilder) -> PricingResult {
        MonteCarloPricer::new(builder.build().unwrap())
            .unwrap()
            .price_european()
            .unwrap()
    }

    #[test]
    fn test_european_matches_black_scholes() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        for kind in [OptionKind::Call, OptionKind::Put] {
            let result = price(builder(kind));
            let reference = bs.price(kind, 100.0, 1.0);
            assert!(
                (result.price - reference).abs() < 3.0 * result.std_error,
                "{kind}: {} vs {reference}",
                result.price
            );
            assert_eq!(result.n_paths, 20_000);
            assert_eq!(result.seed, 42);
            assert!(result.exercise_boundary.is_none());
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let a = price(builder(OptionKind::Call));
        let b = price(builder(OptionKind::Call));
        assert_eq!(a.price.to_bits(), b.price.to_bits());
        assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());
    }

    #[test]
    fn test_absent_seed_is_drawn_and_reported() {
        let config = builder(OptionKind::Call).paths(1_000).build().unwrap();
        let config = config.to_builder().random_seed().build().unwrap();
        let pricer = MonteCarloPricer::new(config.clone()).unwrap();
        let result = pricer.price_european().unwrap();
        assert_eq!(result.seed, pricer.seed());

        let replay = MonteCarloPricer::new(config.with_seed(result.seed))
            .unwrap()
            .price_european()
            .unwrap();
        assert_eq!(replay.price.to_bits(), result.price.to_bits());
    }

    #[test]
    fn test_antithetic_rounds_odd_path_count_up() {
        let result = price(
            builder(OptionKind::Call)
                .paths(1_001)
                .variance_reduction(VarianceReduction::Antithetic),
        );
        assert_eq!(result.n_paths, 1_002);
        assert_eq!(result.variance_reduction, VarianceReduction::Antithetic);
    }

    #[test]
    fn test_single_antithetic_pair_has_undefined_standard_error() {
        let pricer = MonteCarloPricer::new(
            builder(OptionKind::Put)
                .paths(2)
                .variance_reduction(VarianceReduction::Antithetic)
                .build()
                .unwrap(),
        )
        .unwrap();
        for result in [pricer.price_european().unwrap(), pricer.price_american().unwrap()] {
            assert_eq!(result.n_paths, 2);
            assert!(result.price.is_finite());
            assert!(result.std_error.is_nan());
        }
    }

    #[test]
    fn test_variance_reduction_lowers_standard_error() {
        let plain = price(builder(OptionKind::Call));
        let antithetic = price(builder(OptionKind::Call).variance_reduction(VarianceReduction::Antithetic));
        let control = price(builder(OptionKind::Call).variance_reduction(VarianceReduction::ControlVariate));

        assert!(antithetic.std_error <= plain.std_error);
        assert!(control.std_error < 0.5 * plain.std_error);
        assert!((control.price - 10.450583572185565).abs() < 3.0 * control.std_error + 0.05);
    }

    #[test]
    fn test_asian_is_cheaper_than_european_call() {
        let config = builder(OptionKind::Call).build().unwrap();
        let pricer = MonteCarloPricer::new(config).unwrap();
        let shocks = pricer.generate_shocks().unwrap();
        let european = pricer.price_european_with(&shocks).unwrap();
        let asian = pricer.price_asian_with(&shocks).unwrap();
        assert!(asian.price < european.price);
        assert!(asian.price > 0.0);
    }

    #[test]
    fn test_american_result_carries_boundary_and_diagnostics() {
        let config = builder(OptionKind::Put).paths(5_000).build().unwrap();
        let result = MonteCarloPricer::new(config).unwrap().price_american().unwrap();
        let boundary = result.exercise_boundary.unwrap();
        assert_eq!(boundary.len(), 9);
        assert_relative_eq!(boundary[0].time, 0.1, epsilon = 1e-12);
        assert_eq!(result.diagnostics.unwrap().decision_steps, 9);
    }

    #[test]
    fn test_mismatched_shocks_are_rejected() {
        let pricer = MonteCarloPricer::new(builder(OptionKind::Call).build().unwrap()).unwrap();
        let shocks = ShockMatrix::from_values(5, vec![0.0; 50]).unwrap();
        let err = pricer.price_european_with(&shocks).unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig { field: "shocks", .. }));
    }

    #[test]
    fn test_cancelled_pricer_stops_before_shocks() {
        let token = CancellationToken::new();
        let pricer = MonteCarloPricer::new(builder(OptionKind::Call).build().unwrap())
            .unwrap()
            .with_cancellation(token.clone());
        token.cancel();
        assert_eq!(
            pricer.price_european().unwrap_err(),
            PricingError::Cancelled { stage: "shocks" }
        );
    }
}

//! Tests for the Greek estimator.

use super::*;
use crate::cancel::CancellationToken;
use crate::mc::{PricingError, SimulationConfig, SimulationConfigBuilder};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionKind;

fn builder(kind: OptionKind) -> SimulationConfigBuilder {
    SimulationConfig::builder()
        .spot(100.0)
        .strike(100.0)
        .volatility(0.2)
        .rate(0.05)
        .maturity(1.0)
        .option_kind(kind)
        .steps(10)
        .paths(20_000)
        .seed(2024)
}

fn bs() -> BlackScholes {
    BlackScholes::new(100.0, 0.05, 0.2).unwrap()
}

// =============================================================================
// Selectors
// =============================================================================

mod selector_tests {
    use super::*;

    #[test]
    fn test_greek_parse_and_display() {
        for greek in [Greek::Delta, Greek::Gamma, Greek::Theta, Greek::Vega] {
            assert_eq!(greek.to_string().parse::<Greek>().unwrap(), greek);
        }
        assert_eq!(" Vega ".parse::<Greek>().unwrap(), Greek::Vega);
        assert!(matches!(
            "rho".parse::<Greek>(),
            Err(PricingError::InvalidConfig { field: "metric", .. })
        ));
    }

    #[test]
    fn test_default_schemes() {
        assert_eq!(Greek::Delta.default_scheme(), DifferenceScheme::Central);
        assert_eq!(Greek::Gamma.default_scheme(), DifferenceScheme::Central);
        assert_eq!(Greek::Theta.default_scheme(), DifferenceScheme::Backward);
        assert_eq!(Greek::Vega.default_scheme(), DifferenceScheme::Central);
        assert_eq!(RandomNumberPolicy::default(), RandomNumberPolicy::Common);
        assert_eq!(PricingModel::default(), PricingModel::MonteCarlo);
    }

    #[test]
    fn test_product_serde_names() {
        let text = toml::to_string(&std::collections::BTreeMap::from([(
            "product",
            Product::AsianArithmetic,
        )]))
        .unwrap();
        assert!(text.contains("asian_arithmetic"));
        assert_eq!(Product::American.to_string(), "american");
    }
}

// =============================================================================
// Monte Carlo estimates against Black-Scholes
// =============================================================================

mod monte_carlo_tests {
    use super::*;

    fn estimate(metric: Greek, kind: OptionKind, bump: Option<f64>) -> GreekResult {
        GreekEstimator::new()
            .estimate(metric, Product::European, &builder(kind).build().unwrap(), bump)
            .unwrap()
    }

    #[test]
    fn test_delta_central_default() {
        let call = estimate(Greek::Delta, OptionKind::Call, None);
        assert!((call.value - bs().delta(OptionKind::Call, 100.0, 1.0)).abs() < 0.02);
        assert_eq!(call.scheme, Some(DifferenceScheme::Central));
        assert_eq!(call.bump, Some(0.01));
        assert_eq!(call.seed, Some(2024));
        assert_eq!(call.reprices, 2);

        let put = estimate(Greek::Delta, OptionKind::Put, None);
        assert!((put.value - bs().delta(OptionKind::Put, 100.0, 1.0)).abs() < 0.02);
    }

    #[test]
    fn test_gamma_with_wide_bump() {
        let gamma = estimate(Greek::Gamma, OptionKind::Call, Some(1.0));
        assert!((gamma.value - bs().gamma(100.0, 1.0)).abs() < 0.004);
        assert_eq!(gamma.reprices, 3);
    }

    #[test]
    fn test_theta_backward_over_one_step() {
        let theta = estimate(Greek::Theta, OptionKind::Call, None);
        assert_eq!(theta.scheme, Some(DifferenceScheme::Backward));
        assert!((theta.bump.unwrap() - 0.1).abs() < 1e-15);
        // calendar decay of a call is negative
        assert!(theta.value < 0.0);
        assert!((theta.value - bs().theta(OptionKind::Call, 100.0, 1.0)).abs() < 0.6);
    }

    #[test]
    fn test_vega_central_default_bump() {
        let vega = estimate(Greek::Vega, OptionKind::Put, None);
        assert!((vega.bump.unwrap() - 0.02).abs() < 1e-15);
        assert!((vega.value - bs().vega(100.0, 1.0)).abs() < 1.5);
    }

    #[test]
    fn test_forward_and_backward_delta() {
        let config = builder(OptionKind::Call).build().unwrap();
        for scheme in [DifferenceScheme::Forward, DifferenceScheme::Backward] {
            let delta = GreekEstimator::new()
                .with_scheme(scheme)
                .estimate(Greek::Delta, Product::European, &config, Some(0.5))
                .unwrap();
            assert_eq!(delta.scheme, Some(scheme));
            assert!((delta.value - 0.6368).abs() < 0.03, "{scheme:?}: {}", delta.value);
        }
    }

    #[test]
    fn test_american_and_asian_deltas() {
        let config = builder(OptionKind::Put).paths(5_000).build().unwrap();
        let american = GreekEstimator::new()
            .estimate(Greek::Delta, Product::American, &config, Some(0.5))
            .unwrap();
        assert!(american.value < 0.0 && american.value > -1.0);

        let config = builder(OptionKind::Call).paths(5_000).build().unwrap();
        let asian = GreekEstimator::new()
            .estimate(Greek::Delta, Product::AsianArithmetic, &config, None)
            .unwrap();
        assert!(asian.value > 0.0 && asian.value < 1.0);
    }

    #[test]
    fn test_absent_seed_is_reported() {
        let config = builder(OptionKind::Call).paths(1_000).random_seed().build().unwrap();
        let delta = GreekEstimator::new()
            .estimate(Greek::Delta, Product::European, &config, None)
            .unwrap();
        let seed = delta.seed.unwrap();

        let replay = GreekEstimator::new()
            .estimate(Greek::Delta, Product::European, &config.with_seed(seed), None)
            .unwrap();
        assert_eq!(replay.value.to_bits(), delta.value.to_bits());
    }
}

// =============================================================================
// Common random numbers
// =============================================================================

mod crn_tests {
    use super::*;

    fn spread(policy: RandomNumberPolicy) -> f64 {
        let values: Vec<f64> = (0..6)
            .map(|seed| {
                let config = builder(OptionKind::Call)
                    .paths(2_000)
                    .steps(5)
                    .seed(seed)
                    .build()
                    .unwrap();
                GreekEstimator::new()
                    .with_policy(policy)
                    .estimate(Greek::Delta, Product::European, &config, None)
                    .unwrap()
                    .value
            })
            .collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
    }

    #[test]
    fn test_common_numbers_reduce_run_to_run_variance() {
        let common = spread(RandomNumberPolicy::Common);
        let independent = spread(RandomNumberPolicy::Independent);
        assert!(common < independent, "{common} vs {independent}");
    }
}

// =============================================================================
// Fallbacks, validation and unsupported models
// =============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_theta_falls_back_to_forward_near_expiry() {
        let config = builder(OptionKind::Call).maturity(0.05).paths(2_000).build().unwrap();
        let theta = GreekEstimator::new()
            .estimate(Greek::Theta, Product::European, &config, Some(0.1))
            .unwrap();
        assert_eq!(theta.scheme, Some(DifferenceScheme::Forward));
        assert!(theta.value < 0.0);
    }

    #[test]
    fn test_vega_falls_back_to_forward_near_zero_vol() {
        let config = builder(OptionKind::Call).paths(2_000).build().unwrap();
        let vega = GreekEstimator::new()
            .estimate(Greek::Vega, Product::European, &config, Some(0.3))
            .unwrap();
        assert_eq!(vega.scheme, Some(DifferenceScheme::Forward));
        assert!(vega.value > 0.0);
    }

    #[test]
    fn test_invalid_bumps() {
        let config = builder(OptionKind::Call).paths(1_000).build().unwrap();
        let estimator = GreekEstimator::new();
        for bump in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                estimator.estimate(Greek::Delta, Product::European, &config, Some(bump)),
                Err(PricingError::InvalidConfig { field: "bump", .. })
            ));
        }
        assert!(matches!(
            estimator.estimate(Greek::Gamma, Product::European, &config, Some(100.0)),
            Err(PricingError::InvalidConfig { field: "bump", .. })
        ));
    }

    #[test]
    fn test_closed_form_matches_black_scholes() {
        let config = builder(OptionKind::Put).build().unwrap();
        let estimator = GreekEstimator::new().with_model(PricingModel::ClosedForm);

        let delta = estimator.estimate(Greek::Delta, Product::European, &config, None).unwrap();
        assert_eq!(delta.value, bs().delta(OptionKind::Put, 100.0, 1.0));
        assert_eq!(delta.reprices, 0);
        assert_eq!(delta.scheme, None);
        assert_eq!(delta.model, PricingModel::ClosedForm);

        let theta = estimator.estimate(Greek::Theta, Product::European, &config, None).unwrap();
        assert_eq!(theta.value, bs().theta(OptionKind::Put, 100.0, 1.0));
    }

    #[test]
    fn test_unsupported_models() {
        let config = builder(OptionKind::Put).build().unwrap();
        let err = GreekEstimator::new()
            .with_model(PricingModel::ClosedForm)
            .estimate(Greek::Delta, Product::American, &config, None)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedModel(_)));

        let err = GreekEstimator::new()
            .with_model(PricingModel::Lattice)
            .estimate(Greek::Delta, Product::European, &config, None)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedModel(_)));
    }

    #[test]
    fn test_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let err = GreekEstimator::new()
            .with_cancellation(token)
            .estimate(
                Greek::Vega,
                Product::European,
                &builder(OptionKind::Call).build().unwrap(),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, PricingError::Cancelled { .. }));
    }
}

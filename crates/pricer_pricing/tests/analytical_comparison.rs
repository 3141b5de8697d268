//! Monte Carlo European and Asian prices against closed-form references.
//!
//! # Test Categories
//!
//! 1. **Convergence**: MC vs Black-Scholes, standard error scaling
//! 2. **Limits**: deep in- and out-of-the-money options
//! 3. **Variance reduction**: antithetic and control variate
//! 4. **Determinism**: fixed seeds and thread-count independence

use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionKind;
use pricer_pricing::mc::{
    MonteCarloPricer, ShockDistribution, SimulationConfig, SimulationConfigBuilder,
    VarianceReduction,
};

fn standard(kind: OptionKind) -> SimulationConfigBuilder {
    SimulationConfig::builder()
        .spot(100.0)
        .strike(100.0)
        .volatility(0.2)
        .rate(0.05)
        .maturity(1.0)
        .option_kind(kind)
        .steps(10)
        .seed(42)
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_european_call_converges_to_black_scholes() {
    let config = standard(OptionKind::Call).paths(100_000).build().unwrap();
    let result = pricer_pricing::price_european(&config).unwrap();

    let reference = BlackScholes::new(100.0, 0.05, 0.2)
        .unwrap()
        .price(OptionKind::Call, 100.0, 1.0);
    assert!(
        (result.price - reference).abs() < 3.0 * result.std_error,
        "MC {} vs BS {reference} (se {})",
        result.price,
        result.std_error
    );
    assert!(result.std_error < 0.06);
}

#[test]
fn test_european_put_converges_to_black_scholes() {
    let config = standard(OptionKind::Put).paths(100_000).seed(7).build().unwrap();
    let result = pricer_pricing::price_european(&config).unwrap();
    let reference = 5.573526022256971;
    assert!((result.price - reference).abs() < 3.0 * result.std_error);
}

#[test]
fn test_standard_error_scales_with_inverse_root_paths() {
    let small = pricer_pricing::price_european(&standard(OptionKind::Call).paths(10_000).build().unwrap())
        .unwrap();
    let large = pricer_pricing::price_european(&standard(OptionKind::Call).paths(40_000).build().unwrap())
        .unwrap();

    let ratio = small.std_error / large.std_error;
    assert!(ratio > 1.8 && ratio < 2.2, "ratio {ratio}");
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_deep_in_the_money_call_is_forward_intrinsic() {
    let config = standard(OptionKind::Call)
        .spot(200.0)
        .paths(20_000)
        .build()
        .unwrap();
    let result = pricer_pricing::price_european(&config).unwrap();
    let forward_intrinsic = 200.0 - 100.0 * (-0.05_f64).exp();
    assert!((result.price - forward_intrinsic).abs() < 3.0 * result.std_error + 1e-3);
}

#[test]
fn test_deep_out_of_the_money_put_is_worthless() {
    let config = standard(OptionKind::Put)
        .strike(10.0)
        .paths(20_000)
        .build()
        .unwrap();
    let result = pricer_pricing::price_european(&config).unwrap();
    assert_eq!(result.price, 0.0);
    assert_eq!(result.std_error, 0.0);
}

#[test]
fn test_price_path_shape_and_spot_row() {
    let config = standard(OptionKind::Call).steps(7).paths(33).build().unwrap();
    let pricer = MonteCarloPricer::new(config).unwrap();
    let paths = pricer.simulate_paths(&pricer.generate_shocks().unwrap()).unwrap();

    assert_eq!(paths.shape(), (8, 33));
    for m in 0..33 {
        assert_eq!(paths.price(0, m), 100.0);
        assert!(paths.path(m).iter().all(|&s| s > 0.0));
    }
}

// ============================================================================
// Variance reduction
// ============================================================================

#[test]
fn test_antithetic_error_not_above_plain() {
    for kind in [OptionKind::Call, OptionKind::Put] {
        let plain = pricer_pricing::price_european(&standard(kind).paths(20_000).build().unwrap())
            .unwrap();
        let antithetic = pricer_pricing::price_european(
            &standard(kind)
                .paths(20_000)
                .variance_reduction(VarianceReduction::Antithetic)
                .build()
                .unwrap(),
        )
        .unwrap();
        assert!(antithetic.std_error <= plain.std_error, "{kind}");
        assert_eq!(antithetic.n_paths, 20_000);
    }
}

#[test]
fn test_control_variate_is_unbiased_and_tighter() {
    let plain = pricer_pricing::price_european(&standard(OptionKind::Put).paths(20_000).build().unwrap())
        .unwrap();
    let control = pricer_pricing::price_european(
        &standard(OptionKind::Put)
            .paths(20_000)
            .steps(50)
            .variance_reduction(VarianceReduction::ControlVariate)
            .build()
            .unwrap(),
    )
    .unwrap();

    assert!(control.std_error < 0.25 * plain.std_error);
    assert!((control.price - 5.573526022256971).abs() < 3.0 * control.std_error + 0.01);
}

#[test]
fn test_asian_call_below_european_call() {
    let config = standard(OptionKind::Call).paths(20_000).steps(12).build().unwrap();
    let asian = pricer_pricing::price_asian(&config).unwrap();
    let european = pricer_pricing::price_european(&config).unwrap();

    // arithmetic average of monthly fixings, rough level of 5.8 for these inputs
    assert!(asian.price < european.price);
    assert!(asian.price > 4.5 && asian.price < 7.0, "{}", asian.price);
}

#[test]
fn test_student_t_shocks_keep_price_in_range() {
    let config = standard(OptionKind::Call)
        .paths(20_000)
        .shock_distribution(ShockDistribution::StudentT {
            degrees_of_freedom: 5.0,
        })
        .build()
        .unwrap();
    let result = pricer_pricing::price_european(&config).unwrap();
    assert!((result.price - 10.45).abs() < 1.0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_seeded_price_independent_of_thread_count() {
    let config = standard(OptionKind::Call)
        .paths(5_000)
        .variance_reduction(VarianceReduction::ControlVariate)
        .build()
        .unwrap();
    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| pricer_pricing::price_european(&config).unwrap())
    };

    let single = run(1);
    let many = run(8);
    assert_eq!(single.price.to_bits(), many.price.to_bits());
    assert_eq!(single.std_error.to_bits(), many.std_error.to_bits());
    assert_eq!(single, run(1));
}

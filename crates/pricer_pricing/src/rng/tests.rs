//! Unit tests for the RNG module.

use super::*;
use approx::assert_abs_diff_eq;

fn normal(rng: &mut PricerRng, buffer: &mut [f64]) {
    let sampler = ShockDistribution::StandardNormal.sampler().unwrap();
    rng.fill_shocks(buffer, &sampler);
}

fn moments(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let kurtosis = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n / (var * var);
    (mean, var, kurtosis)
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = vec![0.0; 100];
    let mut b = vec![0.0; 100];
    normal(&mut PricerRng::from_seed(42), &mut a);
    normal(&mut PricerRng::from_seed(42), &mut b);
    assert_eq!(a, b);
}

#[test]
fn test_substreams_are_deterministic_and_distinct() {
    let mut first = vec![0.0; 64];
    let mut again = vec![0.0; 64];
    let mut other = vec![0.0; 64];
    normal(&mut PricerRng::substream(99, 3), &mut first);
    normal(&mut PricerRng::substream(99, 3), &mut again);
    normal(&mut PricerRng::substream(99, 4), &mut other);

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_ne!(PricerRng::substream(99, 0).seed(), PricerRng::substream(100, 0).seed());
}

#[test]
fn test_normal_moments() {
    let mut rng = PricerRng::from_seed(2024);
    let mut buffer = vec![0.0; 200_000];
    normal(&mut rng, &mut buffer);
    let (mean, var, _) = moments(&buffer);
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
    assert_abs_diff_eq!(var, 1.0, epsilon = 0.02);
}

#[test]
fn test_student_t_shocks_have_unit_variance_and_fat_tails() {
    let sampler = ShockDistribution::StudentT {
        degrees_of_freedom: 8.0,
    }
    .sampler()
    .unwrap();
    let mut rng = PricerRng::from_seed(7);
    let mut buffer = vec![0.0; 400_000];
    rng.fill_shocks(&mut buffer, &sampler);

    let (mean, var, kurtosis) = moments(&buffer);
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
    assert_abs_diff_eq!(var, 1.0, epsilon = 0.03);
    // excess kurtosis of t(8) is 1.5
    assert!(kurtosis > 3.5);
}

#[test]
fn test_invalid_student_t_is_rejected() {
    for dof in [2.0, 1.0, f64::NAN, f64::INFINITY] {
        let dist = ShockDistribution::StudentT {
            degrees_of_freedom: dof,
        };
        assert!(dist.validate().is_err());
        assert!(dist.sampler().is_err());
    }
    assert!(ShockDistribution::default().validate().is_ok());
}

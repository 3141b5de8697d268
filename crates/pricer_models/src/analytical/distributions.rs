//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail probability underflows.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational approximation and the continued fraction.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) with Hart's double precision
/// algorithm (rational approximation near the centre, continued fraction in
/// the tails).
///
/// # Accuracy
/// Absolute error below 1e-14 for all finite x.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0), 0.5);
/// assert!((norm_cdf(1.96) - 0.9750021048517795).abs() < 1e-14);
/// ```
pub fn norm_cdf(x: f64) -> f64 {
    let abs_x = x.abs();

    let tail = if abs_x > TAIL_CUTOFF {
        0.0
    } else {
        let e = (-0.5 * abs_x * abs_x).exp();
        if abs_x < RATIONAL_LIMIT {
            let numerator = horner(
                abs_x,
                &[
                    3.526_249_659_989_11e-2,
                    0.700_383_064_443_688,
                    6.373_962_203_531_65,
                    33.912_866_078_383,
                    112.079_291_497_871,
                    221.213_596_169_931,
                    220.206_867_912_376,
                ],
            );
            let denominator = horner(
                abs_x,
                &[
                    8.838_834_764_831_84e-2,
                    1.755_667_163_182_64,
                    16.064_177_579_207,
                    86.780_732_202_946_1,
                    296.564_248_779_674,
                    637.333_633_378_831,
                    793.826_512_519_948,
                    440.413_735_824_752,
                ],
            );
            e * numerator / denominator
        } else {
            let mut b = abs_x + 0.65;
            for k in [4.0, 3.0, 2.0, 1.0] {
                b = abs_x + k / b;
            }
            e / b / SQRT_2PI
        }
    };

    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Evaluates a polynomial with coefficients ordered from highest degree.
#[inline]
fn horner(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

//! Global least-squares polynomial regression.

use super::{sorted_observations, Smoother, SmootherFit};
use crate::types::RegressionError;

/// Highest supported polynomial degree.
const MAX_DEGREE: usize = 8;

/// Relative pivot threshold below which the normal equations are singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Least-squares polynomial fit of a fixed degree.
///
/// Abscissae are centred and scaled to `[-1, 1]` before the normal
/// equations are assembled, which keeps the system well conditioned for
/// spot-level inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolynomialRegression {
    degree: usize,
}

impl Default for PolynomialRegression {
    fn default() -> Self {
        Self { degree: 2 }
    }
}

impl PolynomialRegression {
    /// Creates a regression of the given degree.
    ///
    /// # Errors
    ///
    /// `RegressionError::InvalidInput` when `degree` is zero or above 8.
    pub fn new(degree: usize) -> Result<Self, RegressionError> {
        if degree == 0 || degree > MAX_DEGREE {
            return Err(RegressionError::InvalidInput(format!(
                "degree must lie in [1, {MAX_DEGREE}], got {degree}"
            )));
        }
        Ok(Self { degree })
    }

    /// Polynomial degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fits the polynomial and returns its coefficients in the scaled
    /// variable `z = (x - centre) / scale`, lowest order first, together with
    /// `(centre, scale)`.
    pub fn coefficients(
        &self,
        xs: &[f64],
        ys: &[f64],
    ) -> Result<(Vec<f64>, f64, f64), RegressionError> {
        let (x, y) = sorted_observations(xs, ys, self.degree + 1)?;
        self.solve(&x, &y)
    }

    fn solve(&self, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, f64, f64), RegressionError> {
        let n = x.len();
        let centre = 0.5 * (x[0] + x[n - 1]);
        let half_width = 0.5 * (x[n - 1] - x[0]);
        if half_width <= 0.0 {
            return Err(RegressionError::Singular { pivot: 0.0 });
        }

        let m = self.degree + 1;
        let mut normal = vec![vec![0.0; m + 1]; m];
        let mut powers = vec![1.0; 2 * m - 1];
        for (&xi, &yi) in x.iter().zip(y) {
            let z = (xi - centre) / half_width;
            for p in 1..powers.len() {
                powers[p] = powers[p - 1] * z;
            }
            for (r, row) in normal.iter_mut().enumerate() {
                for c in 0..m {
                    row[c] += powers[r + c];
                }
                row[m] += powers[r] * yi;
            }
        }

        let coefficients = gaussian_elimination(normal)?;
        Ok((coefficients, centre, half_width))
    }
}

impl Smoother for PolynomialRegression {
    fn min_observations(&self) -> usize {
        self.degree + 1
    }

    fn smooth(&self, xs: &[f64], ys: &[f64]) -> Result<SmootherFit, RegressionError> {
        let (x, y) = sorted_observations(xs, ys, self.degree + 1)?;
        let (coefficients, centre, scale) = self.solve(&x, &y)?;

        let fitted = x
            .iter()
            .map(|&xi| {
                let z = (xi - centre) / scale;
                coefficients.iter().rev().fold(0.0, |acc, c| acc * z + c)
            })
            .collect();

        Ok(SmootherFit { xs: x, fitted })
    }
}

/// Solves an augmented `m x (m + 1)` system with partial pivoting.
fn gaussian_elimination(mut a: Vec<Vec<f64>>) -> Result<Vec<f64>, RegressionError> {
    let m = a.len();
    let scale = a
        .iter()
        .flat_map(|row| row[..m].iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    for col in 0..m {
        let pivot_row = (col..m)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        let pivot = a[pivot_row][col];
        if pivot.abs() <= PIVOT_TOLERANCE * scale.max(f64::MIN_POSITIVE) {
            return Err(RegressionError::Singular { pivot });
        }
        a.swap(col, pivot_row);

        for row in (col + 1)..m {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..=m {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut solution = vec![0.0; m];
    for row in (0..m).rev() {
        let tail: f64 = ((row + 1)..m).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (a[row][m] - tail) / a[row][row];
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_validates_degree() {
        assert!(PolynomialRegression::new(0).is_err());
        assert!(PolynomialRegression::new(9).is_err());
        assert_eq!(PolynomialRegression::new(3).unwrap().degree(), 3);
        assert_eq!(PolynomialRegression::default().degree(), 2);
    }

    #[test]
    fn test_quadratic_is_recovered_exactly() {
        let xs: Vec<f64> = (0..20).map(|i| 80.0 + 2.0 * i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.01 * x * x - 1.5 * x + 60.0).collect();

        let fit = PolynomialRegression::default().smooth(&xs, &ys).unwrap();
        for (x, f) in fit.xs().iter().zip(fit.fitted()) {
            assert_relative_eq!(*f, 0.01 * x * x - 1.5 * x + 60.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_linear_fit_of_noisy_line_is_least_squares() {
        // residuals +1, -1, -1, +1 are orthogonal to {1, x}
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 0.0, 1.0, 4.0];
        let fit = PolynomialRegression::new(1).unwrap().smooth(&xs, &ys).unwrap();
        let expected = [0.0, 1.0, 2.0, 3.0];
        for (f, e) in fit.fitted().iter().zip(expected) {
            assert_relative_eq!(*f, e, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_coefficients_in_scaled_variable() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let (coefficients, centre, scale) =
            PolynomialRegression::new(1).unwrap().coefficients(&xs, &ys).unwrap();
        assert_relative_eq!(centre, 2.0);
        assert_relative_eq!(scale, 1.0);
        assert_relative_eq!(coefficients[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(coefficients[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_abscissae_are_singular() {
        let err = PolynomialRegression::default()
            .smooth(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, RegressionError::Singular { .. }));
    }

    #[test]
    fn test_too_few_points_for_degree() {
        let err = PolynomialRegression::new(3)
            .unwrap()
            .smooth(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert_eq!(err, RegressionError::InsufficientData { got: 3, need: 4 });
    }

    #[test]
    fn test_two_distinct_abscissae_cannot_fit_quadratic() {
        let err = PolynomialRegression::default()
            .smooth(&[1.0, 1.0, 2.0, 2.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap_err();
        assert!(matches!(err, RegressionError::Singular { .. }));
    }
}

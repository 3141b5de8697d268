//! Locally weighted scatterplot smoothing (LOWESS).
//!
//! Cleveland (1979): at every anchor point a weighted linear regression is
//! fitted on its `k = ceil(frac * n)` nearest neighbours with tricube weights.
//! Points closer than `delta` to the previous anchor are not refitted but
//! linearly interpolated, which turns the `O(n k)` cost into roughly
//! `O((range / delta) k)`.

use super::{sorted_observations, Smoother, SmootherFit};
use crate::types::RegressionError;

/// LOWESS smoother settings.
///
/// | Parameter | Default | Meaning |
/// |-----------|---------|---------|
/// | `frac` | 0.3 | Share of observations in each local window |
/// | `iterations` | 0 | Bisquare robustness iterations |
/// | `delta_fraction` | 0.01 | Anchor spacing as a share of the x-range |
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lowess {
    frac: f64,
    iterations: usize,
    delta_fraction: f64,
}

impl Default for Lowess {
    fn default() -> Self {
        Self {
            frac: 0.3,
            iterations: 0,
            delta_fraction: 0.01,
        }
    }
}

impl Lowess {
    /// Creates a smoother.
    ///
    /// # Errors
    ///
    /// `RegressionError::InvalidInput` unless `0 < frac <= 1` and
    /// `0 <= delta_fraction < 1`.
    pub fn new(frac: f64, iterations: usize, delta_fraction: f64) -> Result<Self, RegressionError> {
        if !(frac > 0.0 && frac <= 1.0) {
            return Err(RegressionError::InvalidInput(format!(
                "frac must lie in (0, 1], got {frac}"
            )));
        }
        if !(0.0..1.0).contains(&delta_fraction) {
            return Err(RegressionError::InvalidInput(format!(
                "delta_fraction must lie in [0, 1), got {delta_fraction}"
            )));
        }
        Ok(Self {
            frac,
            iterations,
            delta_fraction,
        })
    }

    /// Share of observations used in each local fit.
    #[inline]
    pub fn frac(&self) -> f64 {
        self.frac
    }

    /// Number of robustness iterations.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Anchor spacing as a share of the x-range.
    #[inline]
    pub fn delta_fraction(&self) -> f64 {
        self.delta_fraction
    }

    /// Smooths `ys` against `xs`, returning fitted values at the sorted `xs`.
    pub fn smooth(&self, xs: &[f64], ys: &[f64]) -> Result<SmootherFit, RegressionError> {
        let (x, y) = sorted_observations(xs, ys, 2)?;
        let n = x.len();
        let k = ((self.frac * n as f64).ceil() as usize).clamp(2, n);
        let delta = self.delta_fraction * (x[n - 1] - x[0]);

        let mut robustness = vec![1.0; n];
        let mut fitted = vec![0.0; n];

        for iteration in 0..=self.iterations {
            fit_pass(&x, &y, &robustness, k, delta, &mut fitted);
            if iteration == self.iterations {
                break;
            }

            let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(a, b)| (a - b).abs()).collect();
            let scale = median(&residuals);
            let y_scale = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            if scale <= f64::EPSILON * (1.0 + y_scale) {
                break;
            }
            for (w, r) in robustness.iter_mut().zip(&residuals) {
                let u = r / (6.0 * scale);
                *w = if u < 1.0 { (1.0 - u * u).powi(2) } else { 0.0 };
            }
        }

        Ok(SmootherFit { xs: x, fitted })
    }
}

impl Smoother for Lowess {
    fn min_observations(&self) -> usize {
        2
    }

    fn smooth(&self, xs: &[f64], ys: &[f64]) -> Result<SmootherFit, RegressionError> {
        Lowess::smooth(self, xs, ys)
    }
}

/// One smoothing pass over sorted data.
fn fit_pass(x: &[f64], y: &[f64], robustness: &[f64], k: usize, delta: f64, fitted: &mut [f64]) {
    let n = x.len();
    let mut left = 0;
    let mut previous: Option<usize> = None;
    let mut i = 0;

    loop {
        // slide the k-nearest-neighbour window [left, left + k) towards x[i]
        while left + k < n && x[left + k] - x[i] < x[i] - x[left] {
            left += 1;
        }
        fitted[i] = local_linear(x, y, robustness, left, left + k, i);

        if let Some(p) = previous {
            let span = x[i] - x[p];
            for j in (p + 1)..i {
                fitted[j] = if span > 0.0 {
                    let t = (x[j] - x[p]) / span;
                    fitted[p] + t * (fitted[i] - fitted[p])
                } else {
                    fitted[i]
                };
            }
        }
        previous = Some(i);

        if i + 1 >= n {
            break;
        }
        let cutoff = x[i] + delta;
        let mut j = i + 1;
        while j < n && x[j] <= cutoff {
            j += 1;
        }
        i = (j - 1).max(i + 1);
    }
}

/// Weighted linear fit on `left..right`, evaluated at `x[i]`.
fn local_linear(x: &[f64], y: &[f64], robustness: &[f64], left: usize, right: usize, i: usize) -> f64 {
    let xi = x[i];
    let radius = (xi - x[left]).max(x[right - 1] - xi);

    let weight = |j: usize| -> f64 {
        let kernel = if radius > 0.0 {
            tricube((x[j] - xi).abs() / radius)
        } else {
            1.0
        };
        kernel * robustness[j]
    };

    let mut sw = 0.0;
    let mut swx = 0.0;
    let mut swy = 0.0;
    for j in left..right {
        let w = weight(j);
        sw += w;
        swx += w * x[j];
        swy += w * y[j];
    }
    if sw <= 0.0 {
        return y[i];
    }

    let x_bar = swx / sw;
    let y_bar = swy / sw;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for j in left..right {
        let w = weight(j);
        let dx = x[j] - x_bar;
        sxx += w * dx * dx;
        sxy += w * dx * (y[j] - y_bar);
    }

    let width = x[right - 1] - x[left];
    if sxx > 1e-12 * sw * width * width && sxx > 0.0 {
        y_bar + sxy / sxx * (xi - x_bar)
    } else {
        y_bar
    }
}

#[inline]
fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let v = 1.0 - u * u * u;
        v * v * v
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

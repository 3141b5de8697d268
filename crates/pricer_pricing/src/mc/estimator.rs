//! Sample statistics with a deterministic parallel reduction.
//!
//! Partial sums are computed over fixed-size chunks in parallel, collected
//! in chunk order and combined sequentially. The result is bit-for-bit
//! identical for any rayon pool size.

use rayon::prelude::*;
use serde::Serialize;

/// Samples per partial sum.
const REDUCE_CHUNK: usize = 4096;

/// Mean, Bessel-corrected standard deviation and standard error of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Estimate {
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator; NaN below two samples).
    pub std_dev: f64,
    /// Standard error, std_dev / √n; NaN below two samples.
    pub std_error: f64,
    /// Number of samples.
    pub samples: usize,
}

impl Estimate {
    /// Computes the statistics of `samples`.
    ///
    /// The spread of fewer than two samples is undefined and reported as NaN;
    /// the mean of no samples is NaN.
    ///
    /// ```rust
    /// use pricer_pricing::mc::Estimate;
    ///
    /// let e = Estimate::from_samples(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(e.mean, 2.5);
    /// assert!((e.std_dev - 1.2909944487358056).abs() < 1e-15);
    /// assert!((e.std_error - e.std_dev / 2.0).abs() < 1e-15);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        let sum = ordered_sum(samples, |x| x);
        let mean = if n == 0 { f64::NAN } else { sum / n as f64 };
        if n < 2 {
            return Self {
                mean,
                std_dev: f64::NAN,
                std_error: f64::NAN,
                samples: n,
            };
        }

        let squared = ordered_sum(samples, |x| (x - mean) * (x - mean));
        let std_dev = (squared / (n - 1) as f64).sqrt();
        Self {
            mean,
            std_dev,
            std_error: std_dev / (n as f64).sqrt(),
            samples: n,
        }
    }
}

fn ordered_sum<F>(samples: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    let partials: Vec<f64> = samples
        .par_chunks(REDUCE_CHUNK)
        .map(|chunk| chunk.iter().map(|&x| f(x)).sum::<f64>())
        .collect();
    partials.iter().sum()
}

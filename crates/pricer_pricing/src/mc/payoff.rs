//! Discounted per-path payoffs for European-style products.

use pricer_models::instruments::OptionKind;
use rayon::prelude::*;

use super::paths::PricePath;

/// Discounted terminal payoff `discount · max(±(S_N − K), 0)` of every path.
pub fn european_payoffs(paths: &PricePath, kind: OptionKind, strike: f64, discount: f64) -> Vec<f64> {
    let terminal = paths.steps();
    paths
        .par_paths()
        .map(|row| discount * kind.intrinsic(row[terminal], strike))
        .collect()
}

/// Discounted arithmetic-average payoff of every path.
///
/// The average runs over all N + 1 rows, including the initial spot.
pub fn asian_payoffs(paths: &PricePath, kind: OptionKind, strike: f64, discount: f64) -> Vec<f64> {
    paths
        .par_paths()
        .map(|row| {
            let average = row.iter().sum::<f64>() / row.len() as f64;
            discount * kind.intrinsic(average, strike)
        })
        .collect()
}

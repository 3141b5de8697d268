//! Realized cash flows of the American engine.

use pricer_models::instruments::OptionKind;
use rayon::prelude::*;

use crate::mc::PricePath;

/// (N + 1) × M cash-flow matrix with at most one non-zero cell per path.
///
/// Stored as the exercise step and the cash flow realized there. Initialised
/// with the terminal intrinsic value at step N; an earlier exercise replaces
/// the path's cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CashFlowMatrix {
    steps: usize,
    exercise_step: Vec<usize>,
    cash_flow: Vec<f64>,
}

impl CashFlowMatrix {
    /// Terminal payoff `max(±(S_N − K), 0)` at step N on every path.
    pub fn new_terminal(paths: &PricePath, kind: OptionKind, strike: f64) -> Self {
        let steps = paths.steps();
        let cash_flow = paths
            .par_paths()
            .map(|row| kind.intrinsic(row[steps], strike))
            .collect();
        Self {
            steps,
            exercise_step: vec![steps; paths.n_paths()],
            cash_flow,
        }
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of paths M.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.cash_flow.len()
    }

    /// Cash flow of `path` at `step` (zero outside its exercise step).
    #[inline]
    pub fn cell(&self, step: usize, path: usize) -> f64 {
        if self.exercise_step[path] == step {
            self.cash_flow[path]
        } else {
            0.0
        }
    }

    /// Step at which `path` realizes its cash flow.
    #[inline]
    pub fn exercise_step(&self, path: usize) -> usize {
        self.exercise_step[path]
    }

    /// Exercise steps of all paths.
    #[inline]
    pub fn exercise_steps(&self) -> &[usize] {
        &self.exercise_step
    }

    /// Cash flow of `path` discounted back to `step`.
    ///
    /// `step` must not be after the path's exercise step.
    #[inline]
    pub fn value_at(&self, step: usize, path: usize, step_discount: f64) -> f64 {
        let periods = self.exercise_step[path] - step;
        self.cash_flow[path] * step_discount.powi(periods as i32)
    }

    /// Replaces the cells of every path with `Some(cash)` by an exercise at `step`.
    pub fn exercise(&mut self, step: usize, decisions: &[Option<f64>]) {
        self.exercise_step
            .par_iter_mut()
            .zip(self.cash_flow.par_iter_mut())
            .zip(decisions.par_iter())
            .for_each(|((tau, cash), decision)| {
                if let Some(value) = decision {
                    *tau = step;
                    *cash = *value;
                }
            });
    }

    /// Cash flow of every path discounted to t = 0.
    pub fn discounted_to_zero(&self, step_discount: f64) -> Vec<f64> {
        self.exercise_step
            .par_iter()
            .zip(self.cash_flow.par_iter())
            .map(|(&tau, &cash)| cash * step_discount.powi(tau as i32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{GbmParams, ShockMatrix};
    use approx::assert_relative_eq;

    fn matrix() -> (PricePath, CashFlowMatrix) {
        let params = GbmParams {
            spot: 100.0,
            rate: 0.0,
            volatility: 0.2,
            maturity: 1.0,
        };
        let shocks = ShockMatrix::from_values(2, vec![1.0, 1.0, -1.0, -1.0]).unwrap();
        let paths = PricePath::simulate(&params, &shocks, false);
        let cash = CashFlowMatrix::new_terminal(&paths, OptionKind::Put, 100.0);
        (paths, cash)
    }

    #[test]
    fn test_terminal_initialisation() {
        let (paths, cash) = matrix();
        assert_eq!(cash.steps(), 2);
        assert_eq!(cash.n_paths(), 2);
        assert_eq!(cash.exercise_steps(), &[2, 2]);
        assert_eq!(cash.cell(2, 0), 0.0);
        assert_relative_eq!(cash.cell(2, 1), 100.0 - paths.terminal(1));
        assert_eq!(cash.cell(1, 1), 0.0);
    }

    #[test]
    fn test_exercise_moves_the_single_cell() {
        let (_, mut cash) = matrix();
        cash.exercise(1, &[None, Some(7.5)]);

        assert_eq!(cash.exercise_step(0), 2);
        assert_eq!(cash.exercise_step(1), 1);
        assert_eq!(cash.cell(1, 1), 7.5);
        assert_eq!(cash.cell(2, 1), 0.0);
    }

    #[test]
    fn test_discounting() {
        let (_, mut cash) = matrix();
        cash.exercise(1, &[Some(4.0), None]);
        let terminal = cash.cell(2, 1);

        assert_relative_eq!(cash.value_at(0, 1, 0.9), terminal * 0.81);
        assert_relative_eq!(cash.value_at(1, 1, 0.9), terminal * 0.9);
        assert_relative_eq!(cash.value_at(1, 0, 0.9), 4.0);

        let pv = cash.discounted_to_zero(0.9);
        assert_relative_eq!(pv[0], 3.6);
        assert_relative_eq!(pv[1], terminal * 0.81);
    }
}

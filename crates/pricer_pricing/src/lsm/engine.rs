//! Backward-induction engine.

use pricer_core::math::regression::Lowess;
use pricer_models::analytical::closed_form_price;
use pricer_models::instruments::OptionKind;
use rayon::prelude::*;
use serde::Serialize;

use super::cash_flow::CashFlowMatrix;
use super::regression::ContinuationSmoother;
use crate::cancel::CancellationToken;
use crate::mc::{GbmParams, PricePath, PricingError};

/// Exercise statistics of one decision step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExerciseBoundaryPoint {
    /// Time step index.
    pub step: usize,
    /// Decision time in years.
    pub time: f64,
    /// Highest exercised spot for a put, lowest for a call; `None` when no
    /// path exercised.
    pub boundary_spot: Option<f64>,
    /// In-the-money paths at this step.
    pub itm_paths: usize,
    /// Paths that exercised at this step.
    pub exercised_paths: usize,
}

/// Health counters of one backward induction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LsmDiagnostics {
    /// Decision steps visited (N − 1).
    pub decision_steps: usize,
    /// Steps skipped for too few in-the-money paths or a failed fit.
    pub degenerate_steps: usize,
    /// Continuation lookups outside the training range.
    pub extrapolated_lookups: usize,
    /// No path exercised at any decision step.
    pub no_exercise_region: bool,
}

/// Result of [`LsmEngine::run`].
#[derive(Clone, Debug)]
pub struct LsmOutcome {
    /// Realized cash flow of every path discounted to t = 0.
    pub samples: Vec<f64>,
    /// Exercise step of every path (N when held to maturity).
    pub exercise_steps: Vec<usize>,
    /// One point per decision step, ascending in time.
    pub exercise_boundary: Vec<ExerciseBoundaryPoint>,
    /// Induction counters.
    pub diagnostics: LsmDiagnostics,
}

/// Longstaff-Schwartz engine parameterised by its continuation smoother.
#[derive(Clone, Debug, Default)]
pub struct LsmEngine<S = Lowess> {
    smoother: S,
}

/// Per-step exercise tally.
#[derive(Clone, Copy, Default)]
struct Tally {
    exercised: usize,
    extrapolated: usize,
    boundary: Option<f64>,
}

impl<S: ContinuationSmoother> LsmEngine<S> {
    /// Creates an engine around `smoother`.
    pub fn new(smoother: S) -> Self {
        Self { smoother }
    }

    /// The continuation smoother.
    pub fn smoother(&self) -> &S {
        &self.smoother
    }

    /// Runs backward induction over `paths` simulated under `process`.
    ///
    /// A path exercises only when its intrinsic value beats both the fitted
    /// continuation and the closed-form European value of holding to
    /// maturity. Cancellation is checked before every decision step.
    ///
    /// # Errors
    ///
    /// `PricingError::Cancelled` if `cancel` fires.
    pub fn run(
        &self,
        paths: &PricePath,
        process: &GbmParams,
        kind: OptionKind,
        strike: f64,
        cancel: &CancellationToken,
    ) -> Result<LsmOutcome, PricingError> {
        let steps = paths.steps();
        let n_paths = paths.n_paths();
        let need = self.smoother.min_observations().max(2);
        let dt = process.maturity / steps as f64;
        let step_discount = (-process.rate * dt).exp();

        let mut cash = CashFlowMatrix::new_terminal(paths, kind, strike);
        let mut boundary = Vec::with_capacity(steps.saturating_sub(1));
        let mut diagnostics = LsmDiagnostics {
            decision_steps: steps.saturating_sub(1),
            ..Default::default()
        };

        for t in (1..steps).rev() {
            cancel.check("backward induction")?;

            let itm: Vec<usize> = (0..n_paths)
                .into_par_iter()
                .filter(|&m| kind.intrinsic(paths.price(t, m), strike) > 0.0)
                .collect();
            let mut point = ExerciseBoundaryPoint {
                step: t,
                time: t as f64 * dt,
                boundary_spot: None,
                itm_paths: itm.len(),
                exercised_paths: 0,
            };

            if itm.len() < need {
                let err = PricingError::NumericalDegenerate {
                    step: t,
                    reason: format!("{} in-the-money paths, need {need}", itm.len()),
                };
                tracing::trace!(error = %err, "carrying cash flows forward");
                diagnostics.degenerate_steps += 1;
                boundary.push(point);
                continue;
            }

            let spots: Vec<f64> = itm.par_iter().map(|&m| paths.price(t, m)).collect();
            let values: Vec<f64> = itm
                .par_iter()
                .map(|&m| cash.value_at(t, m, step_discount))
                .collect();

            let curve = match self.smoother.fit(&spots, &values) {
                Ok(curve) => curve,
                Err(source) => {
                    let err = PricingError::NumericalDegenerate {
                        step: t,
                        reason: source.to_string(),
                    };
                    tracing::trace!(error = %err, "carrying cash flows forward");
                    diagnostics.degenerate_steps += 1;
                    boundary.push(point);
                    continue;
                }
            };

            let remaining = process.maturity - t as f64 * dt;
            let decisions: Vec<(Option<f64>, bool)> = (0..n_paths)
                .into_par_iter()
                .map(|m| {
                    let spot = paths.price(t, m);
                    let intrinsic = kind.intrinsic(spot, strike);
                    let (continuation, extrapolated) = curve.evaluate(spot);
                    // holding is worth at least the European option
                    let exercise = intrinsic > 0.0
                        && intrinsic > continuation
                        && intrinsic
                            > closed_form_price(
                                spot,
                                strike,
                                process.volatility,
                                process.rate,
                                remaining,
                                kind,
                            );
                    (exercise.then_some(intrinsic), extrapolated)
                })
                .collect();

            let tally = decisions
                .par_iter()
                .enumerate()
                .map(|(m, (decision, extrapolated))| Tally {
                    exercised: usize::from(decision.is_some()),
                    extrapolated: usize::from(*extrapolated),
                    boundary: decision.map(|_| paths.price(t, m)),
                })
                .reduce(Tally::default, |a, b| Tally {
                    exercised: a.exercised + b.exercised,
                    extrapolated: a.extrapolated + b.extrapolated,
                    boundary: merge_boundary(kind, a.boundary, b.boundary),
                });

            let exercise: Vec<Option<f64>> = decisions.into_iter().map(|(d, _)| d).collect();
            cash.exercise(t, &exercise);

            if tally.extrapolated > 0 {
                tracing::trace!(
                    step = t,
                    lookups = tally.extrapolated,
                    domain = ?curve.domain(),
                    "continuation extrapolated"
                );
            }
            tracing::trace!(
                step = t,
                itm = itm.len(),
                exercised = tally.exercised,
                "decision step"
            );

            diagnostics.extrapolated_lookups += tally.extrapolated;
            point.exercised_paths = tally.exercised;
            point.boundary_spot = tally.boundary;
            boundary.push(point);
        }

        boundary.reverse();
        diagnostics.no_exercise_region =
            diagnostics.decision_steps > 0 && boundary.iter().all(|p| p.exercised_paths == 0);
        if diagnostics.no_exercise_region {
            tracing::warn!(
                decision_steps = diagnostics.decision_steps,
                degenerate_steps = diagnostics.degenerate_steps,
                "no path exercised early"
            );
        }

        Ok(LsmOutcome {
            samples: cash.discounted_to_zero(step_discount),
            exercise_steps: cash.exercise_steps().to_vec(),
            exercise_boundary: boundary,
            diagnostics,
        })
    }
}

fn merge_boundary(kind: OptionKind, a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(match kind {
            OptionKind::Put => x.max(y),
            OptionKind::Call => x.min(y),
        }),
        (x, None) => x,
        (None, y) => y,
    }
}

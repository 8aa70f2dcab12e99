//! Yield solvers over cash-flow schedules.

use coupon_core::{CashFlowSchedule, Compounding};
use coupon_math::solvers::{solve_differentiable, NewtonSolution, SolverConfig};
use coupon_math::MathError;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, BondResult};
use crate::pricing::{ensure_rate, present_value};
use crate::yields::YieldResidual;

/// A solved yield together with its Newton diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// The yield (best effort when the solver was exhausted).
    pub yield_rate: f64,
    /// Present value of the schedule at `yield_rate`.
    pub repriced: f64,
    /// Full solver output, including the optional trace.
    pub solution: NewtonSolution,
}

impl YieldResult {
    /// Returns true if the solver met its tolerance.
    pub fn is_converged(&self) -> bool {
        self.solution.is_converged()
    }

    /// Number of Newton updates performed.
    pub fn iterations(&self) -> u32 {
        self.solution.iterations
    }
}

fn solve_yield(
    schedule: &CashFlowSchedule,
    target: f64,
    compounding: Compounding,
    initial_guess: f64,
    config: &SolverConfig,
) -> BondResult<YieldResult> {
    ensure_rate(initial_guess, compounding)?;

    let residual = YieldResidual::new(schedule, target, compounding);
    let solution = solve_differentiable(&residual, initial_guess, config)?;
    let yield_rate = solution.estimate;
    let repriced = present_value(schedule, yield_rate, compounding)?;

    log::debug!(
        "yield {:.10} ({}) from {} in {} iterations, repriced {:.6} against {:.6}",
        yield_rate,
        compounding,
        initial_guess,
        solution.iterations,
        repriced,
        target
    );

    Ok(YieldResult {
        yield_rate,
        repriced,
        solution,
    })
}

/// Yield at which the schedule's present value equals `price`.
///
/// An exhausted solve is returned as `Ok` with an `Exhausted` status; call
/// `result.solution.into_converged()` to reject it.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::yields::yield_to_maturity;
/// use coupon_core::{CashFlowSchedule, Compounding};
/// use coupon_math::solvers::SolverConfig;
///
/// let schedule =
///     CashFlowSchedule::annual(&[2.3, 2.9, 3.0, 3.2, 4.0, 3.8, 4.2, 4.8, 5.5, 105.0]).unwrap();
/// let config = SolverConfig::new(1e-8, 100);
///
/// let result =
///     yield_to_maturity(&schedule, 100.0, Compounding::Continuous, 0.05, &config).unwrap();
/// assert!((result.yield_rate - 0.0370037459).abs() < 1e-8);
/// ```
pub fn yield_to_maturity(
    schedule: &CashFlowSchedule,
    price: f64,
    compounding: Compounding,
    initial_guess: f64,
    config: &SolverConfig,
) -> BondResult<YieldResult> {
    ensure_positive("price", price)?;
    solve_yield(schedule, price, compounding, initial_guess, config)
}

/// Rate at which the schedule's present value is zero.
///
/// The schedule carries the initial outlay as a negative flow, usually at
/// time zero.
pub fn internal_rate_of_return(
    schedule: &CashFlowSchedule,
    compounding: Compounding,
    initial_guess: f64,
    config: &SolverConfig,
) -> BondResult<YieldResult> {
    solve_yield(schedule, 0.0, compounding, initial_guess, config)
}

/// Outcome of one starting point in an [`initial_guess_sweep`].
#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    /// The starting point.
    pub initial_guess: f64,
    /// What the solver returned from it.
    pub result: Result<NewtonSolution, MathError>,
}

impl GuessOutcome {
    /// The converged or best-effort estimate, if the run did not diverge.
    pub fn estimate(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|s| s.estimate)
    }

    /// Returns true if the run converged.
    pub fn is_converged(&self) -> bool {
        self.result.as_ref().is_ok_and(NewtonSolution::is_converged)
    }
}

/// Runs the yield solver from each initial guess.
///
/// Maps how sensitive Newton's method is to its starting point: guesses far
/// from the root may take longer, land elsewhere, or diverge. Per-guess
/// failures are reported in the outcome; only invalid inputs fail the sweep.
pub fn initial_guess_sweep(
    schedule: &CashFlowSchedule,
    price: f64,
    compounding: Compounding,
    guesses: &[f64],
    config: &SolverConfig,
) -> BondResult<Vec<GuessOutcome>> {
    ensure_positive("price", price)?;
    config.validate()?;
    for &guess in guesses {
        ensure_finite("initial guess", guess)?;
    }

    let residual = YieldResidual::new(schedule, price, compounding);
    Ok(guesses
        .iter()
        .map(|&initial_guess| GuessOutcome {
            initial_guess,
            result: solve_differentiable(&residual, initial_guess, config),
        })
        .collect())
}

//! Newton-Raphson root-finding algorithm.
//!
//! Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops on the
//! first of:
//!
//! 1. `|x_{n+1} - x_n| < ε` (step size, checked first)
//! 2. `|f(x_{n+1})| < ε` (residual)
//! 3. the iteration cap (exhausted)
//!
//! A derivative that is zero, below [`SolverConfig::derivative_threshold`], or not finite
//! stops the iteration with [`MathError::Diverged`], as does any non-finite
//! residual or estimate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DivergenceReason, MathError, MathResult};
use crate::solvers::{Differentiable, NumericalDerivative, SolverConfig};

/// One Newton update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonIterate {
    /// Zero-based index of the update.
    pub index: u32,
    /// Estimate after the update.
    pub estimate: f64,
    /// Absolute step size `|x_{n+1} - x_n|`.
    pub step: f64,
    /// Residual `f(x_{n+1})`.
    pub residual: f64,
}

/// Which tolerance test ended the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceCriterion {
    /// The last step was smaller than the tolerance.
    StepSize,
    /// The residual was smaller than the tolerance.
    Residual,
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewtonStatus {
    /// A tolerance was met.
    Converged(ConvergenceCriterion),
    /// The iteration cap was reached first; the estimate is best effort.
    Exhausted,
}

impl fmt::Display for NewtonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewtonStatus::Converged(ConvergenceCriterion::StepSize) => write!(f, "converged (step size)"),
            NewtonStatus::Converged(ConvergenceCriterion::Residual) => write!(f, "converged (residual)"),
            NewtonStatus::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// State of a [`NewtonIteration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonState {
    /// No update has been taken yet.
    Initialized,
    /// At least one update taken, no stopping condition met.
    Iterating,
    /// A tolerance was met.
    Converged(ConvergenceCriterion),
    /// The next update could not be computed.
    Diverged(DivergenceReason),
    /// The iteration cap was reached.
    Exhausted,
}

impl NewtonState {
    /// Returns true once no further updates will be taken.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Converged(_) | Self::Diverged(_) | Self::Exhausted
        )
    }
}

/// Result of a Newton run that did not diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonSolution {
    /// Final estimate.
    pub estimate: f64,
    /// Number of updates performed.
    pub iterations: u32,
    /// Residual at the final estimate.
    pub residual: f64,
    /// How the run ended.
    pub status: NewtonStatus,
    /// Every update, when tracing was requested.
    pub trace: Option<Vec<NewtonIterate>>,
}

impl NewtonSolution {
    /// Returns true if a tolerance was met.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self.status, NewtonStatus::Converged(_))
    }

    /// Returns the criterion that ended the run, if it converged.
    #[must_use]
    pub fn criterion(&self) -> Option<ConvergenceCriterion> {
        match self.status {
            NewtonStatus::Converged(criterion) => Some(criterion),
            NewtonStatus::Exhausted => None,
        }
    }

    /// Rejects exhausted runs.
    pub fn into_converged(self) -> MathResult<Self> {
        match self.status {
            NewtonStatus::Converged(_) => Ok(self),
            NewtonStatus::Exhausted => Err(MathError::Exhausted {
                iterations: self.iterations,
                estimate: self.estimate,
                residual: self.residual,
            }),
        }
    }
}

/// Step-by-step Newton driver.
///
/// Owns all of its state, including the optional trace, so independent runs
/// never share anything.
///
/// ```rust
/// use coupon_math::solvers::{NewtonIteration, NewtonState, SolverConfig};
///
/// let f = (|x: f64| x * x - 2.0, |x: f64| 2.0 * x);
/// let mut newton = NewtonIteration::new(f, 1.0, SolverConfig::default()).unwrap();
///
/// assert_eq!(newton.state(), NewtonState::Initialized);
/// newton.step().unwrap();
/// assert_eq!(newton.state(), NewtonState::Iterating);
/// assert!((newton.estimate() - 1.5).abs() < 1e-15);
/// ```
#[derive(Debug)]
pub struct NewtonIteration<D> {
    function: D,
    config: SolverConfig,
    estimate: f64,
    residual: f64,
    iterations: u32,
    state: NewtonState,
    trace: Option<Vec<NewtonIterate>>,
}

impl<D: Differentiable> NewtonIteration<D> {
    /// Creates a stepper at `initial_guess`.
    pub fn new(function: D, initial_guess: f64, config: SolverConfig) -> MathResult<Self> {
        config.validate()?;
        if !initial_guess.is_finite() {
            return Err(MathError::invalid_argument(format!(
                "initial guess must be finite, got {initial_guess}"
            )));
        }

        let residual = function.value(initial_guess);
        let trace = config.trace.then(Vec::new);

        Ok(Self {
            function,
            config,
            estimate: initial_guess,
            residual,
            iterations: 0,
            state: NewtonState::Initialized,
            trace,
        })
    }

    /// Current state.
    pub fn state(&self) -> NewtonState {
        self.state
    }

    /// Current estimate.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Residual at the current estimate.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Updates performed so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Recorded updates, if tracing.
    pub fn trace(&self) -> Option<&[NewtonIterate]> {
        self.trace.as_deref()
    }

    /// Takes one Newton update.
    ///
    /// Calling this in a terminal state is a no-op that returns the state.
    pub fn step(&mut self) -> MathResult<NewtonState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        if self.iterations >= self.config.max_iterations {
            self.state = NewtonState::Exhausted;
            return Ok(self.state);
        }

        let index = self.iterations;
        let x = self.estimate;
        let fx = self.residual;

        if !fx.is_finite() {
            return Err(self.diverge(DivergenceReason::NonFiniteResidual));
        }

        let dfx = self.function.derivative(x);
        if !dfx.is_finite() {
            return Err(self.diverge(DivergenceReason::NonFiniteDerivative));
        }
        if dfx.abs() < self.config.derivative_threshold {
            return Err(self.diverge(DivergenceReason::ZeroDerivative));
        }

        let next = x - fx / dfx;
        if !next.is_finite() {
            return Err(self.diverge(DivergenceReason::NonFiniteEstimate));
        }

        let step = (next - x).abs();
        let residual = self.function.value(next);

        self.estimate = next;
        self.residual = residual;
        self.iterations += 1;

        log::trace!(
            "newton update {}: x = {:.12}, step = {:.3e}, f(x) = {:.3e}",
            index,
            next,
            step,
            residual
        );

        if let Some(trace) = self.trace.as_mut() {
            trace.push(NewtonIterate {
                index,
                estimate: next,
                step,
                residual,
            });
        }

        if !residual.is_finite() {
            return Err(self.diverge(DivergenceReason::NonFiniteResidual));
        }

        self.state = if step < self.config.tolerance {
            NewtonState::Converged(ConvergenceCriterion::StepSize)
        } else if residual.abs() < self.config.tolerance {
            NewtonState::Converged(ConvergenceCriterion::Residual)
        } else if self.iterations >= self.config.max_iterations {
            NewtonState::Exhausted
        } else {
            NewtonState::Iterating
        };

        Ok(self.state)
    }

    /// Steps until a terminal state and returns the solution.
    pub fn run(mut self) -> MathResult<NewtonSolution> {
        loop {
            match self.step()? {
                NewtonState::Converged(criterion) => {
                    log::debug!(
                        "newton converged ({:?}) after {} iterations: x = {:.12}",
                        criterion,
                        self.iterations,
                        self.estimate
                    );
                    return Ok(self.finish(NewtonStatus::Converged(criterion)));
                }
                NewtonState::Exhausted => {
                    log::warn!(
                        "newton exhausted after {} iterations: x = {:.12}, f(x) = {:.3e}",
                        self.iterations,
                        self.estimate,
                        self.residual
                    );
                    return Ok(self.finish(NewtonStatus::Exhausted));
                }
                // A stepper that already diverged through `step` stays there
                NewtonState::Diverged(reason) => {
                    return Err(MathError::diverged(
                        self.iterations,
                        self.estimate,
                        reason,
                    ));
                }
                NewtonState::Initialized | NewtonState::Iterating => {}
            }
        }
    }

    fn diverge(&mut self, reason: DivergenceReason) -> MathError {
        self.state = NewtonState::Diverged(reason);
        log::debug!(
            "newton diverged at iteration {}: {} (x = {})",
            self.iterations,
            reason,
            self.estimate
        );
        MathError::diverged(self.iterations, self.estimate, reason)
    }

    fn finish(self, status: NewtonStatus) -> NewtonSolution {
        NewtonSolution {
            estimate: self.estimate,
            iterations: self.iterations,
            residual: self.residual,
            status,
            trace: self.trace,
        }
    }
}

/// Finds a root of `f` from `x0` with dual tolerance `epsilon`.
///
/// # Example
///
/// ```rust
/// use coupon_math::solvers::solve;
///
/// let result = solve(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.5, 1e-10, 50, true).unwrap();
/// assert!((result.estimate - std::f64::consts::SQRT_2).abs() < 1e-10);
/// assert_eq!(result.trace.unwrap().len() as u32, result.iterations);
/// ```
pub fn solve<F, DF>(
    f: F,
    f_prime: DF,
    x0: f64,
    epsilon: f64,
    max_iterations: u32,
    trace: bool,
) -> MathResult<NewtonSolution>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let config = SolverConfig::new(epsilon, max_iterations).with_trace(trace);
    newton_raphson(f, f_prime, x0, &config)
}

/// Newton-Raphson with an analytic derivative.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use coupon_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x * x - 27.0;
/// let df = |x: f64| 3.0 * x * x;
///
/// let result = newton_raphson(f, df, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.estimate - 3.0).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<NewtonSolution>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    solve_differentiable(&(f, df), initial_guess, config)
}

/// Newton-Raphson over any [`Differentiable`].
pub fn solve_differentiable<D>(
    function: &D,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<NewtonSolution>
where
    D: Differentiable + ?Sized,
{
    NewtonIteration::new(function, initial_guess, *config)?.run()
}

/// Newton-Raphson with a central-difference derivative.
///
/// The difference step is `config.derivative_step`.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<NewtonSolution>
where
    F: Fn(f64) -> f64,
{
    let function = NumericalDerivative::with_step(f, config.derivative_step);
    solve_differentiable(&function, initial_guess, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_status_display() {
        assert_eq!(
            NewtonStatus::Converged(ConvergenceCriterion::StepSize).to_string(),
            "converged (step size)"
        );
        assert_eq!(NewtonStatus::Exhausted.to_string(), "exhausted");
    }

    const FLOWS: [f64; 10] = [2.3, 2.9, 3.0, 3.2, 4.0, 3.8, 4.2, 4.8, 5.5, 105.0];

    fn bond_residual(y: f64) -> f64 {
        FLOWS
            .iter()
            .enumerate()
            .map(|(k, c)| c * (-y * (k as f64 + 1.0)).exp())
            .sum::<f64>()
            - 100.0
    }

    fn bond_residual_derivative(y: f64) -> f64 {
        -FLOWS
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let t = k as f64 + 1.0;
                t * c * (-y * t).exp()
            })
            .sum::<f64>()
    }

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.estimate, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
        assert!(result.is_converged());
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |x: f64| x * x - 2.0;

        let result = newton_raphson_numerical(f, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.estimate, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_ten_flow_bond() {
        let result = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 100, true).unwrap();

        assert!((result.estimate - 0.0370037459).abs() < 1e-8);
        assert_eq!(result.iterations, 4);
        assert_eq!(result.criterion(), Some(ConvergenceCriterion::StepSize));
        assert!(bond_residual(result.estimate).abs() < 1e-8);

        let trace = result.trace.unwrap();
        assert_eq!(trace.len(), 4);
        for (i, iterate) in trace.iter().enumerate() {
            assert_eq!(iterate.index as usize, i);
        }
        // Quadratic convergence: each step much smaller than the last
        assert!(trace.windows(2).all(|w| w[1].step < w[0].step * 0.1));
        assert_relative_eq!(trace[3].estimate, result.estimate);
    }

    #[test]
    fn test_numerical_ten_flow_bond() {
        let config = SolverConfig::new(1e-8, 100);
        let result = newton_raphson_numerical(bond_residual, 0.05, &config).unwrap();
        assert!((result.estimate - 0.0370037459).abs() < 1e-8);
    }

    #[test]
    fn test_idempotent_restart() {
        let first = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 100, false).unwrap();
        let again = solve(
            bond_residual,
            bond_residual_derivative,
            first.estimate,
            1e-8,
            100,
            false,
        )
        .unwrap();

        assert_eq!(again.iterations, 1);
        assert_eq!(again.criterion(), Some(ConvergenceCriterion::StepSize));
    }

    #[test]
    fn test_zero_derivative_diverges() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let err = newton_raphson(f, df, 0.0, &SolverConfig::default()).unwrap_err();

        match err {
            MathError::Diverged {
                iteration,
                estimate,
                reason,
            } => {
                assert_eq!(iteration, 0);
                assert_relative_eq!(estimate, 0.0);
                assert_eq!(reason, DivergenceReason::ZeroDerivative);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_derivative_diverges() {
        let err = solve(|x: f64| x - 1.0, |_| 1e-16, 0.0, 1e-8, 10, false).unwrap_err();
        assert!(err.is_diverged());
    }

    #[test]
    fn test_scaled_residual_needs_lower_threshold() {
        let f = |x: f64| 1e-20 * (x - 1.0);
        let df = |_: f64| 1e-20;

        let err = newton_raphson(f, df, 0.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(
            err,
            MathError::diverged(0, 0.0, DivergenceReason::ZeroDerivative)
        );

        let config = SolverConfig::default().with_derivative_threshold(1e-30);
        let result = newton_raphson(f, df, 0.0, &config).unwrap();
        assert_relative_eq!(result.estimate, 1.0);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_run_after_stepping_into_divergence() {
        let pair = (|x: f64| x * x * x - 1.0, |x: f64| 3.0 * x * x);
        let mut newton = NewtonIteration::new(pair, 0.0, SolverConfig::default()).unwrap();

        assert!(newton.step().unwrap_err().is_diverged());
        assert_eq!(
            newton.state(),
            NewtonState::Diverged(DivergenceReason::ZeroDerivative)
        );

        let err = newton.run().unwrap_err();
        assert_eq!(
            err,
            MathError::diverged(0, 0.0, DivergenceReason::ZeroDerivative)
        );
    }

    #[test]
    fn test_non_finite_derivative_diverges() {
        let err = solve(|x: f64| x - 1.0, |_| f64::NAN, 0.0, 1e-8, 10, false).unwrap_err();
        assert_eq!(
            err,
            MathError::diverged(0, 0.0, DivergenceReason::NonFiniteDerivative)
        );
    }

    #[test]
    fn test_non_finite_residual_diverges() {
        // ln(x) is undefined for negative x; an overshooting step lands there
        let f = |x: f64| x.ln() - 3.0;
        let df = |x: f64| 1.0 / x;

        let err = solve(f, df, 100.0, 1e-10, 50, false).unwrap_err();
        match err {
            MathError::Diverged { reason, .. } => {
                assert_eq!(reason, DivergenceReason::NonFiniteResidual);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_single_iteration_exhausts() {
        let result = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 1, true).unwrap();

        assert_eq!(result.status, NewtonStatus::Exhausted);
        assert_eq!(result.iterations, 1);
        assert!(!result.is_converged());
        // One update from 0.05 moves the estimate by roughly 0.0138
        assert!((result.estimate - 0.05).abs() > 0.01);
        assert_eq!(result.trace.as_ref().map(Vec::len), Some(1));

        let err = result.into_converged().unwrap_err();
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_residual_criterion() {
        // Linear function: the first update lands exactly on the root but moves
        // a long way, so only the residual test can fire.
        let result = solve(|x: f64| 2.0 * x - 10.0, |_| 2.0, 0.0, 1e-8, 10, false).unwrap();

        assert_relative_eq!(result.estimate, 5.0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.criterion(), Some(ConvergenceCriterion::Residual));
    }

    #[test]
    fn test_trace_disabled_allocates_nothing() {
        let result = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 100, false).unwrap();
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_invalid_arguments() {
        let f = |x: f64| x;
        let df = |_: f64| 1.0;
        assert!(matches!(
            solve(f, df, 1.0, 0.0, 10, false),
            Err(MathError::InvalidArgument { .. })
        ));
        assert!(matches!(
            solve(f, df, 1.0, 1e-8, 0, false),
            Err(MathError::InvalidArgument { .. })
        ));
        assert!(matches!(
            solve(f, df, f64::INFINITY, 1e-8, 10, false),
            Err(MathError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_stepper_states() {
        let pair = (bond_residual, bond_residual_derivative);
        let config = SolverConfig::new(1e-8, 100);
        let mut newton = NewtonIteration::new(&pair, 0.05, config).unwrap();

        assert_eq!(newton.state(), NewtonState::Initialized);
        assert!(newton.trace().is_none());

        let mut states = Vec::new();
        while !newton.state().is_terminal() {
            states.push(newton.step().unwrap());
        }

        assert_eq!(states.len(), 4);
        assert!(states[..3].iter().all(|s| *s == NewtonState::Iterating));
        assert_eq!(
            newton.state(),
            NewtonState::Converged(ConvergenceCriterion::StepSize)
        );

        // Terminal state is sticky
        assert_eq!(
            newton.step().unwrap(),
            NewtonState::Converged(ConvergenceCriterion::StepSize)
        );
        assert_eq!(newton.iterations(), 4);
    }

    #[test]
    fn test_independent_runs() {
        let a = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 100, true).unwrap();
        let b = solve(bond_residual, bond_residual_derivative, 0.05, 1e-8, 100, true).unwrap();
        assert_eq!(a, b);
    }
}

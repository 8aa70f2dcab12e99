//! Root-finding algorithms.
//!
//! Newton-Raphson is the only solver: yields are smooth, monotone functions
//! of price, so the tangent step converges quadratically from any sensible
//! starting point. What matters is the termination protocol:
//!
//! | Outcome | Meaning | Surfaced as |
//! |---------|---------|-------------|
//! | Converged | `|Δx| < ε` or `|f(x)| < ε` | `Ok`, [`NewtonStatus::Converged`] |
//! | Exhausted | cap reached first | `Ok`, [`NewtonStatus::Exhausted`] |
//! | Diverged | zero / non-finite derivative, non-finite value | `Err(MathError::Diverged)` |
//! | Invalid | bad tolerance, cap, or initial guess | `Err(MathError::InvalidArgument)` |
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use coupon_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let result = newton_raphson(price_fn, d_price_fn, 0.05, &SolverConfig::default()).unwrap();
//! assert!(result.is_converged());
//! assert!(result.estimate > 0.05); // YTM > coupon rate for a discount bond
//! ```

mod differentiation;
mod newton;

pub use differentiation::{numerical_derivative, NumericalDerivative};
pub use newton::{
    newton_raphson, newton_raphson_numerical, solve, solve_differentiable, ConvergenceCriterion,
    NewtonIterate, NewtonIteration, NewtonSolution, NewtonState, NewtonStatus,
};

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default step for central-difference derivatives.
pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-8;

/// Default magnitude below which a derivative is treated as zero.
///
/// The cutoff is absolute, so it suits residuals measured in price units. A
/// residual scaled far below that needs a smaller
/// [`SolverConfig::derivative_threshold`].
pub const DERIVATIVE_THRESHOLD: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance applied to both the step size and the residual.
    pub tolerance: f64,
    /// Maximum number of Newton updates.
    pub max_iterations: u32,
    /// Record every iterate.
    pub trace: bool,
    /// Step for numerical derivatives.
    pub derivative_step: f64,
    /// Derivatives smaller than this in magnitude stop the solver.
    #[serde(default = "default_derivative_threshold")]
    pub derivative_threshold: f64,
}

fn default_derivative_threshold() -> f64 {
    DERIVATIVE_THRESHOLD
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            trace: false,
            derivative_step: DEFAULT_DERIVATIVE_STEP,
            derivative_threshold: DERIVATIVE_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enables or disables the iteration trace.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Sets the numerical derivative step.
    #[must_use]
    pub fn with_derivative_step(mut self, step: f64) -> Self {
        self.derivative_step = step;
        self
    }

    /// Sets the derivative magnitude treated as zero.
    #[must_use]
    pub fn with_derivative_threshold(mut self, threshold: f64) -> Self {
        self.derivative_threshold = threshold;
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_argument(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_argument(
                "max_iterations must be positive",
            ));
        }
        if !(self.derivative_step.is_finite() && self.derivative_step > 0.0) {
            return Err(MathError::invalid_argument(format!(
                "derivative step must be positive and finite, got {}",
                self.derivative_step
            )));
        }
        if !(self.derivative_threshold.is_finite() && self.derivative_threshold >= 0.0) {
            return Err(MathError::invalid_argument(format!(
                "derivative threshold must be non-negative and finite, got {}",
                self.derivative_threshold
            )));
        }
        Ok(())
    }
}

/// A scalar function with a derivative.
///
/// Implemented for `(f, f_prime)` closure pairs, so plain closures can be
/// handed to [`solve_differentiable`] as a tuple.
pub trait Differentiable {
    /// Evaluates the function.
    fn value(&self, x: f64) -> f64;

    /// Evaluates the derivative.
    fn derivative(&self, x: f64) -> f64;
}

impl<F, D> Differentiable for (F, D)
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        (self.0)(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        (self.1)(x)
    }
}

impl<T: Differentiable + ?Sized> Differentiable for &T {
    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        (**self).derivative(x)
    }
}

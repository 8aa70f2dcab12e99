//! Finite-difference derivatives.

use crate::solvers::{Differentiable, DEFAULT_DERIVATIVE_STEP};

/// Central-difference estimate of `f'(x)`: `(f(x + h) - f(x - h)) / 2h`.
///
/// # Example
///
/// ```rust
/// use coupon_math::solvers::numerical_derivative;
///
/// let slope = numerical_derivative(|x: f64| x * x, 3.0, 1e-6);
/// assert!((slope - 6.0).abs() < 1e-6);
/// ```
pub fn numerical_derivative<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Wraps a plain function so it can be used wherever a [`Differentiable`]
/// is expected, estimating the derivative by central differences.
#[derive(Debug, Clone, Copy)]
pub struct NumericalDerivative<F> {
    f: F,
    step: f64,
}

impl<F> NumericalDerivative<F>
where
    F: Fn(f64) -> f64,
{
    /// Creates a wrapper with the default step.
    pub fn new(f: F) -> Self {
        Self::with_step(f, DEFAULT_DERIVATIVE_STEP)
    }

    /// Creates a wrapper with an explicit step.
    pub fn with_step(f: F, step: f64) -> Self {
        Self { f, step }
    }

    /// Returns the difference step.
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl<F> Differentiable for NumericalDerivative<F>
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        numerical_derivative(&self.f, x, self.step)
    }
}

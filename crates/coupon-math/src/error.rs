//! Error types for mathematical operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Why a Newton iteration could not take its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceReason {
    /// The derivative was zero or below the stability threshold.
    ZeroDerivative,
    /// The derivative evaluated to NaN or infinity.
    NonFiniteDerivative,
    /// The residual evaluated to NaN or infinity.
    NonFiniteResidual,
    /// The Newton update produced NaN or infinity.
    NonFiniteEstimate,
}

impl fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DivergenceReason::ZeroDerivative => "derivative is zero",
            DivergenceReason::NonFiniteDerivative => "derivative is not finite",
            DivergenceReason::NonFiniteResidual => "residual is not finite",
            DivergenceReason::NonFiniteEstimate => "estimate is not finite",
        };
        write!(f, "{text}")
    }
}

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Invalid input parameter.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the invalid input.
        reason: String,
    },

    /// Newton iteration could not continue.
    #[error("Newton iteration diverged at iteration {iteration} (x = {estimate}): {reason}")]
    Diverged {
        /// Index of the step that failed.
        iteration: u32,
        /// Last finite estimate before the failure.
        estimate: f64,
        /// What went wrong.
        reason: DivergenceReason,
    },

    /// Iteration cap reached without meeting either tolerance.
    #[error("Exhausted after {iterations} iterations (estimate: {estimate}, residual: {residual:.2e})")]
    Exhausted {
        /// Number of iterations performed.
        iterations: u32,
        /// Best-effort estimate.
        estimate: f64,
        /// Residual at the estimate.
        residual: f64,
    },

    /// Quadrature could not evaluate the integrand.
    #[error("Quadrature failed: {reason}")]
    QuadratureFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a divergence error.
    #[must_use]
    pub fn diverged(iteration: u32, estimate: f64, reason: DivergenceReason) -> Self {
        Self::Diverged {
            iteration,
            estimate,
            reason,
        }
    }

    /// Creates a quadrature failure.
    #[must_use]
    pub fn quadrature_failed(reason: impl Into<String>) -> Self {
        Self::QuadratureFailed {
            reason: reason.into(),
        }
    }

    /// Returns true for a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Returns true for an exhaustion error.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

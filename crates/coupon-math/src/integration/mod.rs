//! Numerical integration.
//!
//! Used to price bonds against a yield curve given as a function of time,
//! where the discount factor is `exp(-∫ y(s) ds)`.

mod simpson;

pub use simpson::adaptive_simpson;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default absolute tolerance for quadrature.
pub const DEFAULT_QUADRATURE_TOLERANCE: f64 = 1e-10;

/// Default recursion depth limit per panel.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Default number of panels the interval is split into before refinement.
pub const DEFAULT_INITIAL_PANELS: u32 = 64;

/// Configuration for adaptive quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Absolute error target for the whole interval.
    pub tolerance: f64,
    /// Maximum bisection depth within a panel.
    pub max_depth: u32,
    /// Panels evaluated before any refinement.
    ///
    /// A single coarse Simpson estimate can agree with its halves by
    /// accident and miss a narrow feature entirely.
    pub initial_panels: u32,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_QUADRATURE_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
            initial_panels: DEFAULT_INITIAL_PANELS,
        }
    }
}

impl QuadratureConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of initial panels.
    #[must_use]
    pub fn with_initial_panels(mut self, panels: u32) -> Self {
        self.initial_panels = panels;
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_argument(format!(
                "quadrature tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.initial_panels == 0 {
            return Err(MathError::invalid_argument(
                "quadrature needs at least one panel",
            ));
        }
        Ok(())
    }
}

/// Value of a definite integral with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureResult {
    /// Estimated integral.
    pub value: f64,
    /// Sum of the per-interval Richardson error estimates.
    pub error_estimate: f64,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

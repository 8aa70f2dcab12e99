//! Price mismatch as a function of yield.

use coupon_core::{CashFlowSchedule, Compounding};
use coupon_math::solvers::Differentiable;

/// `f(y) = Σ Cᵢ·d(y, tᵢ) − target` with its analytic derivative.
///
/// - continuous: `f'(y) = −Σ tᵢ Cᵢ e^(−y tᵢ)`
/// - periodic: `f'(y) = −Σ tᵢ Cᵢ (1 + y/m)^(−m tᵢ − 1)`
#[derive(Debug, Clone, Copy)]
pub struct YieldResidual<'a> {
    schedule: &'a CashFlowSchedule,
    target_price: f64,
    compounding: Compounding,
}

impl<'a> YieldResidual<'a> {
    /// Creates the residual for `schedule` against `target_price`.
    pub fn new(schedule: &'a CashFlowSchedule, target_price: f64, compounding: Compounding) -> Self {
        Self {
            schedule,
            target_price,
            compounding,
        }
    }

    /// The price being matched.
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// The discount convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }
}

impl Differentiable for YieldResidual<'_> {
    fn value(&self, y: f64) -> f64 {
        self.schedule.present_value(y, self.compounding) - self.target_price
    }

    fn derivative(&self, y: f64) -> f64 {
        self.schedule.present_value_derivative(y, self.compounding)
    }
}

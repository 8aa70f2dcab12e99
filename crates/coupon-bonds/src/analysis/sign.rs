//! Cash flows that depend linearly on an unknown parameter.
//!
//! With `Cₖ(x) = aₖ + bₖ·x` the present value is the line
//! `PV(x) = A + B·x`, `A = Σ aₖ dₖ`, `B = Σ bₖ dₖ`, so the set of `x` with a
//! positive value is found exactly instead of by scanning a grid.

use std::fmt;

use coupon_core::Compounding;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, BondError, BondResult};
use crate::pricing::ensure_rate;

/// A cash flow `constant + slope·x` at `time` years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineCashFlow {
    /// Time in years.
    pub time: f64,
    /// Amount independent of `x`.
    pub constant: f64,
    /// Coefficient of `x`.
    pub slope: f64,
}

impl AffineCashFlow {
    /// Creates a flow.
    pub fn new(time: f64, constant: f64, slope: f64) -> Self {
        Self {
            time,
            constant,
            slope,
        }
    }

    /// A flow that does not depend on `x`.
    pub fn fixed(time: f64, amount: f64) -> Self {
        Self::new(time, amount, 0.0)
    }

    /// A flow proportional to `x`.
    pub fn linear(time: f64, slope: f64) -> Self {
        Self::new(time, 0.0, slope)
    }
}

/// `PV(x) = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentValueLine {
    /// Present value at `x = 0`.
    pub intercept: f64,
    /// Change in present value per unit of `x`.
    pub slope: f64,
}

impl PresentValueLine {
    /// Evaluates the line.
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// The `x` where the value is zero, if the line is not flat.
    pub fn root(&self) -> Option<f64> {
        (self.slope != 0.0).then(|| -self.intercept / self.slope)
    }

    /// Open set of `x` where the value is strictly positive.
    pub fn positive_region(&self) -> ParameterRegion {
        match self.root() {
            None if self.intercept > 0.0 => ParameterRegion::All,
            None => ParameterRegion::Empty,
            Some(root) if self.slope > 0.0 => ParameterRegion::Above(root),
            Some(root) => ParameterRegion::Below(root),
        }
    }
}

/// A set of parameter values: empty, everything, or an open half-line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterRegion {
    /// No value qualifies.
    Empty,
    /// Every value qualifies.
    All,
    /// Values strictly below the bound.
    Below(f64),
    /// Values strictly above the bound.
    Above(f64),
}

impl ParameterRegion {
    /// Returns true if `x` is in the region.
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            Self::Empty => false,
            Self::All => true,
            Self::Below(bound) => x < bound,
            Self::Above(bound) => x > bound,
        }
    }
}

impl fmt::Display for ParameterRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no x"),
            Self::All => write!(f, "all x"),
            Self::Below(bound) => write!(f, "x < {bound:.6}"),
            Self::Above(bound) => write!(f, "x > {bound:.6}"),
        }
    }
}

/// An ordered set of [`AffineCashFlow`]s.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::analysis::{AffineCashFlow, AffineCashFlows, ParameterRegion};
/// use coupon_core::Compounding;
///
/// // C₀ = −3x, C₁ = 5, C₂ = x at 5% annual
/// let flows = AffineCashFlows::new(vec![
///     AffineCashFlow::linear(0.0, -3.0),
///     AffineCashFlow::fixed(1.0, 5.0),
///     AffineCashFlow::linear(2.0, 1.0),
/// ])
/// .unwrap();
///
/// let region = flows.positive_region(0.05, Compounding::default()).unwrap();
/// assert!(matches!(region, ParameterRegion::Below(x) if (x - 2.275190).abs() < 1e-6));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffineCashFlows {
    flows: Vec<AffineCashFlow>,
}

impl AffineCashFlows {
    /// Creates the set, checking times are non-negative and strictly
    /// increasing and coefficients are finite.
    pub fn new(flows: Vec<AffineCashFlow>) -> BondResult<Self> {
        if flows.is_empty() {
            return Err(BondError::invalid_argument("at least one cash flow is required"));
        }
        let mut previous: Option<f64> = None;
        for flow in &flows {
            ensure_non_negative("cash flow time", flow.time)?;
            ensure_finite("cash flow constant", flow.constant)?;
            ensure_finite("cash flow slope", flow.slope)?;
            if previous.is_some_and(|p| flow.time <= p) {
                return Err(BondError::invalid_argument(format!(
                    "cash flow times must be strictly increasing, got {} after {}",
                    flow.time,
                    previous.unwrap_or_default()
                )));
            }
            previous = Some(flow.time);
        }
        Ok(Self { flows })
    }

    /// The flows in time order.
    pub fn flows(&self) -> &[AffineCashFlow] {
        &self.flows
    }

    /// Present value as a line in `x`.
    pub fn present_value_line(
        &self,
        rate: f64,
        compounding: Compounding,
    ) -> BondResult<PresentValueLine> {
        ensure_rate(rate, compounding)?;
        let (intercept, slope) = self.flows.iter().fold((0.0, 0.0), |(a, b), flow| {
            let df = compounding.discount_factor(rate, flow.time);
            (a + flow.constant * df, b + flow.slope * df)
        });
        Ok(PresentValueLine { intercept, slope })
    }

    /// Present value at parameter `x`.
    pub fn present_value(&self, x: f64, rate: f64, compounding: Compounding) -> BondResult<f64> {
        ensure_finite("x", x)?;
        Ok(self.present_value_line(rate, compounding)?.at(x))
    }

    /// The exact set of `x` for which the present value is positive.
    pub fn positive_region(
        &self,
        rate: f64,
        compounding: Compounding,
    ) -> BondResult<ParameterRegion> {
        Ok(self.present_value_line(rate, compounding)?.positive_region())
    }
}

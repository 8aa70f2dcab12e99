//! Cash flows and cash flow schedules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Compounding;
use crate::error::{CoreError, CoreResult};

/// A single cash flow: an amount paid at a time measured in years.
///
/// Negative amounts are outflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment time in years from today
    time: f64,
    /// Amount paid (negative for outflows)
    amount: f64,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(time: f64, amount: f64) -> Self {
        Self { time, amount }
    }

    /// Returns the payment time in years.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Present value of this cash flow at `rate`.
    #[must_use]
    pub fn present_value(&self, rate: f64, compounding: Compounding) -> f64 {
        self.amount * compounding.discount_factor(rate, self.time)
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} @ t={}", self.amount, self.time)
    }
}

/// An ordered, validated sequence of cash flows.
///
/// Times are finite, non-negative, and strictly increasing; amounts are
/// finite. The schedule is never empty and is immutable once built.
///
/// # Example
///
/// ```rust
/// use coupon_core::types::{CashFlow, CashFlowSchedule, Compounding};
///
/// let schedule = CashFlowSchedule::new(vec![
///     CashFlow::new(0.0, -100.0),
///     CashFlow::new(1.0, 110.0),
/// ])
/// .unwrap();
///
/// let npv = schedule.present_value(0.10, Compounding::default());
/// assert!(npv.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CashFlow>", into = "Vec<CashFlow>")]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Builds a schedule, validating ordering and finiteness.
    pub fn new(flows: Vec<CashFlow>) -> CoreResult<Self> {
        if flows.is_empty() {
            return Err(CoreError::invalid_cash_flow(
                "schedule must contain at least one cash flow",
            ));
        }

        let mut previous: Option<f64> = None;
        for (index, cf) in flows.iter().enumerate() {
            if !cf.time.is_finite() || cf.time < 0.0 {
                return Err(CoreError::invalid_cash_flow(format!(
                    "cash flow {index} has invalid time {}",
                    cf.time
                )));
            }
            if !cf.amount.is_finite() {
                return Err(CoreError::invalid_cash_flow(format!(
                    "cash flow {index} has non-finite amount {}",
                    cf.amount
                )));
            }
            if let Some(prev) = previous {
                if cf.time <= prev {
                    return Err(CoreError::invalid_cash_flow(format!(
                        "times must be strictly increasing: {} follows {}",
                        cf.time, prev
                    )));
                }
            }
            previous = Some(cf.time);
        }

        Ok(Self { flows })
    }

    /// Builds a schedule paying `amounts[i]` at `t = i + 1` years.
    pub fn annual(amounts: &[f64]) -> CoreResult<Self> {
        Self::periodic(amounts, 1)
    }

    /// Builds a schedule paying `amounts[k]` at `t = (k + 1) / m` years.
    pub fn periodic(amounts: &[f64], periods_per_year: u32) -> CoreResult<Self> {
        if periods_per_year == 0 {
            return Err(CoreError::invalid_argument(
                "compounding frequency must be a positive integer",
            ));
        }
        let m = f64::from(periods_per_year);
        let flows = amounts
            .iter()
            .enumerate()
            .map(|(k, &amount)| CashFlow::new((k + 1) as f64 / m, amount))
            .collect();
        Self::new(flows)
    }

    /// Builds a schedule whose first amount falls at `t = 0`, then one per year.
    ///
    /// This is the usual layout for IRR problems where the initial
    /// investment is paid today.
    pub fn from_time_zero(amounts: &[f64]) -> CoreResult<Self> {
        let flows = amounts
            .iter()
            .enumerate()
            .map(|(k, &amount)| CashFlow::new(k as f64, amount))
            .collect();
        Self::new(flows)
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Always false for a validated schedule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Iterates over the cash flows in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Time of the last cash flow.
    #[must_use]
    pub fn maturity(&self) -> f64 {
        self.flows.last().map_or(0.0, CashFlow::time)
    }

    /// Undiscounted sum of all amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(CashFlow::amount).sum()
    }

    /// Present value of the schedule at a single `rate`.
    #[must_use]
    pub fn present_value(&self, rate: f64, compounding: Compounding) -> f64 {
        self.flows
            .iter()
            .map(|cf| cf.present_value(rate, compounding))
            .sum()
    }

    /// Derivative of [`present_value`](Self::present_value) with respect to the rate.
    #[must_use]
    pub fn present_value_derivative(&self, rate: f64, compounding: Compounding) -> f64 {
        self.flows
            .iter()
            .map(|cf| cf.amount * compounding.discount_factor_derivative(rate, cf.time))
            .sum()
    }
}

impl TryFrom<Vec<CashFlow>> for CashFlowSchedule {
    type Error = CoreError;

    fn try_from(flows: Vec<CashFlow>) -> CoreResult<Self> {
        Self::new(flows)
    }
}

impl From<CashFlowSchedule> for Vec<CashFlow> {
    fn from(schedule: CashFlowSchedule) -> Self {
        schedule.flows
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_schedule_times() {
        let schedule = CashFlowSchedule::annual(&[2.3, 2.9, 105.0]).unwrap();
        let times: Vec<f64> = schedule.iter().map(CashFlow::time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert_eq!(schedule.maturity(), 3.0);
        assert_relative_eq!(schedule.total(), 110.2, epsilon = 1e-12);
    }

    #[test]
    fn test_periodic_schedule_times() {
        let schedule = CashFlowSchedule::periodic(&[1.0, 1.0, 1.0, 101.0], 4).unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.maturity(), 1.0);
        assert_eq!(schedule.as_slice()[0].time(), 0.25);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(CashFlowSchedule::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_non_increasing_times() {
        let result = CashFlowSchedule::new(vec![CashFlow::new(1.0, 5.0), CashFlow::new(1.0, 5.0)]);
        assert!(matches!(result, Err(CoreError::InvalidCashFlow { .. })));

        let result = CashFlowSchedule::new(vec![CashFlow::new(2.0, 5.0), CashFlow::new(1.0, 5.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_or_nan() {
        assert!(CashFlowSchedule::new(vec![CashFlow::new(-1.0, 5.0)]).is_err());
        assert!(CashFlowSchedule::new(vec![CashFlow::new(1.0, f64::NAN)]).is_err());
        assert!(CashFlowSchedule::new(vec![CashFlow::new(f64::INFINITY, 1.0)]).is_err());
    }

    #[test]
    fn test_negative_amounts_allowed() {
        let schedule = CashFlowSchedule::from_time_zero(&[-300.0, 5.0, 100.0]).unwrap();
        assert_eq!(schedule.as_slice()[0].time(), 0.0);
        assert_eq!(schedule.as_slice()[0].amount(), -300.0);
    }

    #[test]
    fn test_present_value_continuous() {
        let schedule = CashFlowSchedule::annual(&[5.0, 105.0]).unwrap();
        let pv = schedule.present_value(0.05, Compounding::Continuous);
        let expected = 5.0 * (-0.05_f64).exp() + 105.0 * (-0.10_f64).exp();
        assert_relative_eq!(pv, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_present_value_derivative() {
        let schedule = CashFlowSchedule::annual(&[5.0, 5.0, 105.0]).unwrap();
        let compounding = Compounding::Periodic(Frequency::SemiAnnual);
        let h = 1e-6;
        let numeric = (schedule.present_value(0.06 + h, compounding)
            - schedule.present_value(0.06 - h, compounding))
            / (2.0 * h);
        assert_relative_eq!(
            schedule.present_value_derivative(0.06, compounding),
            numeric,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"[{"time":1.0,"amount":5.0},{"time":2.0,"amount":105.0}]"#;
        let schedule: CashFlowSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.len(), 2);

        let bad = r#"[{"time":2.0,"amount":5.0},{"time":1.0,"amount":105.0}]"#;
        assert!(serde_json::from_str::<CashFlowSchedule>(bad).is_err());
    }
}

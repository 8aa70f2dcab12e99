//! Closed-form bond pricing.
//!
//! All functions are pure and take plain numbers: face value, maturity in
//! years, rates as decimals. They fail only when an input is outside its
//! domain.

mod coupon;
mod zero_coupon;

pub use coupon::{
    coupon_present_values, coupon_schedule, horizon_value, macaulay_duration,
    price_coupon_bond_discrete, FixedCouponBond,
};
pub use zero_coupon::{
    price_zero_coupon_continuous, price_zero_coupon_discrete, price_zero_coupon_time_varying,
};

use coupon_core::{CashFlowSchedule, Compounding, Frequency};

use crate::error::{ensure_finite, BondError, BondResult};

/// Present value of an arbitrary schedule at a single yield.
///
/// ```rust
/// use coupon_bonds::pricing::present_value;
/// use coupon_core::{CashFlowSchedule, Compounding};
///
/// let schedule = CashFlowSchedule::annual(&[5.0, 105.0]).unwrap();
/// let pv = present_value(&schedule, 0.05, Compounding::default()).unwrap();
/// assert!((pv - 100.0).abs() < 1e-10);
/// ```
pub fn present_value(
    schedule: &CashFlowSchedule,
    rate: f64,
    compounding: Compounding,
) -> BondResult<f64> {
    ensure_rate(rate, compounding)?;
    Ok(schedule.present_value(rate, compounding))
}

/// Checks a rate against a compounding convention.
pub(crate) fn ensure_rate(rate: f64, compounding: Compounding) -> BondResult<()> {
    match compounding {
        Compounding::Periodic(frequency) => ensure_discrete_rate(rate, periods_per_year(frequency)?),
        Compounding::Continuous => ensure_finite("rate", rate).map(|_| ()),
    }
}

/// Periods per year, rejecting a zero custom frequency.
pub(crate) fn periods_per_year(frequency: Frequency) -> BondResult<u32> {
    match frequency.periods_per_year() {
        0 => Err(BondError::invalid_argument(
            "compounding frequency must be at least once per year",
        )),
        m => Ok(m),
    }
}

/// Discrete compounding needs `1 + r/m > 0`.
pub(crate) fn ensure_discrete_rate(rate: f64, periods_per_year: u32) -> BondResult<()> {
    ensure_finite("rate", rate)?;
    if 1.0 + rate / f64::from(periods_per_year) <= 0.0 {
        return Err(BondError::invalid_argument(format!(
            "rate {rate} is below -{periods_per_year} for {periods_per_year} periods per year"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_value_conventions() {
        let schedule = CashFlowSchedule::annual(&[10.0, 10.0, 110.0]).unwrap();

        let annual = present_value(&schedule, 0.10, Compounding::default()).unwrap();
        assert_relative_eq!(annual, 100.0, epsilon = 1e-10);

        let continuous = present_value(&schedule, 0.10, Compounding::Continuous).unwrap();
        assert!(continuous < annual);
    }

    #[test]
    fn test_present_value_rejects_bad_rates() {
        let schedule = CashFlowSchedule::annual(&[100.0]).unwrap();
        assert!(present_value(&schedule, f64::NAN, Compounding::Continuous).is_err());
        assert!(present_value(&schedule, -1.5, Compounding::default()).is_err());
        // Continuous compounding has no lower bound
        assert!(present_value(&schedule, -1.5, Compounding::Continuous).is_ok());
        assert!(present_value(&schedule, 0.05, Frequency::Custom(0).into()).is_err());
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(periods_per_year(Frequency::Quarterly).unwrap(), 4);
        assert!(periods_per_year(Frequency::Custom(0)).is_err());
    }
}

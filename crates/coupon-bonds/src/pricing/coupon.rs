//! Fixed coupon bonds priced at a constant discrete yield.

use coupon_core::compounding::periodic_discount_factor;
use coupon_core::{CashFlowSchedule, Frequency};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, BondError, BondResult};
use crate::pricing::{ensure_discrete_rate, periods_per_year};

/// Maturities within this many periods of a whole number are accepted.
const PERIOD_TOLERANCE: f64 = 1e-9;

/// A bullet bond paying `c·F/m` every period and `F` at maturity.
///
/// Yields passed to the methods compound at the coupon frequency.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::FixedCouponBond;
/// use coupon_core::Frequency;
///
/// let bond = FixedCouponBond::new(10_000.0, 10.0, 0.05, Frequency::Quarterly).unwrap();
/// let price = bond.price(0.07).unwrap();
/// assert!((price - 8570.29).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCouponBond {
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    frequency: Frequency,
    periods: u32,
}

impl FixedCouponBond {
    /// Creates a bond, checking that the maturity is a whole number of
    /// coupon periods.
    pub fn new(
        face_value: f64,
        maturity: f64,
        coupon_rate: f64,
        frequency: Frequency,
    ) -> BondResult<Self> {
        ensure_non_negative("face value", face_value)?;
        ensure_positive("maturity", maturity)?;
        ensure_non_negative("coupon rate", coupon_rate)?;
        let m = periods_per_year(frequency)?;

        let exact = maturity * f64::from(m);
        let periods = exact.round();
        if (exact - periods).abs() > PERIOD_TOLERANCE || periods > f64::from(u32::MAX) {
            return Err(BondError::invalid_spec(format!(
                "maturity of {maturity} years is not a whole number of {frequency} periods"
            )));
        }

        Ok(Self {
            face_value,
            maturity,
            coupon_rate,
            frequency,
            periods: periods as u32,
        })
    }

    /// Face value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Maturity in years.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Annual coupon rate.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Number of coupon periods, `m·T`.
    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// Coupon paid each period, `c·F/m`.
    pub fn coupon_amount(&self) -> f64 {
        self.coupon_rate * self.face_value / f64::from(self.frequency.periods_per_year())
    }

    /// Cash flow of period `k` (one-based); the last one carries the face value.
    fn cash_flow(&self, k: u32) -> f64 {
        if k == self.periods {
            self.coupon_amount() + self.face_value
        } else {
            self.coupon_amount()
        }
    }

    /// The bond's cash flows at times `k/m`.
    pub fn schedule(&self) -> BondResult<CashFlowSchedule> {
        let amounts: Vec<f64> = (1..=self.periods).map(|k| self.cash_flow(k)).collect();
        Ok(CashFlowSchedule::periodic(
            &amounts,
            self.frequency.periods_per_year(),
        )?)
    }

    /// Present value of each period's cash flow.
    pub fn present_values(&self, rate: f64) -> BondResult<Vec<f64>> {
        let m = self.frequency.periods_per_year();
        ensure_discrete_rate(rate, m)?;
        Ok((1..=self.periods)
            .map(|k| self.cash_flow(k) * periodic_discount_factor(rate, m, k))
            .collect())
    }

    /// Price at a yield compounded at the coupon frequency.
    pub fn price(&self, rate: f64) -> BondResult<f64> {
        Ok(self.present_values(rate)?.iter().sum())
    }

    /// Macaulay duration in years, `Σ tₖ·PVₖ / Σ PVₖ`.
    pub fn macaulay_duration(&self, rate: f64) -> BondResult<f64> {
        let present_values = self.present_values(rate)?;
        let price: f64 = present_values.iter().sum();
        if price <= 0.0 {
            return Err(BondError::invalid_spec(
                "duration is undefined for a bond with no positive value",
            ));
        }

        let m = f64::from(self.frequency.periods_per_year());
        let weighted: f64 = present_values
            .iter()
            .zip(1..=self.periods)
            .map(|(pv, k)| f64::from(k) / m * pv)
            .sum();
        Ok(weighted / price)
    }

    /// Value at `horizon` years of every cash flow carried to the horizon at
    /// the yield: earlier flows are reinvested, later ones discounted.
    ///
    /// Equals `price × (1 + y/m)^(m·H)`.
    pub fn horizon_value(&self, rate: f64, horizon: f64) -> BondResult<f64> {
        let m = self.frequency.periods_per_year();
        ensure_discrete_rate(rate, m)?;
        ensure_non_negative("horizon", horizon)?;
        if horizon > self.maturity {
            return Err(BondError::invalid_argument(format!(
                "horizon {horizon} is beyond maturity {}",
                self.maturity
            )));
        }

        let growth = 1.0 + rate / f64::from(m);
        let horizon_periods = f64::from(m) * horizon;
        Ok((1..=self.periods)
            .map(|k| self.cash_flow(k) * growth.powf(horizon_periods - f64::from(k)))
            .sum())
    }
}

/// Price of a coupon bond at a constant discrete yield:
/// `Σₖ (c·F/m)(1 + y/m)^(−k) + F(1 + y/m)^(−m·T)`.
pub fn price_coupon_bond_discrete(
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    rate: f64,
    frequency: Frequency,
) -> BondResult<f64> {
    FixedCouponBond::new(face_value, maturity, coupon_rate, frequency)?.price(rate)
}

/// Present value of each period's cash flow; they sum to the price.
pub fn coupon_present_values(
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    rate: f64,
    frequency: Frequency,
) -> BondResult<Vec<f64>> {
    FixedCouponBond::new(face_value, maturity, coupon_rate, frequency)?.present_values(rate)
}

/// The bond's cash flows as a schedule.
pub fn coupon_schedule(
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    frequency: Frequency,
) -> BondResult<CashFlowSchedule> {
    FixedCouponBond::new(face_value, maturity, coupon_rate, frequency)?.schedule()
}

/// Macaulay duration in years.
pub fn macaulay_duration(
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    rate: f64,
    frequency: Frequency,
) -> BondResult<f64> {
    FixedCouponBond::new(face_value, maturity, coupon_rate, frequency)?.macaulay_duration(rate)
}

/// Value of the bond's cash flows at `horizon` years.
pub fn horizon_value(
    face_value: f64,
    maturity: f64,
    coupon_rate: f64,
    rate: f64,
    frequency: Frequency,
    horizon: f64,
) -> BondResult<f64> {
    FixedCouponBond::new(face_value, maturity, coupon_rate, frequency)?
        .horizon_value(rate, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use coupon_core::Compounding;

    fn three_year_semi_annual() -> FixedCouponBond {
        FixedCouponBond::new(100_000.0, 3.0, 0.08, Frequency::SemiAnnual).unwrap()
    }

    #[test]
    fn test_quarterly_price() {
        let price =
            price_coupon_bond_discrete(10_000.0, 10.0, 0.05, 0.07, Frequency::Quarterly).unwrap();
        assert_relative_eq!(price, 8570.288523, epsilon = 1e-5);
    }

    #[test]
    fn test_par_bond() {
        let price =
            price_coupon_bond_discrete(100.0, 5.0, 0.06, 0.06, Frequency::SemiAnnual).unwrap();
        assert_relative_eq!(price, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_present_values() {
        let pvs = three_year_semi_annual().present_values(0.09).unwrap();
        let expected = [3827.751, 3662.920, 3505.186, 3354.245, 3209.804, 79861.157];
        assert_eq!(pvs.len(), expected.len());
        for (got, want) in pvs.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-3);
        }
        assert_relative_eq!(pvs.iter().sum::<f64>(), 97421.0638, epsilon = 1e-4);
    }

    #[test]
    fn test_macaulay_duration() {
        let duration = three_year_semi_annual().macaulay_duration(0.09).unwrap();
        assert_relative_eq!(duration, 2.7217014, epsilon = 1e-6);

        // A zero's duration is its maturity
        let zero = FixedCouponBond::new(100.0, 7.0, 0.0, Frequency::Annual).unwrap();
        assert_relative_eq!(zero.macaulay_duration(0.05).unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_horizon_value() {
        let bond = three_year_semi_annual();
        let price = bond.price(0.09).unwrap();
        let duration = bond.macaulay_duration(0.09).unwrap();

        let value = bond.horizon_value(0.09, duration).unwrap();
        assert_relative_eq!(value, 123_797.1187, epsilon = 1e-3);
        assert_relative_eq!(value, price * 1.045_f64.powf(2.0 * duration), epsilon = 1e-6);

        assert_relative_eq!(bond.horizon_value(0.09, 0.0).unwrap(), price, epsilon = 1e-8);
        assert!(bond.horizon_value(0.09, 3.5).is_err());
        assert!(bond.horizon_value(0.09, -0.1).is_err());
    }

    #[test]
    fn test_schedule_matches_price() {
        let bond = three_year_semi_annual();
        let schedule = bond.schedule().unwrap();
        assert_eq!(schedule.len(), 6);
        assert_relative_eq!(schedule.maturity(), 3.0);
        assert_relative_eq!(schedule.total(), 124_000.0);

        let semi = Compounding::Periodic(Frequency::SemiAnnual);
        assert_relative_eq!(
            schedule.present_value(0.09, semi),
            bond.price(0.09).unwrap(),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_invalid_specs() {
        assert!(matches!(
            FixedCouponBond::new(100.0, 2.3, 0.05, Frequency::SemiAnnual),
            Err(BondError::InvalidSpec { .. })
        ));
        assert!(matches!(
            FixedCouponBond::new(100.0, 2.0, -0.05, Frequency::SemiAnnual),
            Err(BondError::InvalidArgument { .. })
        ));
        assert!(FixedCouponBond::new(-100.0, 2.0, 0.05, Frequency::Annual).is_err());
        assert!(FixedCouponBond::new(100.0, 0.0, 0.05, Frequency::Annual).is_err());
        assert!(FixedCouponBond::new(100.0, 2.0, 0.05, Frequency::Custom(0)).is_err());
        assert!(three_year_semi_annual().price(-3.0).is_err());
    }

    #[test]
    fn test_zero_face_has_no_duration() {
        let bond = FixedCouponBond::new(0.0, 2.0, 0.05, Frequency::Annual).unwrap();
        assert_relative_eq!(bond.price(0.05).unwrap(), 0.0);
        assert!(bond.macaulay_duration(0.05).is_err());
    }
}

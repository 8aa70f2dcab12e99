//! Fixed-for-floating interest rate swaps on a bootstrapped curve.
//!
//! Each period of the curve is one swap period. The fixed leg pays
//! `N · r · τ` and the floating leg `N · (f + s) · τ`, where `f` is the
//! continuously compounded forward rate of the period, `s` the floating
//! spread and `τ` the period length. Values are from the side that receives
//! fixed and pays floating.

use serde::{Deserialize, Serialize};

use crate::curves::{BootstrappedCurve, YieldCurve};
use crate::error::{ensure_finite, ensure_positive, BondError, BondResult};

/// Fixed leg payment `N · r` for one unit period.
pub fn fixed_payment(notional: f64, fixed_rate: f64) -> f64 {
    notional * fixed_rate
}

/// Floating leg payment `N · (f + s)` for one unit period.
pub fn floating_payment(notional: f64, forward_rate: f64, floating_spread: f64) -> f64 {
    notional * (forward_rate + floating_spread)
}

/// One period of a valued swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapPeriod {
    /// Period start in years.
    pub start: f64,
    /// Period end (payment time) in years.
    pub end: f64,
    /// Forward rate over the period.
    pub forward_rate: f64,
    /// Discount factor to the payment time.
    pub discount_factor: f64,
    /// Fixed leg payment.
    pub fixed_payment: f64,
    /// Floating leg payment.
    pub floating_payment: f64,
}

impl SwapPeriod {
    /// Fixed minus floating payment.
    pub fn net_payment(&self) -> f64 {
        self.fixed_payment - self.floating_payment
    }

    /// Discounted net payment.
    pub fn present_value(&self) -> f64 {
        self.net_payment() * self.discount_factor
    }
}

/// A swap valued against a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapValuation {
    /// Periods in payment order.
    pub periods: Vec<SwapPeriod>,
}

impl SwapValuation {
    /// Present value of the fixed leg.
    pub fn fixed_leg_value(&self) -> f64 {
        self.periods
            .iter()
            .map(|p| p.fixed_payment * p.discount_factor)
            .sum()
    }

    /// Present value of the floating leg.
    pub fn floating_leg_value(&self) -> f64 {
        self.periods
            .iter()
            .map(|p| p.floating_payment * p.discount_factor)
            .sum()
    }

    /// Value to the fixed receiver.
    pub fn value(&self) -> f64 {
        self.periods.iter().map(SwapPeriod::present_value).sum()
    }
}

/// A fixed-for-floating interest rate swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRateSwap {
    notional: f64,
    fixed_rate: f64,
    floating_spread: f64,
}

impl InterestRateSwap {
    /// Creates a swap with no floating spread.
    pub fn new(notional: f64, fixed_rate: f64) -> BondResult<Self> {
        ensure_positive("notional", notional)?;
        ensure_finite("fixed rate", fixed_rate)?;
        Ok(Self {
            notional,
            fixed_rate,
            floating_spread: 0.0,
        })
    }

    /// Sets the spread added to the floating rate.
    pub fn with_floating_spread(mut self, spread: f64) -> BondResult<Self> {
        self.floating_spread = ensure_finite("floating spread", spread)?;
        Ok(self)
    }

    /// Notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixed rate.
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Floating spread.
    pub fn floating_spread(&self) -> f64 {
        self.floating_spread
    }

    /// Fixed minus floating payment for a period of length `accrual`.
    pub fn payment_difference(&self, forward_rate: f64, accrual: f64) -> f64 {
        (fixed_payment(self.notional, self.fixed_rate)
            - floating_payment(self.notional, forward_rate, self.floating_spread))
            * accrual
    }

    /// Values the swap period by period against `curve`.
    pub fn value(&self, curve: &BootstrappedCurve) -> BondResult<SwapValuation> {
        let mut start = 0.0;
        let mut periods = Vec::with_capacity(curve.points().len());
        for point in curve.points() {
            let accrual = point.maturity - start;
            let discount_factor = curve.discount_factor(point.maturity)?;
            periods.push(SwapPeriod {
                start,
                end: point.maturity,
                forward_rate: point.forward_rate,
                discount_factor,
                fixed_payment: fixed_payment(self.notional, self.fixed_rate) * accrual,
                floating_payment: floating_payment(
                    self.notional,
                    point.forward_rate,
                    self.floating_spread,
                ) * accrual,
            });
            start = point.maturity;
        }
        if periods.is_empty() {
            return Err(BondError::invalid_spec("the curve has no periods"));
        }

        let valuation = SwapValuation { periods };
        log::debug!(
            "swap at {:.6}: fixed leg {:.4}, floating leg {:.4}",
            self.fixed_rate,
            valuation.fixed_leg_value(),
            valuation.floating_leg_value()
        );
        Ok(valuation)
    }

    /// Fixed rate at which the swap is worth zero against `curve`.
    pub fn par_rate(&self, curve: &BootstrappedCurve) -> BondResult<f64> {
        let valuation = self.value(curve)?;
        let annuity: f64 = valuation
            .periods
            .iter()
            .map(|p| (p.end - p.start) * p.discount_factor)
            .sum();
        Ok(valuation.floating_leg_value() / (self.notional * annuity))
    }
}

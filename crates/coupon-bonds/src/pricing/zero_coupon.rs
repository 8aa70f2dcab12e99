//! Zero-coupon bond prices.

use coupon_core::compounding::{continuous_discount_factor, discrete_discount_factor};
use coupon_core::Frequency;

use crate::curves::YieldCurve;
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, BondResult};
use crate::pricing::{ensure_discrete_rate, periods_per_year};

/// `F × (1 + y/m)^(−m·T)`.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::price_zero_coupon_discrete;
/// use coupon_core::Frequency;
///
/// let price = price_zero_coupon_discrete(10_000.0, 20.0, 0.08, Frequency::Annual).unwrap();
/// assert!((price - 2145.48).abs() < 0.01);
/// ```
pub fn price_zero_coupon_discrete(
    face_value: f64,
    maturity: f64,
    rate: f64,
    frequency: Frequency,
) -> BondResult<f64> {
    ensure_non_negative("face value", face_value)?;
    ensure_positive("maturity", maturity)?;
    let m = periods_per_year(frequency)?;
    ensure_discrete_rate(rate, m)?;

    Ok(face_value * discrete_discount_factor(rate, m, maturity))
}

/// `F × e^(−y·T)`.
pub fn price_zero_coupon_continuous(face_value: f64, maturity: f64, rate: f64) -> BondResult<f64> {
    ensure_non_negative("face value", face_value)?;
    ensure_positive("maturity", maturity)?;
    ensure_finite("rate", rate)?;

    Ok(face_value * continuous_discount_factor(rate, maturity))
}

/// `F × exp(−∫₀ᵀ y(t) dt)` for a yield that varies with time.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::curves::FunctionalYield;
/// use coupon_bonds::pricing::price_zero_coupon_time_varying;
///
/// let curve = FunctionalYield::new(|t: f64| 0.06 + 0.2 * t * (-t * t).exp());
/// let price = price_zero_coupon_time_varying(10_000.0, 20.0, &curve).unwrap();
/// assert!((price - 2725.32).abs() < 0.01);
/// ```
pub fn price_zero_coupon_time_varying<C>(
    face_value: f64,
    maturity: f64,
    curve: &C,
) -> BondResult<f64>
where
    C: YieldCurve + ?Sized,
{
    ensure_non_negative("face value", face_value)?;
    ensure_positive("maturity", maturity)?;

    Ok(face_value * curve.discount_factor(maturity)?)
}

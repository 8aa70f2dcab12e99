//! Spot and forward rates recovered from coupon bond prices.

use coupon_core::Frequency;
use serde::{Deserialize, Serialize};

use crate::curves::YieldCurve;
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, BondError, BondResult};
use crate::pricing::periods_per_year;

/// Spot rate `y₀,ₙ = (1/P₀,ₙ)^(1/n) − 1` from a discount factor over `n`
/// periods.
pub fn spot_rate_from_discount_factor(discount_factor: f64, periods: f64) -> BondResult<f64> {
    ensure_positive("discount factor", discount_factor)?;
    ensure_positive("periods", periods)?;
    Ok((1.0 / discount_factor).powf(1.0 / periods) - 1.0)
}

/// Continuously compounded forward rate between `t_j` and `t_k` implied by
/// the spot rates to each.
pub fn forward_rate_continuous(t_j: f64, t_k: f64, spot_j: f64, spot_k: f64) -> BondResult<f64> {
    ensure_non_negative("start time", t_j)?;
    ensure_finite("end time", t_k)?;
    ensure_finite("start spot rate", spot_j)?;
    ensure_finite("end spot rate", spot_k)?;
    if t_k <= t_j {
        return Err(BondError::invalid_argument(format!(
            "forward period must end after it starts, got [{t_j}, {t_k}]"
        )));
    }
    Ok((spot_k * t_k - spot_j * t_j) / (t_k - t_j))
}

/// One bootstrapped maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Continuously compounded spot rate to the maturity.
    pub spot_rate: f64,
    /// Forward rate from the previous maturity.
    pub forward_rate: f64,
}

/// A curve of spot rates bootstrapped from coupon bond prices.
///
/// As a [`YieldCurve`] the instantaneous yield is the forward rate of the
/// segment containing `t`, flat beyond the last maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrappedCurve {
    points: Vec<CurvePoint>,
}

impl BootstrappedCurve {
    /// Returns the curve points in maturity order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the spot rates.
    pub fn spot_rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spot_rate).collect()
    }

    /// Returns the forward rates.
    pub fn forward_rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.forward_rate).collect()
    }
}

impl YieldCurve for BootstrappedCurve {
    fn yield_at(&self, t: f64) -> f64 {
        self.points
            .iter()
            .find(|p| t <= p.maturity)
            .or_else(|| self.points.last())
            .map_or(0.0, |p| p.forward_rate)
    }

    fn cumulative_yield(&self, t: f64) -> BondResult<f64> {
        ensure_non_negative("time", t)?;
        let mut total = 0.0;
        let mut start = 0.0;
        for point in &self.points {
            if t <= point.maturity {
                return Ok(total + point.forward_rate * (t - start));
            }
            total += point.forward_rate * (point.maturity - start);
            start = point.maturity;
        }
        let last = self.points.last().map_or(0.0, |p| p.forward_rate);
        Ok(total + last * (t - start))
    }
}

/// Bootstraps continuously compounded spot rates from coupon bond prices.
///
/// Bond `k` (zero-based) must mature at period `k + 1`, so each price
/// introduces exactly one unknown spot rate:
///
/// `y₀,ₙ = (1/Tₙ) ln((C + F) / (Pₙ − C Σᵢ₍ₙ e^(−yᵢ tᵢ)))`
///
/// where `C = cF/m` is the per-period coupon. The forward rate of the first
/// maturity equals its spot rate.
pub fn bootstrap_continuous(
    prices: &[f64],
    maturities: &[f64],
    face_value: f64,
    coupon_rate: f64,
    frequency: Frequency,
) -> BondResult<BootstrappedCurve> {
    if prices.is_empty() {
        return Err(BondError::invalid_argument("at least one bond price is required"));
    }
    if prices.len() != maturities.len() {
        return Err(BondError::invalid_spec(format!(
            "{} prices but {} maturities",
            prices.len(),
            maturities.len()
        )));
    }
    ensure_positive("face value", face_value)?;
    ensure_non_negative("coupon rate", coupon_rate)?;
    let m = f64::from(periods_per_year(frequency)?);

    let coupon = coupon_rate * face_value / m;
    let mut points: Vec<CurvePoint> = Vec::with_capacity(prices.len());
    let mut discounted_coupons = 0.0;

    for (k, (&price, &maturity)) in prices.iter().zip(maturities).enumerate() {
        ensure_positive("bond price", price)?;
        ensure_positive("maturity", maturity)?;
        let period = (k + 1) as f64;
        if (maturity * m - period).abs() > 1e-9 {
            return Err(BondError::invalid_spec(format!(
                "bond {} must mature at period {} ({} years), got {} years",
                k + 1,
                period,
                period / m,
                maturity
            )));
        }

        let residual = price - coupon * discounted_coupons;
        if residual <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "price {price} of bond {} does not exceed its discounted coupons",
                k + 1
            )));
        }
        let spot_rate = ((coupon + face_value) / residual).ln() / maturity;

        let forward_rate = match points.last() {
            Some(prev) => {
                forward_rate_continuous(prev.maturity, maturity, prev.spot_rate, spot_rate)?
            }
            None => spot_rate,
        };

        log::debug!(
            "bootstrap t = {}: spot {:.8}, forward {:.8}",
            maturity,
            spot_rate,
            forward_rate
        );

        discounted_coupons += (-spot_rate * maturity).exp();
        points.push(CurvePoint {
            maturity,
            spot_rate,
            forward_rate,
        });
    }

    Ok(BootstrappedCurve { points })
}

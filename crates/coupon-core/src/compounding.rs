//! Discount and accumulation factors.
//!
//! Discrete compounding at `m` periods per year:
//!
//! - accumulation `α = (1 + r/m)^(m·t)`
//! - discount `β = (1 + r/m)^(−m·t)`
//!
//! Continuous compounding:
//!
//! - accumulation `α = e^(r·t)`
//! - discount `β = e^(−r·t)`
//!
//! The functions are total for finite, non-negative `r` and `t` and a
//! positive `m`. Anything else is a caller contract violation; debug builds
//! assert on it, release builds return whatever IEEE arithmetic produces.
//!
//! # Example
//!
//! ```rust
//! use coupon_core::compounding::{continuous_discount_factor, discrete_discount_factor};
//!
//! let annual = discrete_discount_factor(0.05, 1, 2.0);
//! let continuous = continuous_discount_factor(0.05, 2.0);
//!
//! // Continuous compounding discounts harder
//! assert!(continuous < annual);
//! ```

/// Discount factor `(1 + r/m)^(−m·t)` under discrete compounding.
///
/// # Arguments
///
/// * `rate` - Annual rate as a decimal (0.08 for 8%)
/// * `periods_per_year` - Compounding frequency `m`
/// * `t` - Time in years
#[inline]
#[must_use]
pub fn discrete_discount_factor(rate: f64, periods_per_year: u32, t: f64) -> f64 {
    debug_assert!(periods_per_year > 0, "compounding frequency must be positive");
    debug_assert!(t.is_finite() && t >= 0.0, "time must be finite and non-negative");
    let m = f64::from(periods_per_year);
    (1.0 + rate / m).powf(-m * t)
}

/// Accumulation factor `(1 + r/m)^(m·t)` under discrete compounding.
#[inline]
#[must_use]
pub fn discrete_accumulation_factor(rate: f64, periods_per_year: u32, t: f64) -> f64 {
    debug_assert!(periods_per_year > 0, "compounding frequency must be positive");
    let m = f64::from(periods_per_year);
    (1.0 + rate / m).powf(m * t)
}

/// Discount factor `e^(−r·t)` under continuous compounding.
#[inline]
#[must_use]
pub fn continuous_discount_factor(rate: f64, t: f64) -> f64 {
    debug_assert!(t.is_finite() && t >= 0.0, "time must be finite and non-negative");
    (-rate * t).exp()
}

/// Accumulation factor `e^(r·t)` under continuous compounding.
#[inline]
#[must_use]
pub fn continuous_accumulation_factor(rate: f64, t: f64) -> f64 {
    (rate * t).exp()
}

/// Discount factor for a whole number of periods, `(1 + r/m)^(−k)`.
///
/// Used for coupon schedules where cash flows fall on period boundaries.
#[inline]
#[must_use]
pub fn periodic_discount_factor(rate: f64, periods_per_year: u32, periods: u32) -> f64 {
    debug_assert!(periods_per_year > 0, "compounding frequency must be positive");
    let per_period = 1.0 + rate / f64::from(periods_per_year);
    per_period.powf(-f64::from(periods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_periodic_discount_beyond_i32_periods() {
        let periods = 2_200_000_000_u32;
        let df = periodic_discount_factor(1e-9, 1, periods);
        assert!(df < 1.0);
        assert_relative_eq!(
            df,
            discrete_discount_factor(1e-9, 1, f64::from(periods)),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_discrete_discount_annual() {
        // 1.08^-20
        let df = discrete_discount_factor(0.08, 1, 20.0);
        assert_relative_eq!(df, 0.214_548_207_404_056_5, epsilon = 1e-12);
    }

    #[test]
    fn test_continuous_discount() {
        let df = continuous_discount_factor(0.08, 20.0);
        assert_relative_eq!(df, (-1.6_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_accumulation_is_reciprocal() {
        for m in [1, 2, 4, 12, 365] {
            let alpha = discrete_accumulation_factor(0.06, m, 7.5);
            let beta = discrete_discount_factor(0.06, m, 7.5);
            assert_relative_eq!(alpha * beta, 1.0, epsilon = 1e-12);
        }

        let alpha = continuous_accumulation_factor(0.06, 7.5);
        let beta = continuous_discount_factor(0.06, 7.5);
        assert_relative_eq!(alpha * beta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_time_and_zero_rate() {
        assert_eq!(discrete_discount_factor(0.05, 2, 0.0), 1.0);
        assert_eq!(continuous_discount_factor(0.05, 0.0), 1.0);
        assert_eq!(discrete_discount_factor(0.0, 4, 10.0), 1.0);
        assert_eq!(continuous_discount_factor(0.0, 10.0), 1.0);
    }

    #[test]
    fn test_discrete_approaches_continuous() {
        let continuous = continuous_discount_factor(0.08, 20.0);
        let mut previous_gap = f64::INFINITY;

        for m in [1, 2, 4, 12, 52, 365, 10_000] {
            let gap = (discrete_discount_factor(0.08, m, 20.0) - continuous).abs();
            assert!(gap < previous_gap, "gap did not shrink at m = {m}");
            previous_gap = gap;
        }

        assert!(previous_gap < 1e-4);
    }

    #[test]
    fn test_periodic_matches_fractional() {
        // 40 quarters = 10 years
        let by_periods = periodic_discount_factor(0.07, 4, 40);
        let by_years = discrete_discount_factor(0.07, 4, 10.0);
        assert_relative_eq!(by_periods, by_years, epsilon = 1e-14);
    }
}

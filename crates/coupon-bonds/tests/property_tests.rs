//! Property-based tests for pricing and yield invariants.
//!
//! - Prices decrease in yield and, for zeros, in maturity
//! - Yield and price are mutual inverses
//! - Per-period present values sum to the price
//! - Horizon value equals price grown at the yield
//! - Flat lattices discount like annual compounding

use coupon_bonds::prelude::*;
use coupon_core::{Compounding, Frequency};
use coupon_math::solvers::SolverConfig;
use proptest::prelude::*;

fn frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(vec![
        Frequency::Annual,
        Frequency::SemiAnnual,
        Frequency::Quarterly,
        Frequency::Monthly,
    ])
}

proptest! {
    #[test]
    fn zero_price_decreasing(
        rate in 0.001f64..0.2,
        bump in 0.001f64..0.05,
        maturity in 0.5f64..40.0,
        freq in frequency(),
    ) {
        let base = price_zero_coupon_discrete(1_000.0, maturity, rate, freq).unwrap();
        prop_assert!(price_zero_coupon_discrete(1_000.0, maturity, rate + bump, freq).unwrap() < base);
        prop_assert!(price_zero_coupon_discrete(1_000.0, maturity + 1.0, rate, freq).unwrap() < base);
        prop_assert!(price_zero_coupon_continuous(1_000.0, maturity, rate).unwrap() < base);
    }

    #[test]
    fn coupon_bond_decreasing_in_yield(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        rate in 0.001f64..0.2,
        bump in 0.001f64..0.05,
        freq in frequency(),
    ) {
        let bond = FixedCouponBond::new(100.0, f64::from(years), coupon, freq).unwrap();
        prop_assert!(bond.price(rate + bump).unwrap() < bond.price(rate).unwrap());
    }

    #[test]
    fn yield_price_round_trip(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        rate in 0.0f64..0.15,
        freq in frequency(),
    ) {
        let bond = FixedCouponBond::new(100.0, f64::from(years), coupon, freq).unwrap();
        let price = bond.price(rate).unwrap();
        let config = SolverConfig::new(1e-10, 100);

        let result = yield_to_maturity(
            &bond.schedule().unwrap(),
            price,
            Compounding::Periodic(freq),
            0.05,
            &config,
        ).unwrap();

        prop_assert!(result.is_converged());
        prop_assert!((result.yield_rate - rate).abs() < 1e-8);
        prop_assert!((result.repriced - price).abs() < 1e-8);
    }

    #[test]
    fn present_values_sum_to_price(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        rate in 0.0f64..0.2,
        freq in frequency(),
    ) {
        let bond = FixedCouponBond::new(1_000.0, f64::from(years), coupon, freq).unwrap();
        let total: f64 = bond.present_values(rate).unwrap().iter().sum();
        prop_assert!((total - bond.price(rate).unwrap()).abs() < 1e-9);
        prop_assert_eq!(bond.present_values(rate).unwrap().len() as u32, bond.periods());
    }

    #[test]
    fn horizon_value_is_grown_price(
        coupon in 0.0f64..0.12,
        years in 1u32..20,
        rate in 0.0f64..0.2,
        fraction in 0.0f64..=1.0,
        freq in frequency(),
    ) {
        let bond = FixedCouponBond::new(1_000.0, f64::from(years), coupon, freq).unwrap();
        let horizon = fraction * bond.maturity();
        let grown = bond.price(rate).unwrap()
            * Compounding::Periodic(freq).accumulation_factor(rate, horizon);
        let value = bond.horizon_value(rate, horizon).unwrap();
        prop_assert!((value - grown).abs() < 1e-8 * grown.max(1.0));
    }

    #[test]
    fn duration_within_maturity(
        coupon in 0.0f64..0.12,
        years in 1u32..30,
        rate in 0.0f64..0.2,
        freq in frequency(),
    ) {
        let bond = FixedCouponBond::new(100.0, f64::from(years), coupon, freq).unwrap();
        let duration = bond.macaulay_duration(rate).unwrap();
        prop_assert!(duration > 0.0);
        prop_assert!(duration <= bond.maturity() + 1e-12);
    }

    #[test]
    fn flat_lattice_is_annual_discounting(
        rate in 0.0f64..0.2,
        depth in 0usize..12,
        p in 0.0f64..=1.0,
    ) {
        let lattice = ShortRateLattice::multiplicative(rate, 1.0, 1.0, depth, p).unwrap();
        let periods = i32::try_from(depth + 1).unwrap();
        let price = lattice.zero_coupon_price().unwrap();
        prop_assert!((price - (1.0 + rate).powi(-periods)).abs() < 1e-12);
        prop_assert!((lattice.spot_rate().unwrap() - rate).abs() < 1e-10);
    }

    #[test]
    fn lattice_price_falls_as_up_moves_grow_likelier(
        rate in 0.01f64..0.1,
        depth in 1usize..8,
        p in 0.0f64..0.9,
    ) {
        let low = ShortRateLattice::multiplicative(rate, 1.2, 0.85, depth, p).unwrap();
        let high = ShortRateLattice::multiplicative(rate, 1.2, 0.85, depth, p + 0.1).unwrap();
        prop_assert!(high.zero_coupon_price().unwrap() < low.zero_coupon_price().unwrap());
    }
}

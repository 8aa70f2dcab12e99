//! # Coupon Bonds
//!
//! Bond pricing and yield analytics for the Coupon bond valuation library.
//!
//! This crate provides:
//!
//! - **Pricing**: Zero-coupon bonds under discrete, continuous, and
//!   time-varying yields; fixed coupon bonds at a discrete yield
//! - **Analytics**: Per-period present values, Macaulay duration, horizon value
//! - **Yields**: Yield-to-maturity and IRR by Newton's method, with
//!   initial-guess sweeps
//! - **Curves**: Flat and functional yield curves, spot/forward bootstrapping
//! - **Analysis**: Exact sign regions for cash flows affine in a parameter
//! - **Lattices**: Zero-coupon prices and spot rates on binomial short-rate
//!   lattices
//! - **Swaps**: Fixed-for-floating swaps valued on a bootstrapped curve
//!
//! ## Example
//!
//! ```rust
//! use coupon_bonds::prelude::*;
//! use coupon_core::{Compounding, Frequency};
//! use coupon_math::solvers::SolverConfig;
//!
//! let bond = FixedCouponBond::new(10_000.0, 10.0, 0.05, Frequency::Quarterly).unwrap();
//! let price = bond.price(0.07).unwrap();
//!
//! let result = yield_to_maturity(
//!     &bond.schedule().unwrap(),
//!     price,
//!     Compounding::Periodic(Frequency::Quarterly),
//!     0.05,
//!     &SolverConfig::default(),
//! )
//! .unwrap();
//! assert!((result.yield_rate - 0.07).abs() < 1e-10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod curves;
pub mod error;
pub mod lattice;
pub mod pricing;
pub mod swap;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{AffineCashFlow, AffineCashFlows, ParameterRegion, PresentValueLine};
    pub use crate::curves::{
        bootstrap_continuous, forward_rate_continuous, spot_rate_from_discount_factor,
        BootstrappedCurve, CurvePoint, FlatYield, FunctionalYield, YieldCurve,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::lattice::{
        price_zero_coupon_step, spot_rate_from_price_lattice, BinomialLattice, LatticeNode,
        ShortRateLattice,
    };
    pub use crate::pricing::{
        coupon_present_values, coupon_schedule, horizon_value, macaulay_duration, present_value,
        price_coupon_bond_discrete, price_zero_coupon_continuous, price_zero_coupon_discrete,
        price_zero_coupon_time_varying, FixedCouponBond,
    };
    pub use crate::swap::{InterestRateSwap, SwapPeriod, SwapValuation};
    pub use crate::yields::{
        initial_guess_sweep, internal_rate_of_return, yield_to_maturity, GuessOutcome,
        YieldResidual, YieldResult,
    };
}

pub use error::{BondError, BondResult};

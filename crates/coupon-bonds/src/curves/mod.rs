//! Yield curves and term-structure bootstrapping.
//!
//! A [`YieldCurve`] gives the instantaneous yield `y(t)` and its integral
//! `∫₀ᵗ y(s) ds`, from which discount factors follow as `exp(-∫ y)`.

mod bootstrap;
mod yield_curve;

pub use bootstrap::{
    bootstrap_continuous, forward_rate_continuous, spot_rate_from_discount_factor,
    BootstrappedCurve, CurvePoint,
};
pub use yield_curve::{FlatYield, FunctionalYield, YieldCurve, INTEGRATION_ERROR_WARNING};

//! Yield-to-maturity and internal rate of return.
//!
//! Both invert the present-value relation with Newton's method. The residual
//! is `PV(y) − target` and its derivative is the closed form of the chosen
//! discount model, so the round trip price → yield → price reproduces the
//! target within the solver tolerance.

mod residual;
mod ytm;

pub use residual::YieldResidual;
pub use ytm::{
    initial_guess_sweep, internal_rate_of_return, yield_to_maturity, GuessOutcome, YieldResult,
};

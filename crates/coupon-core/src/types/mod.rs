//! Domain types.
//!
//! - [`Frequency`]: Payment / compounding frequency
//! - [`Compounding`]: Interest compounding convention
//! - [`CashFlow`]: A single `(time, amount)` pair
//! - [`CashFlowSchedule`]: Validated, time-ordered cash flows

mod cashflow;
mod frequency;

pub use cashflow::{CashFlow, CashFlowSchedule};
pub use frequency::{Compounding, Frequency};

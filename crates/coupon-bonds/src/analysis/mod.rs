//! Present-value sign analysis.

mod sign;

pub use sign::{AffineCashFlow, AffineCashFlows, ParameterRegion, PresentValueLine};

//! # Coupon Math
//!
//! Numerical routines for the Coupon bond valuation library.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson with an explicit termination protocol,
//!   optional iteration trace, and a numerical-derivative variant
//! - **Integration**: Adaptive Simpson quadrature for time-varying yields
//!
//! ## Design Philosophy
//!
//! - **Explicit Outcomes**: Converged, diverged, and exhausted runs are
//!   distinguishable by type, never by inspecting a NaN
//! - **Invocation-Local State**: Nothing is shared between solver calls
//! - **Generic**: Solvers take any [`Differentiable`](solvers::Differentiable)
//!   capability, or a pair of closures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::fn_params_excessive_bools)]

pub mod error;
pub mod integration;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{DivergenceReason, MathError, MathResult};
    pub use crate::integration::{adaptive_simpson, QuadratureConfig, QuadratureResult};
    pub use crate::solvers::{
        newton_raphson, newton_raphson_numerical, numerical_derivative, solve,
        solve_differentiable, ConvergenceCriterion, Differentiable, NewtonIterate,
        NewtonIteration, NewtonSolution, NewtonState, NewtonStatus, NumericalDerivative,
        SolverConfig,
    };
}

pub use error::{DivergenceReason, MathError, MathResult};

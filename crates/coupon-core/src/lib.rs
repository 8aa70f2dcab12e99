//! # Coupon Core
//!
//! Core types and compounding arithmetic for the Coupon bond valuation library.
//!
//! This crate provides the foundational building blocks used throughout Coupon:
//!
//! - **Compounding**: Discrete and continuous discount/accumulation factors
//! - **Types**: `Frequency`, `Compounding`, `CashFlow`, `CashFlowSchedule`
//! - **Errors**: Validation errors shared by the higher layers
//!
//! ## Design Philosophy
//!
//! - **Pure Functions**: Every factor is referentially transparent
//! - **Validated Data**: Schedules are checked once, at construction
//! - **Explicit Over Implicit**: Rates are decimals (0.05 for 5%), times are years
//!
//! ## Example
//!
//! ```rust
//! use coupon_core::prelude::*;
//!
//! let df = discrete_discount_factor(0.08, 1, 20.0);
//! assert!((10_000.0 * df - 2145.48).abs() < 0.01);
//!
//! let schedule = CashFlowSchedule::annual(&[5.0, 5.0, 105.0]).unwrap();
//! assert_eq!(schedule.len(), 3);
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
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod compounding;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::{
        continuous_accumulation_factor, continuous_discount_factor, discrete_accumulation_factor,
        discrete_discount_factor,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, CashFlowSchedule, Compounding, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CashFlow, CashFlowSchedule, Compounding, Frequency};

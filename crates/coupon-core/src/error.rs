//! Error types for core types.
//!
//! Only validation can fail at this layer: the compounding functions are
//! total on their documented domain.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A value lies outside its documented domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the offending value.
        reason: String,
    },

    /// A cash flow schedule failed validation.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }
}

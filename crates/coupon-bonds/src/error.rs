//! Error types for bond operations.

use coupon_core::CoreError;
use coupon_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// An input was outside its domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the invalid input.
        reason: String,
    },

    /// Inputs were individually valid but inconsistent with each other.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// Numerical routine error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Returns true if Newton's method diverged.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Math(e) if e.is_diverged())
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &str, value: f64) -> BondResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BondError::invalid_argument(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Rejects negative or non-finite values.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> BondResult<f64> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(BondError::invalid_argument(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

/// Rejects zero, negative, or non-finite values.
pub(crate) fn ensure_positive(name: &str, value: f64) -> BondResult<f64> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(BondError::invalid_argument(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_math::DivergenceReason;

    #[test]
    fn test_error_display() {
        let err = BondError::invalid_spec("maturity is not a whole number of periods");
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_from_math_error() {
        let err: BondError = MathError::diverged(2, 0.1, DivergenceReason::ZeroDerivative).into();
        assert!(err.is_diverged());
        assert!(err.to_string().starts_with("Math error"));
    }

    #[test]
    fn test_validation_helpers() {
        assert!(ensure_finite("rate", f64::NAN).is_err());
        assert!(ensure_non_negative("face value", -1.0).is_err());
        assert!(ensure_non_negative("face value", 0.0).is_ok());
        assert!(ensure_positive("maturity", 0.0).is_err());
        assert_eq!(ensure_positive("maturity", 2.5).unwrap(), 2.5);
    }
}

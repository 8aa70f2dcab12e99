//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid rate.
    #[error("Invalid rate: {0}. Must be a decimal between -1 and 10 (0.05 for 5%).")]
    InvalidRate(f64),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Invalid frequency.
    #[error("Invalid frequency: {0}. Must be a positive number of periods per year.")]
    InvalidFrequency(u32),

    /// A list argument could not be parsed.
    #[error("Invalid list '{input}': {reason}")]
    InvalidList {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

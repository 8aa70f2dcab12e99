//! CLI command implementations.

pub mod bond;
pub mod bootstrap;
pub mod config;
pub mod curve;
pub mod demo;
pub mod lattice;
pub mod sign;
pub mod swap;
pub mod sweep;
pub mod ytm;
pub mod zero;

// Re-export submodules for convenience
pub use bond::BondArgs;
pub use bootstrap::BootstrapArgs;
pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use demo::DemoArgs;
pub use lattice::LatticeArgs;
pub use sign::SignArgs;
pub use swap::SwapArgs;
pub use sweep::SweepArgs;
pub use ytm::YtmArgs;
pub use zero::ZeroArgs;

use coupon_core::{Compounding, Frequency};

use crate::error::{CliError, CliResult};

/// Parses a comma-separated list of numbers such as `2.3,2.9,105`.
pub fn parse_list(s: &str) -> CliResult<Vec<f64>> {
    let values = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>().map_err(|_| CliError::InvalidList {
                input: s.to_string(),
                reason: format!("'{part}' is not a number"),
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    if values.is_empty() {
        return Err(CliError::InvalidList {
            input: s.to_string(),
            reason: "no values".to_string(),
        });
    }
    Ok(values)
}

/// Validates a decimal rate.
pub fn validate_rate(rate: f64) -> CliResult<f64> {
    if !(-1.0..=10.0).contains(&rate) {
        return Err(CliError::InvalidRate(rate));
    }
    Ok(rate)
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if price.is_nan() || price <= 0.0 {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

/// Maps a period count to a frequency.
pub fn parse_frequency(periods_per_year: u32) -> CliResult<Frequency> {
    Frequency::from_periods(periods_per_year).map_err(|_| CliError::InvalidFrequency(periods_per_year))
}

/// Continuous compounding, or periodic at `periods_per_year`.
pub fn parse_compounding(continuous: bool, periods_per_year: u32) -> CliResult<Compounding> {
    if continuous {
        Ok(Compounding::Continuous)
    } else {
        Ok(Compounding::Periodic(parse_frequency(periods_per_year)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("2.3, 2.9,105").unwrap(), vec![2.3, 2.9, 105.0]);
        assert_eq!(parse_list("-100,60,60,").unwrap(), vec![-100.0, 60.0, 60.0]);
        assert!(matches!(parse_list("1,x"), Err(CliError::InvalidList { .. })));
        assert!(parse_list(" , ").is_err());
    }

    #[test]
    fn test_validators() {
        assert!(validate_rate(0.05).is_ok());
        assert!(validate_rate(5.0).is_ok());
        assert!(validate_rate(-2.0).is_err());
        assert!(validate_price(100.0).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_compounding() {
        assert_eq!(parse_compounding(true, 0).unwrap(), Compounding::Continuous);
        assert_eq!(
            parse_compounding(false, 4).unwrap(),
            Compounding::Periodic(Frequency::Quarterly)
        );
        assert!(matches!(
            parse_compounding(false, 0),
            Err(CliError::InvalidFrequency(0))
        ));
    }
}

//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compounding::{
    continuous_accumulation_factor, continuous_discount_factor, discrete_accumulation_factor,
    discrete_discount_factor,
};
use crate::error::{CoreError, CoreResult};

/// Payment or compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual (1 per year)
    #[default]
    Annual,
    /// Semi-annual (2 per year)
    SemiAnnual,
    /// Quarterly (4 per year)
    Quarterly,
    /// Monthly (12 per year)
    Monthly,
    /// Weekly (52 per year)
    Weekly,
    /// Daily (365 per year)
    Daily,
    /// Any other number of periods per year
    Custom(u32),
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
            Frequency::Custom(m) => *m,
        }
    }

    /// Maps a period count to the named frequency, falling back to `Custom`.
    ///
    /// Zero periods per year is rejected.
    pub fn from_periods(periods_per_year: u32) -> CoreResult<Self> {
        let frequency = match periods_per_year {
            0 => {
                return Err(CoreError::invalid_argument(
                    "compounding frequency must be a positive integer",
                ))
            }
            1 => Frequency::Annual,
            2 => Frequency::SemiAnnual,
            4 => Frequency::Quarterly,
            12 => Frequency::Monthly,
            52 => Frequency::Weekly,
            365 => Frequency::Daily,
            m => Frequency::Custom(m),
        };
        Ok(frequency)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Annual => write!(f, "Annual"),
            Frequency::SemiAnnual => write!(f, "Semi-Annual"),
            Frequency::Quarterly => write!(f, "Quarterly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Daily => write!(f, "Daily"),
            Frequency::Custom(m) => write!(f, "{m}x per year"),
        }
    }
}

/// Interest compounding convention.
///
/// # Example
///
/// ```rust
/// use coupon_core::types::{Compounding, Frequency};
///
/// let annual = Compounding::Periodic(Frequency::Annual);
/// let df = annual.discount_factor(0.05, 2.0);
/// assert!((df - 1.0 / 1.05_f64.powi(2)).abs() < 1e-12);
///
/// let rate = annual.zero_rate(df, 2.0);
/// assert!((rate - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compounding {
    /// Discrete compounding at the given frequency
    Periodic(Frequency),
    /// Continuous compounding
    Continuous,
}

impl Default for Compounding {
    fn default() -> Self {
        Compounding::Periodic(Frequency::Annual)
    }
}

impl Compounding {
    /// Returns the number of compounding periods per year, or `None` when continuous.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Periodic(frequency) => Some(frequency.periods_per_year()),
            Compounding::Continuous => None,
        }
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }

    /// Discount factor for `rate` over `t` years.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Periodic(frequency) => {
                discrete_discount_factor(rate, frequency.periods_per_year(), t)
            }
            Compounding::Continuous => continuous_discount_factor(rate, t),
        }
    }

    /// Accumulation factor for `rate` over `t` years.
    #[must_use]
    pub fn accumulation_factor(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Periodic(frequency) => {
                discrete_accumulation_factor(rate, frequency.periods_per_year(), t)
            }
            Compounding::Continuous => continuous_accumulation_factor(rate, t),
        }
    }

    /// Derivative of the discount factor with respect to the rate.
    ///
    /// - periodic: `−t · (1 + r/m)^(−m·t − 1)`
    /// - continuous: `−t · e^(−r·t)`
    #[must_use]
    pub fn discount_factor_derivative(&self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Periodic(frequency) => {
                let m = f64::from(frequency.periods_per_year());
                -t * (1.0 + rate / m).powf(-m * t - 1.0)
            }
            Compounding::Continuous => -t * continuous_discount_factor(rate, t),
        }
    }

    /// Inverts [`discount_factor`](Self::discount_factor): the rate that
    /// produces `df` over `t` years.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        debug_assert!(df > 0.0, "discount factor must be positive");
        debug_assert!(t > 0.0, "time must be positive");
        match self {
            Compounding::Periodic(frequency) => {
                let m = f64::from(frequency.periods_per_year());
                m * (df.powf(-1.0 / (m * t)) - 1.0)
            }
            Compounding::Continuous => -df.ln() / t,
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compounding::Periodic(frequency) => write!(f, "{frequency}"),
            Compounding::Continuous => write!(f, "Continuous"),
        }
    }
}

impl From<Frequency> for Compounding {
    fn from(frequency: Frequency) -> Self {
        Compounding::Periodic(frequency)
    }
}

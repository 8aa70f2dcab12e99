//! Yield curve abstraction.

use coupon_math::integration::{adaptive_simpson, QuadratureConfig};

use crate::error::{ensure_finite, ensure_non_negative, BondResult};

/// Quadrature error estimates above this are logged at `warn` level.
pub const INTEGRATION_ERROR_WARNING: f64 = 1e-6;

/// A yield curve as a function of time in years.
pub trait YieldCurve {
    /// Instantaneous yield at time `t`.
    fn yield_at(&self, t: f64) -> f64;

    /// Cumulative yield `∫₀ᵗ y(s) ds`.
    fn cumulative_yield(&self, t: f64) -> BondResult<f64>;

    /// Discount factor `exp(-∫₀ᵗ y(s) ds)`.
    fn discount_factor(&self, t: f64) -> BondResult<f64> {
        Ok((-self.cumulative_yield(t)?).exp())
    }

    /// Accumulation factor `exp(∫₀ᵗ y(s) ds)`.
    fn accumulation_factor(&self, t: f64) -> BondResult<f64> {
        Ok(self.cumulative_yield(t)?.exp())
    }
}

impl<T: YieldCurve + ?Sized> YieldCurve for &T {
    fn yield_at(&self, t: f64) -> f64 {
        (**self).yield_at(t)
    }

    fn cumulative_yield(&self, t: f64) -> BondResult<f64> {
        (**self).cumulative_yield(t)
    }
}

/// A constant yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatYield {
    rate: f64,
}

impl FlatYield {
    /// Creates a flat curve at `rate` (continuously compounded).
    pub fn new(rate: f64) -> BondResult<Self> {
        ensure_finite("rate", rate)?;
        Ok(Self { rate })
    }

    /// Returns the rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl YieldCurve for FlatYield {
    fn yield_at(&self, _t: f64) -> f64 {
        self.rate
    }

    fn cumulative_yield(&self, t: f64) -> BondResult<f64> {
        ensure_non_negative("time", t)?;
        Ok(self.rate * t)
    }
}

/// A yield given by an arbitrary function of time, integrated numerically.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::curves::{FunctionalYield, YieldCurve};
///
/// let curve = FunctionalYield::new(|t: f64| 0.06 + 0.2 * t * (-t * t).exp());
/// let integral = curve.cumulative_yield(20.0).unwrap();
/// assert!((integral - 1.3).abs() < 1e-9);
/// ```
#[derive(Clone)]
pub struct FunctionalYield<F> {
    f: F,
    config: QuadratureConfig,
}

impl<F> FunctionalYield<F>
where
    F: Fn(f64) -> f64,
{
    /// Creates a curve with the default quadrature settings.
    pub fn new(f: F) -> Self {
        Self {
            f,
            config: QuadratureConfig::default(),
        }
    }

    /// Overrides the quadrature settings.
    #[must_use]
    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the quadrature settings.
    pub fn quadrature(&self) -> &QuadratureConfig {
        &self.config
    }
}

impl<F> std::fmt::Debug for FunctionalYield<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionalYield")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<F> YieldCurve for FunctionalYield<F>
where
    F: Fn(f64) -> f64,
{
    fn yield_at(&self, t: f64) -> f64 {
        (self.f)(t)
    }

    fn cumulative_yield(&self, t: f64) -> BondResult<f64> {
        ensure_non_negative("time", t)?;
        let result = adaptive_simpson(&self.f, 0.0, t, &self.config)?;
        if result.error_estimate > INTEGRATION_ERROR_WARNING {
            log::warn!(
                "high integration error for cumulative yield to t = {}: {:.3e}",
                t,
                result.error_estimate
            );
        }
        Ok(result.value)
    }
}

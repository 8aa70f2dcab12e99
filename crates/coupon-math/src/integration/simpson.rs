//! Adaptive Simpson quadrature.

use crate::error::{MathError, MathResult};
use crate::integration::{QuadratureConfig, QuadratureResult};

struct Integrator<'a, F> {
    f: &'a F,
    evaluations: usize,
    error: f64,
    depth_limited: bool,
}

impl<F> Integrator<'_, F>
where
    F: Fn(f64) -> f64,
{
    fn eval(&mut self, x: f64) -> MathResult<f64> {
        self.evaluations += 1;
        let fx = (self.f)(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(MathError::quadrature_failed(format!(
                "integrand is not finite at {x} ({fx})"
            )))
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn refine(
        &mut self,
        a: f64,
        b: f64,
        fa: f64,
        fm: f64,
        fb: f64,
        whole: f64,
        tolerance: f64,
        depth: u32,
    ) -> MathResult<f64> {
        let m = 0.5 * (a + b);
        let flm = self.eval(0.5 * (a + m))?;
        let frm = self.eval(0.5 * (m + b))?;

        let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
        let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
        let delta = left + right - whole;

        if delta.abs() <= 15.0 * tolerance || depth == 0 {
            if depth == 0 && delta.abs() > 15.0 * tolerance {
                self.depth_limited = true;
            }
            self.error += delta.abs() / 15.0;
            return Ok(left + right + delta / 15.0);
        }

        let half = 0.5 * tolerance;
        Ok(self.refine(a, m, fa, flm, fm, left, half, depth - 1)?
            + self.refine(m, b, fm, frm, fb, right, half, depth - 1)?)
    }
}

/// Integrates `f` over `[a, b]`.
///
/// The interval is cut into `config.initial_panels` equal panels and each is
/// refined by recursive bisection until the Simpson estimate agrees with the
/// sum of its halves. Reversed bounds negate the result; `a == b` gives zero.
///
/// # Example
///
/// ```rust
/// use coupon_math::integration::{adaptive_simpson, QuadratureConfig};
///
/// let result = adaptive_simpson(|t: f64| t * t, 0.0, 3.0, &QuadratureConfig::default()).unwrap();
/// assert!((result.value - 9.0).abs() < 1e-12);
/// ```
pub fn adaptive_simpson<F>(
    f: F,
    a: f64,
    b: f64,
    config: &QuadratureConfig,
) -> MathResult<QuadratureResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    if !(a.is_finite() && b.is_finite()) {
        return Err(MathError::invalid_argument(format!(
            "integration bounds must be finite, got [{a}, {b}]"
        )));
    }

    if a == b {
        return Ok(QuadratureResult {
            value: 0.0,
            error_estimate: 0.0,
            evaluations: 0,
        });
    }
    if a > b {
        let result = adaptive_simpson(f, b, a, config)?;
        return Ok(QuadratureResult {
            value: -result.value,
            ..result
        });
    }

    let mut integrator = Integrator {
        f: &f,
        evaluations: 0,
        error: 0.0,
        depth_limited: false,
    };

    let panels = config.initial_panels;
    let width = (b - a) / f64::from(panels);
    let tolerance = config.tolerance / f64::from(panels);

    let mut value = 0.0;
    let mut lo = a;
    let mut f_lo = integrator.eval(lo)?;
    for i in 1..=panels {
        let hi = if i == panels {
            b
        } else {
            a + width * f64::from(i)
        };
        let mid = 0.5 * (lo + hi);
        let f_mid = integrator.eval(mid)?;
        let f_hi = integrator.eval(hi)?;
        let whole = (hi - lo) / 6.0 * (f_lo + 4.0 * f_mid + f_hi);

        value += integrator.refine(lo, hi, f_lo, f_mid, f_hi, whole, tolerance, config.max_depth)?;

        lo = hi;
        f_lo = f_hi;
    }

    if integrator.depth_limited {
        log::warn!(
            "quadrature over [{}, {}] hit the depth limit: error estimate {:.3e} after {} evaluations",
            a,
            b,
            integrator.error,
            integrator.evaluations
        );
    } else {
        log::debug!(
            "quadrature over [{}, {}] = {:.12} ({} evaluations)",
            a,
            b,
            value,
            integrator.evaluations
        );
    }

    Ok(QuadratureResult {
        value,
        error_estimate: integrator.error,
        evaluations: integrator.evaluations,
    })
}

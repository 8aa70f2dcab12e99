//! Zero-coupon pricing on a binomial short-rate lattice.

use serde::{Deserialize, Serialize};

use crate::curves::spot_rate_from_discount_factor;
use crate::error::{ensure_finite, BondError, BondResult};
use crate::lattice::BinomialLattice;

/// Tolerance on `p_up + p_down = 1`.
const PROBABILITY_TOLERANCE: f64 = 1e-12;

fn ensure_probability(name: &str, p: f64) -> BondResult<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(BondError::invalid_argument(format!(
            "{name} must lie in [0, 1], got {p}"
        )))
    }
}

/// One backward-induction step for a zero-coupon bond with face 1:
///
/// `P = (p_up · P_up + p_down · P_down) / (1 + f)`
///
/// where `f` is the one-period rate at the node and `P_up`, `P_down` the
/// prices at its children.
pub fn price_zero_coupon_step(
    forward_rate: f64,
    up_price: f64,
    down_price: f64,
    up_probability: f64,
    down_probability: f64,
) -> BondResult<f64> {
    ensure_finite("forward rate", forward_rate)?;
    ensure_finite("up price", up_price)?;
    ensure_finite("down price", down_price)?;
    ensure_probability("up probability", up_probability)?;
    ensure_probability("down probability", down_probability)?;
    if (up_probability + down_probability - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(BondError::invalid_argument(format!(
            "probabilities must sum to 1, got {up_probability} + {down_probability}"
        )));
    }
    if forward_rate <= -1.0 {
        return Err(BondError::invalid_argument(format!(
            "forward rate must exceed -1, got {forward_rate}"
        )));
    }
    let expectation = up_probability * up_price + down_probability * down_price;
    Ok(expectation / (1.0 + forward_rate))
}

/// Spot rate implied by the root of a zero-coupon price lattice.
///
/// A lattice of depth `d` prices the bond maturing at period `d + 1`.
pub fn spot_rate_from_price_lattice(prices: &BinomialLattice) -> BondResult<f64> {
    let maturity = prices.depth() + 1;
    spot_rate_from_discount_factor(prices.root(), maturity as f64)
}

/// A binomial lattice of one-period interest rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortRateLattice {
    rates: BinomialLattice,
    up_probability: f64,
}

impl ShortRateLattice {
    /// Creates a short-rate lattice; every rate must exceed `-1`.
    pub fn new(rates: BinomialLattice, up_probability: f64) -> BondResult<Self> {
        ensure_probability("up probability", up_probability)?;
        for level in rates.levels() {
            if let Some(rate) = level.iter().find(|&&r| r <= -1.0) {
                return Err(BondError::invalid_argument(format!(
                    "short rates must exceed -1, got {rate}"
                )));
            }
        }
        Ok(Self {
            rates,
            up_probability,
        })
    }

    /// Lattice with `r(n, j) = r₀ · u^j · d^(n−j)`.
    pub fn multiplicative(
        initial_rate: f64,
        up_factor: f64,
        down_factor: f64,
        depth: usize,
        up_probability: f64,
    ) -> BondResult<Self> {
        ensure_finite("initial rate", initial_rate)?;
        if !(up_factor > 0.0 && down_factor > 0.0) {
            return Err(BondError::invalid_argument(format!(
                "up and down factors must be positive, got {up_factor} and {down_factor}"
            )));
        }
        let rates = BinomialLattice::from_fn(depth, |n, j| {
            initial_rate * up_factor.powf(j as f64) * down_factor.powf((n - j) as f64)
        })?;
        Self::new(rates, up_probability)
    }

    /// The rate lattice.
    pub fn rates(&self) -> &BinomialLattice {
        &self.rates
    }

    /// Probability of an up move from every node.
    pub fn up_probability(&self) -> f64 {
        self.up_probability
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.rates.depth()
    }

    /// Prices, at every node, of the zero-coupon bond with face 1 maturing
    /// one period after the last step.
    pub fn zero_coupon_lattice(&self) -> BondResult<BinomialLattice> {
        let p = self.up_probability;
        let levels = self.rates.levels();
        let depth = self.depth();

        let mut prices: Vec<Vec<f64>> = vec![Vec::new(); depth + 1];
        prices[depth] = levels[depth].iter().map(|r| 1.0 / (1.0 + r)).collect();

        for n in (0..depth).rev() {
            let next = &prices[n + 1];
            let level = levels[n]
                .iter()
                .enumerate()
                .map(|(j, &rate)| price_zero_coupon_step(rate, next[j + 1], next[j], p, 1.0 - p))
                .collect::<BondResult<Vec<_>>>()?;
            prices[n] = level;
        }

        log::debug!(
            "lattice of depth {} prices P(0, {}) = {:.10}",
            depth,
            depth + 1,
            prices[0][0]
        );
        Ok(BinomialLattice::from_levels(prices))
    }

    /// Time-zero price of the zero-coupon bond maturing at period `depth + 1`.
    pub fn zero_coupon_price(&self) -> BondResult<f64> {
        Ok(self.zero_coupon_lattice()?.root())
    }

    /// Spot rate to period `depth + 1`.
    pub fn spot_rate(&self) -> BondResult<f64> {
        spot_rate_from_price_lattice(&self.zero_coupon_lattice()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_step() {
        let price = price_zero_coupon_step(0.05, 0.94, 0.96, 0.5, 0.5).unwrap();
        assert_relative_eq!(price, 0.95 / 1.05, epsilon = 1e-15);

        assert!(price_zero_coupon_step(0.05, 0.94, 0.96, 0.6, 0.6).is_err());
        assert!(price_zero_coupon_step(0.05, 0.94, 0.96, -0.1, 1.1).is_err());
        assert!(price_zero_coupon_step(-1.0, 0.94, 0.96, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_root_only_lattice() {
        let lattice = ShortRateLattice::multiplicative(0.05, 1.1, 0.9, 0, 0.5).unwrap();

        assert_relative_eq!(lattice.zero_coupon_price().unwrap(), 1.0 / 1.05, epsilon = 1e-15);
        assert_relative_eq!(lattice.spot_rate().unwrap(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_two_step_backward_induction() {
        // r(n, j) = 6% · 1.25^j · 0.9^(n−j)
        let lattice = ShortRateLattice::multiplicative(0.06, 1.25, 0.9, 2, 0.5).unwrap();
        assert_relative_eq!(lattice.rates().value(2, 2).unwrap(), 0.09375, epsilon = 1e-15);

        let prices = lattice.zero_coupon_lattice().unwrap();
        assert_eq!(prices.depth(), 2);
        assert_relative_eq!(prices.value(2, 0).unwrap(), 1.0 / 1.0486, epsilon = 1e-12);
        assert_relative_eq!(prices.value(1, 1).unwrap(), 0.8609552856598225, epsilon = 1e-12);
        assert_relative_eq!(prices.value(1, 0).unwrap(), 0.8967839843054556, epsilon = 1e-12);
        assert_relative_eq!(prices.root(), 0.829122297153433, epsilon = 1e-12);

        assert_relative_eq!(lattice.spot_rate().unwrap(), 0.06445458051602704, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_lattice_matches_annual_discounting() {
        let lattice = ShortRateLattice::multiplicative(0.04, 1.0, 1.0, 4, 0.3).unwrap();

        assert_relative_eq!(
            lattice.zero_coupon_price().unwrap(),
            1.04_f64.powi(-5),
            epsilon = 1e-14
        );
        assert_relative_eq!(lattice.spot_rate().unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_spot_rate_from_price_lattice() {
        let prices =
            BinomialLattice::new(vec![vec![1.0 / 1.05_f64.powi(2)], vec![0.95, 0.96]]).unwrap();
        assert_relative_eq!(spot_rate_from_price_lattice(&prices).unwrap(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_validation() {
        let rates = BinomialLattice::new(vec![vec![0.05], vec![-1.5, 0.06]]).unwrap();
        assert!(ShortRateLattice::new(rates.clone(), 0.5).is_err());

        let rates = BinomialLattice::new(vec![vec![0.05], vec![0.04, 0.06]]).unwrap();
        assert!(ShortRateLattice::new(rates, 1.5).is_err());
        assert!(ShortRateLattice::multiplicative(0.05, 0.0, 0.9, 2, 0.5).is_err());
        assert!(ShortRateLattice::multiplicative(f64::NAN, 1.1, 0.9, 2, 0.5).is_err());
    }
}

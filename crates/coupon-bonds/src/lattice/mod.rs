//! Binomial interest-rate lattices.
//!
//! A recombining lattice holds one value per node: at step `n` there are
//! `n + 1` states, state `j` being the node reached by `j` up moves.
//!
//! ```text
//!               (0,0)
//!              /     \
//!          (1,1)     (1,0)
//!         /    \    /    \
//!     (2,2)    (2,1)     (2,0)
//! ```
//!
//! A [`ShortRateLattice`] carries one-period rates and prices zero-coupon
//! bonds by backward induction.

mod binomial;
mod short_rate;

pub use binomial::{BinomialLattice, LatticeNode};
pub use short_rate::{price_zero_coupon_step, spot_rate_from_price_lattice, ShortRateLattice};

//! Recombining binomial lattice storage.

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// One node of a [`BinomialLattice`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeNode {
    /// Time step, zero at the root.
    pub step: usize,
    /// Number of up moves taken to reach the node.
    pub state: usize,
    /// Value held at the node.
    pub value: f64,
}

impl LatticeNode {
    /// Position `(step, state)` of the child after an up move.
    pub fn up(&self) -> (usize, usize) {
        (self.step + 1, self.state + 1)
    }

    /// Position `(step, state)` of the child after a down move.
    pub fn down(&self) -> (usize, usize) {
        (self.step + 1, self.state)
    }
}

/// A recombining binomial lattice of values.
///
/// `levels[n][j]` is the value at step `n`, state `j`; level `n` holds
/// exactly `n + 1` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialLattice {
    levels: Vec<Vec<f64>>,
}

impl BinomialLattice {
    /// Creates a lattice from its levels, root first.
    pub fn new(levels: Vec<Vec<f64>>) -> BondResult<Self> {
        if levels.is_empty() {
            return Err(BondError::invalid_argument("a lattice needs at least a root"));
        }
        for (n, level) in levels.iter().enumerate() {
            if level.len() != n + 1 {
                return Err(BondError::invalid_spec(format!(
                    "lattice step {n} must hold {} values, got {}",
                    n + 1,
                    level.len()
                )));
            }
            if let Some(value) = level.iter().find(|v| !v.is_finite()) {
                return Err(BondError::invalid_argument(format!(
                    "lattice value at step {n} must be finite, got {value}"
                )));
            }
        }
        Ok(Self { levels })
    }

    /// Builds a lattice of `depth` steps from `value(step, state)`.
    pub fn from_fn(depth: usize, value: impl Fn(usize, usize) -> f64) -> BondResult<Self> {
        let levels = (0..=depth)
            .map(|n| (0..=n).map(|j| value(n, j)).collect())
            .collect();
        Self::new(levels)
    }

    /// Lattice of already-checked levels.
    pub(super) fn from_levels(levels: Vec<Vec<f64>>) -> Self {
        debug_assert!(levels.iter().enumerate().all(|(n, l)| l.len() == n + 1));
        Self { levels }
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Value at the root.
    pub fn root(&self) -> f64 {
        self.levels[0][0]
    }

    /// Value at `(step, state)`, if the node exists.
    pub fn value(&self, step: usize, state: usize) -> Option<f64> {
        self.levels.get(step)?.get(state).copied()
    }

    /// Node at `(step, state)`, if it exists.
    pub fn node(&self, step: usize, state: usize) -> Option<LatticeNode> {
        self.value(step, state).map(|value| LatticeNode { step, state, value })
    }

    /// Values at one step, state 0 first.
    pub fn level(&self, step: usize) -> Option<&[f64]> {
        self.levels.get(step).map(Vec::as_slice)
    }

    /// Nodes at one step; empty beyond the last step.
    pub fn nodes_at_depth(&self, step: usize) -> impl Iterator<Item = LatticeNode> + '_ {
        self.level(step)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(state, &value)| LatticeNode { step, state, value })
    }

    /// Levels, root first.
    pub fn levels(&self) -> &[Vec<f64>] {
        &self.levels
    }
}

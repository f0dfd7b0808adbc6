//! Solver statistics for diagnostics.

use serde::{Deserialize, Serialize};

/// Counters collected by [`GameSolver`](super::GameSolver).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Sub-positions solved from scratch.
    pub positions_solved: u64,

    /// Sub-positions answered from the cache.
    pub cache_hits: u64,

    /// Payoff cells filled in while solving.
    pub payoff_cells: u64,

    /// Times the cache was dropped for exceeding its limit.
    pub evictions: u32,
}

impl SolverStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of sub-position lookups served from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.positions_solved;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

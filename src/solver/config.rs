//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Settings for [`GameSolver`](super::GameSolver).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Reuse sub-position values across queries.
    /// Disabling makes every query re-solve from scratch.
    pub memoize: bool,

    /// Drop the cache once it holds this many positions (0 = unbounded).
    pub max_cached_positions: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_cached_positions: 0,
        }
    }
}

impl SolverConfig {
    /// Create a new config with memoisation switched on or off.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Create a new config with a cache size limit.
    pub fn with_max_cached_positions(mut self, limit: usize) -> Self {
        self.max_cached_positions = limit;
        self
    }
}

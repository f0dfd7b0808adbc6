//! Arena configuration.

use serde::{Deserialize, Serialize};

/// Settings for an [`Arena`](super::Arena) run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Number of contests to play.
    pub games: usize,

    /// Root seed. Contest `n` always uses the n-th fork of this seed.
    pub seed: u64,

    /// Members per side. Must be odd.
    pub roster_size: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 42,
            roster_size: 5,
        }
    }
}

impl ArenaConfig {
    /// Create a new arena config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of contests.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the roster size.
    pub fn with_roster_size(mut self, size: usize) -> Self {
        self.roster_size = size;
        self
    }
}

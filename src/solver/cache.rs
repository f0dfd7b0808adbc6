//! Memoising solver.
//!
//! The stateless functions in [`super::phase`] rebuild every sub-position
//! from scratch. [`GameSolver`] answers the same queries but remembers the
//! value of every position it has solved, keyed by the two available-sets
//! in the order they were given. Order is part of the key because
//! tie-breaks depend on it.
//!
//! ```
//! use pairing_engine::core::{ids, ScoreMatrix};
//! use pairing_engine::solver::{analyze_defender_phase, GameSolver};
//!
//! let matrix = ScoreMatrix::uniform(5, 10);
//! let own = ids(&[0, 1, 2, 3, 4]);
//! let opp = ids(&[0, 1, 2, 3, 4]);
//!
//! let mut solver = GameSolver::new(&matrix);
//! let result = solver.defender_phase(&own, &opp);
//! assert_eq!(result.game_value, analyze_defender_phase(&matrix, &own, &opp).game_value);
//! assert!(solver.stats().cache_hits > 0);
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::core::{MemberId, Roster, Score, ScoreMatrix};

use super::config::SolverConfig;
use super::equilibrium::solve_zero_sum_game;
use super::payoff::build_payoff_with;
use super::phase::{
    attacker_phase_with, defender_phase_with, opponent_attacker_phase_with, DefenderPhaseResult,
    FullAttackerAnalysis, OpponentAttackerAnalysis,
};
use super::stats::SolverStats;

type PositionKey = (Roster, Roster);

/// Phase analysis over one score matrix with a position cache.
pub struct GameSolver<'a> {
    matrix: &'a ScoreMatrix,
    config: SolverConfig,
    cache: FxHashMap<PositionKey, Score>,
    stats: SolverStats,
}

impl<'a> GameSolver<'a> {
    /// Create a solver with default configuration.
    pub fn new(matrix: &'a ScoreMatrix) -> Self {
        Self::with_config(matrix, SolverConfig::default())
    }

    /// Create a solver with custom configuration.
    pub fn with_config(matrix: &'a ScoreMatrix, config: SolverConfig) -> Self {
        Self {
            matrix,
            config,
            cache: FxHashMap::default(),
            stats: SolverStats::new(),
        }
    }

    /// The matrix being solved.
    pub fn matrix(&self) -> &'a ScoreMatrix {
        self.matrix
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Get statistics accumulated since creation or the last [`Self::reset_stats`].
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Reset statistics without touching the cache.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Number of positions currently cached.
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    /// Forget every cached position.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Our total from this position under optimal play.
    pub fn game_value(&mut self, own: &[MemberId], opp: &[MemberId]) -> Score {
        self.position_value(own, opp)
    }

    /// Same as [`analyze_defender_phase`](super::analyze_defender_phase).
    pub fn defender_phase(&mut self, own: &[MemberId], opp: &[MemberId]) -> DefenderPhaseResult {
        let matrix = self.matrix;
        let result = defender_phase_with(matrix, own, opp, &mut |o, p| self.position_value(o, p));
        debug!(
            cached = self.cache.len(),
            hits = self.stats.cache_hits,
            solved = self.stats.positions_solved,
            "defender phase via solver"
        );
        result
    }

    /// Same as [`analyze_attacker_phase`](super::analyze_attacker_phase).
    pub fn attacker_phase(
        &mut self,
        own_defender: MemberId,
        opp_defender: MemberId,
        own_available: &[MemberId],
        opp_available: &[MemberId],
    ) -> Vec<FullAttackerAnalysis> {
        let matrix = self.matrix;
        attacker_phase_with(
            matrix,
            own_defender,
            opp_defender,
            own_available,
            opp_available,
            &mut |o, p| self.position_value(o, p),
        )
    }

    /// Same as [`analyze_opponent_attacker_phase`](super::analyze_opponent_attacker_phase).
    pub fn opponent_attacker_phase(
        &mut self,
        own_defender: MemberId,
        opp_defender: MemberId,
        own_available: &[MemberId],
        opp_available: &[MemberId],
    ) -> Vec<OpponentAttackerAnalysis> {
        let matrix = self.matrix;
        opponent_attacker_phase_with(
            matrix,
            own_defender,
            opp_defender,
            own_available,
            opp_available,
            &mut |o, p| self.position_value(o, p),
        )
    }

    fn position_value(&mut self, own: &[MemberId], opp: &[MemberId]) -> Score {
        let key: Option<PositionKey> = self
            .config
            .memoize
            .then(|| (own.iter().copied().collect(), opp.iter().copied().collect()));

        if let Some(&value) = key.as_ref().and_then(|k| self.cache.get(k)) {
            self.stats.cache_hits += 1;
            trace!(own = ?own, opp = ?opp, value, "cache hit");
            return value;
        }

        let matrix = self.matrix;
        let payoff = build_payoff_with(matrix, own, opp, &mut |o, p| self.position_value(o, p));
        let value = solve_zero_sum_game(&payoff, own, opp).value;

        self.stats.positions_solved += 1;
        self.stats.payoff_cells += (own.len() * opp.len()) as u64;

        if let Some(key) = key {
            let limit = self.config.max_cached_positions;
            if limit > 0 && self.cache.len() >= limit {
                self.cache.clear();
                self.stats.evictions += 1;
            }
            self.cache.insert(key, value);
        }

        value
    }
}

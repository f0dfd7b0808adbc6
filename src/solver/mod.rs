//! Full-game solving: payoff matrices, equilibria and phase recommendations.
//!
//! ## Overview
//!
//! A round starts with both sides nominating a defender at the same time.
//! [`build_defender_payoff_matrix`] values every combination of nominations
//! by playing out the attacker exchange that follows and every later round
//! under optimal play; [`solve_zero_sum_game`] then picks the nomination.
//!
//! The phase functions wrap this into ranked, annotated recommendations:
//!
//! - [`analyze_defender_phase`]
//! - [`analyze_attacker_phase`]
//! - [`analyze_opponent_attacker_phase`]
//!
//! They are stateless. [`GameSolver`] gives the same answers while caching
//! sub-positions, which pays off when one matrix is queried repeatedly.
//!
//! [`evaluate_game_tree`] is a cheaper one-sided estimate that only searches
//! our own defender choices.

pub mod cache;
pub mod config;
pub mod equilibrium;
pub mod payoff;
pub mod phase;
pub mod stats;
pub mod tree;

pub use cache::GameSolver;
pub use config::SolverConfig;
pub use equilibrium::{solve_zero_sum_game, Equilibrium, PayoffMatrix, Strategy};
pub use payoff::{build_defender_payoff_matrix, resolve_attacker_exchange, ExchangeOutcome};
pub use phase::{
    analyze_attacker_phase, analyze_defender_phase, analyze_opponent_attacker_phase,
    DefenderPhaseResult, FullAttackerAnalysis, FullDefenderAnalysis, OpponentAttackerAnalysis,
};
pub use stats::SolverStats;
pub use tree::{evaluate_game_tree, optimal_defender, TreeOutcome};

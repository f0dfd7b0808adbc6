//! # pairing-engine
//!
//! Decision support for the 5v5 defender/attacker pairing format.
//!
//! ## The Format
//!
//! Two rosters of equal, odd size are paired off member against member.
//! Every pairing scores 0–20 for us and the complement for them. Each round
//! both sides nominate a defender at the same time, then each sends two
//! attackers at the other's defender, and each defender picks which attacker
//! it faces. Two pairings lock per round; the last members are paired
//! automatically.
//!
//! ## Design Principles
//!
//! 1. **Pure Analysis**: Every analysis is a deterministic function of the
//!    score matrix and the two available-sets. No I/O, no global state.
//!
//! 2. **Deterministic Tie-Breaks**: Equal values always resolve to the
//!    earliest candidate in caller order, and sorts are stable.
//!
//! 3. **One Pair Rule**: Predicting the best attacker pair against a fixed
//!    defender goes through a single function, whichever side is predicted.
//!
//! ## Modules
//!
//! - `core`: Member ids, score scale, score matrix, locked pairings, RNG
//! - `analysis`: Single-round defender and attacker pair valuation
//! - `solver`: Payoff matrices, equilibria, phase recommendations, caching
//! - `simulation`: Policies, contests and arenas for end-to-end evaluation

pub mod analysis;
pub mod core;
pub mod simulation;
pub mod solver;

// Re-export commonly used types
pub use crate::core::{
    ContestRng, ContestRngState, LockedPairing, MemberId, Roster, Score, ScoreBand, ScoreMatrix,
    MAX_SCORE, NEUTRAL_SCORE,
};

pub use crate::analysis::{
    analyze_attacker_pairs, analyze_defender_options, best_attacker_pair, defender_score,
    worst_matchups, AttackerPairAnalysis, DefenderAnalysis,
};

pub use crate::solver::{
    analyze_attacker_phase, analyze_defender_phase, analyze_opponent_attacker_phase,
    build_defender_payoff_matrix, evaluate_game_tree, optimal_defender, resolve_attacker_exchange,
    solve_zero_sum_game, DefenderPhaseResult, Equilibrium, ExchangeOutcome, FullAttackerAnalysis,
    FullDefenderAnalysis, GameSolver, OpponentAttackerAnalysis, PayoffMatrix, SolverConfig,
    SolverStats, Strategy, TreeOutcome,
};

pub use crate::simulation::{
    play_contest, Arena, ArenaConfig, ArenaReport, ContestRecord, PairingPolicy, SolverPolicy,
    UniformPolicy,
};

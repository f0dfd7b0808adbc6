//! Single-round analyses: what a defender or an attacker pair is worth in
//! the current round, ignoring later rounds.
//!
//! These are the building blocks for [`crate::solver`], which adds backward
//! induction over the remaining rounds.

pub mod attacker;
pub mod defender;

pub use attacker::{analyze_attacker_pairs, best_attacker_pair, best_pair_by, pairs, AttackerPairAnalysis};
pub use defender::{analyze_defender_options, defender_score, worst_matchups, DefenderAnalysis};

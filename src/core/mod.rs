//! Core types: member ids, the score scale, the score matrix, locked
//! pairings and the contest RNG.
//!
//! Everything here is independent of the pairing format; the analysis and
//! solver modules build on these.

pub mod matrix;
pub mod member;
pub mod pairing;
pub mod rng;
pub mod score;

pub use matrix::ScoreMatrix;
pub use member::{ids, without, MemberId, Roster};
pub use pairing::LockedPairing;
pub use rng::{ContestRng, ContestRngState};
pub use score::{format_with_delta, total_score, Score, ScoreBand, MAX_SCORE, NEUTRAL_SCORE};

//! A locked own-vs-opposing matchup.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::member::MemberId;
use super::score::{Score, MAX_SCORE};

/// Two members that will play each other, and what we score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPairing {
    /// Our member.
    pub own: MemberId,
    /// Their member.
    pub opp: MemberId,
    /// Our score for the matchup.
    pub score: Score,
    /// Zero-based round in which the pairing was locked.
    pub round: u8,
}

impl LockedPairing {
    /// Their score for the same matchup.
    #[must_use]
    pub fn opp_score(&self) -> Score {
        MAX_SCORE - self.score
    }
}

impl fmt::Display for LockedPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}: {}", self.own, self.opp, self.score)
    }
}

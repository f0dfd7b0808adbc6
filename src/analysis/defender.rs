//! Defender valuation for a single round.
//!
//! When we nominate a defender, the opposing side sends the two members who
//! score worst for us against it, and our defender then picks the better of
//! those two. The guaranteed outcome is therefore the second-lowest score in
//! the defender's row among the opposing members still available.

use serde::{Deserialize, Serialize};

use crate::core::{MemberId, Score, ScoreMatrix};

/// One candidate defender, valued for the current round only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderAnalysis {
    /// Our candidate.
    pub member: MemberId,
    /// Guaranteed score if nominated (second-lowest in its row).
    pub defender_score: Score,
    /// The two opposing members that would be sent, worst first.
    pub worst_matchups: (MemberId, MemberId),
}

/// Guaranteed score for `defender` against the opposing members in `opposing`.
///
/// With a single opposing member left this is simply that matchup.
///
/// # Panics
///
/// Panics if `opposing` is empty.
#[must_use]
pub fn defender_score(matrix: &ScoreMatrix, defender: MemberId, opposing: &[MemberId]) -> Score {
    if opposing.len() < 2 {
        return matrix.score(defender, opposing[0]);
    }

    let mut scores: Vec<Score> = opposing.iter().map(|&opp| matrix.score(defender, opp)).collect();
    scores.sort_unstable();
    scores[1]
}

/// The two opposing members that score lowest against `defender`, lowest first.
///
/// Ties keep the order of `opposing`. With a single opposing member left that
/// member is returned twice.
///
/// # Panics
///
/// Panics if `opposing` is empty.
#[must_use]
pub fn worst_matchups(
    matrix: &ScoreMatrix,
    defender: MemberId,
    opposing: &[MemberId],
) -> (MemberId, MemberId) {
    if opposing.len() < 2 {
        return (opposing[0], opposing[0]);
    }

    let mut ranked: Vec<MemberId> = opposing.to_vec();
    // stable: equal scores stay in caller order
    ranked.sort_by_key(|&opp| matrix.score(defender, opp));
    (ranked[0], ranked[1])
}

/// Value every candidate in `available` as a defender, best first.
///
/// Equal scores keep the order of `available`.
#[must_use]
pub fn analyze_defender_options(
    matrix: &ScoreMatrix,
    available: &[MemberId],
    opposing: &[MemberId],
) -> Vec<DefenderAnalysis> {
    let mut analyses: Vec<DefenderAnalysis> = available
        .iter()
        .map(|&member| DefenderAnalysis {
            member,
            defender_score: defender_score(matrix, member, opposing),
            worst_matchups: worst_matchups(matrix, member, opposing),
        })
        .collect();

    analyses.sort_by(|a, b| b.defender_score.cmp(&a.defender_score));
    analyses
}

//! Attacker pair enumeration against a revealed opposing defender.
//!
//! We send two attackers; the opposing defender picks whichever of them
//! scores lower for us. A pair is therefore worth the minimum of its two
//! scores, and the best pair maximises that minimum.

use serde::{Deserialize, Serialize};

use crate::core::{MemberId, Score, ScoreMatrix};

/// One candidate attacker pair against a fixed opposing defender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerPairAnalysis {
    /// The pair, in enumeration order.
    pub attackers: (MemberId, MemberId),
    /// Score we get after the defender picks: `min` of the two.
    pub expected_score: Score,
    /// The attacker the defender will choose to face.
    pub forced: MemberId,
    /// The attacker sent back to our pool.
    pub refused: MemberId,
}

impl AttackerPairAnalysis {
    /// Resolve a pair against `defender`. On equal scores the first member is forced.
    #[must_use]
    pub fn resolve(matrix: &ScoreMatrix, defender: MemberId, attackers: (MemberId, MemberId)) -> Self {
        let (a, b) = attackers;
        let score_a = matrix.score(a, defender);
        let score_b = matrix.score(b, defender);
        let (forced, refused) = if score_a <= score_b { (a, b) } else { (b, a) };

        Self {
            attackers,
            expected_score: score_a.min(score_b),
            forced,
            refused,
        }
    }
}

/// Every unordered pair of `candidates`, in index order `(i, j)` with `i < j`.
pub fn pairs(candidates: &[MemberId]) -> impl Iterator<Item = (MemberId, MemberId)> + '_ {
    candidates
        .iter()
        .enumerate()
        .flat_map(move |(i, &a)| candidates[i + 1..].iter().map(move |&b| (a, b)))
}

/// The pair from `candidates` whose lower `key` is highest.
///
/// This is the single "best pair against a fixed target" rule shared by
/// every caller that needs to predict a side's optimal attackers; `key` says
/// what a member is worth against that target. The first pair in
/// enumeration order wins ties. Two or fewer candidates are returned as-is
/// (a lone candidate is paired with itself). `None` when empty.
pub fn best_pair_by<F>(candidates: &[MemberId], key: F) -> Option<(MemberId, MemberId)>
where
    F: Fn(MemberId) -> Score,
{
    match candidates {
        [] => None,
        [only] => Some((*only, *only)),
        [a, b] => Some((*a, *b)),
        _ => {
            let mut best: Option<((MemberId, MemberId), Score)> = None;
            for (a, b) in pairs(candidates) {
                let floor = key(a).min(key(b));
                if best.map_or(true, |(_, current)| floor > current) {
                    best = Some(((a, b), floor));
                }
            }
            best.map(|(pair, _)| pair)
        }
    }
}

/// All C(n, 2) attacker pairs from `available` against `defender`, best first.
///
/// Equal expected scores keep enumeration order. Empty with fewer than two
/// candidates.
#[must_use]
pub fn analyze_attacker_pairs(
    matrix: &ScoreMatrix,
    defender: MemberId,
    available: &[MemberId],
) -> Vec<AttackerPairAnalysis> {
    let mut analyses: Vec<AttackerPairAnalysis> = pairs(available)
        .map(|pair| AttackerPairAnalysis::resolve(matrix, defender, pair))
        .collect();

    analyses.sort_by(|a, b| b.expected_score.cmp(&a.expected_score));
    analyses
}

/// The top entry of [`analyze_attacker_pairs`].
#[must_use]
pub fn best_attacker_pair(
    matrix: &ScoreMatrix,
    defender: MemberId,
    available: &[MemberId],
) -> Option<AttackerPairAnalysis> {
    analyze_attacker_pairs(matrix, defender, available).into_iter().next()
}

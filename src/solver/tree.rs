//! One-sided backward induction over defender choices.
//!
//! Only our defender choice is searched. Each round the opposing side sends
//! its two worst matchups for our defender, we face the better of them, and
//! one member leaves each side. This ignores their simultaneous defender and
//! is kept as a fast estimate next to the full solver in [`super::phase`].

use serde::{Deserialize, Serialize};

use crate::analysis::worst_matchups;
use crate::core::{without, LockedPairing, MemberId, Score, ScoreMatrix};

/// Best line found by [`evaluate_game_tree`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeOutcome {
    /// Sum of the pairing scores.
    pub total_score: Score,
    /// Pairings in the order they lock.
    pub pairings: Vec<LockedPairing>,
}

/// Best total we can force by choosing defenders, with the pairings that get there.
///
/// The first defender in `own` order wins ties.
#[must_use]
pub fn evaluate_game_tree(matrix: &ScoreMatrix, own: &[MemberId], opp: &[MemberId]) -> TreeOutcome {
    evaluate_from(matrix, own, opp, 0)
}

/// Our first defender along the best line, with the line's total.
///
/// `None` when there is nothing to pair.
#[must_use]
pub fn optimal_defender(matrix: &ScoreMatrix, own: &[MemberId], opp: &[MemberId]) -> Option<(MemberId, Score)> {
    let outcome = evaluate_game_tree(matrix, own, opp);
    outcome.pairings.first().map(|first| (first.own, outcome.total_score))
}

fn evaluate_from(matrix: &ScoreMatrix, own: &[MemberId], opp: &[MemberId], round: u8) -> TreeOutcome {
    if own.is_empty() || opp.is_empty() {
        return TreeOutcome::default();
    }

    if let ([own_last], [opp_last, ..]) = (own, opp) {
        let score = matrix.score(*own_last, *opp_last);
        return TreeOutcome {
            total_score: score,
            pairings: vec![LockedPairing { own: *own_last, opp: *opp_last, score, round }],
        };
    }

    let mut best: Option<TreeOutcome> = None;

    for &defender in own {
        let (sent_a, sent_b) = worst_matchups(matrix, defender, opp);
        let score_a = matrix.score(defender, sent_a);
        let score_b = matrix.score(defender, sent_b);
        let (faced, score) = if score_a >= score_b { (sent_a, score_a) } else { (sent_b, score_b) };

        let future = evaluate_from(
            matrix,
            &without(own, &[defender]),
            &without(opp, &[faced]),
            round + 1,
        );
        let total_score = score + future.total_score;

        if best.as_ref().map_or(true, |b| total_score > b.total_score) {
            let mut pairings = Vec::with_capacity(future.pairings.len() + 1);
            pairings.push(LockedPairing { own: defender, opp: faced, score, round });
            pairings.extend(future.pairings);
            best = Some(TreeOutcome { total_score, pairings });
        }
    }

    best.unwrap_or_default()
}

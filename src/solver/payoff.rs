//! Defender payoff matrix construction.
//!
//! Both sides nominate a defender at the same time. For every combination
//! we play out the attacker exchange that follows under optimal play, lock
//! the two resulting pairings, and add the value of the sub-position that
//! remains. The sub-position value is supplied by the caller so that the
//! stateless path and [`GameSolver`](super::GameSolver) share this code.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analysis::{best_pair_by, worst_matchups};
use crate::core::{without, MemberId, Score, ScoreMatrix};

use super::equilibrium::{solve_zero_sum_game, PayoffMatrix};

/// Result of one simultaneous attacker exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    /// What our defender scores against the attacker it picks.
    pub own_defender_score: Score,
    /// What our forced attacker scores against their defender.
    pub own_attacker_score: Score,
    /// Sum of the two.
    pub total: Score,
    /// Our members locked this round: (forced attacker, defender).
    pub own_paired: (MemberId, MemberId),
    /// Their members locked this round: (attacker our defender picked, defender).
    pub opp_paired: (MemberId, MemberId),
}

/// Play out the exchange once both defenders are known.
///
/// They send the two members that score worst against our defender and we
/// take the better one (first on ties). We send the pair with the highest
/// floor against their defender and they take the worse one for us (first
/// on ties). `None` when either side has no attackers left.
#[must_use]
pub fn resolve_attacker_exchange(
    matrix: &ScoreMatrix,
    own_defender: MemberId,
    opp_defender: MemberId,
    own_attackers: &[MemberId],
    opp_attackers: &[MemberId],
) -> Option<ExchangeOutcome> {
    if opp_attackers.is_empty() {
        return None;
    }
    let (sent_at_us_a, sent_at_us_b) = worst_matchups(matrix, own_defender, opp_attackers);
    let (sent_by_us_a, sent_by_us_b) =
        best_pair_by(own_attackers, |m| matrix.score(m, opp_defender))?;

    let score_a = matrix.score(own_defender, sent_at_us_a);
    let score_b = matrix.score(own_defender, sent_at_us_b);
    let own_defender_score = score_a.max(score_b);
    let opp_attacker = if score_a >= score_b { sent_at_us_a } else { sent_at_us_b };

    let score_a = matrix.score(sent_by_us_a, opp_defender);
    let score_b = matrix.score(sent_by_us_b, opp_defender);
    let own_attacker_score = score_a.min(score_b);
    let own_attacker = if score_a <= score_b { sent_by_us_a } else { sent_by_us_b };

    Some(ExchangeOutcome {
        own_defender_score,
        own_attacker_score,
        total: own_defender_score + own_attacker_score,
        own_paired: (own_attacker, own_defender),
        opp_paired: (opp_attacker, opp_defender),
    })
}

/// Payoff matrix for simultaneous defender nomination, resolving later
/// rounds by backward induction.
///
/// `result[i][j]` is our total for the rest of the contest if we nominate
/// `own[i]` and they nominate `opp[j]`. With one member per side the result
/// is the 1×1 direct matchup.
#[must_use]
pub fn build_defender_payoff_matrix(
    matrix: &ScoreMatrix,
    own: &[MemberId],
    opp: &[MemberId],
) -> PayoffMatrix {
    build_payoff_with(matrix, own, opp, &mut |own_left, opp_left| {
        let payoff = build_defender_payoff_matrix(matrix, own_left, opp_left);
        solve_zero_sum_game(&payoff, own_left, opp_left).value
    })
}

/// [`build_defender_payoff_matrix`] with a caller-supplied value for
/// sub-positions of two or more members per side.
pub(crate) fn build_payoff_with<F>(
    matrix: &ScoreMatrix,
    own: &[MemberId],
    opp: &[MemberId],
    sub_position: &mut F,
) -> PayoffMatrix
where
    F: FnMut(&[MemberId], &[MemberId]) -> Score,
{
    if let ([own_last], [opp_last]) = (own, opp) {
        return PayoffMatrix::new(vec![vec![matrix.score(*own_last, *opp_last)]]);
    }

    trace!(own = ?own, opp = ?opp, "building defender payoff matrix");

    let mut rows = Vec::with_capacity(own.len());
    for &own_defender in own {
        let own_attackers = without(own, &[own_defender]);
        let mut row = Vec::with_capacity(opp.len());

        for &opp_defender in opp {
            let opp_attackers = without(opp, &[opp_defender]);

            let Some(exchange) = resolve_attacker_exchange(
                matrix,
                own_defender,
                opp_defender,
                &own_attackers,
                &opp_attackers,
            ) else {
                row.push(matrix.score(own_defender, opp_defender));
                continue;
            };

            let own_left = without(&own_attackers, &[exchange.own_paired.0]);
            let opp_left = without(&opp_attackers, &[exchange.opp_paired.0]);
            row.push(exchange.total + remaining_value(matrix, &own_left, &opp_left, sub_position));
        }

        rows.push(row);
    }

    PayoffMatrix::new(rows)
}

/// Value of the contest from `own_left` vs `opp_left` onwards.
///
/// Nothing left is worth zero and a single member each is the forced final
/// pairing; anything larger is delegated to `sub_position`.
pub(crate) fn remaining_value<F>(
    matrix: &ScoreMatrix,
    own_left: &[MemberId],
    opp_left: &[MemberId],
    sub_position: &mut F,
) -> Score
where
    F: FnMut(&[MemberId], &[MemberId]) -> Score,
{
    match (own_left, opp_left) {
        ([], _) | (_, []) => 0,
        ([own_last], [opp_last]) => matrix.score(*own_last, *opp_last),
        _ => sub_position(own_left, opp_left),
    }
}

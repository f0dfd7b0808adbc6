//! Round orchestration: ranked, annotated recommendations for a game state.
//!
//! - [`analyze_defender_phase`]: which member to nominate as defender.
//! - [`analyze_attacker_phase`]: which pair to send once both defenders are revealed.
//! - [`analyze_opponent_attacker_phase`]: the same decision seen from the
//!   opposing side, to anticipate their pair.
//!
//! Every value accounts for all remaining rounds under optimal play.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{best_pair_by, defender_score, pairs, worst_matchups, AttackerPairAnalysis};
use crate::core::{without, MemberId, Score, ScoreMatrix, MAX_SCORE};

use super::equilibrium::{solve_zero_sum_game, Equilibrium, PayoffMatrix, Strategy};
use super::payoff::{build_defender_payoff_matrix, build_payoff_with, remaining_value};

/// Defender recommendation backed by the full game tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullDefenderAnalysis {
    /// Our candidate.
    pub member: MemberId,
    /// Single-round guarantee (second-lowest score), for intuition.
    pub defender_score: Score,
    /// The two members they would likely send.
    pub worst_matchups: (MemberId, MemberId),
    /// Minimax value of nominating this member.
    pub game_value: Score,
    /// Whether the solver recommends this member.
    pub is_optimal: bool,
    /// Total if they answer this nomination optimally.
    pub worst_case_value: Score,
    /// Total if they pick the defender that suits us best.
    pub best_case_value: Score,
}

/// Everything the defender selection screen needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenderPhaseResult {
    /// Our expected total with optimal play from both sides.
    pub game_value: Score,
    /// `payoff_matrix[i][j]`: total if we nominate own[i] and they nominate opp[j].
    pub payoff_matrix: PayoffMatrix,
    /// One entry per candidate, by `game_value` descending.
    pub defender_analyses: Vec<FullDefenderAnalysis>,
    /// Solver output.
    pub equilibrium: Equilibrium,
}

/// Attacker pair recommendation backed by the full game tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAttackerAnalysis {
    /// The pair, in enumeration order.
    pub attackers: (MemberId, MemberId),
    /// Score from this pairing alone.
    pub expected_score: Score,
    /// The attacker their defender will face.
    pub forced: MemberId,
    /// The attacker that returns to our pool.
    pub refused: MemberId,
    /// This round plus every later round.
    pub total_expected_value: Score,
    /// Ties for the best total are all optimal.
    pub is_optimal: bool,
}

/// One of their candidate pairs against our defender, from their side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentAttackerAnalysis {
    /// Their pair, in enumeration order.
    pub attackers: (MemberId, MemberId),
    /// What our defender scores against the attacker it picks.
    pub expected_score_for_us: Score,
    /// Their side of the same pairing.
    pub expected_score_for_opp: Score,
    /// Their total for this round plus every later round.
    pub total_expected_value_for_opp: Score,
    /// The attacker our defender will choose to face.
    pub forced: MemberId,
    /// Ties for their best total are all optimal.
    pub is_optimal: bool,
}

/// Rank our defender candidates by their minimax value.
///
/// # Panics
///
/// Panics if `own` and `opp` differ in length or name members outside the matrix.
#[must_use]
pub fn analyze_defender_phase(matrix: &ScoreMatrix, own: &[MemberId], opp: &[MemberId]) -> DefenderPhaseResult {
    defender_phase_with(matrix, own, opp, &mut |own_left, opp_left| {
        let payoff = build_defender_payoff_matrix(matrix, own_left, opp_left);
        solve_zero_sum_game(&payoff, own_left, opp_left).value
    })
}

/// Rank our attacker pairs against `opp_defender`, including later rounds.
///
/// `own_available`/`opp_available` exclude both defenders. Their reply
/// against `own_defender` is assumed optimal: the two members worst for us.
#[must_use]
pub fn analyze_attacker_phase(
    matrix: &ScoreMatrix,
    own_defender: MemberId,
    opp_defender: MemberId,
    own_available: &[MemberId],
    opp_available: &[MemberId],
) -> Vec<FullAttackerAnalysis> {
    attacker_phase_with(
        matrix,
        own_defender,
        opp_defender,
        own_available,
        opp_available,
        &mut |own_left, opp_left| analyze_defender_phase(matrix, own_left, opp_left).game_value,
    )
}

/// Rank their attacker pairs against `own_defender`, best for them first.
///
/// Our own pair against `opp_defender` is predicted with the same rule we
/// use for ourselves.
#[must_use]
pub fn analyze_opponent_attacker_phase(
    matrix: &ScoreMatrix,
    own_defender: MemberId,
    opp_defender: MemberId,
    own_available: &[MemberId],
    opp_available: &[MemberId],
) -> Vec<OpponentAttackerAnalysis> {
    opponent_attacker_phase_with(
        matrix,
        own_defender,
        opp_defender,
        own_available,
        opp_available,
        &mut |own_left, opp_left| analyze_defender_phase(matrix, own_left, opp_left).game_value,
    )
}

pub(crate) fn defender_phase_with<F>(
    matrix: &ScoreMatrix,
    own: &[MemberId],
    opp: &[MemberId],
    sub_position: &mut F,
) -> DefenderPhaseResult
where
    F: FnMut(&[MemberId], &[MemberId]) -> Score,
{
    if let ([own_last], [opp_last]) = (own, opp) {
        return final_pairing(matrix, *own_last, *opp_last);
    }

    let payoff_matrix = build_payoff_with(matrix, own, opp, sub_position);
    let equilibrium = solve_zero_sum_game(&payoff_matrix, own, opp);

    let mut defender_analyses: Vec<FullDefenderAnalysis> = own
        .iter()
        .enumerate()
        .map(|(i, &member)| {
            let worst_case_value = payoff_matrix.row_min(i).unwrap_or(0);
            let best_case_value = payoff_matrix.row_max(i).unwrap_or(0);
            FullDefenderAnalysis {
                member,
                defender_score: defender_score(matrix, member, opp),
                worst_matchups: worst_matchups(matrix, member, opp),
                game_value: worst_case_value,
                is_optimal: equilibrium.own_strategy.plays(member),
                worst_case_value,
                best_case_value,
            }
        })
        .collect();

    defender_analyses.sort_by(|a, b| b.game_value.cmp(&a.game_value));

    debug!(
        members = own.len(),
        value = equilibrium.value,
        pure = equilibrium.is_pure,
        "defender phase solved"
    );

    DefenderPhaseResult {
        game_value: equilibrium.value,
        payoff_matrix,
        defender_analyses,
        equilibrium,
    }
}

fn final_pairing(matrix: &ScoreMatrix, own: MemberId, opp: MemberId) -> DefenderPhaseResult {
    let score = matrix.score(own, opp);
    DefenderPhaseResult {
        game_value: score,
        payoff_matrix: PayoffMatrix::new(vec![vec![score]]),
        defender_analyses: vec![FullDefenderAnalysis {
            member: own,
            defender_score: score,
            worst_matchups: (opp, opp),
            game_value: score,
            is_optimal: true,
            worst_case_value: score,
            best_case_value: score,
        }],
        equilibrium: Equilibrium {
            value: score,
            own_strategy: Strategy::Pure(own),
            opp_strategy: Strategy::Pure(opp),
            is_pure: true,
        },
    }
}

pub(crate) fn attacker_phase_with<F>(
    matrix: &ScoreMatrix,
    own_defender: MemberId,
    opp_defender: MemberId,
    own_available: &[MemberId],
    opp_available: &[MemberId],
    sub_position: &mut F,
) -> Vec<FullAttackerAnalysis>
where
    F: FnMut(&[MemberId], &[MemberId]) -> Score,
{
    if own_available.len() < 2 || opp_available.is_empty() {
        return Vec::new();
    }

    // their reply does not depend on which pair we send
    let (sent_a, sent_b) = worst_matchups(matrix, own_defender, opp_available);
    let score_a = matrix.score(own_defender, sent_a);
    let score_b = matrix.score(own_defender, sent_b);
    let own_defender_score = score_a.max(score_b);
    let opp_attacker = if score_a >= score_b { sent_a } else { sent_b };
    let opp_left = without(opp_available, &[opp_attacker]);

    let mut analyses: Vec<FullAttackerAnalysis> = pairs(own_available)
        .map(|pair| {
            let exchange = AttackerPairAnalysis::resolve(matrix, opp_defender, pair);
            let own_left = without(own_available, &[exchange.forced]);
            let future = remaining_value(matrix, &own_left, &opp_left, sub_position);

            FullAttackerAnalysis {
                attackers: pair,
                expected_score: exchange.expected_score,
                forced: exchange.forced,
                refused: exchange.refused,
                total_expected_value: exchange.expected_score + own_defender_score + future,
                is_optimal: false,
            }
        })
        .collect();

    analyses.sort_by(|a, b| b.total_expected_value.cmp(&a.total_expected_value));
    if let Some(best) = analyses.first().map(|a| a.total_expected_value) {
        for analysis in &mut analyses {
            analysis.is_optimal = analysis.total_expected_value == best;
        }
    }

    analyses
}

pub(crate) fn opponent_attacker_phase_with<F>(
    matrix: &ScoreMatrix,
    own_defender: MemberId,
    opp_defender: MemberId,
    own_available: &[MemberId],
    opp_available: &[MemberId],
    sub_position: &mut F,
) -> Vec<OpponentAttackerAnalysis>
where
    F: FnMut(&[MemberId], &[MemberId]) -> Score,
{
    let Some((ours_a, ours_b)) = best_pair_by(own_available, |m| matrix.score(m, opp_defender)) else {
        return Vec::new();
    };
    let score_a = matrix.score(ours_a, opp_defender);
    let score_b = matrix.score(ours_b, opp_defender);
    let own_attacker_score = score_a.min(score_b);
    let own_attacker = if score_a <= score_b { ours_a } else { ours_b };
    let own_left = without(own_available, &[own_attacker]);

    let mut analyses: Vec<OpponentAttackerAnalysis> = pairs(opp_available)
        .map(|pair| {
            let (theirs_a, theirs_b) = pair;
            let score_a = matrix.score(own_defender, theirs_a);
            let score_b = matrix.score(own_defender, theirs_b);
            let own_defender_score = score_a.max(score_b);
            let forced = if score_a >= score_b { theirs_a } else { theirs_b };

            let opp_left = without(opp_available, &[forced]);
            let future = remaining_value(matrix, &own_left, &opp_left, sub_position);
            let total_for_us = own_defender_score + own_attacker_score + future;
            let pairings = 2 + own_left.len() as Score;

            OpponentAttackerAnalysis {
                attackers: pair,
                expected_score_for_us: own_defender_score,
                expected_score_for_opp: MAX_SCORE - own_defender_score,
                total_expected_value_for_opp: MAX_SCORE * pairings - total_for_us,
                forced,
                is_optimal: false,
            }
        })
        .collect();

    analyses.sort_by(|a, b| b.total_expected_value_for_opp.cmp(&a.total_expected_value_for_opp));
    if let Some(best) = analyses.first().map(|a| a.total_expected_value_for_opp) {
        for analysis in &mut analyses {
            analysis.is_optimal = analysis.total_expected_value_for_opp == best;
        }
    }

    analyses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids;

    fn sample() -> ScoreMatrix {
        ScoreMatrix::from_rows(vec![
            vec![10, 8, 15, 12, 6],
            vec![14, 10, 9, 11, 13],
            vec![7, 12, 10, 8, 16],
            vec![11, 6, 13, 10, 9],
            vec![9, 15, 7, 14, 10],
        ])
        .unwrap()
    }

    #[test]
    fn test_defender_phase_shape() {
        let result = analyze_defender_phase(&sample(), &ids(&[0, 1, 2, 3, 4]), &ids(&[0, 1, 2, 3, 4]));
        assert_eq!(result.defender_analyses.len(), 5);
        assert_eq!(result.payoff_matrix.len(), 5);
        assert!(result.defender_analyses.iter().any(|a| a.is_optimal));
        for w in result.defender_analyses.windows(2) {
            assert!(w[0].game_value >= w[1].game_value);
        }
        for a in &result.defender_analyses {
            assert!(a.worst_case_value <= a.best_case_value);
            assert_eq!(a.game_value, a.worst_case_value);
        }
    }

    #[test]
    fn test_exactly_one_optimal_defender() {
        let result = analyze_defender_phase(&sample(), &ids(&[0, 1, 2, 3, 4]), &ids(&[0, 1, 2, 3, 4]));
        let optimal = result.defender_analyses.iter().filter(|a| a.is_optimal).count();
        assert_eq!(optimal, 1);
        let chosen = result.equilibrium.own_strategy.pure_choice().unwrap();
        assert!(result
            .defender_analyses
            .iter()
            .any(|a| a.member == chosen && a.is_optimal));
    }

    #[test]
    fn test_final_pairing() {
        let result = analyze_defender_phase(&sample(), &ids(&[2]), &ids(&[3]));
        assert_eq!(result.game_value, 8);
        assert_eq!(result.defender_analyses.len(), 1);
        assert!(result.defender_analyses[0].is_optimal);
        assert!(result.equilibrium.is_pure);
    }

    #[test]
    fn test_uniform_value() {
        let matrix = ScoreMatrix::uniform(5, 10);
        let result = analyze_defender_phase(&matrix, &ids(&[0, 1, 2, 3, 4]), &ids(&[0, 1, 2, 3, 4]));
        assert_eq!(result.game_value, 50);
    }

    #[test]
    fn test_attacker_phase_counts() {
        let result = analyze_attacker_phase(&sample(), MemberId(0), MemberId(1), &ids(&[1, 2, 3, 4]), &ids(&[0, 2, 3, 4]));
        assert_eq!(result.len(), 6);
        assert!(result[0].is_optimal);
        for w in result.windows(2) {
            assert!(w[0].total_expected_value >= w[1].total_expected_value);
        }

        let result = analyze_attacker_phase(&sample(), MemberId(1), MemberId(2), &ids(&[3, 4]), &ids(&[0, 1]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].attackers, (MemberId(3), MemberId(4)));
    }

    #[test]
    fn test_attacker_phase_round_two_total() {
        let matrix = sample();
        // we defend with 1, they defend with 2; we have {3, 4}, they have {0, 1}
        let result = analyze_attacker_phase(&matrix, MemberId(1), MemberId(2), &ids(&[3, 4]), &ids(&[0, 1]));
        let only = &result[0];

        // their pair at our 1: 14, 10 -> we take 0 for 14
        // our pair at their 2: 13, 7 -> they take 4 for 7; 3 vs 1 remains = 6
        assert_eq!(only.forced, MemberId(4));
        assert_eq!(only.refused, MemberId(3));
        assert_eq!(only.expected_score, 7);
        assert_eq!(only.total_expected_value, 7 + 14 + 6);
        assert!(only.is_optimal);
    }

    #[test]
    fn test_attacker_phase_ties_all_optimal() {
        let matrix = ScoreMatrix::uniform(5, 10);
        let result = analyze_attacker_phase(&matrix, MemberId(0), MemberId(0), &ids(&[1, 2, 3, 4]), &ids(&[1, 2, 3, 4]));
        assert!(result.iter().all(|a| a.is_optimal));
    }

    #[test]
    fn test_attacker_phase_too_few() {
        assert!(analyze_attacker_phase(&sample(), MemberId(0), MemberId(1), &ids(&[2]), &ids(&[3])).is_empty());
    }

    #[test]
    fn test_opponent_attacker_phase() {
        let matrix = sample();
        let result = analyze_opponent_attacker_phase(&matrix, MemberId(1), MemberId(2), &ids(&[3, 4]), &ids(&[0, 1]));
        assert_eq!(result.len(), 1);
        let only = &result[0];

        // our defender 1 against {0, 1}: 14, 10 -> faces 0
        assert_eq!(only.forced, MemberId(0));
        assert_eq!(only.expected_score_for_us, 14);
        assert_eq!(only.expected_score_for_opp, 6);
        // we score 14 + 7 + 6 = 27 over three pairings
        assert_eq!(only.total_expected_value_for_opp, 60 - 27);
        assert!(only.is_optimal);
    }

    #[test]
    fn test_opponent_attacker_phase_sorted() {
        let result = analyze_opponent_attacker_phase(&sample(), MemberId(0), MemberId(1), &ids(&[1, 2, 3, 4]), &ids(&[0, 2, 3, 4]));
        assert_eq!(result.len(), 6);
        assert!(result[0].is_optimal);
        for w in result.windows(2) {
            assert!(w[0].total_expected_value_for_opp >= w[1].total_expected_value_for_opp);
        }
    }
}

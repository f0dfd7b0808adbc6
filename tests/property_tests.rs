//! Property tests over random score matrices and available-sets.

use proptest::prelude::*;
use proptest::sample::subsequence;

use pairing_engine::core::{MemberId, Roster, Score, ScoreMatrix, MAX_SCORE};
use pairing_engine::solver::{
    analyze_attacker_phase, analyze_defender_phase, resolve_attacker_exchange, solve_zero_sum_game,
    GameSolver, PayoffMatrix,
};
use pairing_engine::{analyze_attacker_pairs, analyze_defender_options, defender_score, worst_matchups};

fn matrix_strategy(size: usize) -> impl Strategy<Value = ScoreMatrix> {
    prop::collection::vec(prop::collection::vec(0..=MAX_SCORE, size), size)
        .prop_map(|rows| ScoreMatrix::from_rows(rows).unwrap())
}

fn subset_strategy(size: u8, len: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Roster> {
    subsequence((0..size).collect::<Vec<_>>(), len).prop_map(|v| v.into_iter().map(MemberId).collect())
}

fn full(size: u8) -> Roster {
    MemberId::all(size as usize).collect()
}

proptest! {
    #[test]
    fn prop_zero_sum_view(matrix in matrix_strategy(5)) {
        let opp = matrix.opponent_view();
        for i in MemberId::all(5) {
            for j in MemberId::all(5) {
                prop_assert_eq!(matrix.score(i, j) + opp.score(j, i), MAX_SCORE);
            }
        }
        prop_assert_eq!(opp.opponent_view(), matrix);
    }

    #[test]
    fn prop_defender_score_is_second_lowest(
        matrix in matrix_strategy(5),
        defender in 0u8..5,
        opposing in subset_strategy(5, 1..=5),
    ) {
        let defender = MemberId(defender);
        let mut scores: Vec<Score> = opposing.iter().map(|&o| matrix.score(defender, o)).collect();
        scores.sort_unstable();
        let expected = if scores.len() == 1 { scores[0] } else { scores[1] };
        prop_assert_eq!(defender_score(&matrix, defender, &opposing), expected);

        let (a, b) = worst_matchups(&matrix, defender, &opposing);
        prop_assert_eq!(matrix.score(defender, a), scores[0]);
        prop_assert!(matrix.score(defender, b) <= expected);
    }

    #[test]
    fn prop_pair_count(matrix in matrix_strategy(5), available in subset_strategy(5, 0..=5)) {
        let n = available.len();
        let expected = if n < 2 { 0 } else { n * (n - 1) / 2 };
        prop_assert_eq!(analyze_attacker_pairs(&matrix, MemberId(0), &available).len(), expected);
    }

    #[test]
    fn prop_single_round_sorts(matrix in matrix_strategy(5), available in subset_strategy(5, 1..=5)) {
        let defenders = analyze_defender_options(&matrix, &available, &full(5));
        prop_assert!(defenders.windows(2).all(|w| w[0].defender_score >= w[1].defender_score));

        let pairs = analyze_attacker_pairs(&matrix, MemberId(0), &available);
        prop_assert!(pairs.windows(2).all(|w| w[0].expected_score >= w[1].expected_score));
        for pair in &pairs {
            prop_assert_ne!(pair.forced, pair.refused);
            prop_assert_eq!(pair.expected_score, matrix.score(pair.forced, MemberId(0)));
        }
    }

    #[test]
    fn prop_saddle_point_is_row_min_and_col_max(
        rows in prop::collection::vec(prop::collection::vec(0..=100i32, 4), 4),
    ) {
        let payoff = PayoffMatrix::from(rows);
        let choices = full(4);
        let eq = solve_zero_sum_game(&payoff, &choices, &choices);

        let row = eq.own_strategy.pure_choice().unwrap().index();
        prop_assert_eq!(payoff.row_min(row), Some(eq.value));
        if eq.is_pure {
            let col = eq.opp_strategy.pure_choice().unwrap().index();
            prop_assert_eq!(payoff[(row, col)], eq.value);
            prop_assert!((0..4).all(|k| payoff[(k, col)] <= eq.value));
        }
        // no row guarantees more than the reported value
        prop_assert!((0..4).all(|k| payoff.row_min(k).unwrap() <= eq.value));
    }

    #[test]
    fn prop_exchange_total(
        matrix in matrix_strategy(5),
        own_defender in 0u8..5,
        opp_defender in 0u8..5,
    ) {
        let (own_defender, opp_defender) = (MemberId(own_defender), MemberId(opp_defender));
        let own: Roster = full(5).into_iter().filter(|&m| m != own_defender).collect();
        let opp: Roster = full(5).into_iter().filter(|&m| m != opp_defender).collect();

        let outcome = resolve_attacker_exchange(&matrix, own_defender, opp_defender, &own, &opp).unwrap();
        prop_assert_eq!(outcome.total, outcome.own_defender_score + outcome.own_attacker_score);
        prop_assert!(own.contains(&outcome.own_paired.0));
        prop_assert!(opp.contains(&outcome.opp_paired.0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_game_value_bounds(matrix in matrix_strategy(5)) {
        let result = analyze_defender_phase(&matrix, &full(5), &full(5));
        prop_assert!(result.game_value >= 0 && result.game_value <= MAX_SCORE * 5);
        prop_assert!(result.defender_analyses.windows(2).all(|w| w[0].game_value >= w[1].game_value));
        prop_assert_eq!(result.defender_analyses.iter().filter(|a| a.is_optimal).count(), 1);
        for analysis in &result.defender_analyses {
            prop_assert!(analysis.worst_case_value <= analysis.best_case_value);
        }
    }

    #[test]
    fn prop_attacker_phase_sorted(matrix in matrix_strategy(5)) {
        let own = full(5).into_iter().skip(1).collect::<Roster>();
        let analyses = analyze_attacker_phase(&matrix, MemberId(0), MemberId(0), &own, &own);
        prop_assert_eq!(analyses.len(), 6);
        prop_assert!(analyses.windows(2).all(|w| w[0].total_expected_value >= w[1].total_expected_value));
        prop_assert!(analyses[0].is_optimal);
        let best = analyses[0].total_expected_value;
        prop_assert!(analyses.iter().all(|a| a.is_optimal == (a.total_expected_value == best)));
    }

    #[test]
    fn prop_memoised_matches_stateless(
        matrix in matrix_strategy(5),
        own in subset_strategy(5, 3..=3),
        opp in subset_strategy(5, 3..=3),
    ) {
        let mut solver = GameSolver::new(&matrix);

        let stateless = analyze_defender_phase(&matrix, &full(5), &full(5));
        prop_assert_eq!(solver.defender_phase(&full(5), &full(5)), stateless);
        prop_assert_eq!(
            solver.game_value(&own, &opp),
            analyze_defender_phase(&matrix, &own, &opp).game_value
        );
    }
}

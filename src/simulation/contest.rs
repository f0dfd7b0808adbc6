//! Playing one contest between two policies.

use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    total_score, without, ContestRng, LockedPairing, MemberId, Roster, Score, ScoreMatrix, MAX_SCORE,
};

use super::policy::PairingPolicy;

/// Result of a contest from our side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestOutcome {
    Win,
    Draw,
    Loss,
}

/// Every pairing of a finished contest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRecord {
    /// Pairings in the order they locked.
    pub pairings: Vec<LockedPairing>,
    /// Our summed score.
    pub own_total: Score,
    /// Their summed score.
    pub opp_total: Score,
}

impl ContestRecord {
    fn from_pairings(pairings: Vec<LockedPairing>) -> Self {
        let own_total = total_score(pairings.iter().map(|p| p.score));
        let opp_total = total_score(pairings.iter().map(LockedPairing::opp_score));
        Self {
            pairings,
            own_total,
            opp_total,
        }
    }

    /// Our total minus theirs.
    #[must_use]
    pub fn margin(&self) -> Score {
        self.own_total - self.opp_total
    }

    /// Win, draw or loss for us.
    #[must_use]
    pub fn outcome(&self) -> ContestOutcome {
        match self.own_total.cmp(&self.opp_total) {
            std::cmp::Ordering::Greater => ContestOutcome::Win,
            std::cmp::Ordering::Equal => ContestOutcome::Draw,
            std::cmp::Ordering::Less => ContestOutcome::Loss,
        }
    }
}

/// Play a full contest on `matrix` between `ours` (rows) and `theirs` (columns).
///
/// Each round both sides nominate a defender, then send two attackers at
/// the other defender. A defender faces whichever attacker scores better
/// for its own side (the first of the pair on ties) and the other attacker
/// returns to its pool. With one member left per side they are paired.
///
/// Fails if the matrix is not square, the roster size is even or zero, or a
/// policy makes an illegal or empty choice.
pub fn play_contest(
    matrix: &ScoreMatrix,
    ours: &mut dyn PairingPolicy,
    theirs: &mut dyn PairingPolicy,
    rng: &mut ContestRng,
) -> anyhow::Result<ContestRecord> {
    let size = matrix.own_count();
    if !matrix.is_square() {
        bail!("roster sizes differ: {} vs {}", size, matrix.opp_count());
    }
    if size % 2 == 0 {
        bail!("roster size must be odd, got {}", size);
    }

    let their_view = matrix.opponent_view();
    let mut own: Roster = MemberId::all(size).collect();
    let mut opp: Roster = MemberId::all(size).collect();
    let mut pairings = Vec::with_capacity(size);
    let mut round: u8 = 0;

    while own.len() >= 3 {
        let own_defender = ours
            .choose_defender(matrix, &own, &opp, rng)
            .with_context(|| format!("{} nominated no defender in round {}", ours.name(), round))?;
        let opp_defender = theirs
            .choose_defender(&their_view, &opp, &own, rng)
            .with_context(|| format!("{} nominated no defender in round {}", theirs.name(), round))?;
        ensure!(own.contains(&own_defender), "{} is not available to {}", own_defender, ours.name());
        ensure!(opp.contains(&opp_defender), "{} is not available to {}", opp_defender, theirs.name());

        let own_attackers = without(&own, &[own_defender]);
        let opp_attackers = without(&opp, &[opp_defender]);

        let own_sent = ours
            .choose_attackers(matrix, own_defender, opp_defender, &own_attackers, &opp_attackers, rng)
            .with_context(|| format!("{} sent no attackers in round {}", ours.name(), round))?;
        let opp_sent = theirs
            .choose_attackers(&their_view, opp_defender, own_defender, &opp_attackers, &own_attackers, rng)
            .with_context(|| format!("{} sent no attackers in round {}", theirs.name(), round))?;
        check_attackers(own_sent, &own_attackers, ours.name())?;
        check_attackers(opp_sent, &opp_attackers, theirs.name())?;

        // each defender takes the attacker that suits its own side
        let faced_by_own = better_for(|m| matrix.score(own_defender, m), opp_sent);
        let faced_by_opp = better_for(|m| their_view.score(opp_defender, m), own_sent);

        for (own_member, opp_member) in [(own_defender, faced_by_own), (faced_by_opp, opp_defender)] {
            let score = matrix.score(own_member, opp_member);
            trace!(round, own = %own_member, opp = %opp_member, score, "pairing locked");
            pairings.push(LockedPairing {
                own: own_member,
                opp: opp_member,
                score,
                round,
            });
        }

        own = without(&own, &[own_defender, faced_by_opp]);
        opp = without(&opp, &[opp_defender, faced_by_own]);
        round += 1;
    }

    if let ([own_last], [opp_last]) = (own.as_slice(), opp.as_slice()) {
        pairings.push(LockedPairing {
            own: *own_last,
            opp: *opp_last,
            score: matrix.score(*own_last, *opp_last),
            round,
        });
    }

    let record = ContestRecord::from_pairings(pairings);
    debug_assert_eq!(record.own_total + record.opp_total, MAX_SCORE * size as Score);
    Ok(record)
}

fn better_for(value: impl Fn(MemberId) -> Score, (a, b): (MemberId, MemberId)) -> MemberId {
    if value(a) >= value(b) {
        a
    } else {
        b
    }
}

fn check_attackers(
    (a, b): (MemberId, MemberId),
    available: &[MemberId],
    policy: &str,
) -> anyhow::Result<()> {
    ensure!(a != b, "{} sent {} twice", policy, a);
    ensure!(
        available.contains(&a) && available.contains(&b),
        "{} sent unavailable attackers {} and {}",
        policy,
        a,
        b
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{GreedyPolicy, SolverPolicy, UniformPolicy};

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

    /// Always nominates the first member and sends the first two.
    struct FirstPolicy;

    impl PairingPolicy for FirstPolicy {
        fn choose_defender(
            &mut self,
            _matrix: &ScoreMatrix,
            own: &[MemberId],
            _opp: &[MemberId],
            _rng: &mut ContestRng,
        ) -> Option<MemberId> {
            own.first().copied()
        }

        fn choose_attackers(
            &mut self,
            _matrix: &ScoreMatrix,
            _own_defender: MemberId,
            _opp_defender: MemberId,
            own_attackers: &[MemberId],
            _opp_attackers: &[MemberId],
            _rng: &mut ContestRng,
        ) -> Option<(MemberId, MemberId)> {
            match own_attackers {
                [a, b, ..] => Some((*a, *b)),
                _ => None,
            }
        }

        fn name(&self) -> &'static str {
            "first"
        }
    }

    #[test]
    fn test_scripted_contest() {
        let matrix = sample();
        let mut rng = ContestRng::new(0);
        let record = play_contest(&matrix, &mut FirstPolicy, &mut FirstPolicy, &mut rng).unwrap();

        // round 0: defenders 0 and 0. They send 1, 2 at our 0 (8, 15): we face 2.
        // We send 1, 2 at their 0 (14, 7): they face 2.
        assert_eq!(record.pairings[0], LockedPairing { own: MemberId(0), opp: MemberId(2), score: 15, round: 0 });
        assert_eq!(record.pairings[1], LockedPairing { own: MemberId(2), opp: MemberId(0), score: 7, round: 0 });

        // round 1: we have {1, 3, 4}, they have {1, 3, 4}. Defenders 1 and 1.
        // They send 3, 4 at our 1 (11, 13): we face 4.
        // We send 3, 4 at their 1 (6, 15): they face 3.
        assert_eq!(record.pairings[2], LockedPairing { own: MemberId(1), opp: MemberId(4), score: 13, round: 1 });
        assert_eq!(record.pairings[3], LockedPairing { own: MemberId(3), opp: MemberId(1), score: 6, round: 1 });

        // final: 4 vs 3
        assert_eq!(record.pairings[4], LockedPairing { own: MemberId(4), opp: MemberId(3), score: 14, round: 2 });
        assert_eq!(record.own_total, 15 + 7 + 13 + 6 + 14);
        assert_eq!(record.own_total + record.opp_total, 100);
        assert_eq!(record.outcome(), ContestOutcome::Win);
    }

    #[test]
    fn test_every_member_paired_once() {
        let matrix = sample();
        let mut rng = ContestRng::new(3);
        let record = play_contest(&matrix, &mut SolverPolicy::new(), &mut UniformPolicy, &mut rng).unwrap();

        assert_eq!(record.pairings.len(), 5);
        let mut own: Vec<_> = record.pairings.iter().map(|p| p.own).collect();
        let mut opp: Vec<_> = record.pairings.iter().map(|p| p.opp).collect();
        own.sort();
        opp.sort();
        assert_eq!(own, MemberId::all(5).collect::<Vec<_>>());
        assert_eq!(opp, MemberId::all(5).collect::<Vec<_>>());
        assert_eq!(record.own_total + record.opp_total, 100);
    }

    #[test]
    fn test_single_member_contest() {
        let matrix = ScoreMatrix::from_rows(vec![vec![12]]).unwrap();
        let mut rng = ContestRng::new(0);
        let record = play_contest(&matrix, &mut GreedyPolicy, &mut GreedyPolicy, &mut rng).unwrap();
        assert_eq!(record.pairings.len(), 1);
        assert_eq!(record.margin(), 4);
    }

    #[test]
    fn test_rejects_bad_rosters() {
        let mut rng = ContestRng::new(0);
        let even = ScoreMatrix::uniform(4, 10);
        let err = play_contest(&even, &mut UniformPolicy, &mut UniformPolicy, &mut rng).unwrap_err();
        assert!(err.to_string().contains("odd"));

        let ragged = ScoreMatrix::from_rows(vec![vec![10, 10, 10]; 5]).unwrap();
        let err = play_contest(&ragged, &mut UniformPolicy, &mut UniformPolicy, &mut rng).unwrap_err();
        assert!(err.to_string().contains("differ"));
    }

    #[test]
    fn test_rejects_illegal_choice() {
        struct Cheater;

        impl PairingPolicy for Cheater {
            fn choose_defender(
                &mut self,
                _matrix: &ScoreMatrix,
                _own: &[MemberId],
                _opp: &[MemberId],
                _rng: &mut ContestRng,
            ) -> Option<MemberId> {
                Some(MemberId(9))
            }

            fn choose_attackers(
                &mut self,
                _matrix: &ScoreMatrix,
                _own_defender: MemberId,
                _opp_defender: MemberId,
                _own_attackers: &[MemberId],
                _opp_attackers: &[MemberId],
                _rng: &mut ContestRng,
            ) -> Option<(MemberId, MemberId)> {
                None
            }

            fn name(&self) -> &'static str {
                "cheater"
            }
        }

        let mut rng = ContestRng::new(0);
        let err = play_contest(&sample(), &mut Cheater, &mut UniformPolicy, &mut rng).unwrap_err();
        assert!(err.to_string().contains("not available"));
    }
}

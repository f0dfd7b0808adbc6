//! Repeated contests between two policies on random balanced matrices.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::core::{ContestRng, Score, ScoreMatrix, MAX_SCORE, NEUTRAL_SCORE};

use super::config::ArenaConfig;
use super::contest::{play_contest, ContestOutcome};
use super::policy::PairingPolicy;

/// Random matrix in which neither side has an edge by construction.
///
/// `matrix[i][j] + matrix[j][i] == MAX_SCORE` and the diagonal is neutral,
/// so the opposing view of the matrix is the matrix itself.
pub fn balanced_matrix(size: usize, rng: &mut ContestRng) -> anyhow::Result<ScoreMatrix> {
    let mut rows = vec![vec![NEUTRAL_SCORE; size]; size];
    for i in 0..size {
        for j in (i + 1)..size {
            let score = rng.gen_score(0..=MAX_SCORE);
            rows[i][j] = score;
            rows[j][i] = MAX_SCORE - score;
        }
    }
    ScoreMatrix::from_rows(rows)
}

/// Tally of an arena run, from the first policy's side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaReport {
    /// Contests played.
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Sum of per-contest margins.
    pub total_margin: i64,
}

impl ArenaReport {
    /// Fraction of contests won outright.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    /// Average margin per contest.
    #[must_use]
    pub fn mean_margin(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_margin as f64 / self.games as f64
        }
    }

    fn record(&mut self, outcome: ContestOutcome, margin: Score) {
        self.games += 1;
        self.total_margin += i64::from(margin);
        match outcome {
            ContestOutcome::Win => self.wins += 1,
            ContestOutcome::Draw => self.draws += 1,
            ContestOutcome::Loss => self.losses += 1,
        }
    }
}

/// Pits two policies against each other over many seeded contests.
pub struct Arena<P: PairingPolicy, Q: PairingPolicy> {
    ours: P,
    theirs: Q,
    config: ArenaConfig,
}

impl<P: PairingPolicy, Q: PairingPolicy> Arena<P, Q> {
    /// Create a new arena.
    pub fn new(ours: P, theirs: Q, config: ArenaConfig) -> Self {
        Self { ours, theirs, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Play every contest. The same config always produces the same report.
    pub fn run(&mut self) -> anyhow::Result<ArenaReport> {
        let _span = info_span!(
            "arena",
            ours = self.ours.name(),
            theirs = self.theirs.name(),
            games = self.config.games,
            seed = self.config.seed
        )
        .entered();

        let mut root = ContestRng::new(self.config.seed);
        let mut report = ArenaReport::default();

        for game in 0..self.config.games {
            let mut rng = root.fork();
            let matrix = balanced_matrix(self.config.roster_size, &mut rng)?;
            let record = play_contest(&matrix, &mut self.ours, &mut self.theirs, &mut rng)?;

            debug!(game, own = record.own_total, opp = record.opp_total, "contest finished");
            report.record(record.outcome(), record.margin());
        }

        info!(
            wins = report.wins,
            draws = report.draws,
            losses = report.losses,
            win_rate = report.win_rate(),
            "arena finished"
        );

        Ok(report)
    }
}

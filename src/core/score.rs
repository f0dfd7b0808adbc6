//! Score scale and display-independent score helpers.
//!
//! Every pairing is scored on a fixed 0-20 scale and both sides' scores sum
//! to 20, so a 5-pairing event is worth 100 points in total.

use serde::{Deserialize, Serialize};

/// Expected score for one pairing, or a sum of pairings.
pub type Score = i32;

/// Top of the per-pairing scale. Both sides' scores sum to this.
pub const MAX_SCORE: Score = 20;

/// An even matchup.
pub const NEUTRAL_SCORE: Score = 10;

/// Coarse classification of a single matchup score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreBand {
    /// 0-4.
    StrongLoss,
    /// 5-6.
    Loss,
    /// 7-8.
    SlightDeficit,
    /// 9-10.
    Even,
    /// 11-12.
    SlightEdge,
    /// 13-14.
    Win,
    /// 15 and above.
    StrongWin,
}

impl ScoreBand {
    /// Classify a single matchup score.
    #[must_use]
    pub fn of(score: Score) -> Self {
        match score {
            s if s >= 15 => ScoreBand::StrongWin,
            s if s >= 13 => ScoreBand::Win,
            s if s >= 11 => ScoreBand::SlightEdge,
            s if s >= 9 => ScoreBand::Even,
            s if s >= 7 => ScoreBand::SlightDeficit,
            s if s >= 5 => ScoreBand::Loss,
            _ => ScoreBand::StrongLoss,
        }
    }

    /// Whether the band favours the scoring side.
    #[must_use]
    pub fn is_favourable(self) -> bool {
        self > ScoreBand::Even
    }
}

/// Format a score with its offset from neutral, e.g. `"14 (+4)"`.
#[must_use]
pub fn format_with_delta(score: Score) -> String {
    let delta = score - NEUTRAL_SCORE;
    match delta {
        d if d > 0 => format!("{} (+{})", score, d),
        d if d < 0 => format!("{} ({})", score, d),
        _ => score.to_string(),
    }
}

/// Sum a sequence of pairing scores.
pub fn total_score(scores: impl IntoIterator<Item = Score>) -> Score {
    scores.into_iter().sum()
}

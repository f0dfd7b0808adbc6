//! Pure-strategy solver for square zero-sum payoff matrices.
//!
//! Rows are our choices, columns the opposing side's; each cell is our
//! total. We look for a saddle point (a cell that is the minimum of its row
//! and the maximum of its column). Without one, we report the maximin value
//! and the maximin row, and flag the result as not pure. No randomized
//! equilibrium is computed.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{MemberId, Score};

/// Square table of totals indexed by (our choice, their choice) positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoffMatrix {
    rows: Vec<Vec<Score>>,
}

impl PayoffMatrix {
    /// Wrap raw rows.
    #[must_use]
    pub fn new(rows: Vec<Vec<Score>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Score>] {
        &self.rows
    }

    /// One row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Score] {
        &self.rows[row]
    }

    /// Lowest value in a row; `None` for an empty row.
    #[must_use]
    pub fn row_min(&self, row: usize) -> Option<Score> {
        self.rows[row].iter().copied().min()
    }

    /// Highest value in a row; `None` for an empty row.
    #[must_use]
    pub fn row_max(&self, row: usize) -> Option<Score> {
        self.rows[row].iter().copied().max()
    }
}

impl From<Vec<Vec<Score>>> for PayoffMatrix {
    fn from(rows: Vec<Vec<Score>>) -> Self {
        Self::new(rows)
    }
}

impl std::ops::Index<(usize, usize)> for PayoffMatrix {
    type Output = Score;

    fn index(&self, (row, col): (usize, usize)) -> &Score {
        &self.rows[row][col]
    }
}

/// A side's recommended play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Nothing to choose from.
    Undetermined,
    /// Always play this member.
    Pure(MemberId),
    /// Randomize with these weights.
    Mixed(Vec<(MemberId, f64)>),
}

impl Strategy {
    /// The single recommended member, if this is a pure strategy.
    #[must_use]
    pub fn pure_choice(&self) -> Option<MemberId> {
        match self {
            Strategy::Pure(member) => Some(*member),
            _ => None,
        }
    }

    /// Whether `member` is ever played under this strategy.
    #[must_use]
    pub fn plays(&self, member: MemberId) -> bool {
        match self {
            Strategy::Undetermined => false,
            Strategy::Pure(choice) => *choice == member,
            Strategy::Mixed(weights) => weights.iter().any(|&(m, w)| m == member && w > 0.0),
        }
    }
}

/// Solution of a payoff matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// Our total under the recommended play.
    pub value: Score,
    /// What we should play.
    pub own_strategy: Strategy,
    /// What the opposing side should play. A placeholder (their first
    /// choice) when `is_pure` is false.
    pub opp_strategy: Strategy,
    /// Whether a saddle point was found.
    pub is_pure: bool,
}

/// Solve `payoff`, mapping row/column positions back through the choice lists.
///
/// The first row (in index order) holding a saddle point wins. Without a
/// saddle point the maximin value is reported with `is_pure = false`.
#[must_use]
pub fn solve_zero_sum_game(
    payoff: &PayoffMatrix,
    own_choices: &[MemberId],
    opp_choices: &[MemberId],
) -> Equilibrium {
    let choice = |choices: &[MemberId], at: usize| {
        choices.get(at).copied().map_or(Strategy::Undetermined, Strategy::Pure)
    };

    if payoff.is_empty() {
        return Equilibrium {
            value: 0,
            own_strategy: Strategy::Undetermined,
            opp_strategy: Strategy::Undetermined,
            is_pure: true,
        };
    }

    if let Some((row, col, value)) = find_saddle_point(payoff) {
        return Equilibrium {
            value,
            own_strategy: choice(own_choices, row),
            opp_strategy: choice(opp_choices, col),
            is_pure: true,
        };
    }

    let (row, value) = maximin(payoff);
    trace!(value, row, "no saddle point, using maximin");

    Equilibrium {
        value,
        own_strategy: choice(own_choices, row),
        opp_strategy: choice(opp_choices, 0),
        is_pure: false,
    }
}

/// First cell, scanning rows in order, that is its row's (first) minimum and
/// no smaller than anything else in its column.
fn find_saddle_point(payoff: &PayoffMatrix) -> Option<(usize, usize, Score)> {
    let n = payoff.len();

    for row in 0..n {
        let Some((col, row_min)) = payoff
            .row(row)
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, v)| v)
        else {
            continue;
        };

        let is_col_max = (0..n).all(|k| payoff[(k, col)] <= row_min);
        if is_col_max {
            return Some((row, col, row_min));
        }
    }

    None
}

/// Highest row minimum and the first row achieving it.
fn maximin(payoff: &PayoffMatrix) -> (usize, Score) {
    let mut best: Option<(usize, Score)> = None;
    for row in 0..payoff.len() {
        let Some(floor) = payoff.row_min(row) else {
            continue;
        };
        if best.map_or(true, |(_, current)| floor > current) {
            best = Some((row, floor));
        }
    }
    best.unwrap_or((0, 0))
}

//! The score matrix supplied by the caller.
//!
//! `matrix[own][opp]` is the expected score for our member `own` against
//! their member `opp`. Construction validates shape and range once so the
//! algorithms can index freely afterwards.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use super::member::MemberId;
use super::score::{Score, MAX_SCORE};

/// Rectangular table of expected scores, rows = own members, columns = opposing.
///
/// Every value lies in `[0, MAX_SCORE]`. Most of the engine additionally
/// assumes the matrix is square; see [`ScoreMatrix::is_square`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Score>>", into = "Vec<Vec<Score>>")]
pub struct ScoreMatrix {
    rows: Vec<Vec<Score>>,
}

impl ScoreMatrix {
    /// Validate and wrap raw rows.
    pub fn from_rows(rows: Vec<Vec<Score>>) -> anyhow::Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            for (i, row) in rows.iter().enumerate() {
                if row.len() != width {
                    bail!("row {} has {} columns, expected {}", i, row.len(), width);
                }
                if let Some((j, &value)) = row
                    .iter()
                    .enumerate()
                    .find(|(_, v)| !(0..=MAX_SCORE).contains(*v))
                {
                    bail!("score {} at [{}][{}] is outside 0..={}", value, i, j, MAX_SCORE);
                }
            }
        }
        Ok(Self { rows })
    }

    /// Parse a JSON nested array, e.g. `[[10, 8], [6, 14]]`.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let rows: Vec<Vec<Score>> =
            serde_json::from_str(json).context("score matrix is not a nested integer array")?;
        Self::from_rows(rows)
    }

    /// A `size`×`size` matrix with every entry set to `score`.
    ///
    /// # Panics
    ///
    /// Panics if `score` is outside `[0, MAX_SCORE]`.
    #[must_use]
    pub fn uniform(size: usize, score: Score) -> Self {
        assert!((0..=MAX_SCORE).contains(&score), "score must be within 0..={}", MAX_SCORE);
        Self {
            rows: vec![vec![score; size]; size],
        }
    }

    /// Number of own members (rows).
    #[must_use]
    pub fn own_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of opposing members (columns).
    #[must_use]
    pub fn opp_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether both rosters have the same size.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.own_count() == self.opp_count()
    }

    /// Expected score for `own` against `opp`.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the matrix.
    #[inline]
    #[must_use]
    pub fn score(&self, own: MemberId, opp: MemberId) -> Score {
        self.rows[own.index()][opp.index()]
    }

    /// All scores for one own member.
    #[must_use]
    pub fn row(&self, own: MemberId) -> &[Score] {
        &self.rows[own.index()]
    }

    /// Raw rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Score>] {
        &self.rows
    }

    /// The same contest seen from the opposing side.
    ///
    /// `opponent[j][i] = MAX_SCORE - self[i][j]`; works for any rectangular shape.
    #[must_use]
    pub fn opponent_view(&self) -> Self {
        let n = self.own_count();
        let m = self.opp_count();
        let mut rows = vec![vec![0; n]; m];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                rows[j][i] = MAX_SCORE - value;
            }
        }
        Self { rows }
    }
}

impl TryFrom<Vec<Vec<Score>>> for ScoreMatrix {
    type Error = anyhow::Error;

    fn try_from(rows: Vec<Vec<Score>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<ScoreMatrix> for Vec<Vec<Score>> {
    fn from(matrix: ScoreMatrix) -> Self {
        matrix.rows
    }
}

impl std::ops::Index<(MemberId, MemberId)> for ScoreMatrix {
    type Output = Score;

    fn index(&self, (own, opp): (MemberId, MemberId)) -> &Score {
        &self.rows[own.index()][opp.index()]
    }
}

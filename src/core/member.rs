//! Roster member identification and available-set helpers.
//!
//! ## MemberId
//!
//! Type-safe roster position. The engine never resolves ids to names;
//! that mapping belongs to whoever owns the rosters.
//!
//! ## Roster
//!
//! Ordered set of members still unpaired on one side. Order matters:
//! tie-breaks throughout the engine favour earlier entries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Roster position (0-based) of a member on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub u8);

impl MemberId {
    /// Create a new member ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every position of a roster with `size` members.
    ///
    /// ```
    /// use pairing_engine::core::MemberId;
    ///
    /// let members: Vec<_> = MemberId::all(5).collect();
    /// assert_eq!(members.len(), 5);
    /// assert_eq!(members[4], MemberId::new(4));
    /// ```
    pub fn all(size: usize) -> impl Iterator<Item = MemberId> {
        (0..size as u8).map(MemberId)
    }
}

impl From<u8> for MemberId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Member {}", self.0)
    }
}

/// Members still available on one side, in caller order.
pub type Roster = SmallVec<[MemberId; 8]>;

/// Build a roster from raw positions.
///
/// ```
/// use pairing_engine::core::{ids, MemberId};
///
/// let roster = ids(&[0, 2, 4]);
/// assert_eq!(roster[1], MemberId::new(2));
/// ```
#[must_use]
pub fn ids(raw: &[u8]) -> Roster {
    raw.iter().copied().map(MemberId).collect()
}

/// Copy of `available` with every member in `removed` dropped, order kept.
#[must_use]
pub fn without(available: &[MemberId], removed: &[MemberId]) -> Roster {
    available
        .iter()
        .copied()
        .filter(|m| !removed.contains(m))
        .collect()
}

//! Deterministic, forkable randomness for contest simulation.
//!
//! The analysis functions are pure; only the simulation harness draws random
//! numbers (random score matrices, random opposing choices). Every draw comes
//! from a seeded ChaCha8 stream so arena runs are reproducible.
//!
//! ```
//! use pairing_engine::core::ContestRng;
//!
//! let mut rng = ContestRng::new(7);
//! let mut game_rng = rng.fork();
//!
//! let mut again = ContestRng::new(7);
//! let mut game_again = again.fork();
//! assert_eq!(game_rng.gen_score(0..=20), game_again.gen_score(0..=20));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::member::MemberId;
use super::score::Score;

/// Seeded RNG with deterministic forking, one fork per simulated contest.
#[derive(Clone, Debug)]
pub struct ContestRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl ContestRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent stream. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Uniform score in an inclusive range.
    pub fn gen_score(&mut self, range: RangeInclusive<Score>) -> Score {
        self.inner.gen_range(range)
    }

    /// Uniform element of a slice, `None` when empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Two distinct members, uniformly; `None` when fewer than two are given.
    pub fn choose_pair(&mut self, members: &[MemberId]) -> Option<(MemberId, MemberId)> {
        let mut picked = members.choose_multiple(&mut self.inner, 2).copied();
        Some((picked.next()?, picked.next()?))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> ContestRngState {
        ContestRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &ContestRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG position, so an arena run can be replayed from any game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRngState {
    /// Seed of this stream.
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    /// Forks taken so far.
    pub fork_counter: u64,
}

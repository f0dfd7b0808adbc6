//! Simulated contests for evaluating pairing policies.
//!
//! ## Overview
//!
//! [`play_contest`] runs the full reveal/respond sequence on a score matrix
//! (5v5, then 3v3, then the forced 1v1 finale) with a [`PairingPolicy`]
//! deciding for each side. [`Arena`] repeats this over seeded random
//! [`balanced_matrix`] draws and tallies an [`ArenaReport`].
//!
//! ## Usage
//!
//! ```rust
//! use pairing_engine::simulation::{Arena, ArenaConfig, SolverPolicy, UniformPolicy};
//!
//! let config = ArenaConfig::default().with_games(10).with_seed(1);
//! let report = Arena::new(SolverPolicy::new(), UniformPolicy, config).run().unwrap();
//! assert_eq!(report.games, 10);
//! ```

pub mod arena;
pub mod config;
pub mod contest;
pub mod policy;

pub use arena::{balanced_matrix, Arena, ArenaReport};
pub use config::ArenaConfig;
pub use contest::{play_contest, ContestOutcome, ContestRecord};
pub use policy::{GreedyPolicy, PairingPolicy, SolverPolicy, UniformPolicy};

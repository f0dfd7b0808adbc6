//! Decision policies for simulated contests.
//!
//! A policy always sees the contest from its own side: `matrix` rows are
//! its members, columns the other side's. The opposing policy is handed
//! [`ScoreMatrix::opponent_view`], so every implementation works for either
//! side.
//!
//! - [`SolverPolicy`]: full backward induction via [`GameSolver`]
//! - [`GreedyPolicy`]: single-round analysis only
//! - [`UniformPolicy`]: uniformly random legal choices

use crate::analysis::{analyze_defender_options, best_attacker_pair};
use crate::core::{ContestRng, MemberId, ScoreMatrix};
use crate::solver::{GameSolver, SolverConfig};

/// Chooses defenders and attacker pairs for one side.
pub trait PairingPolicy {
    /// Nominate a defender from `own`. `None` means no choice could be made.
    fn choose_defender(
        &mut self,
        matrix: &ScoreMatrix,
        own: &[MemberId],
        opp: &[MemberId],
        rng: &mut ContestRng,
    ) -> Option<MemberId>;

    /// Pick two distinct attackers from `own_attackers` to send at `opp_defender`.
    fn choose_attackers(
        &mut self,
        matrix: &ScoreMatrix,
        own_defender: MemberId,
        opp_defender: MemberId,
        own_attackers: &[MemberId],
        opp_attackers: &[MemberId],
        rng: &mut ContestRng,
    ) -> Option<(MemberId, MemberId)>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Plays the solver's recommendation at every decision.
#[derive(Clone, Debug, Default)]
pub struct SolverPolicy {
    config: SolverConfig,
}

impl SolverPolicy {
    /// Create a solver policy with default solver settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver policy with custom solver settings.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl PairingPolicy for SolverPolicy {
    fn choose_defender(
        &mut self,
        matrix: &ScoreMatrix,
        own: &[MemberId],
        opp: &[MemberId],
        _rng: &mut ContestRng,
    ) -> Option<MemberId> {
        let mut solver = GameSolver::with_config(matrix, self.config.clone());
        let result = solver.defender_phase(own, opp);
        result
            .equilibrium
            .own_strategy
            .pure_choice()
            .or_else(|| result.defender_analyses.first().map(|a| a.member))
    }

    fn choose_attackers(
        &mut self,
        matrix: &ScoreMatrix,
        own_defender: MemberId,
        opp_defender: MemberId,
        own_attackers: &[MemberId],
        opp_attackers: &[MemberId],
        _rng: &mut ContestRng,
    ) -> Option<(MemberId, MemberId)> {
        let mut solver = GameSolver::with_config(matrix, self.config.clone());
        solver
            .attacker_phase(own_defender, opp_defender, own_attackers, opp_attackers)
            .first()
            .map(|a| a.attackers)
    }

    fn name(&self) -> &'static str {
        "solver"
    }
}

/// Best single-round choices, blind to later rounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl PairingPolicy for GreedyPolicy {
    fn choose_defender(
        &mut self,
        matrix: &ScoreMatrix,
        own: &[MemberId],
        opp: &[MemberId],
        _rng: &mut ContestRng,
    ) -> Option<MemberId> {
        if opp.is_empty() {
            return own.first().copied();
        }
        analyze_defender_options(matrix, own, opp).first().map(|a| a.member)
    }

    fn choose_attackers(
        &mut self,
        matrix: &ScoreMatrix,
        _own_defender: MemberId,
        opp_defender: MemberId,
        own_attackers: &[MemberId],
        _opp_attackers: &[MemberId],
        _rng: &mut ContestRng,
    ) -> Option<(MemberId, MemberId)> {
        best_attacker_pair(matrix, opp_defender, own_attackers).map(|a| a.attackers)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Uniformly random choices.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPolicy;

impl PairingPolicy for UniformPolicy {
    fn choose_defender(
        &mut self,
        _matrix: &ScoreMatrix,
        own: &[MemberId],
        _opp: &[MemberId],
        rng: &mut ContestRng,
    ) -> Option<MemberId> {
        rng.choose(own).copied()
    }

    fn choose_attackers(
        &mut self,
        _matrix: &ScoreMatrix,
        _own_defender: MemberId,
        _opp_defender: MemberId,
        own_attackers: &[MemberId],
        _opp_attackers: &[MemberId],
        rng: &mut ContestRng,
    ) -> Option<(MemberId, MemberId)> {
        rng.choose_pair(own_attackers)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

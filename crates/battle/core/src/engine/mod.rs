//! Battle state machine and turn execution.
//!
//! [`BattleState`] owns the roster and the round/turn bookkeeping.
//! [`BattleEngine`] is the single mutation path: it borrows the state together
//! with the content, RNG, and party stash, and moves the phase machine
//! `Initializing -> RoundStart -> ActorTurn | EnemyVolley -> ... -> BattleOver`
//! one action at a time.
mod errors;
mod setup;
mod turns;

pub use errors::{ExecuteError, SetupError};

use std::collections::{BTreeMap, VecDeque};

use crate::action::{self, ActionInput, FleeOutcome, ResolveContext};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, RngSource};
use crate::event::{BattleEvent, RosterEntry};
use crate::reward::{self, RewardContext, RewardSummary};
use crate::state::{
    AllySpec, CombatantId, EnemySpec, PartyProgress, PartyStash, Roster, Round, Side, SummonSpec,
};

/// Terminal result of a battle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    Initializing,
    RoundStart,
    ActorTurn { actor: CombatantId },
    /// An enemy acting in the free round granted by a failed flee.
    EnemyVolley { actor: CombatantId },
    BattleOver { outcome: BattleOutcome },
}

impl BattlePhase {
    pub fn actor(&self) -> Option<CombatantId> {
        match self {
            Self::ActorTurn { actor } | Self::EnemyVolley { actor } => Some(*actor),
            Self::Initializing | Self::RoundStart | Self::BattleOver { .. } => None,
        }
    }
}

/// Everything needed to start one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRequest {
    pub allies: Vec<AllySpec>,
    pub summons: Vec<SummonSpec>,
    pub enemies: Vec<EnemySpec>,
    /// Level and experience of the party going in.
    pub progress: PartyProgress,
}

impl BattleRequest {
    pub fn new(allies: Vec<AllySpec>, enemies: Vec<EnemySpec>) -> Self {
        Self {
            allies,
            enemies,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_summon(mut self, summon: SummonSpec) -> Self {
        self.summons.push(summon);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: PartyProgress) -> Self {
        self.progress = progress;
        self
    }
}

/// Complete state of one battle instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub roster: Roster,
    round: Round,
    order: Vec<CombatantId>,
    cursor: usize,
    volley: Option<VecDeque<CombatantId>>,
    phase: BattlePhase,
    /// Ally HP/MP as they entered the battle, restored after a successful flee.
    entry_resources: BTreeMap<CombatantId, (u32, u32)>,
    progress: PartyProgress,
    rewards: Option<RewardSummary>,
}

impl BattleState {
    /// Builds the roster for `request` and announces it.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when the party has no single primary, a summon
    /// names a missing owner, no enemies are requested, or an enemy definition
    /// cannot be found.
    pub fn initialize(
        request: &BattleRequest,
        env: &BattleEnv<'_>,
        config: &BattleConfig,
    ) -> Result<(Self, Vec<BattleEvent>), SetupError> {
        let roster = setup::build_roster(request, env, config)?;
        let entry_resources = roster
            .on_side(Side::Ally)
            .map(|c| (c.id, (c.hp, c.mp)))
            .collect();
        let announcement = BattleEvent::BattleStarted {
            roster: roster
                .iter()
                .map(|c| RosterEntry {
                    id: c.id,
                    name: c.name.clone(),
                    side: c.side(),
                })
                .collect(),
        };
        let state = Self {
            roster,
            round: Round::ZERO,
            order: Vec::new(),
            cursor: 0,
            volley: None,
            phase: BattlePhase::Initializing,
            entry_resources,
            progress: request.progress.clone(),
            rewards: None,
        };
        Ok((state, vec![announcement]))
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Initiative order of the current round.
    pub fn order(&self) -> &[CombatantId] {
        &self.order
    }

    pub fn current_actor(&self) -> Option<CombatantId> {
        self.phase.actor()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::BattleOver { outcome } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn progress(&self) -> &PartyProgress {
        &self.progress
    }

    pub fn rewards(&self) -> Option<&RewardSummary> {
        self.rewards.as_ref()
    }

    fn restore_entry_resources(&mut self) {
        for (&id, &(hp, mp)) in &self.entry_resources {
            if let Some(ally) = self.roster.get_mut(id) {
                ally.reset_resources(hp, mp);
            }
        }
    }
}

/// Drives one battle by borrowing its state and collaborators.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    env: BattleEnv<'a>,
    rng: &'a mut dyn RngSource,
    stash: &'a mut PartyStash,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(
        state: &'a mut BattleState,
        env: BattleEnv<'a>,
        rng: &'a mut dyn RngSource,
        stash: &'a mut PartyStash,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            state,
            env,
            rng,
            stash,
            config,
        }
    }

    /// Leaves `Initializing`: opens round one and hands the turn to the
    /// fastest combatant. Does nothing once started.
    pub fn start(&mut self) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if self.state.phase != BattlePhase::Initializing {
            return events;
        }
        if let Some(outcome) = self.state.check_terminal() {
            self.conclude(outcome, &mut events);
            return events;
        }
        self.select_next(&mut events);
        events
    }

    /// Resolves `input` for the combatant whose turn it is, then advances to
    /// the next turn or ends the battle.
    ///
    /// # Errors
    ///
    /// Fails without touching state when the battle is not running, `actor`
    /// does not hold the turn, or the action itself is rejected.
    pub fn execute(
        &mut self,
        actor: CombatantId,
        input: &ActionInput,
    ) -> Result<Vec<BattleEvent>, ExecuteError> {
        let in_volley = match self.state.phase {
            BattlePhase::Initializing | BattlePhase::RoundStart => {
                return Err(ExecuteError::NotStarted);
            }
            BattlePhase::BattleOver { .. } => return Err(ExecuteError::BattleOver),
            BattlePhase::ActorTurn { actor: current } | BattlePhase::EnemyVolley { actor: current }
                if current != actor =>
            {
                return Err(ExecuteError::ActorNotCurrent { actor, current });
            }
            BattlePhase::ActorTurn { .. } => false,
            BattlePhase::EnemyVolley { .. } => true,
        };

        let resolution = {
            let mut ctx = ResolveContext {
                roster: &mut self.state.roster,
                round: self.state.round,
                env: self.env,
                rng: &mut *self.rng,
                stash: &mut *self.stash,
                config: self.config,
            };
            action::resolve(&mut ctx, actor, input)?
        };
        let mut events = resolution.events;

        match resolution.flee {
            Some(FleeOutcome::Escaped) => {
                self.state.restore_entry_resources();
                self.conclude(BattleOutcome::Fled, &mut events);
                return Ok(events);
            }
            Some(FleeOutcome::Failed) => self.state.begin_volley(),
            None if !in_volley => self.state.finish_turn(),
            None => {}
        }

        if let Some(outcome) = self.state.check_terminal() {
            self.conclude(outcome, &mut events);
        } else {
            self.select_next(&mut events);
        }
        Ok(events)
    }

    /// Hands the turn to the next volley member, the next live combatant this
    /// round, or the first combatant of a fresh round.
    fn select_next(&mut self, events: &mut Vec<BattleEvent>) {
        if let Some(actor) = self.state.next_volley_actor() {
            self.state.phase = BattlePhase::EnemyVolley { actor };
            events.push(self.turn_started(actor));
            return;
        }
        if self.state.round == Round::ZERO || self.state.next_actor().is_none() {
            events.extend(self.state.start_round(&mut *self.rng, self.config));
        }
        if let Some(actor) = self.state.next_actor() {
            self.state.phase = BattlePhase::ActorTurn { actor };
            events.push(self.turn_started(actor));
        }
    }

    fn turn_started(&self, actor: CombatantId) -> BattleEvent {
        BattleEvent::TurnStarted {
            round: self.state.round,
            actor,
        }
    }

    fn conclude(&mut self, outcome: BattleOutcome, events: &mut Vec<BattleEvent>) {
        if outcome == BattleOutcome::Victory {
            let mut ctx = RewardContext {
                roster: &mut self.state.roster,
                progress: &mut self.state.progress,
                env: self.env,
                rng: &mut *self.rng,
                stash: &mut *self.stash,
                config: self.config,
            };
            let (summary, reward_events) = reward::grant_rewards(&mut ctx);
            events.extend(reward_events);
            self.state.rewards = Some(summary);
        }
        self.state.volley = None;
        self.state.phase = BattlePhase::BattleOver { outcome };
        events.push(BattleEvent::BattleEnded { outcome });
    }
}

#[cfg(test)]
mod tests;

//! UI-agnostic battle session.
//!
//! [`BattleController`] owns one [`BattleState`] and borrows the content,
//! RNG, party stash, and configuration for the battle's lifetime. Each call
//! advances the battle by exactly one decision point:
//!
//! - [`submit`](BattleController::submit) answers an outstanding player turn
//! - [`step`](BattleController::step) runs one AI or volley turn
//! - [`run_until_input`](BattleController::run_until_input) steps until a
//!   player decision is needed or the battle ends
//!
//! Events from the most recent call are kept for renderers alongside the full
//! log, which becomes part of the [`BattleResult`].

use battle_core::{
    ActionInput, BattleConfig, BattleEngine, BattleEnv, BattleError, BattleEvent, BattleOutcome,
    BattlePhase, BattleRequest, BattleState, CombatantId, ExecuteError, LegalActions, PartyStash,
    RngSource, Side, TagSet, estimate_damage, legal_actions, talk_preview,
};

use crate::api::{ControllerError, ProviderError, ProviderRegistry, Result};
use crate::providers::fallback_target;
use crate::result::BattleResult;
use crate::view::BattleView;

/// What the battle needs next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A player-controlled combatant holds the turn; call `submit`.
    AwaitingInput { actor: CombatantId },
    /// An AI-controlled combatant (or a volley member) holds the turn; call
    /// `step`.
    Automatic { actor: CombatantId },
    Finished { outcome: BattleOutcome },
    /// No combatant holds the turn. `start` never hands back a battle in this
    /// state; neither `submit` nor `step` can advance it.
    NoTurn { phase: BattlePhase },
}

/// Events produced by one controller call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub events: Vec<BattleEvent>,
    /// True when a renderer should redraw the full battle view.
    pub render_snapshot: bool,
}

pub struct BattleController<'a> {
    state: BattleState,
    env: BattleEnv<'a>,
    rng: &'a mut dyn RngSource,
    stash: &'a mut PartyStash,
    config: &'a BattleConfig,
    providers: ProviderRegistry,
    log: Vec<BattleEvent>,
    last_events: Vec<BattleEvent>,
    render_snapshot: bool,
}

impl<'a> BattleController<'a> {
    /// Builds the roster, announces it, and runs initiative for round one.
    ///
    /// Uses the built-in enemy and ally AI; see [`Self::with_providers`].
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Setup` when the request is invalid.
    pub fn start(
        request: &BattleRequest,
        env: BattleEnv<'a>,
        rng: &'a mut dyn RngSource,
        stash: &'a mut PartyStash,
        config: &'a BattleConfig,
    ) -> Result<Self> {
        let (state, mut events) = BattleState::initialize(request, &env, config)?;
        let mut controller = Self {
            state,
            env,
            rng,
            stash,
            config,
            providers: ProviderRegistry::with_default_ai(),
            log: Vec::new(),
            last_events: Vec::new(),
            render_snapshot: false,
        };
        events.extend(controller.engine().start());

        tracing::info!(
            combatants = controller.state.roster.len(),
            allies = controller.state.roster.on_side(Side::Ally).count(),
            enemies = controller.state.roster.on_side(Side::Enemy).count(),
            "battle started"
        );
        controller.record(events);
        controller.render_snapshot = true;
        Ok(controller)
    }

    /// Replaces the action providers consulted for automatic turns.
    #[must_use]
    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    pub fn decision(&self) -> Decision {
        match self.state.phase() {
            BattlePhase::BattleOver { outcome } => Decision::Finished { outcome },
            BattlePhase::ActorTurn { actor }
                if self
                    .state
                    .roster
                    .get(actor)
                    .is_some_and(|c| c.is_player_controlled()) =>
            {
                Decision::AwaitingInput { actor }
            }
            BattlePhase::ActorTurn { actor } | BattlePhase::EnemyVolley { actor } => {
                Decision::Automatic { actor }
            }
            phase @ (BattlePhase::Initializing | BattlePhase::RoundStart) => {
                Decision::NoTurn { phase }
            }
        }
    }

    /// Executes the player's choice for the outstanding turn.
    ///
    /// A rejected action leaves the battle untouched; the same actor still
    /// holds the turn and no redraw is requested.
    ///
    /// # Errors
    ///
    /// - `ControllerError::Action` when the resolver rejects the input
    /// - `ControllerError::NotAwaitingInput` when no player turn is outstanding
    /// - `ControllerError::BattleOver` once the battle has ended
    pub fn submit(&mut self, input: ActionInput) -> Result<StepReport> {
        let actor = match self.decision() {
            Decision::AwaitingInput { actor } => actor,
            Decision::Automatic { .. } => return Err(ControllerError::NotAwaitingInput),
            Decision::Finished { .. } => return Err(ControllerError::BattleOver),
            Decision::NoTurn { .. } => return Err(ExecuteError::NotStarted.into()),
        };
        tracing::debug!(%actor, action = input.label(), "player action submitted");

        let executed = self.engine().execute(actor, &input);
        match executed {
            Ok(events) => Ok(self.complete_turn(events)),
            Err(error) => {
                self.render_snapshot = false;
                Err(error.into())
            }
        }
    }

    /// Runs one automatic turn through the combatant's action provider.
    ///
    /// When the provider proposes an action the resolver rejects, the turn
    /// falls back to a basic attack on the combatant's preferred target.
    ///
    /// # Errors
    ///
    /// - `ControllerError::AwaitingInput` while a player turn is outstanding
    /// - `ControllerError::BattleOver` once the battle has ended
    /// - `ControllerError::Provider`/`ProviderNotSet` when no action can be
    ///   produced
    pub fn step(&mut self) -> Result<StepReport> {
        let actor = match self.decision() {
            Decision::Automatic { actor } => actor,
            Decision::AwaitingInput { actor } => {
                return Err(ControllerError::AwaitingInput { actor });
            }
            Decision::Finished { .. } => return Err(ControllerError::BattleOver),
            Decision::NoTurn { .. } => return Err(ExecuteError::NotStarted.into()),
        };
        let combatant = self
            .state
            .roster
            .get(actor)
            .ok_or(ProviderError::UnknownActor(actor))?;
        let provider = self.providers.provider_for(combatant)?;
        let input = provider.provide_action(actor, &self.state, self.env, self.config)?;
        tracing::debug!(%actor, action = input.label(), "automatic action chosen");

        let executed = self.engine().execute(actor, &input);
        let events = match executed {
            Ok(events) => events,
            Err(ExecuteError::Action(error)) => {
                tracing::warn!(
                    %actor,
                    code = error.error_code(),
                    %error,
                    "provider action rejected; falling back to basic attack"
                );
                let target = fallback_target(&self.state.roster, actor, self.config)
                    .ok_or(ProviderError::NoAction { actor })?;
                self.engine()
                    .execute(actor, &ActionInput::attack(target))?
            }
            Err(error) => return Err(error.into()),
        };
        Ok(self.complete_turn(events))
    }

    /// Steps automatic turns until a player decision is needed or the battle
    /// ends. The report holds every event produced along the way.
    ///
    /// # Errors
    ///
    /// Propagates the first failing [`step`](Self::step).
    pub fn run_until_input(&mut self) -> Result<StepReport> {
        let mut report = StepReport {
            events: Vec::new(),
            render_snapshot: self.render_snapshot,
        };
        while let Decision::Automatic { .. } = self.decision() {
            let step = self.step()?;
            report.events.extend(step.events);
            report.render_snapshot = step.render_snapshot;
        }
        if !report.events.is_empty() {
            self.last_events = report.events.clone();
        }
        Ok(report)
    }

    /// True at battle start and whenever a player-controlled turn has just
    /// begun.
    pub fn should_render_snapshot(&self) -> bool {
        self.render_snapshot
    }

    pub fn view(&self) -> BattleView {
        BattleView::capture(&self.state, self.config)
    }

    /// Legal choices for whoever holds the turn.
    pub fn legal_actions(&self) -> Option<LegalActions> {
        let actor = self.state.current_actor()?;
        Some(legal_actions(&self.state.roster, &self.env, &*self.stash, actor))
    }

    /// Damage preview without guard. `None` if either combatant is unknown.
    pub fn estimate_damage(
        &self,
        attacker: CombatantId,
        target: CombatantId,
        power: u32,
    ) -> Option<u32> {
        let attacker = self.state.roster.get(attacker)?;
        let target = self.state.roster.get(target)?;
        Some(estimate_damage(attacker, target, power))
    }

    /// Whether any live party member knows something about enemies carrying
    /// `enemy_tags`.
    pub fn party_has_knowledge(&self, enemy_tags: &TagSet) -> bool {
        let Ok(knowledge) = self.env.knowledge() else {
            return false;
        };
        self.state.roster.live(Side::Ally).any(|member| {
            knowledge
                .entries(&member.source_id)
                .iter()
                .any(|entry| entry.concerns(enemy_tags))
        })
    }

    /// The text `speaker` would reveal through party talk, without spending
    /// the turn or touching the log.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Action` unless `speaker` is a live ally.
    pub fn party_talk_preview(&self, speaker: CombatantId) -> Result<String> {
        talk_preview(&self.state.roster, &self.env, speaker).map_err(ControllerError::Action)
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn stash(&self) -> &PartyStash {
        &*self.stash
    }

    /// Events from the most recent call.
    pub fn last_events(&self) -> &[BattleEvent] {
        &self.last_events
    }

    /// Every event since the battle started.
    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// Consumes the controller once the battle is over.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::BattleInProgress` before the battle ends.
    pub fn finish(self) -> Result<BattleResult> {
        let outcome = self
            .state
            .outcome()
            .ok_or(ControllerError::BattleInProgress)?;
        Ok(BattleResult::assemble(outcome, &self.state, self.log))
    }

    fn engine(&mut self) -> BattleEngine<'_> {
        BattleEngine::new(
            &mut self.state,
            self.env,
            &mut *self.rng,
            &mut *self.stash,
            self.config,
        )
    }

    fn complete_turn(&mut self, events: Vec<BattleEvent>) -> StepReport {
        self.render_snapshot = matches!(self.decision(), Decision::AwaitingInput { .. });
        if let Decision::Finished { outcome } = self.decision() {
            tracing::info!(
                %outcome,
                round = self.state.round().0,
                events = self.log.len() + events.len(),
                "battle ended"
            );
        }
        self.record(events.clone());
        StepReport {
            events,
            render_snapshot: self.render_snapshot,
        }
    }

    fn record(&mut self, events: Vec<BattleEvent>) {
        self.log.extend(events.iter().cloned());
        self.last_events = events;
    }
}

impl std::fmt::Debug for BattleController<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleController")
            .field("phase", &self.state.phase())
            .field("round", &self.state.round())
            .field("log_len", &self.log.len())
            .field("providers", &self.providers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{
        AllySpec, ContentCatalog, EnemyDefinition, EnemySpec, PcgRng, StatBlock,
    };

    use super::*;

    #[test]
    fn state_without_a_turn_is_not_reported_as_finished() {
        let catalog = ContentCatalog::new().with_enemy(EnemyDefinition::new(
            "imp",
            "Imp",
            StatBlock::new(10, 0, 3, 0, 1),
        ));
        let request = BattleRequest::new(
            vec![AllySpec::primary("Hero", "hero", StatBlock::new(30, 5, 18, 3, 5))],
            vec![EnemySpec::new("imp", 1)],
        );
        let config = BattleConfig::default();
        let mut rng = PcgRng::seeded(3);
        let mut stash = PartyStash::new();
        let env = catalog.as_env();
        let (state, _) = BattleState::initialize(&request, &env, &config).unwrap();

        let mut controller = BattleController {
            state,
            env,
            rng: &mut rng,
            stash: &mut stash,
            config: &config,
            providers: ProviderRegistry::with_default_ai(),
            log: Vec::new(),
            last_events: Vec::new(),
            render_snapshot: false,
        };

        assert_eq!(controller.decision(), Decision::NoTurn {
            phase: BattlePhase::Initializing
        });
        assert_eq!(
            controller.step().unwrap_err(),
            ControllerError::Execute(ExecuteError::NotStarted)
        );
        assert_eq!(
            controller.submit(ActionInput::attack(CombatantId(1))).unwrap_err(),
            ControllerError::Execute(ExecuteError::NotStarted)
        );
        assert!(controller.log().is_empty());
    }
}

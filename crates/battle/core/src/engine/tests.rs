use super::*;
use crate::env::{
    ContentCatalog, EnemyDefinition, ItemDefinition, ItemEffect, ItemTargeting, PcgRng,
};
use crate::state::{DebuffKind, ItemId, StatBlock};

const HERO: CombatantId = CombatantId(0);
const ROOK: CombatantId = CombatantId(1);
const OGRE: CombatantId = CombatantId(2);

struct Harness {
    state: BattleState,
    catalog: ContentCatalog,
    rng: PcgRng,
    stash: PartyStash,
    config: BattleConfig,
    log: Vec<BattleEvent>,
}

impl Harness {
    fn new(ogre_speed: i32, hero_hp: u32, config: BattleConfig) -> Self {
        let catalog = ContentCatalog::new()
            .with_enemy(
                EnemyDefinition::new("ogre", "Ogre", StatBlock::new(50, 0, 9, 2, ogre_speed))
                    .with_rewards(6, 8),
            )
            .with_item(ItemDefinition::new(
                "weaken_dust",
                "Weaken Dust",
                ItemTargeting::Enemy,
                ItemEffect::Debuff {
                    kind: DebuffKind::AttackDown,
                    magnitude: 3,
                },
            ));
        let request = BattleRequest::new(
            vec![
                AllySpec::primary("Hero", "hero", StatBlock::new(30, 5, 18, 3, 5))
                    .with_resources(hero_hp, 5),
                AllySpec::companion("Rook", "rook", StatBlock::new(25, 4, 7, 2, 4)),
            ],
            vec![EnemySpec::new("ogre", 1)],
        );
        let (state, log) = BattleState::initialize(&request, &catalog.as_env(), &config).unwrap();
        let mut harness = Self {
            state,
            catalog,
            rng: PcgRng::seeded(11),
            stash: PartyStash::new().with_item("weaken_dust", 1),
            config,
            log,
        };
        let started = harness.engine().start();
        harness.log.extend(started);
        harness
    }

    fn engine(&mut self) -> BattleEngine<'_> {
        BattleEngine::new(
            &mut self.state,
            self.catalog.as_env(),
            &mut self.rng,
            &mut self.stash,
            &self.config,
        )
    }

    fn act(&mut self, input: ActionInput) -> Result<Vec<BattleEvent>, ExecuteError> {
        let actor = self.state.current_actor().ok_or(ExecuteError::BattleOver)?;
        let events = self.engine().execute(actor, &input)?;
        self.log.extend(events.iter().cloned());
        Ok(events)
    }

    /// Everyone attacks their natural target: allies hit the ogre, the ogre
    /// hits the hero.
    fn default_input(&self) -> ActionInput {
        match self.state.current_actor() {
            Some(OGRE) => ActionInput::attack(HERO),
            _ => ActionInput::attack(OGRE),
        }
    }
}

#[test]
fn start_opens_round_one_for_the_fastest() {
    let harness = Harness::new(1, 30, BattleConfig::default());
    assert!(matches!(harness.log[0], BattleEvent::BattleStarted { .. }));
    assert_eq!(harness.log[1], BattleEvent::RoundStarted { round: Round(1) });
    assert_eq!(
        harness.log.last(),
        Some(&BattleEvent::TurnStarted {
            round: Round(1),
            actor: HERO
        })
    );
    assert_eq!(harness.state.order(), &[HERO, ROOK, OGRE]);
}

#[test]
fn only_the_current_actor_may_act() {
    let mut harness = Harness::new(1, 30, BattleConfig::default());
    let err = harness
        .engine()
        .execute(ROOK, &ActionInput::attack(OGRE))
        .unwrap_err();
    assert_eq!(
        err,
        ExecuteError::ActorNotCurrent {
            actor: ROOK,
            current: HERO
        }
    );
}

#[test]
fn rejected_action_keeps_the_turn() {
    let mut harness = Harness::new(1, 30, BattleConfig::default());
    let before = harness.state.clone();
    let err = harness.act(ActionInput::attack(ROOK)).unwrap_err();
    assert!(err.as_action().is_some());
    assert_eq!(harness.state, before);
}

#[test]
fn primary_deals_sixteen_and_wins_within_four_actions() {
    let mut harness = Harness::new(1, 30, BattleConfig::default());
    let mut hero_actions = 0;
    while !harness.state.is_over() {
        if harness.state.current_actor() == Some(HERO) {
            hero_actions += 1;
        }
        let input = harness.default_input();
        harness.act(input).unwrap();
    }

    assert!(hero_actions <= 4);
    assert_eq!(harness.state.outcome(), Some(BattleOutcome::Victory));
    let hero_hits: Vec<u32> = harness
        .log
        .iter()
        .filter_map(|event| match event {
            BattleEvent::DamageDealt {
                source: HERO,
                amount,
                ..
            } => Some(*amount),
            _ => None,
        })
        .collect();
    assert!(hero_hits.iter().all(|&amount| amount == 16));
    assert_eq!(harness.stash.gold, 6);
    assert_eq!(harness.state.rewards().map(|r| r.gold), Some(6));
}

#[test]
fn primary_defeat_ends_the_battle_at_once() {
    let mut harness = Harness::new(10, 1, BattleConfig::default());
    assert_eq!(harness.state.current_actor(), Some(OGRE));

    let events = harness.act(ActionInput::attack(HERO)).unwrap();
    assert_eq!(
        &events[events.len() - 2..],
        &[
            BattleEvent::CombatantDefeated { combatant: HERO },
            BattleEvent::BattleEnded {
                outcome: BattleOutcome::Defeat
            },
        ]
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, BattleEvent::TurnStarted { .. })));
    assert_eq!(
        harness.engine().execute(ROOK, &ActionInput::attack(OGRE)),
        Err(ExecuteError::BattleOver)
    );
}

#[test]
fn successful_flee_restores_entry_resources() {
    let mut harness = Harness::new(10, 30, BattleConfig::default().with_flee_chance(100));
    harness.act(ActionInput::attack(HERO)).unwrap();
    assert_eq!(harness.state.roster.get(HERO).map(|c| c.hp), Some(24));

    let events = harness.act(ActionInput::Flee).unwrap();
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded {
            outcome: BattleOutcome::Fled
        })
    );
    assert_eq!(harness.state.roster.get(HERO).map(|c| c.hp), Some(30));
    assert!(harness.state.rewards().is_none());
}

#[test]
fn failed_flee_skips_allies_and_lets_enemies_act() {
    let mut harness = Harness::new(1, 30, BattleConfig::default().with_flee_chance(0));
    let events = harness.act(ActionInput::Flee).unwrap();
    assert_eq!(
        events.last(),
        Some(&BattleEvent::TurnStarted {
            round: Round(1),
            actor: OGRE
        })
    );
    assert_eq!(
        harness.state.phase(),
        BattlePhase::EnemyVolley { actor: OGRE }
    );

    let events = harness.act(ActionInput::attack(HERO)).unwrap();
    assert!(events.contains(&BattleEvent::RoundStarted { round: Round(2) }));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::TurnStarted {
            round: Round(2),
            actor: HERO
        })
    );
}

#[test]
fn debuff_from_round_two_expires_at_round_four() {
    let mut harness = Harness::new(1, 30, BattleConfig::default());
    let mut applied_round = None;
    let mut expired_round = None;
    while harness.state.round() < Round(5) && !harness.state.is_over() {
        let input = match harness.state.current_actor() {
            Some(HERO) if harness.state.round() == Round(2) && applied_round.is_none() => {
                applied_round = Some(harness.state.round());
                ActionInput::item("weaken_dust", OGRE)
            }
            Some(OGRE) => ActionInput::attack(HERO),
            // keep the ogre standing
            _ => ActionInput::Talk { speaker: ROOK },
        };
        for event in harness.act(input).unwrap() {
            if let BattleEvent::DebuffExpired { target: OGRE, kind } = event {
                assert_eq!(kind, DebuffKind::AttackDown);
                expired_round = Some(harness.state.round());
            }
        }
    }
    assert_eq!(applied_round, Some(Round(2)));
    assert_eq!(expired_round, Some(Round(4)));
    assert_eq!(harness.stash.quantity(&ItemId::new("weaken_dust")), 0);
}

#[test]
fn same_seed_and_inputs_reproduce_the_log() {
    let run = || {
        let mut harness = Harness::new(5, 30, BattleConfig::default());
        while !harness.state.is_over() {
            let input = harness.default_input();
            harness.act(input).unwrap();
        }
        harness.log
    };
    let first = run();
    assert!(first
        .iter()
        .any(|event| matches!(event, BattleEvent::TieBreakRolled { .. })));
    assert_eq!(first, run());
}

//! Shared builders for runtime scenario tests.
#![allow(dead_code)]

use battle_core::{
    ActionInput, AllySpec, BattleConfig, BattleRequest, CombatantId, ContentCatalog, DebuffKind,
    EnemyDefinition, EnemySpec, ItemDefinition, ItemEffect, ItemTargeting, KnowledgeEntry, PcgRng,
    PartyStash, SkillDefinition, SkillEffect, StatBlock, TargetMode, tags,
};
use battle_runtime::{BattleController, Decision};
use tracing_subscriber::EnvFilter;

pub const HERO: CombatantId = CombatantId(0);
pub const ROOK: CombatantId = CombatantId(1);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every definition the scenarios draw from.
///
/// Enemy attack values are chosen against the hero's defense of 3:
/// ogre/raider hit for 6, brute for 8, gnat for 3, slime for 1.
pub fn catalog() -> ContentCatalog {
    ContentCatalog::new()
        .with_skill(
            SkillDefinition::new("brace", "Brace", TargetMode::SelfOnly, SkillEffect::Guard)
                .with_power(5),
        )
        .with_skill(
            SkillDefinition::new("spit", "Spit", TargetMode::SingleEnemy, SkillEffect::Damage)
                .with_cost(2)
                .with_power(2)
                .enemy_only(),
        )
        .with_enemy(
            EnemyDefinition::new("ogre", "Ogre", StatBlock::new(50, 0, 9, 2, 1))
                .with_tags(tags(["giant"]))
                .with_rewards(6, 8),
        )
        .with_enemy(EnemyDefinition::new("raider", "Raider", StatBlock::new(50, 0, 9, 2, 9)))
        .with_enemy(EnemyDefinition::new("brute", "Brute", StatBlock::new(50, 0, 11, 0, 1)))
        .with_enemy(EnemyDefinition::new("gnat", "Gnat", StatBlock::new(50, 0, 6, 0, 1)))
        .with_enemy(
            EnemyDefinition::new("slime", "Slime", StatBlock::new(20, 0, 4, 1, 9))
                .with_tags(tags(["ooze"]))
                .with_skills(["spit"]),
        )
        .with_enemy(
            EnemyDefinition::new("imp", "Imp", StatBlock::new(10, 0, 3, 0, 1)).with_rewards(11, 15),
        )
        .with_enemy(EnemyDefinition::new(
            "behemoth",
            "Behemoth",
            StatBlock::new(200, 0, 9, 2, 1),
        ))
        .with_enemy(
            EnemyDefinition::new("duelist", "Duelist", StatBlock::new(60, 0, 4, 2, 5))
                .with_rewards(3, 4),
        )
        .with_item(ItemDefinition::new(
            "weaken_dust",
            "Weaken Dust",
            ItemTargeting::Enemy,
            ItemEffect::Debuff {
                kind: DebuffKind::AttackDown,
                magnitude: 3,
            },
        ))
        .with_knowledge(
            "rook",
            KnowledgeEntry::new(tags(["giant"]))
                .with_hp_hint(45, 55)
                .with_behavior("Hits hard but slow."),
        )
}

/// Player-controlled primary: 30 HP, 5 MP, attack 18, defense 3, speed 5.
pub fn hero() -> AllySpec {
    AllySpec::primary("Hero", "hero", StatBlock::new(30, 5, 18, 3, 5))
        .with_weapon_tags(tags(["blade"]))
}

/// AI companion: 25 HP, attack 7, defense 2, speed 4.
pub fn rook() -> AllySpec {
    AllySpec::companion("Rook", "rook", StatBlock::new(25, 4, 7, 2, 4))
}

pub fn request(allies: Vec<AllySpec>, enemy: &str, quantity: u32) -> BattleRequest {
    BattleRequest::new(allies, vec![EnemySpec::new(enemy, quantity)])
}

/// Content, RNG, stash, and config owned for one battle.
pub struct Session {
    pub catalog: ContentCatalog,
    pub rng: PcgRng,
    pub stash: PartyStash,
    pub config: BattleConfig,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, BattleConfig::default())
    }

    pub fn with_config(seed: u64, config: BattleConfig) -> Self {
        init_tracing();
        Self {
            catalog: catalog(),
            rng: PcgRng::seeded(seed),
            stash: PartyStash::new().with_item("weaken_dust", 1),
            config,
        }
    }

    pub fn start(&mut self, request: &BattleRequest) -> BattleController<'_> {
        BattleController::start(
            request,
            self.catalog.as_env(),
            &mut self.rng,
            &mut self.stash,
            &self.config,
        )
        .expect("valid battle request")
    }
}

/// Plays to the end: the player always attacks the first live enemy.
pub fn play_out(controller: &mut BattleController<'_>) {
    loop {
        match controller.decision() {
            Decision::AwaitingInput { .. } => {
                let target = controller
                    .legal_actions()
                    .and_then(|legal| legal.attack_targets.first().copied())
                    .expect("a live enemy to attack");
                controller
                    .submit(ActionInput::attack(target))
                    .expect("legal attack");
            }
            Decision::Automatic { .. } => {
                controller.step().expect("automatic turn");
            }
            Decision::Finished { .. } => break,
            Decision::NoTurn { phase } => panic!("no turn outstanding in {phase:?}"),
        }
    }
}

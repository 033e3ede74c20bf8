//! Enemy decision making.

use battle_core::{
    ActionInput, BattleConfig, BattleEnv, BattleState, Combatant, CombatantId, Roster,
    SkillDefinition, TargetMode, eligible_skills,
};

use super::targeting::{enemy_single_target, top_targets};
use crate::api::{ActionProvider, ProviderError};

/// Picks the first usable declared skill, otherwise a basic attack.
///
/// Skills are scanned in the order the enemy declares them. A skill is usable
/// when its cost is affordable, its cap is not reached, and it has at least
/// one target.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnemyAiProvider;

impl EnemyAiProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ActionProvider for EnemyAiProvider {
    fn provide_action(
        &self,
        actor: CombatantId,
        state: &BattleState,
        env: BattleEnv<'_>,
        config: &BattleConfig,
    ) -> Result<ActionInput, ProviderError> {
        let enemy = state
            .roster
            .get(actor)
            .filter(|c| c.is_alive())
            .ok_or(ProviderError::UnknownActor(actor))?;

        for skill in eligible_skills(enemy, &env) {
            if enemy.mp < skill.mp_cost {
                continue;
            }
            if let Some(targets) = skill_targets(&state.roster, enemy, skill, config) {
                tracing::debug!(
                    enemy = %enemy.name,
                    skill = %skill.id,
                    ?targets,
                    "enemy AI chose skill"
                );
                return Ok(ActionInput::Skill {
                    skill: skill.id.clone(),
                    targets,
                });
            }
        }

        let target = enemy_single_target(&state.roster, enemy, config)
            .ok_or(ProviderError::NoAction { actor })?;
        tracing::debug!(enemy = %enemy.name, %target, "enemy AI chose basic attack");
        Ok(ActionInput::attack(target))
    }
}

fn skill_targets(
    roster: &Roster,
    enemy: &Combatant,
    skill: &SkillDefinition,
    config: &BattleConfig,
) -> Option<Vec<CombatantId>> {
    let targets = match skill.target_mode {
        TargetMode::SelfOnly => vec![enemy.id],
        TargetMode::SingleEnemy => enemy_single_target(roster, enemy, config)
            .into_iter()
            .collect(),
        TargetMode::MultiEnemy { max_targets } => {
            top_targets(roster, enemy, max_targets.max(1) as usize)
        }
    };
    (!targets.is_empty()).then_some(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        AllySpec, BattleRequest, ContentCatalog, EnemyDefinition, EnemySpec, SkillEffect,
        StatBlock,
    };

    fn catalog(spit_cost: u32) -> ContentCatalog {
        ContentCatalog::new()
            .with_skill(
                SkillDefinition::new("harden", "Harden", TargetMode::SelfOnly, SkillEffect::Guard)
                    .with_cost(99)
                    .with_power(5),
            )
            .with_skill(
                SkillDefinition::new("spit", "Spit", TargetMode::SingleEnemy, SkillEffect::Damage)
                    .with_cost(spit_cost)
                    .with_power(2)
                    .with_max_uses(1),
            )
            .with_enemy(
                EnemyDefinition::new("slime", "Slime", StatBlock::new(20, 3, 4, 1, 3))
                    .with_skills(["harden", "spit"]),
            )
    }

    fn state(catalog: &ContentCatalog) -> BattleState {
        let request = BattleRequest::new(
            vec![
                AllySpec::primary("Hero", "hero", StatBlock::new(30, 5, 8, 2, 5)),
                AllySpec::companion("Rook", "rook", StatBlock::new(40, 4, 6, 4, 4)),
            ],
            vec![EnemySpec::new("slime", 1)],
        );
        let (state, _) =
            BattleState::initialize(&request, &catalog.as_env(), &BattleConfig::default())
                .expect("valid request");
        state
    }

    const SLIME: CombatantId = CombatantId(2);

    #[test]
    fn first_affordable_declared_skill_is_used() {
        let catalog = catalog(3);
        let state = state(&catalog);
        let action = EnemyAiProvider
            .provide_action(SLIME, &state, catalog.as_env(), &BattleConfig::default())
            .expect("action");
        // Rook: (40 + 4) / 5 = 8 base threat, Hero: (30 + 2) / 5 = 6.
        assert_eq!(action, ActionInput::Skill {
            skill: "spit".into(),
            targets: vec![CombatantId(1)],
        });
    }

    #[test]
    fn unaffordable_skills_fall_back_to_attack() {
        let catalog = catalog(4);
        let state = state(&catalog);
        let action = EnemyAiProvider
            .provide_action(SLIME, &state, catalog.as_env(), &BattleConfig::default())
            .expect("action");
        assert_eq!(action, ActionInput::attack(CombatantId(1)));
    }

    #[test]
    fn exhausted_skill_is_skipped() {
        let catalog = catalog(0);
        let mut state = state(&catalog);
        state
            .roster
            .get_mut(SLIME)
            .expect("slime")
            .record_skill_use(&"spit".into());
        let action = EnemyAiProvider
            .provide_action(SLIME, &state, catalog.as_env(), &BattleConfig::default())
            .expect("action");
        assert!(matches!(action, ActionInput::Attack { .. }));
    }
}

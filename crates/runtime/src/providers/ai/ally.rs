//! Decision making for AI-controlled allies and summons.

use battle_core::{
    ActionInput, BattleConfig, BattleEnv, BattleState, CombatantId, SkillEffect, TargetMode,
    eligible_skills,
};

use super::targeting::top_targets;
use crate::api::{ActionProvider, ProviderError};

/// Uses the first affordable damage skill, otherwise attacks.
///
/// Targets follow the ally's own threat table: the enemies it has hurt most
/// come first.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllyAiProvider;

impl AllyAiProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ActionProvider for AllyAiProvider {
    fn provide_action(
        &self,
        actor: CombatantId,
        state: &BattleState,
        env: BattleEnv<'_>,
        _config: &BattleConfig,
    ) -> Result<ActionInput, ProviderError> {
        let ally = state
            .roster
            .get(actor)
            .filter(|c| c.is_alive())
            .ok_or(ProviderError::UnknownActor(actor))?;

        let damage_skill = eligible_skills(ally, &env).into_iter().find(|skill| {
            skill.effect == SkillEffect::Damage
                && skill.target_mode != TargetMode::SelfOnly
                && ally.mp >= skill.mp_cost
        });
        if let Some(skill) = damage_skill {
            let count = match skill.target_mode {
                TargetMode::MultiEnemy { max_targets } => max_targets.max(1) as usize,
                TargetMode::SingleEnemy | TargetMode::SelfOnly => 1,
            };
            let targets = top_targets(&state.roster, ally, count);
            if !targets.is_empty() {
                tracing::debug!(
                    ally = %ally.name,
                    skill = %skill.id,
                    ?targets,
                    "ally AI chose skill"
                );
                return Ok(ActionInput::Skill {
                    skill: skill.id.clone(),
                    targets,
                });
            }
        }

        let target = top_targets(&state.roster, ally, 1)
            .into_iter()
            .next()
            .ok_or(ProviderError::NoAction { actor })?;
        tracing::debug!(ally = %ally.name, %target, "ally AI chose basic attack");
        Ok(ActionInput::attack(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        AllySpec, BattleRequest, ContentCatalog, EnemyDefinition, EnemySpec, SkillDefinition,
        StatBlock, tags,
    };

    const ROOK: CombatantId = CombatantId(1);

    fn catalog() -> ContentCatalog {
        ContentCatalog::new()
            .with_skill(
                SkillDefinition::new("brace", "Brace", TargetMode::SelfOnly, SkillEffect::Guard)
                    .with_power(6),
            )
            .with_skill(
                SkillDefinition::new(
                    "cleave",
                    "Cleave",
                    TargetMode::MultiEnemy { max_targets: 2 },
                    SkillEffect::Damage,
                )
                .with_cost(4)
                .with_power(1)
                .with_required_tags(tags(["axe"])),
            )
            .with_enemy(EnemyDefinition::new("bat", "Bat", StatBlock::new(10, 0, 3, 0, 7)))
            .with_enemy(EnemyDefinition::new("ogre", "Ogre", StatBlock::new(45, 0, 9, 5, 2)))
    }

    fn state(catalog: &ContentCatalog, rook_mp: u32) -> BattleState {
        let request = BattleRequest::new(
            vec![
                AllySpec::primary("Hero", "hero", StatBlock::new(30, 5, 8, 2, 5)),
                AllySpec::companion("Rook", "rook", StatBlock::new(25, 6, 6, 4, 4))
                    .with_resources(25, rook_mp)
                    .with_weapon_tags(tags(["axe"])),
            ],
            vec![EnemySpec::new("bat", 2), EnemySpec::new("ogre", 1)],
        );
        let (state, _) =
            BattleState::initialize(&request, &catalog.as_env(), &BattleConfig::default())
                .expect("valid request");
        state
    }

    #[test]
    fn damage_skill_hits_highest_threat_enemies() {
        let catalog = catalog();
        let state = state(&catalog, 6);
        let action = AllyAiProvider
            .provide_action(ROOK, &state, catalog.as_env(), &BattleConfig::default())
            .expect("action");
        // Ogre seeds (45 + 5) / 5 = 10, bats (10 + 0) / 5 = 2 each.
        assert_eq!(action, ActionInput::Skill {
            skill: "cleave".into(),
            targets: vec![CombatantId(4), CombatantId(2)],
        });
    }

    #[test]
    fn guard_skills_are_never_picked() {
        let catalog = catalog();
        let state = state(&catalog, 3);
        let action = AllyAiProvider
            .provide_action(ROOK, &state, catalog.as_env(), &BattleConfig::default())
            .expect("action");
        assert_eq!(action, ActionInput::attack(CombatantId(4)));
    }

    #[test]
    fn defeated_actor_has_no_action() {
        let catalog = catalog();
        let mut state = state(&catalog, 6);
        state.roster.get_mut(ROOK).expect("rook").apply_damage(99);
        let result =
            AllyAiProvider.provide_action(ROOK, &state, catalog.as_env(), &BattleConfig::default());
        assert_eq!(result, Err(ProviderError::UnknownActor(ROOK)));
    }
}

//! Builds the roster for a new battle from a [`BattleRequest`].

use crate::config::BattleConfig;
use crate::engine::{BattleRequest, SetupError};
use crate::env::BattleEnv;
use crate::state::{AllySpec, Bounty, Combatant, CombatantId, Control, Role, Roster};

/// Spawns allies (primary first, then companions in request order, then
/// summons) followed by enemies in request order, then numbers duplicate
/// enemy names and seeds threat.
pub(crate) fn build_roster(
    request: &BattleRequest,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
) -> Result<Roster, SetupError> {
    validate_allies(&request.allies)?;
    if request.enemies.iter().all(|spec| spec.quantity == 0) {
        return Err(SetupError::NoEnemies);
    }

    let mut roster = Roster::new();
    let mut ally_ids: Vec<Option<CombatantId>> = vec![None; request.allies.len()];
    let primary_first = request
        .allies
        .iter()
        .enumerate()
        .filter(|(_, spec)| spec.role == Role::Primary)
        .chain(
            request
                .allies
                .iter()
                .enumerate()
                .filter(|(_, spec)| spec.role != Role::Primary),
        );
    for (index, spec) in primary_first {
        ally_ids[index] = Some(roster.spawn(|id| spawn_ally(id, spec)));
    }

    for summon in &request.summons {
        let owner = ally_ids
            .get(summon.owner_index)
            .copied()
            .flatten()
            .ok_or_else(|| SetupError::UnknownSummonOwner {
                name: summon.name.clone(),
                owner_index: summon.owner_index,
            })?;
        roster.spawn(|id| {
            let mut combatant =
                Combatant::new(id, summon.name.clone(), Role::Summon { owner }, summon.stats);
            combatant.source_id = summon.source_id.clone();
            combatant.control = Control::Ai;
            combatant.weapon_tags = summon.weapon_tags.clone();
            combatant
        });
    }

    for spec in &request.enemies {
        let definition = env.enemy(&spec.enemy)?;
        let skills = spec
            .skills_override
            .clone()
            .unwrap_or_else(|| definition.skills.clone());
        for _ in 0..spec.quantity {
            roster.spawn(|id| {
                let mut enemy =
                    Combatant::new(id, definition.name.clone(), Role::Enemy, definition.stats);
                enemy.source_id = definition.id.as_str().to_owned();
                enemy.tags = definition.tags.clone();
                enemy.skills = skills.clone();
                enemy.bounty = Bounty {
                    gold: definition.gold,
                    exp: definition.exp,
                };
                enemy
            });
        }
    }

    roster.disambiguate_enemy_names();
    roster.seed_threat(config);
    Ok(roster)
}

fn validate_allies(allies: &[AllySpec]) -> Result<(), SetupError> {
    if let Some(spec) = allies
        .iter()
        .find(|spec| !matches!(spec.role, Role::Primary | Role::Companion))
    {
        return Err(SetupError::InvalidAllyRole {
            name: spec.name.clone(),
        });
    }
    match allies.iter().filter(|spec| spec.role == Role::Primary).count() {
        0 => Err(SetupError::MissingPrimary),
        1 => Ok(()),
        _ => Err(SetupError::MultiplePrimaries),
    }
}

fn spawn_ally(id: CombatantId, spec: &AllySpec) -> Combatant {
    let mut combatant = Combatant::new(id, spec.name.clone(), spec.role, spec.stats);
    if let Some((hp, mp)) = spec.resources {
        combatant = combatant.with_resources(hp, mp);
    }
    combatant.source_id = spec.source_id.clone();
    combatant.control = spec.control;
    combatant.tags = spec.tags.clone();
    combatant.weapon_tags = spec.weapon_tags.clone();
    combatant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ContentCatalog, EnemyDefinition, OracleError};
    use crate::state::{EnemySpec, PartyProgress, Side, SkillId, StatBlock, SummonSpec, tags};

    fn catalog() -> ContentCatalog {
        ContentCatalog::new().with_enemy(
            EnemyDefinition::new("slime", "Slime", StatBlock::new(20, 0, 4, 2, 3))
                .with_tags(tags(["ooze"]))
                .with_skills(vec!["spit"])
                .with_rewards(3, 4),
        )
    }

    fn request() -> BattleRequest {
        BattleRequest {
            allies: vec![
                AllySpec::companion("Rook", "rook", StatBlock::new(25, 4, 7, 2, 4)),
                AllySpec::primary("Hero", "hero", StatBlock::new(30, 6, 18, 3, 5))
                    .with_resources(12, 2),
            ],
            summons: vec![SummonSpec {
                name: "Wisp".into(),
                source_id: "wisp".into(),
                owner_index: 1,
                stats: StatBlock::new(5, 0, 2, 0, 9),
                weapon_tags: tags(["spark"]),
            }],
            enemies: vec![EnemySpec::new("slime", 2)],
            progress: PartyProgress::new(),
        }
    }

    #[test]
    fn roster_spawns_primary_first_then_summons_then_enemies() {
        let catalog = catalog();
        let roster =
            build_roster(&request(), &catalog.as_env(), &BattleConfig::default()).unwrap();

        let layout: Vec<(&str, Side)> =
            roster.iter().map(|c| (c.name.as_str(), c.side())).collect();
        assert_eq!(
            layout,
            vec![
                ("Hero", Side::Ally),
                ("Rook", Side::Ally),
                ("Wisp", Side::Ally),
                ("Slime (1)", Side::Enemy),
                ("Slime (2)", Side::Enemy),
            ]
        );
        let hero = roster.get(CombatantId(0)).unwrap();
        assert_eq!((hero.hp, hero.mp), (12, 2));
        let wisp = roster.get(CombatantId(2)).unwrap();
        assert_eq!(wisp.role, Role::Summon { owner: CombatantId(0) });
        let slime = roster.get(CombatantId(3)).unwrap();
        assert_eq!(slime.bounty, Bounty { gold: 3, exp: 4 });
        assert_eq!(slime.skills, vec![SkillId::new("spit")]);
    }

    #[test]
    fn skill_override_replaces_definition_list() {
        let catalog = catalog();
        let mut request = request();
        request.enemies = vec![EnemySpec::new("slime", 1).with_skills(Vec::new())];
        let roster = build_roster(&request, &catalog.as_env(), &BattleConfig::default()).unwrap();
        assert!(roster.get(CombatantId(3)).unwrap().skills.is_empty());
    }

    #[test]
    fn request_problems_are_reported() {
        let catalog = catalog();
        let env = catalog.as_env();
        let config = BattleConfig::default();

        let mut no_primary = request();
        no_primary.allies.remove(1);
        no_primary.summons.clear();
        assert_eq!(
            build_roster(&no_primary, &env, &config),
            Err(SetupError::MissingPrimary)
        );

        let mut unknown = request();
        unknown.enemies = vec![EnemySpec::new("dragon", 1)];
        assert!(matches!(
            build_roster(&unknown, &env, &config),
            Err(SetupError::Content(OracleError::DefinitionNotFound { .. }))
        ));

        let mut empty = request();
        empty.enemies.clear();
        assert_eq!(build_roster(&empty, &env, &config), Err(SetupError::NoEnemies));
    }
}

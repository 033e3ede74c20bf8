//! Actor, target, and skill eligibility checks shared by the resolvers.

use std::collections::BTreeSet;

use crate::action::{ActionError, ActorRejection, SkillRejection, TargetRejection};
use crate::env::{BattleEnv, SkillAudience, SkillDefinition, TargetMode};
use crate::state::{Combatant, CombatantId, Roster, Side};

/// Looks up the actor and requires it to be alive.
pub(crate) fn live_actor(roster: &Roster, actor: CombatantId) -> Result<&Combatant, ActionError> {
    let combatant = roster.get(actor).ok_or(ActionError::InvalidActor {
        actor,
        reason: ActorRejection::Unknown,
    })?;
    if !combatant.is_alive() {
        return Err(ActionError::InvalidActor {
            actor,
            reason: ActorRejection::Defeated,
        });
    }
    Ok(combatant)
}

/// Looks up a target and requires it to be alive.
pub(crate) fn live_target(
    roster: &Roster,
    actor: CombatantId,
    target: CombatantId,
) -> Result<&Combatant, ActionError> {
    let combatant = roster.get(target).ok_or(ActionError::InvalidTarget {
        actor,
        target,
        reason: TargetRejection::Unknown,
    })?;
    if !combatant.is_alive() {
        return Err(ActionError::InvalidTarget {
            actor,
            target,
            reason: TargetRejection::Defeated,
        });
    }
    Ok(combatant)
}

/// Requires a live target on `side`.
pub(crate) fn live_target_on(
    roster: &Roster,
    actor: CombatantId,
    target: CombatantId,
    side: Side,
) -> Result<&Combatant, ActionError> {
    let combatant = live_target(roster, actor, target)?;
    if combatant.side() != side {
        return Err(ActionError::InvalidTarget {
            actor,
            target,
            reason: TargetRejection::WrongSide,
        });
    }
    Ok(combatant)
}

/// Checks whether `skill` is open to `actor`, ignoring MP and targets.
pub(crate) fn check_skill(actor: &Combatant, skill: &SkillDefinition) -> Result<(), SkillRejection> {
    match actor.side() {
        Side::Ally => {
            if skill.audience == SkillAudience::EnemyOnly {
                return Err(SkillRejection::EnemyOnly);
            }
            if actor.weapon_tags.is_empty()
                || !skill.required_weapon_tags.is_subset(&actor.weapon_tags)
            {
                return Err(SkillRejection::MissingWeaponTags);
            }
            Ok(())
        }
        Side::Enemy => {
            if !actor.skills.contains(&skill.id) {
                return Err(SkillRejection::NotInSkillList);
            }
            if skill.max_uses.is_some_and(|cap| actor.uses_of(&skill.id) >= cap) {
                return Err(SkillRejection::UsageCapReached);
            }
            Ok(())
        }
    }
}

/// Skills `actor` may currently use, MP aside.
///
/// Allies see every definition their weapon tags unlock, in definition order.
/// Enemies see their declared list in declared order, minus exhausted skills.
pub fn eligible_skills<'a>(actor: &Combatant, env: &BattleEnv<'a>) -> Vec<&'a SkillDefinition> {
    let Ok(oracle) = env.skills() else {
        return Vec::new();
    };
    match actor.side() {
        Side::Ally => oracle
            .definitions()
            .iter()
            .filter(|skill| check_skill(actor, skill).is_ok())
            .collect(),
        Side::Enemy => actor
            .skills
            .iter()
            .filter_map(|id| oracle.skill(id))
            .filter(|skill| check_skill(actor, skill).is_ok())
            .collect(),
    }
}

/// Validates the caller-supplied targets for a skill and returns the
/// combatants it will actually affect.
pub(crate) fn skill_targets(
    roster: &Roster,
    actor: &Combatant,
    skill: &SkillDefinition,
    requested: &[CombatantId],
) -> Result<Vec<CombatantId>, ActionError> {
    let (min, max) = skill.target_mode.target_bounds();
    if requested.len() < min || requested.len() > max {
        return Err(ActionError::TargetCountMismatch {
            actor: actor.id,
            skill: skill.id.clone(),
            min,
            max,
            provided: requested.len(),
        });
    }

    match skill.target_mode {
        TargetMode::SelfOnly => {
            if let Some(&other) = requested.iter().find(|&&id| id != actor.id) {
                return Err(ActionError::InvalidTarget {
                    actor: actor.id,
                    target: other,
                    reason: TargetRejection::NotSelf,
                });
            }
            Ok(vec![actor.id])
        }
        TargetMode::SingleEnemy | TargetMode::MultiEnemy { .. } => {
            let opposing = actor.side().opponent();
            let mut seen = BTreeSet::new();
            for &target in requested {
                if !seen.insert(target) {
                    return Err(ActionError::InvalidTarget {
                        actor: actor.id,
                        target,
                        reason: TargetRejection::Duplicate,
                    });
                }
                live_target_on(roster, actor.id, target, opposing)?;
            }
            Ok(requested.to_vec())
        }
    }
}

use crate::action::strike::strike;
use crate::action::targeting::{check_skill, live_actor, skill_targets};
use crate::action::{ActionError, ResolveContext, Shortfall, SkillRejection};
use crate::env::SkillEffect;
use crate::event::BattleEvent;
use crate::state::{CombatantId, Side, SkillId};

/// Resolves a skill: eligibility, MP, and targets are checked up front, then
/// MP is spent once and the effect is applied to each target in order.
pub(crate) fn use_skill(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
    skill_id: &SkillId,
    requested: &[CombatantId],
) -> Result<Vec<BattleEvent>, ActionError> {
    let caster = live_actor(ctx.roster, actor)?;
    let ineligible = |reason| ActionError::IneligibleSkill {
        actor,
        skill: skill_id.clone(),
        reason,
    };
    let skill = ctx
        .env
        .skill(skill_id)
        .map_err(|_| ineligible(SkillRejection::Unknown))?;
    check_skill(caster, skill).map_err(ineligible)?;
    if caster.mp < skill.mp_cost {
        return Err(ActionError::InsufficientResource {
            actor,
            shortfall: Shortfall::Mp {
                needed: skill.mp_cost,
                available: caster.mp,
            },
        });
    }
    let targets = skill_targets(ctx.roster, caster, skill, requested)?;
    let is_enemy = caster.side() == Side::Enemy;

    if let Some(caster) = ctx.roster.get_mut(actor) {
        caster.spend_mp(skill.mp_cost);
        if is_enemy {
            caster.record_skill_use(&skill.id);
        }
    }

    let mut events = vec![BattleEvent::SkillUsed {
        caster: actor,
        skill: skill.id.clone(),
        targets: targets.clone(),
        mp_spent: skill.mp_cost,
    }];
    match skill.effect {
        SkillEffect::Damage => {
            for target in targets {
                strike(ctx.roster, ctx.config, actor, target, skill.power, &mut events);
            }
        }
        SkillEffect::Guard => {
            if let Some(caster) = ctx.roster.get_mut(actor) {
                caster.guard = skill.power;
            }
            events.push(BattleEvent::GuardApplied {
                combatant: actor,
                amount: skill.power,
            });
        }
    }
    Ok(events)
}

use crate::action::targeting::{live_actor, live_target};
use crate::action::{ActionError, ResolveContext, Shortfall, TargetRejection};
use crate::env::{ItemEffect, ItemTargeting};
use crate::event::{BattleEvent, NoEffectCause};
use crate::state::{CombatantId, ItemId};

/// Uses one unit of a stash item. Once validation passes the unit is spent,
/// even when the effect turns out to change nothing.
pub(crate) fn use_item(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
    item_id: &ItemId,
    target: CombatantId,
) -> Result<Vec<BattleEvent>, ActionError> {
    let user = live_actor(ctx.roster, actor)?;
    let out_of_stock = || ActionError::InsufficientResource {
        actor,
        shortfall: Shortfall::Item {
            item: item_id.clone(),
        },
    };
    let item = ctx.env.item(item_id).map_err(|_| out_of_stock())?;
    if ctx.stash.quantity(item_id) == 0 {
        return Err(out_of_stock());
    }

    let recipient = live_target(ctx.roster, actor, target)?;
    let reason = match item.targeting {
        ItemTargeting::SelfOnly if target != actor => Some(TargetRejection::NotSelf),
        ItemTargeting::Ally if recipient.side() != user.side() => Some(TargetRejection::WrongSide),
        ItemTargeting::Enemy if recipient.side() == user.side() => Some(TargetRejection::WrongSide),
        _ => None,
    };
    if let Some(reason) = reason {
        return Err(ActionError::InvalidTarget {
            actor,
            target,
            reason,
        });
    }

    ctx.stash.take_one(item_id);
    let mut events = vec![BattleEvent::ItemUsed {
        user: actor,
        target,
        item: item.id.clone(),
    }];
    let Some(recipient) = ctx.roster.get_mut(target) else {
        return Ok(events);
    };
    match item.effect {
        ItemEffect::Restore { hp, mp } => {
            let restored = recipient.restore(hp, mp);
            events.push(if restored.had_effect() {
                BattleEvent::ResourcesRestored {
                    target,
                    hp: restored.hp,
                    mp: restored.mp,
                }
            } else {
                BattleEvent::NoEffect {
                    target,
                    cause: NoEffectCause::AlreadyFull,
                }
            });
        }
        ItemEffect::Debuff { kind, magnitude } => {
            let expires_at = ctx.round + ctx.config.debuff_duration_rounds;
            events.push(if recipient.apply_debuff(kind, magnitude, expires_at) {
                BattleEvent::DebuffApplied {
                    target,
                    kind,
                    magnitude,
                    expires_at,
                }
            } else {
                BattleEvent::NoEffect {
                    target,
                    cause: NoEffectCause::DebuffActive(kind),
                }
            });
        }
    }
    Ok(events)
}

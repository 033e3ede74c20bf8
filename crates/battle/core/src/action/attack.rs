use crate::action::strike::strike;
use crate::action::targeting::{live_actor, live_target_on};
use crate::action::{ActionError, ResolveContext};
use crate::event::BattleEvent;
use crate::state::CombatantId;

/// Basic attack with zero bonus power against one live opponent.
pub(crate) fn basic_attack(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
    target: CombatantId,
) -> Result<Vec<BattleEvent>, ActionError> {
    let opposing = live_actor(ctx.roster, actor)?.side().opponent();
    live_target_on(ctx.roster, actor, target, opposing)?;

    let mut events = vec![BattleEvent::AttackPerformed {
        attacker: actor,
        target,
    }];
    strike(ctx.roster, ctx.config, actor, target, 0, &mut events);
    Ok(events)
}

use crate::action::targeting::live_actor;
use crate::action::{ActionError, ActorRejection, FleeOutcome, Resolution, ResolveContext};
use crate::event::BattleEvent;
use crate::state::{CombatantId, Side};

/// Rolls a percentile against the configured flee chance.
pub(crate) fn attempt_flee(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
) -> Result<Resolution, ActionError> {
    if live_actor(ctx.roster, actor)?.side() != Side::Ally {
        return Err(ActionError::InvalidActor {
            actor,
            reason: ActorRejection::ActionUnavailable,
        });
    }

    let chance = ctx.config.flee_chance_percent;
    let roll = ctx.rng.roll_percent();
    let success = roll <= chance;
    Ok(Resolution {
        events: vec![BattleEvent::FleeAttempted {
            actor,
            roll,
            chance,
            success,
        }],
        flee: Some(if success {
            FleeOutcome::Escaped
        } else {
            FleeOutcome::Failed
        }),
    })
}

//! The damage pipeline shared by basic attacks and damage skills.

use crate::combat::damage::saturating_power;
use crate::combat::{apply_guard, compute_damage};
use crate::config::BattleConfig;
use crate::event::BattleEvent;
use crate::state::{CombatantId, Roster, Side};

/// Applies one hit of `power` from `source` to `target`.
///
/// Guard absorbs first and is always consumed by the hit. Positive damage
/// then updates threat: an ally hitting an enemy raises mutual threat, an
/// enemy hitting an ally remembers that ally as its last target.
pub(crate) fn strike(
    roster: &mut Roster,
    config: &BattleConfig,
    source: CombatantId,
    target: CombatantId,
    power: u32,
    events: &mut Vec<BattleEvent>,
) {
    let Some((attack, source_side, source_base)) = roster.get(source).map(|c| {
        (
            c.effective_attack(),
            c.side(),
            config.base_threat(c.stats.max_hp, c.stats.defense),
        )
    }) else {
        return;
    };
    let Some(defender) = roster.get_mut(target) else {
        return;
    };

    let raw = compute_damage(attack, saturating_power(power), defender.effective_defense()) as u32;
    let guarded = apply_guard(raw, defender.guard);
    defender.guard = 0;
    let report = defender.apply_damage(guarded.damage);
    let target_side = defender.side();
    let target_base = config.base_threat(defender.stats.max_hp, defender.stats.defense);

    events.push(BattleEvent::DamageDealt {
        source,
        target,
        amount: guarded.damage,
        absorbed: guarded.absorbed(raw),
        residual_guard: guarded.residual_guard,
        remaining_hp: report.remaining_hp,
    });
    if report.defeated_now {
        events.push(BattleEvent::CombatantDefeated { combatant: target });
    }

    if guarded.damage == 0 {
        return;
    }
    match (source_side, target_side) {
        (Side::Ally, Side::Enemy) => {
            let bump = guarded.damage.saturating_add(config.aggro_hit_bonus);
            if let Some(enemy) = roster.get_mut(target) {
                enemy.add_threat(source, bump, source_base);
            }
            if let Some(ally) = roster.get_mut(source) {
                ally.add_threat(target, bump, target_base);
            }
        }
        (Side::Enemy, Side::Ally) => {
            if let Some(enemy) = roster.get_mut(source) {
                enemy.last_target = Some(target);
            }
        }
        _ => {}
    }
}

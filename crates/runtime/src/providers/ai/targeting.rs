//! Deterministic target ranking shared by the enemy and ally AI.
//!
//! Every choice here is a pure function of the roster and the chooser's
//! threat table. The RNG is never consulted.

use battle_core::{BattleConfig, Combatant, CombatantId, Roster};

/// Live opponents of `chooser` with the threat it holds toward each, highest
/// threat first, ties broken by ascending id.
pub fn threat_ranking(roster: &Roster, chooser: &Combatant) -> Vec<(CombatantId, u32)> {
    let mut ranked: Vec<(CombatantId, u32)> = roster
        .live(chooser.side().opponent())
        .map(|opponent| (opponent.id, chooser.threat_toward(opponent.id)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Up to `count` opponents in threat order.
pub fn top_targets(roster: &Roster, chooser: &Combatant, count: usize) -> Vec<CombatantId> {
    threat_ranking(roster, chooser)
        .into_iter()
        .take(count)
        .map(|(id, _)| id)
        .collect()
}

/// Single target for an enemy, with the anti-repeat rule.
///
/// The previous target's threat is scaled by `anti_repeat_percent` so the
/// enemy tends to spread its attacks. The penalty is skipped when the previous
/// target is the only live ally, or when it alone leads the runner-up by at
/// least `anti_repeat_ignore_gap`.
pub fn enemy_single_target(
    roster: &Roster,
    enemy: &Combatant,
    config: &BattleConfig,
) -> Option<CombatantId> {
    let ranked = threat_ranking(roster, enemy);
    if ranked.len() <= 1 {
        return ranked.first().map(|(id, _)| *id);
    }

    let penalized = enemy
        .last_target
        .filter(|last| ranked.iter().any(|(id, _)| id == last))
        .filter(|&last| !clear_leader(&ranked, last, config.anti_repeat_ignore_gap));

    ranked
        .iter()
        .map(|&(id, threat)| {
            let effective = if Some(id) == penalized {
                (threat as u64 * config.anti_repeat_percent as u64 / 100) as u32
            } else {
                threat
            };
            (id, effective)
        })
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(id, _)| id)
}

/// True when `last` is the unique top of `ranked` by at least `gap`.
fn clear_leader(ranked: &[(CombatantId, u32)], last: CombatantId, gap: u32) -> bool {
    match ranked {
        [(top, top_threat), (_, second), ..] => {
            *top == last && top_threat > second && top_threat - second >= gap
        }
        _ => false,
    }
}

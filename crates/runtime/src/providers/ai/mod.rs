//! Built-in AI providers.
//!
//! Both providers are deterministic: they read the battle state and threat
//! tables and never draw from the RNG, so replays only depend on the seed and
//! the player's inputs.

mod ally;
mod enemy;
pub mod targeting;

pub use ally::AllyAiProvider;
pub use enemy::EnemyAiProvider;

use battle_core::{BattleConfig, CombatantId, Roster, Side};

/// Target for the basic attack used when a provider's proposal is rejected.
pub fn fallback_target(
    roster: &Roster,
    actor: CombatantId,
    config: &BattleConfig,
) -> Option<CombatantId> {
    let combatant = roster.get(actor).filter(|c| c.is_alive())?;
    match combatant.side() {
        Side::Enemy => targeting::enemy_single_target(roster, combatant, config),
        Side::Ally => targeting::top_targets(roster, combatant, 1).into_iter().next(),
    }
}

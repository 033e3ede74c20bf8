//! Abstraction for sourcing AI and scripted intent.
//!
//! The controller asks an [`ActionProvider`] whenever a non-player combatant
//! holds the turn. Player-controlled combatants are never routed through a
//! provider; their input arrives through `BattleController::submit`.
use battle_core::{ActionInput, BattleConfig, BattleEnv, BattleState, CombatantId};

use super::errors::ProviderError;

/// Trait for choosing an action for the combatant holding the turn.
///
/// Implementations must be deterministic: the same state yields the same
/// input, and the RNG is never touched.
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` based on the current battle state.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when no action can be produced.
    fn provide_action(
        &self,
        actor: CombatantId,
        state: &BattleState,
        env: BattleEnv<'_>,
        config: &BattleConfig,
    ) -> Result<ActionInput, ProviderError>;
}

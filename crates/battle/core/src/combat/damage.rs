//! Damage and guard resolution.

use crate::state::Combatant;

// ============================================================================
// Damage Calculation
// ============================================================================

/// Damage dealt by one hit before guard.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack + power - defense)
/// ```
///
/// `attack` and `defense` are effective values (debuffs already folded in).
/// Basic attacks use a power of 0.
pub fn compute_damage(attack: i32, power: i32, defense: i32) -> i32 {
    let raw = attack as i64 + power as i64 - defense as i64;
    raw.clamp(1, i32::MAX as i64) as i32
}

// ============================================================================
// Guard
// ============================================================================

/// Result of a hit meeting a guard buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardOutcome {
    /// Damage that reaches HP.
    pub damage: u32,
    /// Guard left over after absorbing the hit.
    pub residual_guard: u32,
}

impl GuardOutcome {
    /// Damage soaked by the guard.
    pub fn absorbed(&self, incoming: u32) -> u32 {
        incoming - self.damage
    }
}

/// Runs `damage` through a guard buffer.
///
/// The combatant's guard is cleared after the hit no matter what remains; the
/// residual is informational.
pub fn apply_guard(damage: u32, guard: u32) -> GuardOutcome {
    GuardOutcome {
        damage: damage.saturating_sub(guard),
        residual_guard: guard.saturating_sub(damage),
    }
}

/// Damage `attacker` would deal to `target` with `power`, without guard and
/// without mutating either combatant.
pub fn estimate_damage(attacker: &Combatant, target: &Combatant, power: u32) -> u32 {
    compute_damage(
        attacker.effective_attack(),
        saturating_power(power),
        target.effective_defense(),
    ) as u32
}

/// Content power as a signed operand, saturating at `i32::MAX`.
pub(crate) fn saturating_power(power: u32) -> i32 {
    i32::try_from(power).unwrap_or(i32::MAX)
}

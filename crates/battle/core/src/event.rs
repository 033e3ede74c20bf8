//! Battle events.
//!
//! Events are the only channel through which state changes become observable.
//! They are emitted in order, never mutated afterwards, and carry ids rather
//! than display text; a renderer resolves names through the roster entries of
//! [`BattleEvent::BattleStarted`] or a battle view.

use crate::action::RejectionKind;
use crate::engine::BattleOutcome;
use crate::state::{CombatantId, DebuffKind, ItemId, Round, Side, SkillId};

/// Identity of one combatant as announced at battle start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
}

/// Why an action or item produced no change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoEffectCause {
    /// HP/MP already at maximum.
    AlreadyFull,
    /// A debuff of this kind is already active.
    DebuffActive(DebuffKind),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted {
        roster: Vec<RosterEntry>,
    },
    RoundStarted {
        round: Round,
    },
    TieBreakRolled {
        combatant: CombatantId,
        speed: i32,
        roll: u32,
    },
    InitiativeSet {
        order: Vec<CombatantId>,
    },
    TurnStarted {
        round: Round,
        actor: CombatantId,
    },
    AttackPerformed {
        attacker: CombatantId,
        target: CombatantId,
    },
    SkillUsed {
        caster: CombatantId,
        skill: SkillId,
        targets: Vec<CombatantId>,
        mp_spent: u32,
    },
    DamageDealt {
        source: CombatantId,
        target: CombatantId,
        amount: u32,
        /// Damage soaked by the target's guard.
        absorbed: u32,
        /// Guard that would have remained; the buffer itself is cleared.
        residual_guard: u32,
        remaining_hp: u32,
    },
    GuardApplied {
        combatant: CombatantId,
        amount: u32,
    },
    CombatantDefeated {
        combatant: CombatantId,
    },
    ItemUsed {
        user: CombatantId,
        target: CombatantId,
        item: ItemId,
    },
    ResourcesRestored {
        target: CombatantId,
        hp: u32,
        mp: u32,
    },
    DebuffApplied {
        target: CombatantId,
        kind: DebuffKind,
        magnitude: u32,
        expires_at: Round,
    },
    DebuffExpired {
        target: CombatantId,
        kind: DebuffKind,
    },
    NoEffect {
        target: CombatantId,
        cause: NoEffectCause,
    },
    KnowledgeRevealed {
        speaker: CombatantId,
        text: String,
    },
    FleeAttempted {
        actor: CombatantId,
        roll: u32,
        chance: u32,
        success: bool,
    },
    /// Advisory emitted alongside a rejected action so a presenter can re-prompt.
    ActionRejected {
        actor: CombatantId,
        kind: RejectionKind,
    },
    GoldAwarded {
        amount: u64,
        total: u64,
    },
    ExperienceAwarded {
        member: CombatantId,
        amount: u32,
        level: u32,
    },
    LeveledUp {
        member: CombatantId,
        level: u32,
        max_hp: u32,
        max_mp: u32,
    },
    LootDropped {
        enemy: CombatantId,
        item: ItemId,
        quantity: u32,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// True for events that end the battle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::BattleEnded { .. })
    }
}

/// Computes a digest over an event log for replay comparison.
///
/// # Design
///
/// - Uses bincode for deterministic serialization
/// - SHA-256 over the events in emission order; order matters
///
/// Requires the `serde` feature.
#[cfg(feature = "serde")]
pub fn compute_log_digest(events: &[BattleEvent]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for event in events {
        if let Ok(bytes) = bincode::serialize(event) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}

//! Timed stat debuffs.
//!
//! # Round-based Duration
//!
//! A debuff stores the round at which it expires. Expiry is evaluated once at
//! the start of every round and removes entries whose `expires_at <= round`.
//! Reapplying an active kind never refreshes or extends it.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::Round;

/// Stat affected by a debuff.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffKind {
    AttackDown,
    DefenseDown,
}

/// A single active debuff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveDebuff {
    pub kind: DebuffKind,
    pub magnitude: u32,
    /// Round at whose start this debuff is removed.
    pub expires_at: Round,
}

/// Active debuffs on a combatant; at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuffs {
    entries: ArrayVec<ActiveDebuff, { BattleConfig::MAX_DEBUFFS }>,
}

impl Debuffs {
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: DebuffKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    pub fn get(&self, kind: DebuffKind) -> Option<&ActiveDebuff> {
        self.entries.iter().find(|d| d.kind == kind)
    }

    /// Sum of magnitudes for a kind.
    pub fn penalty(&self, kind: DebuffKind) -> u32 {
        self.entries
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.magnitude)
            .sum()
    }

    /// Adds a debuff unless one of the same kind is already active.
    ///
    /// Returns `true` when the debuff was applied.
    pub fn apply(&mut self, kind: DebuffKind, magnitude: u32, expires_at: Round) -> bool {
        if self.has(kind) || self.entries.is_full() {
            return false;
        }
        self.entries.push(ActiveDebuff {
            kind,
            magnitude,
            expires_at,
        });
        true
    }

    /// Removes debuffs whose expiry round has arrived and returns their kinds
    /// in application order.
    pub fn remove_expired(&mut self, round: Round) -> Vec<DebuffKind> {
        let expired = self
            .entries
            .iter()
            .filter(|d| d.expires_at <= round)
            .map(|d| d.kind)
            .collect();
        self.entries.retain(|d| d.expires_at > round);
        expired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveDebuff> {
        self.entries.iter()
    }

    pub fn kinds(&self) -> Vec<DebuffKind> {
        self.entries.iter().map(|d| d.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

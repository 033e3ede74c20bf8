//! Runtime record of one battle participant.

use std::collections::BTreeMap;

use crate::state::{CombatantId, DebuffKind, Debuffs, Round, SkillId, StatBlock, TagSet};

/// Which half of the battlefield a combatant fights for.
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
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

/// Party role of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// The player's own character; its defeat ends the battle.
    Primary,
    /// Recruited party member. Shares experience.
    Companion,
    /// Battle-only ally created for this encounter. Never receives rewards.
    Summon { owner: CombatantId },
    Enemy,
}

impl Role {
    pub fn side(self) -> Side {
        match self {
            Self::Enemy => Side::Enemy,
            Self::Primary | Self::Companion | Self::Summon { .. } => Side::Ally,
        }
    }

    /// Whether this combatant takes a share of victory experience.
    pub fn shares_experience(self) -> bool {
        matches!(self, Self::Primary | Self::Companion)
    }
}

/// Who chooses this combatant's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    Player,
    #[default]
    Ai,
}

/// Fixed gold and experience an enemy is worth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounty {
    pub gold: u32,
    pub exp: u32,
}

/// Result of [`Combatant::apply_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    /// HP actually removed.
    pub dealt: u32,
    pub remaining_hp: u32,
    /// True only on the hit that brought HP to zero.
    pub defeated_now: bool,
}

/// HP/MP actually restored by [`Combatant::restore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restored {
    pub hp: u32,
    pub mp: u32,
}

impl Restored {
    pub fn had_effect(&self) -> bool {
        self.hp > 0 || self.mp > 0
    }
}

/// A participant in one battle instance.
///
/// Created fresh at battle start and mutated only by the action resolver and
/// the reward engine. Defeated combatants stay in the roster for bookkeeping
/// but are skipped for turns and targeting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    /// Definition key the combatant was built from (class, member, or enemy id).
    pub source_id: String,
    pub role: Role,
    pub control: Control,
    pub stats: StatBlock,
    pub hp: u32,
    pub mp: u32,
    /// Damage absorbed by the next incoming hit.
    pub guard: u32,
    pub debuffs: Debuffs,
    /// Declared skill list. Only enemies use it; allies qualify by weapon tags.
    pub skills: Vec<SkillId>,
    pub skill_uses: BTreeMap<SkillId, u32>,
    /// Threat this combatant holds toward each opponent.
    pub threat: BTreeMap<CombatantId, u32>,
    /// Last ally an enemy damaged; feeds the anti-repeat rule.
    pub last_target: Option<CombatantId>,
    pub tags: TagSet,
    pub weapon_tags: TagSet,
    pub bounty: Bounty,
    defeated: bool,
}

impl Combatant {
    /// Creates a combatant at full HP/MP.
    pub fn new(id: CombatantId, name: impl Into<String>, role: Role, stats: StatBlock) -> Self {
        Self {
            id,
            name: name.into(),
            source_id: String::new(),
            role,
            control: Control::Ai,
            stats,
            hp: stats.max_hp,
            mp: stats.max_mp,
            guard: 0,
            debuffs: Debuffs::empty(),
            skills: Vec::new(),
            skill_uses: BTreeMap::new(),
            threat: BTreeMap::new(),
            last_target: None,
            tags: TagSet::new(),
            weapon_tags: TagSet::new(),
            bounty: Bounty::default(),
            defeated: stats.max_hp == 0,
        }
    }

    /// Overrides current HP/MP, clamped to the maxima.
    #[must_use]
    pub fn with_resources(mut self, hp: u32, mp: u32) -> Self {
        self.hp = hp.min(self.stats.max_hp);
        self.mp = mp.min(self.stats.max_mp);
        self.defeated = self.hp == 0;
        self
    }

    pub fn side(&self) -> Side {
        self.role.side()
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.role, Role::Primary)
    }

    pub fn is_player_controlled(&self) -> bool {
        self.control == Control::Player
    }

    /// Removes HP, clamping at zero. Defeat is reported exactly once and
    /// clears the guard and all debuffs.
    pub fn apply_damage(&mut self, amount: u32) -> DamageReport {
        if self.defeated {
            return DamageReport {
                dealt: 0,
                remaining_hp: 0,
                defeated_now: false,
            };
        }
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        let defeated_now = self.hp == 0;
        if defeated_now {
            self.defeated = true;
            self.guard = 0;
            self.debuffs.clear();
        }
        DamageReport {
            dealt,
            remaining_hp: self.hp,
            defeated_now,
        }
    }

    /// Sets HP and MP to their maxima.
    pub fn restore_to_full(&mut self) {
        self.hp = self.stats.max_hp;
        self.mp = self.stats.max_mp;
        self.defeated = self.hp == 0;
    }

    /// Adds HP/MP up to the maxima and reports the amounts actually gained.
    pub fn restore(&mut self, hp: u32, mp: u32) -> Restored {
        if self.defeated {
            return Restored::default();
        }
        let hp_before = self.hp;
        let mp_before = self.mp;
        self.hp = self.hp.saturating_add(hp).min(self.stats.max_hp);
        self.mp = self.mp.saturating_add(mp).min(self.stats.max_mp);
        Restored {
            hp: self.hp - hp_before,
            mp: self.mp - mp_before,
        }
    }

    /// Puts HP/MP back to a recorded pair and drops battle-only effects.
    pub fn reset_resources(&mut self, hp: u32, mp: u32) {
        self.hp = hp.min(self.stats.max_hp);
        self.mp = mp.min(self.stats.max_mp);
        self.defeated = self.hp == 0;
        self.guard = 0;
        self.debuffs.clear();
    }

    pub fn spend_mp(&mut self, amount: u32) -> bool {
        if self.mp < amount {
            return false;
        }
        self.mp -= amount;
        true
    }

    /// Returns `false` (no effect) when a debuff of this kind is already active.
    pub fn apply_debuff(&mut self, kind: DebuffKind, magnitude: u32, expires_at: Round) -> bool {
        if self.defeated {
            return false;
        }
        self.debuffs.apply(kind, magnitude, expires_at)
    }

    /// Drops debuffs whose expiry round has arrived. Defeated combatants
    /// report nothing.
    pub fn tick_expiry(&mut self, round: Round) -> Vec<DebuffKind> {
        let expired = self.debuffs.remove_expired(round);
        if self.defeated { Vec::new() } else { expired }
    }

    pub fn effective_attack(&self) -> i32 {
        let penalty = self.debuffs.penalty(DebuffKind::AttackDown) as i64;
        (self.stats.attack as i64 - penalty).max(1) as i32
    }

    pub fn effective_defense(&self) -> i32 {
        let penalty = self.debuffs.penalty(DebuffKind::DefenseDown) as i64;
        (self.stats.defense as i64 - penalty).max(0) as i32
    }

    pub fn effective_speed(&self) -> i32 {
        self.stats.speed
    }

    pub fn uses_of(&self, skill: &SkillId) -> u32 {
        self.skill_uses.get(skill).copied().unwrap_or(0)
    }

    pub fn record_skill_use(&mut self, skill: &SkillId) {
        *self.skill_uses.entry(skill.clone()).or_insert(0) += 1;
    }

    pub fn threat_toward(&self, opponent: CombatantId) -> u32 {
        self.threat.get(&opponent).copied().unwrap_or(0)
    }

    pub fn add_threat(&mut self, opponent: CombatantId, amount: u32, base: u32) {
        let entry = self.threat.entry(opponent).or_insert(base);
        *entry = entry.saturating_add(amount);
    }

    /// Raises max HP/MP (level growth).
    pub fn grow(&mut self, hp: u32, mp: u32) {
        self.stats.max_hp = self.stats.max_hp.saturating_add(hp);
        self.stats.max_mp = self.stats.max_mp.saturating_add(mp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Fighter",
            Role::Companion,
            StatBlock::new(30, 10, 8, 4, 5),
        )
    }

    #[test]
    fn damage_clamps_and_reports_defeat_once() {
        let mut c = fighter();
        let first = c.apply_damage(25);
        assert_eq!(first.dealt, 25);
        assert!(!first.defeated_now);

        let second = c.apply_damage(99);
        assert_eq!(second.dealt, 5);
        assert_eq!(second.remaining_hp, 0);
        assert!(second.defeated_now);
        assert!(!c.is_alive());

        let third = c.apply_damage(10);
        assert_eq!(third.dealt, 0);
        assert!(!third.defeated_now);
    }

    #[test]
    fn restore_to_full_is_idempotent() {
        let mut c = fighter().with_resources(3, 1);
        c.restore_to_full();
        let after_first = (c.hp, c.mp);
        c.restore_to_full();
        assert_eq!((c.hp, c.mp), after_first);
        assert_eq!(after_first, (30, 10));
    }

    #[test]
    fn restore_reports_actual_gain() {
        let mut c = fighter().with_resources(25, 10);
        let restored = c.restore(20, 5);
        assert_eq!(restored, Restored { hp: 5, mp: 0 });
        assert!(!c.restore(20, 5).had_effect());
    }

    #[test]
    fn effective_stats_fold_debuffs_with_floors() {
        let mut c = fighter();
        c.apply_debuff(DebuffKind::AttackDown, 20, Round(3));
        c.apply_debuff(DebuffKind::DefenseDown, 2, Round(3));
        assert_eq!(c.effective_attack(), 1);
        assert_eq!(c.effective_defense(), 2);
    }

    #[test]
    fn expiry_is_suppressed_for_defeated() {
        let mut c = fighter();
        c.apply_debuff(DebuffKind::AttackDown, 2, Round(3));
        assert_eq!(c.tick_expiry(Round(3)), vec![DebuffKind::AttackDown]);

        let mut fallen = fighter();
        fallen.apply_debuff(DebuffKind::AttackDown, 2, Round(3));
        fallen.apply_damage(100);
        assert!(fallen.tick_expiry(Round(3)).is_empty());
    }
}

//! Combatant specifications supplied by the caller when a battle starts.

use crate::state::{Control, EnemyId, Role, SkillId, StatBlock, TagSet};

/// An ally entering battle with already-resolved stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllySpec {
    pub name: String,
    /// Stable key (class or party member id) used for progress and knowledge.
    pub source_id: String,
    pub role: Role,
    pub control: Control,
    pub stats: StatBlock,
    /// Current HP/MP carried in from outside the battle. `None` starts full.
    pub resources: Option<(u32, u32)>,
    pub tags: TagSet,
    pub weapon_tags: TagSet,
}

impl AllySpec {
    /// The player's own character, player-controlled.
    pub fn primary(name: impl Into<String>, source_id: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            source_id: source_id.into(),
            role: Role::Primary,
            control: Control::Player,
            stats,
            resources: None,
            tags: TagSet::new(),
            weapon_tags: TagSet::new(),
        }
    }

    /// A recruited companion, AI-controlled by default.
    pub fn companion(
        name: impl Into<String>,
        source_id: impl Into<String>,
        stats: StatBlock,
    ) -> Self {
        Self {
            role: Role::Companion,
            control: Control::Ai,
            ..Self::primary(name, source_id, stats)
        }
    }

    #[must_use]
    pub fn with_control(mut self, control: Control) -> Self {
        self.control = control;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, hp: u32, mp: u32) -> Self {
        self.resources = Some((hp, mp));
        self
    }

    #[must_use]
    pub fn with_weapon_tags(mut self, weapon_tags: TagSet) -> Self {
        self.weapon_tags = weapon_tags;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

/// Summoned ally bound to an owner. Stats come from the summon definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonSpec {
    pub name: String,
    pub source_id: String,
    /// Index into the request's ally list of the summoning ally.
    pub owner_index: usize,
    pub stats: StatBlock,
    pub weapon_tags: TagSet,
}

/// Enemies to spawn from one definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub enemy: EnemyId,
    pub quantity: u32,
    /// Replaces the definition's declared skill list for these instances.
    pub skills_override: Option<Vec<SkillId>>,
}

impl EnemySpec {
    pub fn new(enemy: impl Into<String>, quantity: u32) -> Self {
        Self {
            enemy: EnemyId::new(enemy),
            quantity,
            skills_override: None,
        }
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills_override = Some(skills);
        self
    }
}

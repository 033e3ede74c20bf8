use crate::state::{SkillId, TagSet};

pub trait SkillOracle: Send + Sync {
    /// All skill definitions in definition order.
    fn definitions(&self) -> &[SkillDefinition];

    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.definitions().iter().find(|def| &def.id == id)
    }
}

/// Who a skill is targeted at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    SingleEnemy,
    MultiEnemy { max_targets: u32 },
    SelfOnly,
}

impl TargetMode {
    /// Inclusive bounds on how many explicit targets the caller supplies.
    pub fn target_bounds(&self) -> (usize, usize) {
        match self {
            Self::SingleEnemy => (1, 1),
            Self::MultiEnemy { max_targets } => (1, (*max_targets).max(1) as usize),
            Self::SelfOnly => (0, 1),
        }
    }
}

/// What a skill does when resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Per-target damage using `power` as bonus attack.
    Damage,
    /// Sets the caster's guard buffer to `power`.
    Guard,
}

/// Restricts which side may learn a skill through weapon tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillAudience {
    #[default]
    Any,
    /// Only usable from an enemy's declared skill list.
    EnemyOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub required_weapon_tags: TagSet,
    pub target_mode: TargetMode,
    pub mp_cost: u32,
    pub power: u32,
    pub effect: SkillEffect,
    pub audience: SkillAudience,
    /// Per-battle limit for each enemy instance.
    pub max_uses: Option<u32>,
}

impl SkillDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_mode: TargetMode,
        effect: SkillEffect,
    ) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.into(),
            required_weapon_tags: TagSet::new(),
            target_mode,
            mp_cost: 0,
            power: 0,
            effect,
            audience: SkillAudience::Any,
            max_uses: None,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_required_tags(mut self, tags: TagSet) -> Self {
        self.required_weapon_tags = tags;
        self
    }

    #[must_use]
    pub fn enemy_only(mut self) -> Self {
        self.audience = SkillAudience::EnemyOnly;
        self
    }

    #[must_use]
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }
}

use crate::state::{DebuffKind, ItemId};

pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition>;
}

/// Which combatants an item may be used on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemTargeting {
    SelfOnly,
    Ally,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Heals HP and/or MP up to the target's maxima.
    Restore { hp: u32, mp: u32 },
    /// Applies a timed flat debuff.
    Debuff { kind: DebuffKind, magnitude: u32 },
}

/// A consumable usable in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub targeting: ItemTargeting,
    pub effect: ItemEffect,
}

impl ItemDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        targeting: ItemTargeting,
        effect: ItemEffect,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            targeting,
            effect,
        }
    }
}

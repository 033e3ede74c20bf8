use crate::state::{ItemId, TagSet};

pub trait LootOracle: Send + Sync {
    /// Loot tables in evaluation order.
    fn tables(&self) -> &[LootTable];
}

/// A drop table applied to defeated enemies whose tags match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub id: String,
    pub required_tags: TagSet,
    pub forbidden_tags: TagSet,
    pub drops: Vec<LootDrop>,
}

impl LootTable {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            required_tags: TagSet::new(),
            forbidden_tags: TagSet::new(),
            drops: Vec::new(),
        }
    }

    #[must_use]
    pub fn requiring(mut self, tags: TagSet) -> Self {
        self.required_tags = tags;
        self
    }

    #[must_use]
    pub fn forbidding(mut self, tags: TagSet) -> Self {
        self.forbidden_tags = tags;
        self
    }

    #[must_use]
    pub fn with_drop(mut self, drop: LootDrop) -> Self {
        self.drops.push(drop);
        self
    }

    /// Required tags all present and no forbidden tag present.
    pub fn matches(&self, enemy_tags: &TagSet) -> bool {
        self.required_tags.is_subset(enemy_tags) && self.forbidden_tags.is_disjoint(enemy_tags)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item: ItemId,
    /// Success when a d100 roll is at or below this value.
    pub chance_percent: u32,
    pub min_qty: u32,
    pub max_qty: u32,
}

impl LootDrop {
    pub fn new(item: impl Into<String>, chance_percent: u32, min_qty: u32, max_qty: u32) -> Self {
        Self {
            item: ItemId::new(item),
            chance_percent,
            min_qty,
            max_qty: max_qty.max(min_qty),
        }
    }
}

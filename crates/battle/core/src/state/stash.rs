//! Party-wide gold and consumable stock shared by items and rewards.

use std::collections::BTreeMap;

use crate::env::{ItemDefinition, ItemOracle};
use crate::state::ItemId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyStash {
    pub gold: u64,
    items: BTreeMap<ItemId, u32>,
}

impl PartyStash {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.add(ItemId::new(item), quantity);
        self
    }

    pub fn quantity(&self, item: &ItemId) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Removes one unit. Returns `false` when none are in stock.
    pub fn take_one(&mut self, item: &ItemId) -> bool {
        match self.items.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.items.remove(item);
                }
                true
            }
            _ => false,
        }
    }

    pub fn credit_gold(&mut self, amount: u64) -> u64 {
        self.gold = self.gold.saturating_add(amount);
        self.gold
    }

    /// Items in stock, by id.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.items.iter().map(|(id, qty)| (id, *qty))
    }

    /// Stocked items that have a battle definition, sorted by id.
    pub fn battle_items<'a>(
        &'a self,
        oracle: &'a dyn ItemOracle,
    ) -> Vec<(&'a ItemDefinition, u32)> {
        self.iter()
            .filter_map(|(id, qty)| oracle.item(id).map(|def| (def, qty)))
            .collect()
    }
}

use crate::env::{LootTable, RngSource};
use crate::reward::LootGrant;
use crate::state::{Combatant, PartyStash};

/// Rolls every matching table for each defeated enemy and stocks the results.
///
/// Roll order is enemy order, then table order, then drop order. A drop draws
/// a percentile first and a quantity only when it hits.
pub(crate) fn roll_loot<'c>(
    defeated: impl IntoIterator<Item = &'c Combatant>,
    tables: &[LootTable],
    rng: &mut dyn RngSource,
    stash: &mut PartyStash,
) -> Vec<LootGrant> {
    let mut grants = Vec::new();
    for enemy in defeated {
        for table in tables.iter().filter(|table| table.matches(&enemy.tags)) {
            for drop in &table.drops {
                if rng.roll_percent() > drop.chance_percent {
                    continue;
                }
                let quantity = rng.range(drop.min_qty, drop.max_qty);
                if quantity == 0 {
                    continue;
                }
                stash.add(drop.item.clone(), quantity);
                grants.push(LootGrant {
                    enemy: enemy.id,
                    item: drop.item.clone(),
                    quantity,
                });
            }
        }
    }
    grants
}

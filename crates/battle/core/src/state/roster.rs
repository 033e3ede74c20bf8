//! Arena of combatants for one battle.
//!
//! Storage is a `BTreeMap` keyed by [`CombatantId`], so iteration order is the
//! spawn order and identical on every platform. Ids are monotonically
//! increasing and never reused within a battle.

use std::collections::{BTreeMap, btree_map::Entry};

use crate::config::BattleConfig;
use crate::state::{Combatant, CombatantId, Side};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    combatants: BTreeMap<CombatantId, Combatant>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id and inserts the combatant built for it.
    pub fn spawn(&mut self, build: impl FnOnce(CombatantId) -> Combatant) -> CombatantId {
        let id = CombatantId(self.next_id);
        self.next_id += 1;
        let mut combatant = build(id);
        combatant.id = id;
        if let Entry::Vacant(slot) = self.combatants.entry(id) {
            slot.insert(combatant);
        }
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// All combatants in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.values_mut()
    }

    pub fn on_side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.iter().filter(move |c| c.side() == side)
    }

    /// Live combatants of one side in id order.
    pub fn live(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.on_side(side).filter(|c| c.is_alive())
    }

    pub fn is_live(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    pub fn primary(&self) -> Option<&Combatant> {
        self.iter().find(|c| c.is_primary())
    }

    pub fn side_defeated(&self, side: Side) -> bool {
        self.live(side).next().is_none()
    }

    /// Appends " (n)" to enemies sharing a display name, numbered by spawn order.
    pub fn disambiguate_enemy_names(&mut self) {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for enemy in self.on_side(Side::Enemy) {
            *counts.entry(enemy.name.clone()).or_insert(0) += 1;
        }
        let mut seen: BTreeMap<String, u32> = BTreeMap::new();
        for enemy in self.combatants.values_mut() {
            if enemy.side() != Side::Enemy {
                continue;
            }
            if counts.get(&enemy.name).copied().unwrap_or(0) <= 1 {
                continue;
            }
            let index = seen.entry(enemy.name.clone()).or_insert(0);
            *index += 1;
            enemy.name = format!("{} ({})", enemy.name, index);
        }
    }

    /// Gives every combatant a base threat entry toward each opponent.
    pub fn seed_threat(&mut self, config: &BattleConfig) {
        let seeds: Vec<(CombatantId, Side, u32)> = self
            .iter()
            .map(|c| {
                (
                    c.id,
                    c.side(),
                    config.base_threat(c.stats.max_hp, c.stats.defense),
                )
            })
            .collect();
        for combatant in self.combatants.values_mut() {
            let opposing = combatant.side().opponent();
            for &(id, side, base) in &seeds {
                if side == opposing {
                    combatant.threat.entry(id).or_insert(base);
                }
            }
        }
    }
}

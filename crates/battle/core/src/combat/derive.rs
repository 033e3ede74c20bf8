//! Stat derivation from attributes and equipment.
//!
//! Callers that keep characters as attributes plus gear use this to build the
//! [`StatBlock`] a battle consumes.

use crate::state::StatBlock;

/// Points each attribute is worth.
pub const VIT_HP_PER_POINT: u32 = 3;
pub const INT_MP_PER_POINT: u32 = 2;
pub const STR_ATTACK_PER_POINT: i32 = 1;
pub const DEX_SPEED_PER_POINT: i32 = 1;

/// Character attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub vitality: u32,
    pub intelligence: u32,
    pub dexterity: u32,
}

/// Equipped gear, reduced to the numbers that matter in battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    /// Attack of each equipped weapon in slot order.
    pub weapon_attacks: Vec<i32>,
    /// Defense of each equipped armour piece.
    pub armour_defenses: Vec<i32>,
}

/// Folds attributes and loadout into battle stats.
///
/// - The first weapon's attack replaces base attack; attack never drops below 1.
/// - Summed armour defense replaces base defense when positive.
/// - Attributes then add their per-point contributions.
pub fn derive_stats(base: StatBlock, attributes: Attributes, loadout: &Loadout) -> StatBlock {
    let attack = loadout
        .weapon_attacks
        .first()
        .copied()
        .unwrap_or(base.attack)
        .max(1);
    let armour: i32 = loadout.armour_defenses.iter().sum();
    let defense = if armour > 0 { armour } else { base.defense.max(0) };

    StatBlock {
        max_hp: base.max_hp + attributes.vitality * VIT_HP_PER_POINT,
        max_mp: base.max_mp + attributes.intelligence * INT_MP_PER_POINT,
        attack: attack + attributes.strength as i32 * STR_ATTACK_PER_POINT,
        defense,
        speed: base.speed + attributes.dexterity as i32 * DEX_SPEED_PER_POINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_replaces_attack_and_attributes_add() {
        let base = StatBlock::new(20, 5, 2, 1, 4);
        let attributes = Attributes {
            strength: 3,
            vitality: 2,
            intelligence: 1,
            dexterity: 2,
        };
        let loadout = Loadout {
            weapon_attacks: vec![7, 12],
            armour_defenses: vec![2, 3],
        };
        let stats = derive_stats(base, attributes, &loadout);
        assert_eq!(stats, StatBlock::new(26, 7, 10, 5, 6));
    }

    #[test]
    fn bare_handed_keeps_base_numbers() {
        let base = StatBlock::new(10, 0, 0, 2, 1);
        let stats = derive_stats(base, Attributes::default(), &Loadout::default());
        assert_eq!(stats, StatBlock::new(10, 0, 1, 2, 1));
    }
}

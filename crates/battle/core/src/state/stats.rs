/// Already-resolved combat numbers for one combatant.
///
/// Attack and defense are signed so that formulas behave correctly when a
/// defense outweighs an attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatBlock {
    pub fn new(max_hp: u32, max_mp: u32, attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            max_hp,
            max_mp,
            attack,
            defense,
            speed,
        }
    }
}

use strum::EnumCount;

use crate::state::DebuffKind;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Sides of the die rolled to break initiative ties.
    pub tie_break_die_sides: u32,
    /// Chance (1-100) that a flee attempt succeeds.
    pub flee_chance_percent: u32,
    /// Rounds a debuff stays active: applied in round `r`, it expires at the
    /// start of round `r + debuff_duration_rounds`.
    pub debuff_duration_rounds: u32,
    /// Divisor applied to `max_hp + defense` when seeding base threat.
    pub aggro_base_divisor: u32,
    /// Flat threat added on every damaging hit so small hits still register.
    pub aggro_hit_bonus: u32,
    /// Percentage of threat kept for an enemy's previous target.
    pub anti_repeat_percent: u32,
    /// Threat lead over the runner-up at which the repeat penalty is ignored.
    pub anti_repeat_ignore_gap: u32,
    pub exp_base: u32,
    pub exp_per_level: u32,
    /// Max HP gained per level-up.
    pub hp_per_level: u32,
    /// Max MP gained per level-up.
    pub mp_per_level: u32,
    /// Refill party MP after a won battle.
    pub restore_mp_after_victory: bool,
    /// Hide enemy HP/MP numbers in battle views.
    pub conceal_enemy_hp: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per debuff kind; debuffs never stack.
    pub const MAX_DEBUFFS: usize = DebuffKind::COUNT;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIE_BREAK_DIE_SIDES: u32 = 20;
    pub const DEFAULT_FLEE_CHANCE_PERCENT: u32 = 50;
    pub const DEFAULT_DEBUFF_DURATION_ROUNDS: u32 = 2;
    pub const DEFAULT_AGGRO_BASE_DIVISOR: u32 = 5;
    pub const DEFAULT_AGGRO_HIT_BONUS: u32 = 2;
    pub const DEFAULT_ANTI_REPEAT_PERCENT: u32 = 80;
    pub const DEFAULT_ANTI_REPEAT_IGNORE_GAP: u32 = 10;
    pub const DEFAULT_EXP_BASE: u32 = 10;
    pub const DEFAULT_EXP_PER_LEVEL: u32 = 5;
    pub const DEFAULT_HP_PER_LEVEL: u32 = 2;
    pub const DEFAULT_MP_PER_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            tie_break_die_sides: Self::DEFAULT_TIE_BREAK_DIE_SIDES,
            flee_chance_percent: Self::DEFAULT_FLEE_CHANCE_PERCENT,
            debuff_duration_rounds: Self::DEFAULT_DEBUFF_DURATION_ROUNDS,
            aggro_base_divisor: Self::DEFAULT_AGGRO_BASE_DIVISOR,
            aggro_hit_bonus: Self::DEFAULT_AGGRO_HIT_BONUS,
            anti_repeat_percent: Self::DEFAULT_ANTI_REPEAT_PERCENT,
            anti_repeat_ignore_gap: Self::DEFAULT_ANTI_REPEAT_IGNORE_GAP,
            exp_base: Self::DEFAULT_EXP_BASE,
            exp_per_level: Self::DEFAULT_EXP_PER_LEVEL,
            hp_per_level: Self::DEFAULT_HP_PER_LEVEL,
            mp_per_level: Self::DEFAULT_MP_PER_LEVEL,
            restore_mp_after_victory: true,
            conceal_enemy_hp: true,
        }
    }

    #[must_use]
    pub fn with_flee_chance(mut self, percent: u32) -> Self {
        self.flee_chance_percent = percent.min(100);
        self
    }

    #[must_use]
    pub fn with_debuff_duration(mut self, rounds: u32) -> Self {
        self.debuff_duration_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_level_growth(mut self, hp_per_level: u32, mp_per_level: u32) -> Self {
        self.hp_per_level = hp_per_level;
        self.mp_per_level = mp_per_level;
        self
    }

    #[must_use]
    pub fn with_restore_mp_after_victory(mut self, enabled: bool) -> Self {
        self.restore_mp_after_victory = enabled;
        self
    }

    #[must_use]
    pub fn with_conceal_enemy_hp(mut self, enabled: bool) -> Self {
        self.conceal_enemy_hp = enabled;
        self
    }

    /// Base threat a combatant starts with in every opponent's table.
    pub fn base_threat(&self, max_hp: u32, defense: i32) -> u32 {
        let divisor = self.aggro_base_divisor.max(1) as i64;
        let base = (max_hp as i64 + defense as i64) / divisor;
        base.max(1) as u32
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_threat_has_floor_of_one() {
        let config = BattleConfig::default();
        assert_eq!(config.base_threat(40, 5), 9);
        assert_eq!(config.base_threat(2, 0), 1);
        assert_eq!(config.base_threat(3, -10), 1);
    }

    #[test]
    fn flee_chance_is_capped() {
        let config = BattleConfig::new().with_flee_chance(250);
        assert_eq!(config.flee_chance_percent, 100);
    }
}

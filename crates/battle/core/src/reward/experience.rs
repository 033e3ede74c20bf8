use crate::config::BattleConfig;
use crate::state::{Combatant, MemberProgress};

/// Experience needed to advance from `level` to the next level.
pub fn experience_threshold(level: u32, config: &BattleConfig) -> u32 {
    config
        .exp_base
        .saturating_add(level.saturating_sub(1).saturating_mul(config.exp_per_level))
}

/// Adds `amount` to `progress`, returning every level reached in order.
///
/// Leftover experience carries into the next threshold, so one award may cross
/// several levels.
pub(crate) fn accumulate(
    progress: MemberProgress,
    amount: u32,
    config: &BattleConfig,
) -> (MemberProgress, Vec<u32>) {
    let mut level = progress.level.max(1);
    let mut exp = progress.exp.saturating_add(amount);
    let mut reached = Vec::new();
    loop {
        let threshold = experience_threshold(level, config).max(1);
        if exp < threshold {
            break;
        }
        exp -= threshold;
        level += 1;
        reached.push(level);
    }
    (MemberProgress { level, exp }, reached)
}

/// Raises a combatant's maxima by one level's growth.
pub(crate) fn grow_one_level(combatant: &mut Combatant, config: &BattleConfig) {
    combatant.grow(config.hp_per_level, config.mp_per_level);
}

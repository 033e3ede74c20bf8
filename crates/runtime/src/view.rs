//! Read-only battle snapshot for renderers.
//!
//! A [`BattleView`] is captured from the state on demand. It carries only
//! displayable fields and never exposes the threat tables or skill counters.
//! Enemy HP/MP are withheld when `BattleConfig::conceal_enemy_hp` is set.

use serde::{Deserialize, Serialize};

use battle_core::{
    BattleConfig, BattlePhase, BattleState, Combatant, CombatantId, DebuffKind, Round, Side,
};

/// A current/maximum resource pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    pub current: u32,
    pub max: u32,
}

impl Meter {
    pub fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    /// Fill ratio in percent, rounded down. An empty maximum reads as 0.
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            return 0;
        }
        (self.current as u64 * 100 / self.max as u64) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub alive: bool,
    /// `None` when concealed.
    pub hp: Option<Meter>,
    /// `None` when concealed.
    pub mp: Option<Meter>,
    pub debuffs: Vec<DebuffKind>,
    pub guarded: bool,
}

impl CombatantView {
    fn capture(combatant: &Combatant, conceal: bool) -> Self {
        let hidden = conceal && combatant.side() == Side::Enemy;
        let meter = |current, max| (!hidden).then(|| Meter::new(current, max));
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            side: combatant.side(),
            alive: combatant.is_alive(),
            hp: meter(combatant.hp, combatant.stats.max_hp),
            mp: meter(combatant.mp, combatant.stats.max_mp),
            debuffs: combatant.debuffs.kinds(),
            guarded: combatant.guard > 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleView {
    pub round: Round,
    pub phase: BattlePhase,
    pub current_actor: Option<CombatantId>,
    /// Every combatant in id order, defeated ones included.
    pub combatants: Vec<CombatantView>,
}

impl BattleView {
    pub fn capture(state: &BattleState, config: &BattleConfig) -> Self {
        Self {
            round: state.round(),
            phase: state.phase(),
            current_actor: state.current_actor(),
            combatants: state
                .roster
                .iter()
                .map(|c| CombatantView::capture(c, config.conceal_enemy_hp))
                .collect(),
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantView> {
        self.combatants.iter().find(|view| view.id == id)
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &CombatantView> {
        self.combatants.iter().filter(move |view| view.side == side)
    }
}

//! Round and turn bookkeeping: expiry ticks, initiative, cursor, volleys.

use std::collections::VecDeque;

use crate::config::BattleConfig;
use crate::engine::{BattleOutcome, BattlePhase, BattleState};
use crate::env::RngSource;
use crate::event::BattleEvent;
use crate::state::{CombatantId, Roster, Side};

impl BattleState {
    /// Opens the next round.
    ///
    /// Debuffs are ticked for every combatant in the previous round's order
    /// (spawn order before the first round), then initiative is rolled afresh
    /// and the cursor rewinds to the top.
    pub fn start_round(
        &mut self,
        rng: &mut dyn RngSource,
        config: &BattleConfig,
    ) -> Vec<BattleEvent> {
        self.round = self.round.next();
        self.phase = BattlePhase::RoundStart;
        let mut events = vec![BattleEvent::RoundStarted { round: self.round }];

        let tick_order: Vec<CombatantId> = if self.order.is_empty() {
            self.roster.iter().map(|c| c.id).collect()
        } else {
            self.order.clone()
        };
        for id in tick_order {
            if let Some(combatant) = self.roster.get_mut(id) {
                for kind in combatant.tick_expiry(self.round) {
                    events.push(BattleEvent::DebuffExpired { target: id, kind });
                }
            }
        }

        let (order, rolls) = roll_initiative(&self.roster, rng, config.tie_break_die_sides);
        events.extend(rolls);
        events.push(BattleEvent::InitiativeSet {
            order: order.clone(),
        });
        self.order = order;
        self.cursor = 0;
        self.volley = None;
        events
    }

    /// Moves the cursor past defeated combatants and returns whoever is next
    /// this round, or `None` when the round is exhausted.
    pub fn next_actor(&mut self) -> Option<CombatantId> {
        while let Some(&id) = self.order.get(self.cursor) {
            if self.roster.is_live(id) {
                return Some(id);
            }
            self.cursor += 1;
        }
        None
    }

    /// Marks the current initiative slot as done.
    pub fn finish_turn(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Terminal check, in priority order: primary down, enemies wiped, allies
    /// wiped.
    pub fn check_terminal(&self) -> Option<BattleOutcome> {
        if self.roster.primary().is_none_or(|primary| !primary.is_alive()) {
            return Some(BattleOutcome::Defeat);
        }
        if self.roster.side_defeated(Side::Enemy) {
            return Some(BattleOutcome::Victory);
        }
        if self.roster.side_defeated(Side::Ally) {
            return Some(BattleOutcome::Defeat);
        }
        None
    }

    /// Queues every live enemy, in the current initiative order, for one
    /// action each. Remaining ally turns this round are forfeited.
    pub(crate) fn begin_volley(&mut self) {
        let queue: VecDeque<CombatantId> = self
            .order
            .iter()
            .copied()
            .filter(|&id| {
                self.roster
                    .get(id)
                    .is_some_and(|c| c.is_alive() && c.side() == Side::Enemy)
            })
            .collect();
        self.cursor = self.order.len();
        self.volley = Some(queue);
    }

    /// Pops the next live volley member. Clears the volley once drained.
    pub(crate) fn next_volley_actor(&mut self) -> Option<CombatantId> {
        let queue = self.volley.as_mut()?;
        while let Some(id) = queue.pop_front() {
            if self.roster.is_live(id) {
                return Some(id);
            }
        }
        self.volley = None;
        None
    }

    pub fn in_volley(&self) -> bool {
        self.volley.is_some()
    }
}

/// Orders live combatants by effective speed, descending.
///
/// Each group of equal speed rolls one die per member in ascending id order;
/// the group is then ordered by roll (highest first), then id.
pub(crate) fn roll_initiative(
    roster: &Roster,
    rng: &mut dyn RngSource,
    die_sides: u32,
) -> (Vec<CombatantId>, Vec<BattleEvent>) {
    let mut by_speed: Vec<(i32, CombatantId)> = roster
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| (c.effective_speed(), c.id))
        .collect();
    by_speed.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut order = Vec::with_capacity(by_speed.len());
    let mut events = Vec::new();
    for group in by_speed.chunk_by(|a, b| a.0 == b.0) {
        if group.len() == 1 {
            order.push(group[0].1);
            continue;
        }
        let mut rolled: Vec<(u32, CombatantId)> = group
            .iter()
            .map(|&(speed, id)| {
                let roll = rng.roll_die(die_sides);
                events.push(BattleEvent::TieBreakRolled {
                    combatant: id,
                    speed,
                    roll,
                });
                (roll, id)
            })
            .collect();
        rolled.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        order.extend(rolled.into_iter().map(|(_, id)| id));
    }
    (order, events)
}

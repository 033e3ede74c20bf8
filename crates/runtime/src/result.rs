//! Final record handed back to the caller when a battle ends.

use serde::{Deserialize, Serialize};

use battle_core::{
    BattleEvent, BattleOutcome, BattleState, CombatantId, PartyProgress, RewardSummary, Role,
    Side, compute_log_digest,
};

/// End-of-battle resources of a persistent party member.
///
/// Summons are not listed; they only exist for the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyOutcome {
    pub id: CombatantId,
    pub source_id: String,
    pub hp: u32,
    pub mp: u32,
    pub max_hp: u32,
    pub max_mp: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// Every event emitted during the battle, in order.
    pub log: Vec<BattleEvent>,
    /// Present only after a victory.
    pub rewards: Option<RewardSummary>,
    pub allies: Vec<AllyOutcome>,
    pub progress: PartyProgress,
}

impl BattleResult {
    pub(crate) fn assemble(
        outcome: BattleOutcome,
        state: &BattleState,
        log: Vec<BattleEvent>,
    ) -> Self {
        let allies = state
            .roster
            .on_side(Side::Ally)
            .filter(|c| matches!(c.role, Role::Primary | Role::Companion))
            .map(|c| AllyOutcome {
                id: c.id,
                source_id: c.source_id.clone(),
                hp: c.hp,
                mp: c.mp,
                max_hp: c.stats.max_hp,
                max_mp: c.stats.max_mp,
            })
            .collect();
        Self {
            outcome,
            log,
            rewards: state.rewards().cloned(),
            allies,
            progress: state.progress().clone(),
        }
    }

    /// SHA-256 over the event log. Equal digests mean identical battles.
    pub fn digest(&self) -> [u8; 32] {
        compute_log_digest(&self.log)
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    pub fn ally(&self, source_id: &str) -> Option<&AllyOutcome> {
        self.allies.iter().find(|ally| ally.source_id == source_id)
    }
}

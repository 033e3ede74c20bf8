//! Provider that replays a fixed list of actions per combatant.
//!
//! Used for deterministic replays and for driving AI-controlled combatants
//! through exact scenarios in tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use battle_core::{ActionInput, BattleConfig, BattleEnv, BattleState, CombatantId};

use crate::api::{ActionProvider, ProviderError};

#[derive(Debug, Default)]
pub struct ScriptedProvider {
    scripts: Mutex<BTreeMap<CombatantId, VecDeque<ActionInput>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends actions to `actor`'s script.
    #[must_use]
    pub fn with_script(
        self,
        actor: CombatantId,
        actions: impl IntoIterator<Item = ActionInput>,
    ) -> Self {
        self.push(actor, actions);
        self
    }

    pub fn push(&self, actor: CombatantId, actions: impl IntoIterator<Item = ActionInput>) {
        let mut scripts = self.scripts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        scripts.entry(actor).or_default().extend(actions);
    }

    /// Actions still queued for `actor`.
    pub fn remaining(&self, actor: CombatantId) -> usize {
        let scripts = self.scripts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        scripts.get(&actor).map_or(0, VecDeque::len)
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(
        &self,
        actor: CombatantId,
        _state: &BattleState,
        _env: BattleEnv<'_>,
        _config: &BattleConfig,
    ) -> Result<ActionInput, ProviderError> {
        let mut scripts = self.scripts.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        scripts
            .get_mut(&actor)
            .and_then(VecDeque::pop_front)
            .ok_or(ProviderError::ScriptExhausted { actor })
    }
}

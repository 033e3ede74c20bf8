//! Provider registry for managing action providers.
//!
//! The [`ProviderRegistry`] maps combatants to providers.
//!
//! # Design
//!
//! - **Provider instances**: stored by `ProviderKind`, shared across combatants
//! - **Combatant bindings**: a combatant can be bound to a specific kind
//! - **Fallback chain**: binding, then the kind matching the combatant's side

use std::collections::BTreeMap;
use std::sync::Arc;

use battle_core::{Combatant, CombatantId, Side};

use super::{ActionProvider, ControllerError, ProviderKind, Result};
use crate::providers::{AllyAiProvider, EnemyAiProvider};

pub struct ProviderRegistry {
    providers: BTreeMap<ProviderKind, Arc<dyn ActionProvider>>,
    bindings: BTreeMap<CombatantId, ProviderKind>,
}

impl ProviderRegistry {
    /// An empty registry. Every automatic turn fails until providers are
    /// registered.
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
            bindings: BTreeMap::new(),
        }
    }

    /// Registry with the built-in enemy and ally AI.
    pub fn with_default_ai() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderKind::Enemy, EnemyAiProvider::new());
        registry.register(ProviderKind::Ally, AllyAiProvider::new());
        registry
    }

    /// Register a provider for a kind, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    /// Route one combatant to a specific provider kind.
    pub fn bind(&mut self, combatant: CombatantId, kind: ProviderKind) {
        self.bindings.insert(combatant, kind);
    }

    pub fn unbind(&mut self, combatant: CombatantId) -> Option<ProviderKind> {
        self.bindings.remove(&combatant)
    }

    pub fn kind_for(&self, combatant: &Combatant) -> ProviderKind {
        self.bindings
            .get(&combatant.id)
            .copied()
            .unwrap_or(match combatant.side() {
                Side::Enemy => ProviderKind::Enemy,
                Side::Ally => ProviderKind::Ally,
            })
    }

    /// Resolve the provider for a combatant.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::ProviderNotSet` if the resolved kind has no
    /// registered provider.
    pub fn provider_for(&self, combatant: &Combatant) -> Result<Arc<dyn ActionProvider>> {
        let kind = self.kind_for(combatant);
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(ControllerError::ProviderNotSet { kind })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_default_ai()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .field("bindings", &self.bindings)
            .finish()
    }
}

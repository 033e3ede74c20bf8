//! Traits describing read-only battle content and the RNG source.
//!
//! Oracles expose skill, item, enemy, loot, and knowledge definitions. The
//! [`BattleEnv`] aggregate bundles them so the engine can reach everything it
//! needs without coupling to a concrete content store.
mod catalog;
mod enemies;
mod error;
mod items;
mod knowledge;
mod loot;
mod rng;
mod skills;

pub use catalog::ContentCatalog;
pub use enemies::{EnemyDefinition, EnemyOracle};
pub use error::{DefinitionKind, OracleError};
pub use items::{ItemDefinition, ItemEffect, ItemOracle, ItemTargeting};
pub use knowledge::{KnowledgeEntry, KnowledgeOracle};
pub use loot::{LootDrop, LootOracle, LootTable};
pub use rng::{PcgRng, RngSnapshot, RngSource, compute_seed};
pub use skills::{SkillAudience, SkillDefinition, SkillEffect, SkillOracle, TargetMode};

use crate::state::{EnemyId, ItemId, SkillId};

/// Aggregates the read-only oracles a battle consults.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    skills: Option<&'a dyn SkillOracle>,
    items: Option<&'a dyn ItemOracle>,
    enemies: Option<&'a dyn EnemyOracle>,
    loot: Option<&'a dyn LootOracle>,
    knowledge: Option<&'a dyn KnowledgeOracle>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        skills: Option<&'a dyn SkillOracle>,
        items: Option<&'a dyn ItemOracle>,
        enemies: Option<&'a dyn EnemyOracle>,
        loot: Option<&'a dyn LootOracle>,
        knowledge: Option<&'a dyn KnowledgeOracle>,
    ) -> Self {
        Self {
            skills,
            items,
            enemies,
            loot,
            knowledge,
        }
    }

    pub fn with_all(
        skills: &'a dyn SkillOracle,
        items: &'a dyn ItemOracle,
        enemies: &'a dyn EnemyOracle,
        loot: &'a dyn LootOracle,
        knowledge: &'a dyn KnowledgeOracle,
    ) -> Self {
        Self::new(
            Some(skills),
            Some(items),
            Some(enemies),
            Some(loot),
            Some(knowledge),
        )
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None, None)
    }

    /// Returns the SkillOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a dyn SkillOracle, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the EnemyOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EnemiesNotAvailable` if no enemy oracle was provided.
    pub fn enemies(&self) -> Result<&'a dyn EnemyOracle, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the LootOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LootNotAvailable` if no loot oracle was provided.
    pub fn loot(&self) -> Result<&'a dyn LootOracle, OracleError> {
        self.loot.ok_or(OracleError::LootNotAvailable)
    }

    /// Returns the KnowledgeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::KnowledgeNotAvailable` if no knowledge oracle was provided.
    pub fn knowledge(&self) -> Result<&'a dyn KnowledgeOracle, OracleError> {
        self.knowledge.ok_or(OracleError::KnowledgeNotAvailable)
    }

    /// Looks up a skill definition.
    pub fn skill(&self, id: &SkillId) -> Result<&'a SkillDefinition, OracleError> {
        self.skills()?
            .skill(id)
            .ok_or_else(|| OracleError::DefinitionNotFound {
                kind: DefinitionKind::Skill,
                id: id.to_string(),
            })
    }

    /// Looks up an item definition.
    pub fn item(&self, id: &ItemId) -> Result<&'a ItemDefinition, OracleError> {
        self.items()?
            .item(id)
            .ok_or_else(|| OracleError::DefinitionNotFound {
                kind: DefinitionKind::Item,
                id: id.to_string(),
            })
    }

    /// Looks up an enemy definition.
    pub fn enemy(&self, id: &EnemyId) -> Result<&'a EnemyDefinition, OracleError> {
        self.enemies()?
            .enemy(id)
            .ok_or_else(|| OracleError::DefinitionNotFound {
                kind: DefinitionKind::Enemy,
                id: id.to_string(),
            })
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("skills", &self.skills.is_some())
            .field("items", &self.items.is_some())
            .field("enemies", &self.enemies.is_some())
            .field("loot", &self.loot.is_some())
            .field("knowledge", &self.knowledge.is_some())
            .finish()
    }
}

//! In-memory content implementing every oracle.
//!
//! Content is assumed already validated by whatever loaded it; the catalog
//! only stores definitions and preserves insertion order where order matters
//! (skills, loot tables, knowledge entries).

use std::collections::BTreeMap;

use super::{
    BattleEnv, EnemyDefinition, EnemyOracle, ItemDefinition, ItemOracle, KnowledgeEntry,
    KnowledgeOracle, LootOracle, LootTable, SkillDefinition, SkillOracle,
};
use crate::state::{EnemyId, ItemId};

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentCatalog {
    skills: Vec<SkillDefinition>,
    items: BTreeMap<ItemId, ItemDefinition>,
    enemies: BTreeMap<EnemyId, EnemyDefinition>,
    loot_tables: Vec<LootTable>,
    knowledge: BTreeMap<String, Vec<KnowledgeEntry>>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.skills.retain(|existing| existing.id != skill.id);
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyDefinition) -> Self {
        self.enemies.insert(enemy.id.clone(), enemy);
        self
    }

    #[must_use]
    pub fn with_loot_table(mut self, table: LootTable) -> Self {
        self.loot_tables.push(table);
        self
    }

    #[must_use]
    pub fn with_knowledge(mut self, speaker: impl Into<String>, entry: KnowledgeEntry) -> Self {
        self.knowledge.entry(speaker.into()).or_default().push(entry);
        self
    }

    /// Borrows the catalog as a complete [`BattleEnv`].
    pub fn as_env(&self) -> BattleEnv<'_> {
        BattleEnv::with_all(self, self, self, self, self)
    }
}

impl SkillOracle for ContentCatalog {
    fn definitions(&self) -> &[SkillDefinition] {
        &self.skills
    }
}

impl ItemOracle for ContentCatalog {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }
}

impl EnemyOracle for ContentCatalog {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }
}

impl LootOracle for ContentCatalog {
    fn tables(&self) -> &[LootTable] {
        &self.loot_tables
    }
}

impl KnowledgeOracle for ContentCatalog {
    fn entries(&self, speaker: &str) -> &[KnowledgeEntry] {
        self.knowledge.get(speaker).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{SkillEffect, TargetMode};
    use crate::state::SkillId;

    #[test]
    fn skill_redefinition_replaces_in_place_order() {
        let catalog = ContentCatalog::new()
            .with_skill(SkillDefinition::new("a", "A", TargetMode::SelfOnly, SkillEffect::Guard))
            .with_skill(SkillDefinition::new("b", "B", TargetMode::SingleEnemy, SkillEffect::Damage))
            .with_skill(
                SkillDefinition::new("a", "A2", TargetMode::SelfOnly, SkillEffect::Guard)
                    .with_power(4),
            );
        let ids: Vec<&str> = catalog.definitions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog.skill(&SkillId::from("a")).map(|s| s.power), Some(4));
    }

    #[test]
    fn unknown_speaker_knows_nothing() {
        assert!(ContentCatalog::new().entries("nobody").is_empty());
    }
}

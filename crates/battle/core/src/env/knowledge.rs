use crate::state::TagSet;

pub trait KnowledgeOracle: Send + Sync {
    /// Entries a party member knows, keyed by the member's source id.
    fn entries(&self, speaker: &str) -> &[KnowledgeEntry];
}

/// What a party member knows about enemies carrying any of `enemy_tags`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeEntry {
    pub enemy_tags: TagSet,
    /// Rough HP band the member remembers.
    pub hp_hint: Option<(u32, u32)>,
    pub speed_hint: Option<String>,
    pub behavior: Option<String>,
}

impl KnowledgeEntry {
    pub fn new(enemy_tags: TagSet) -> Self {
        Self {
            enemy_tags,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hp_hint(mut self, low: u32, high: u32) -> Self {
        self.hp_hint = Some((low.min(high), high.max(low)));
        self
    }

    #[must_use]
    pub fn with_speed_hint(mut self, hint: impl Into<String>) -> Self {
        self.speed_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }

    pub fn concerns(&self, tags: &TagSet) -> bool {
        !self.enemy_tags.is_disjoint(tags)
    }
}

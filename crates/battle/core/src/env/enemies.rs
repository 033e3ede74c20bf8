use crate::state::{EnemyId, SkillId, StatBlock, TagSet};

pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition>;
}

/// Template enemies are instantiated from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub stats: StatBlock,
    pub tags: TagSet,
    /// Skills in the order the AI considers them.
    pub skills: Vec<SkillId>,
    pub gold: u32,
    pub exp: u32,
}

impl EnemyDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            id: EnemyId::new(id),
            name: name.into(),
            stats,
            tags: TagSet::new(),
            skills: Vec::new(),
            gold: 0,
            exp: 0,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(SkillId::new).collect();
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, gold: u32, exp: u32) -> Self {
        self.gold = gold;
        self.exp = exp;
        self
    }
}

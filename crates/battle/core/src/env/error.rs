use crate::error::{BattleError, ErrorSeverity};

/// Errors raised when a required oracle or definition is unavailable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("skill oracle not available")]
    SkillsNotAvailable,

    #[error("item oracle not available")]
    ItemsNotAvailable,

    #[error("enemy oracle not available")]
    EnemiesNotAvailable,

    #[error("loot oracle not available")]
    LootNotAvailable,

    #[error("knowledge oracle not available")]
    KnowledgeNotAvailable,

    #[error("no {kind} definition for '{id}'")]
    DefinitionNotFound { kind: DefinitionKind, id: String },
}

/// Content category of a missing definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionKind {
    Skill,
    Item,
    Enemy,
}

impl BattleError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DefinitionNotFound { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            Self::ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            Self::EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            Self::LootNotAvailable => "ORACLE_LOOT_NOT_AVAILABLE",
            Self::KnowledgeNotAvailable => "ORACLE_KNOWLEDGE_NOT_AVAILABLE",
            Self::DefinitionNotFound { .. } => "ORACLE_DEFINITION_NOT_FOUND",
        }
    }
}

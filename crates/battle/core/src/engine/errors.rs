//! Errors raised while setting up or advancing a battle.

use crate::action::ActionError;
use crate::env::OracleError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

/// Reasons a [`BattleRequest`](super::BattleRequest) cannot start a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("battle request has no primary combatant")]
    MissingPrimary,

    #[error("battle request has more than one primary combatant")]
    MultiplePrimaries,

    #[error("ally '{name}' must be a primary or companion")]
    InvalidAllyRole { name: String },

    #[error("summon '{name}' refers to ally index {owner_index}, which does not exist")]
    UnknownSummonOwner { name: String, owner_index: usize },

    #[error("battle request has no enemies")]
    NoEnemies,

    #[error(transparent)]
    Content(#[from] OracleError),
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPrimary => "SETUP_MISSING_PRIMARY",
            Self::MultiplePrimaries => "SETUP_MULTIPLE_PRIMARIES",
            Self::InvalidAllyRole { .. } => "SETUP_INVALID_ALLY_ROLE",
            Self::UnknownSummonOwner { .. } => "SETUP_UNKNOWN_SUMMON_OWNER",
            Self::NoEnemies => "SETUP_NO_ENEMIES",
            Self::Content(error) => error.error_code(),
        }
    }
}

/// Errors surfaced while executing a turn through the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("battle has not started")]
    NotStarted,

    #[error("battle is already over")]
    BattleOver,

    #[error("actor {actor} is not the current actor (expected {current})")]
    ActorNotCurrent {
        actor: CombatantId,
        current: CombatantId,
    },

    #[error("action rejected: {0}")]
    Action(#[from] ActionError),
}

impl ExecuteError {
    /// The action error underneath, if the resolver rejected the input.
    pub fn as_action(&self) -> Option<&ActionError> {
        match self {
            Self::Action(error) => Some(error),
            _ => None,
        }
    }
}

impl BattleError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(error) => error.severity(),
            Self::NotStarted | Self::BattleOver | Self::ActorNotCurrent { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "EXECUTE_NOT_STARTED",
            Self::BattleOver => "EXECUTE_BATTLE_OVER",
            Self::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
            Self::Action(error) => error.error_code(),
        }
    }
}

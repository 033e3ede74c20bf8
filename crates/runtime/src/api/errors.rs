//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle setup, turn execution, and action providers so
//! callers can bubble them up with consistent context.
use std::fmt;

use battle_core::{
    ActionError, BattleError, BattleEvent, CombatantId, ErrorSeverity, ExecuteError, SetupError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ControllerError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("failed to set up battle")]
    Setup(#[source] SetupError),

    /// The submitted action was rejected; the turn is still outstanding.
    #[error("action rejected: {0}")]
    Action(#[source] ActionError),

    #[error("turn execution failed")]
    Execute(#[source] ExecuteError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("no player input is expected right now")]
    NotAwaitingInput,

    #[error("combatant {actor} is waiting for player input")]
    AwaitingInput { actor: CombatantId },

    #[error("battle is already over")]
    BattleOver,

    #[error("battle is still in progress")]
    BattleInProgress,
}

impl ControllerError {
    /// Advisory event for presenters when an action was rejected.
    pub fn advisory(&self) -> Option<BattleEvent> {
        match self {
            Self::Action(error) => Some(error.advisory()),
            _ => None,
        }
    }
}

impl From<SetupError> for ControllerError {
    fn from(error: SetupError) -> Self {
        Self::Setup(error)
    }
}

impl From<ExecuteError> for ControllerError {
    fn from(error: ExecuteError) -> Self {
        match error {
            ExecuteError::Action(action) => Self::Action(action),
            ExecuteError::BattleOver => Self::BattleOver,
            other => Self::Execute(other),
        }
    }
}

impl BattleError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(error) => error.severity(),
            Self::Action(error) => error.severity(),
            Self::Execute(error) => error.severity(),
            Self::Provider(_) | Self::ProviderNotSet { .. } => ErrorSeverity::Internal,
            Self::NotAwaitingInput
            | Self::AwaitingInput { .. }
            | Self::BattleOver
            | Self::BattleInProgress => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(error) => error.error_code(),
            Self::Action(error) => error.error_code(),
            Self::Execute(error) => error.error_code(),
            Self::Provider(_) => "CONTROLLER_PROVIDER_FAILED",
            Self::ProviderNotSet { .. } => "CONTROLLER_PROVIDER_NOT_SET",
            Self::NotAwaitingInput => "CONTROLLER_NOT_AWAITING_INPUT",
            Self::AwaitingInput { .. } => "CONTROLLER_AWAITING_INPUT",
            Self::BattleOver => "CONTROLLER_BATTLE_OVER",
            Self::BattleInProgress => "CONTROLLER_BATTLE_IN_PROGRESS",
        }
    }
}

/// Failures reported by an [`ActionProvider`](super::ActionProvider).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("combatant {0} is missing or defeated")]
    UnknownActor(CombatantId),

    #[error("no action available for {actor}")]
    NoAction { actor: CombatantId },

    #[error("script for {actor} has no actions left")]
    ScriptExhausted { actor: CombatantId },
}

/// Provider slots the registry can hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderKind {
    /// Decides for enemies.
    Enemy,
    /// Decides for AI-controlled allies and summons.
    Ally,
    /// Fixed action queues, used for replays and tests.
    Scripted,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Enemy => "enemy",
            ProviderKind::Ally => "ally",
            ProviderKind::Scripted => "scripted",
        };
        write!(f, "{}", label)
    }
}

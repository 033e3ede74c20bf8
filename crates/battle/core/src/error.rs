//! Shared error classification.
//!
//! Each failing operation owns its error enum next to the code that raises it
//! (`ActionError`, `SetupError`, `ExecuteError`, `OracleError`). Variants carry
//! ids and reason enums rather than prose, and all of them implement
//! [`BattleError`] so callers can branch on severity without matching every
//! variant.

/// How a caller should treat a failure.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Not enough MP, item out of stock. Another choice for the same turn may
    /// succeed.
    Recoverable,
    /// Unknown actor, wrong-side target, ineligible skill.
    Validation,
    /// A collaborator broke its contract (missing oracle, unknown definition).
    Internal,
    /// Battle state can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Whether a presenter should re-prompt the same actor.
    pub const fn allows_retry(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error battle-core returns.
///
/// Codes are stable SCREAMING_SNAKE identifiers such as
/// `ACTION_INVALID_TARGET`, suitable for logs and localisation keys.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

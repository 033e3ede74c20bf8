//! Action validation errors.
//!
//! Every failure is detected before any state is touched, so a rejected
//! action leaves the battle exactly as it was.

use std::fmt;

use crate::error::{BattleError, ErrorSeverity};
use crate::event::BattleEvent;
use crate::state::{CombatantId, ItemId, SkillId};

// ============================================================================
// Action Errors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("actor {actor} cannot act: {reason}")]
    InvalidActor {
        actor: CombatantId,
        reason: ActorRejection,
    },

    #[error("target {target} is not valid for {actor}: {reason}")]
    InvalidTarget {
        actor: CombatantId,
        target: CombatantId,
        reason: TargetRejection,
    },

    #[error("{actor} lacks {shortfall}")]
    InsufficientResource {
        actor: CombatantId,
        shortfall: Shortfall,
    },

    #[error("skill '{skill}' is not usable by {actor}: {reason}")]
    IneligibleSkill {
        actor: CombatantId,
        skill: SkillId,
        reason: SkillRejection,
    },

    #[error("skill '{skill}' takes {min}..={max} targets, got {provided}")]
    TargetCountMismatch {
        actor: CombatantId,
        skill: SkillId,
        min: usize,
        max: usize,
        provided: usize,
    },
}

/// Why the acting combatant was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRejection {
    Unknown,
    Defeated,
    /// The action kind is not open to this combatant (e.g. an enemy fleeing).
    ActionUnavailable,
}

/// Why a chosen target was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRejection {
    Unknown,
    Defeated,
    WrongSide,
    /// Self-only effect aimed at someone else.
    NotSelf,
    Duplicate,
}

/// Why a skill is not open to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillRejection {
    Unknown,
    MissingWeaponTags,
    EnemyOnly,
    NotInSkillList,
    UsageCapReached,
}

/// The resource the actor ran out of.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shortfall {
    Mp { needed: u32, available: u32 },
    Item { item: ItemId },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mp { needed, available } => {
                write!(f, "MP (needs {}, has {})", needed, available)
            }
            Self::Item { item } => write!(f, "item '{}' in stock", item),
        }
    }
}

/// Error category carried by the advisory [`BattleEvent::ActionRejected`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectionKind {
    InvalidActor,
    InvalidTarget,
    InsufficientResource,
    IneligibleSkill,
    TargetCountMismatch,
}

impl ActionError {
    pub fn actor(&self) -> CombatantId {
        match self {
            Self::InvalidActor { actor, .. }
            | Self::InvalidTarget { actor, .. }
            | Self::InsufficientResource { actor, .. }
            | Self::IneligibleSkill { actor, .. }
            | Self::TargetCountMismatch { actor, .. } => *actor,
        }
    }

    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::InvalidActor { .. } => RejectionKind::InvalidActor,
            Self::InvalidTarget { .. } => RejectionKind::InvalidTarget,
            Self::InsufficientResource { .. } => RejectionKind::InsufficientResource,
            Self::IneligibleSkill { .. } => RejectionKind::IneligibleSkill,
            Self::TargetCountMismatch { .. } => RejectionKind::TargetCountMismatch,
        }
    }

    /// Advisory event a presenter can show before re-prompting.
    pub fn advisory(&self) -> BattleEvent {
        BattleEvent::ActionRejected {
            actor: self.actor(),
            kind: self.kind(),
        }
    }
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. } => ErrorSeverity::Recoverable,
            Self::InvalidActor { .. }
            | Self::InvalidTarget { .. }
            | Self::IneligibleSkill { .. }
            | Self::TargetCountMismatch { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidActor { .. } => "ACTION_INVALID_ACTOR",
            Self::InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            Self::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Self::IneligibleSkill { .. } => "ACTION_INELIGIBLE_SKILL",
            Self::TargetCountMismatch { .. } => "ACTION_TARGET_COUNT_MISMATCH",
        }
    }
}

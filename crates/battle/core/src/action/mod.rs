//! Action validation and resolution.
//!
//! An action is one of five kinds chosen for the acting combatant. Resolution
//! validates every precondition against the current roster first; only when all
//! checks pass does it mutate state and return the ordered events. A rejected
//! action therefore never consumes MP, items, or the turn.
//!
//! # Module Structure
//!
//! - `error`: rejection types and the advisory event mapping
//! - `targeting`: actor/target checks and skill eligibility shared by resolvers
//! - `strike`: the single damage pipeline used by attacks and damage skills
//! - `attack`, `skill`, `item`, `talk`, `flee`: one resolver per kind
//! - `available`: enumeration of legal choices for prompts and AI
mod attack;
mod available;
mod error;
mod flee;
mod item;
mod skill;
mod strike;
mod talk;
mod targeting;

pub use available::{ItemOption, LegalActions, SkillOption, legal_actions};
pub use error::{
    ActionError, ActorRejection, RejectionKind, Shortfall, SkillRejection, TargetRejection,
};
pub use talk::talk_preview;
pub use targeting::eligible_skills;

use crate::config::BattleConfig;
use crate::env::{BattleEnv, RngSource};
use crate::event::BattleEvent;
use crate::state::{CombatantId, ItemId, PartyStash, Roster, Round, SkillId};

/// A decision for the acting combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionInput {
    Attack {
        target: CombatantId,
    },
    Skill {
        skill: SkillId,
        targets: Vec<CombatantId>,
    },
    Item {
        item: ItemId,
        target: CombatantId,
    },
    /// Ask a party member what they know about the enemies on the field.
    Talk {
        speaker: CombatantId,
    },
    Flee,
}

impl ActionInput {
    pub fn attack(target: CombatantId) -> Self {
        Self::Attack { target }
    }

    pub fn skill(skill: impl Into<String>, targets: Vec<CombatantId>) -> Self {
        Self::Skill {
            skill: SkillId::new(skill),
            targets,
        }
    }

    pub fn item(item: impl Into<String>, target: CombatantId) -> Self {
        Self::Item {
            item: ItemId::new(item),
            target,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Skill { .. } => "skill",
            Self::Item { .. } => "item",
            Self::Talk { .. } => "talk",
            Self::Flee => "flee",
        }
    }
}

/// Result of a flee attempt, consumed by the turn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FleeOutcome {
    Escaped,
    Failed,
}

/// Events produced by one resolved action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub events: Vec<BattleEvent>,
    pub flee: Option<FleeOutcome>,
}

impl Resolution {
    fn from_events(events: Vec<BattleEvent>) -> Self {
        Self {
            events,
            flee: None,
        }
    }
}

/// Mutable battle state and read-only content an action resolves against.
pub struct ResolveContext<'a> {
    pub roster: &'a mut Roster,
    pub round: Round,
    pub env: BattleEnv<'a>,
    pub rng: &'a mut dyn RngSource,
    pub stash: &'a mut PartyStash,
    pub config: &'a BattleConfig,
}

/// Validates and applies `input` for `actor`.
///
/// Turn ownership is the caller's concern; this only checks that the actor
/// exists and is alive, plus every kind-specific precondition.
///
/// # Errors
///
/// Returns an [`ActionError`] when any precondition fails. State is untouched
/// in that case.
pub fn resolve(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
    input: &ActionInput,
) -> Result<Resolution, ActionError> {
    match input {
        ActionInput::Attack { target } => {
            attack::basic_attack(ctx, actor, *target).map(Resolution::from_events)
        }
        ActionInput::Skill { skill, targets } => {
            skill::use_skill(ctx, actor, skill, targets).map(Resolution::from_events)
        }
        ActionInput::Item { item, target } => {
            item::use_item(ctx, actor, item, *target).map(Resolution::from_events)
        }
        ActionInput::Talk { speaker } => {
            talk::party_talk(ctx, actor, *speaker).map(Resolution::from_events)
        }
        ActionInput::Flee => flee::attempt_flee(ctx, actor),
    }
}

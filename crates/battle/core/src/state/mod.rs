//! Battle state types.
//!
//! Combatant records live in the [`Roster`] arena; the party-wide
//! [`PartyStash`] and [`PartyProgress`] outlive a single battle and are
//! borrowed or returned by the engine.
mod combatant;
mod debuff;
mod ids;
mod progress;
mod roster;
mod spec;
mod stash;
mod stats;

pub use combatant::{Bounty, Combatant, Control, DamageReport, Restored, Role, Side};
pub use debuff::{ActiveDebuff, DebuffKind, Debuffs};
pub use ids::{CombatantId, EnemyId, ItemId, Round, SkillId, TagSet, tags};
pub use progress::{MemberProgress, PartyProgress};
pub use roster::Roster;
pub use spec::{AllySpec, EnemySpec, SummonSpec};
pub use stash::PartyStash;
pub use stats::StatBlock;

//! Deterministic battle rules for a turn-based party RPG.
//!
//! `battle-core` turns a roster of allied and hostile combatants plus a
//! sequence of decisions into a reproducible stream of [`BattleEvent`]s. All
//! state mutation flows through [`engine::BattleEngine`]; randomness comes
//! exclusively from an explicit [`RngSource`] handle so that a seed and an
//! action sequence fully determine the outcome.
//!
//! Modules are organized leaf-first:
//! - [`combat`] pure damage, guard, and stat-derivation math
//! - [`state`] combatant records, the roster arena, stash and progress
//! - [`env`] read-only content oracles and the RNG source
//! - [`action`] validation and resolution of the five action kinds
//! - [`engine`] the round/turn state machine and initiative
//! - [`reward`] gold, experience, and loot on victory
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod reward;
pub mod state;

pub use action::{
    ActionError, ActionInput, ActorRejection, FleeOutcome, ItemOption, LegalActions,
    RejectionKind, Resolution, ResolveContext, Shortfall, SkillOption, SkillRejection,
    TargetRejection, eligible_skills, legal_actions, resolve, talk_preview,
};
pub use combat::{
    Attributes, GuardOutcome, Loadout, apply_guard, compute_damage, derive_stats, estimate_damage,
};
pub use config::BattleConfig;
pub use engine::{
    BattleEngine, BattleOutcome, BattlePhase, BattleRequest, BattleState, ExecuteError,
    SetupError,
};
pub use env::{
    BattleEnv, ContentCatalog, DefinitionKind, EnemyDefinition, EnemyOracle, ItemDefinition,
    ItemEffect, ItemOracle, ItemTargeting, KnowledgeEntry, KnowledgeOracle, LootDrop, LootOracle,
    LootTable, OracleError, PcgRng, RngSnapshot, RngSource, SkillAudience, SkillDefinition,
    SkillEffect, SkillOracle, TargetMode, compute_seed,
};
pub use error::{BattleError, ErrorSeverity};
pub use event::{BattleEvent, NoEffectCause, RosterEntry};
#[cfg(feature = "serde")]
pub use event::compute_log_digest;
pub use reward::{
    ExperienceShare, LevelUp, LootGrant, RewardContext, RewardSummary, experience_threshold,
    grant_rewards,
};
pub use state::{
    ActiveDebuff, AllySpec, Bounty, Combatant, CombatantId, Control, DamageReport, DebuffKind,
    Debuffs, EnemyId, EnemySpec, ItemId, MemberProgress, PartyProgress, PartyStash, Restored,
    Role, Roster, Round, Side, SkillId, StatBlock, SummonSpec, TagSet, tags,
};

//! Action provider implementations for different combatant behaviors.

pub mod ai;
pub mod scripted;

pub use ai::{AllyAiProvider, EnemyAiProvider, fallback_target};
pub use scripted::ScriptedProvider;

//! Runtime orchestration for deterministic battles.
//!
//! This crate wires the action provider abstraction, the built-in AI, and the
//! read-only projections into a single session API. Consumers embed
//! [`BattleController`] to drive turns, feed player input, and collect the
//! [`BattleResult`] once the battle ends.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the session and its decision loop
//! - [`api`] exposes errors, the provider trait, and the provider registry
//! - [`providers`] holds the enemy/ally AI and the scripted provider
//! - [`view`] and [`result`] are the read-only outputs for renderers and callers
pub mod api;
pub mod controller;
pub mod providers;
pub mod result;
pub mod view;

pub use api::{
    ActionProvider, ControllerError, ProviderError, ProviderKind, ProviderRegistry, Result,
};
pub use controller::{BattleController, Decision, StepReport};
pub use providers::{AllyAiProvider, EnemyAiProvider, ScriptedProvider};
pub use result::{AllyOutcome, BattleResult};
pub use view::{BattleView, CombatantView, Meter};

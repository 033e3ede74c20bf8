//! Combat math.
//!
//! Pure functions for resolving damage, guard absorption, and stat
//! derivation. Nothing here draws randomness or mutates state; the action
//! resolver feeds in effective (debuff-adjusted) numbers and applies results.
//!
//! # Core Functions
//!
//! - `compute_damage`: `max(1, attack + power - defense)`
//! - `apply_guard`: guard absorption of one incoming hit
//! - `estimate_damage`: preview against a live target, guard ignored
//! - `derive_stats`: attributes and equipment folded into a [`StatBlock`]
//!
//! [`StatBlock`]: crate::state::StatBlock

pub mod damage;
pub mod derive;

pub use damage::{GuardOutcome, apply_guard, compute_damage, estimate_damage};
pub use derive::{Attributes, Loadout, derive_stats};

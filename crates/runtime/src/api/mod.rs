//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers of the runtime crate so the
//! controller can stay focused on turn orchestration.

pub mod errors;
pub mod providers;
pub mod registry;

pub use errors::{ControllerError, ProviderError, ProviderKind, Result};
pub use providers::ActionProvider;
pub use registry::ProviderRegistry;

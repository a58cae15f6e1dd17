//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the orchestrator can stay focused on sequencing encounters.

pub mod errors;
pub mod providers;
pub mod selection;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionProvider, AutopilotProvider, PlayerAction, ScriptedProvider};
pub use selection::{EnemySelector, FixedSelector, UniformSelector};

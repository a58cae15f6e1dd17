//! Runtime orchestration for the tower climb.
//!
//! This crate wires the combat engine, the loaded content and the run
//! progression into a synchronous runtime API. Consumers embed [`Runtime`]
//! to start encounters, feed player decisions and read back the run.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream callers interact with
//! - [`session`] wraps one encounter with tracing
//! - [`progress`] folds finished encounters into run and meta progress
//! - [`config`] and [`logging`] cover environment setup
pub mod api;
pub mod config;
pub mod logging;
pub mod progress;
pub mod runtime;
pub mod session;

pub use api::{
    ActionProvider, AutopilotProvider, EnemySelector, FixedSelector, PlayerAction, Result,
    RuntimeError, ScriptedProvider, UniformSelector,
};
pub use config::{RewardConfig, RuntimeConfig};
pub use logging::setup_logging;
pub use progress::{FloorResult, MetaProgress, Reward, RunState};
pub use runtime::{Runtime, RuntimeBuilder};
pub use session::EncounterSession;

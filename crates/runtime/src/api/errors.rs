//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from content loading, encounter setup and rejected
//! operations so callers can bubble them up with consistent context.
use thiserror::Error;

use tower_core::{CombatError, ExecuteError, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content")]
    Content(#[source] anyhow::Error),

    #[error("enemy catalog is empty")]
    EmptyCatalog,

    #[error("failed to start encounter")]
    Encounter(#[source] CombatError),

    #[error(transparent)]
    Rejected(#[from] ExecuteError),

    #[error("no encounter in progress")]
    NoActiveEncounter,

    #[error("an encounter is already in progress on floor {floor}")]
    EncounterInProgress { floor: u32 },

    #[error("encounter on floor {floor} is still running after {turns} turns")]
    TurnLimit { floor: u32, turns: u32 },

    #[error("the run has ended")]
    RunEnded,
}

impl RuntimeError {
    /// True when the caller may retry with a different operation.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::Rejected(err) => err.severity().is_recoverable(),
            RuntimeError::NoActiveEncounter | RuntimeError::EncounterInProgress { .. } => true,
            _ => false,
        }
    }
}

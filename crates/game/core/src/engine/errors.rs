//! Error types for the combat pipeline.

use crate::card::CardId;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{EncounterOutcome, EncounterPhase};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Reasons an encounter operation is rejected.
///
/// A rejected operation never mutates the battle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("card costs {cost} action points but only {available} remain")]
    InsufficientActionPoints {
        cost: u32,
        available: u32,
        context: ErrorContext,
    },

    #[error("card {card} is not in hand")]
    UnknownCard { card: CardId, context: ErrorContext },

    #[error("enemy '{enemy_id}' is not in the catalog")]
    UnknownEnemy { enemy_id: String },

    #[error("encounter already ended in {outcome}")]
    EncounterAlreadyTerminal {
        outcome: EncounterOutcome,
        context: ErrorContext,
    },

    #[error("encounter is in phase {phase}, expected awaiting_player_action")]
    UnexpectedPhase {
        phase: EncounterPhase,
        context: ErrorContext,
    },

    #[error("battle invariant violated: {reason}")]
    InvariantViolation {
        reason: &'static str,
        context: ErrorContext,
    },
}

impl CombatError {
    pub fn insufficient_action_points(cost: u32, available: u32, context: ErrorContext) -> Self {
        Self::InsufficientActionPoints {
            cost,
            available,
            context,
        }
    }

    pub fn unknown_card(card: CardId, context: ErrorContext) -> Self {
        Self::UnknownCard { card, context }
    }

    pub fn unknown_enemy(enemy_id: impl Into<String>) -> Self {
        Self::UnknownEnemy {
            enemy_id: enemy_id.into(),
        }
    }

    pub fn already_terminal(outcome: EncounterOutcome, context: ErrorContext) -> Self {
        Self::EncounterAlreadyTerminal { outcome, context }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientActionPoints { .. } | Self::EncounterAlreadyTerminal { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownCard { .. } | Self::UnknownEnemy { .. } => ErrorSeverity::Validation,
            Self::UnexpectedPhase { .. } => ErrorSeverity::Internal,
            Self::InvariantViolation { .. } => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InsufficientActionPoints { context, .. }
            | Self::UnknownCard { context, .. }
            | Self::EncounterAlreadyTerminal { context, .. }
            | Self::UnexpectedPhase { context, .. }
            | Self::InvariantViolation { context, .. } => Some(context),
            Self::UnknownEnemy { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientActionPoints { .. } => "COMBAT_INSUFFICIENT_AP",
            Self::UnknownCard { .. } => "COMBAT_UNKNOWN_CARD",
            Self::UnknownEnemy { .. } => "COMBAT_UNKNOWN_ENEMY",
            Self::EncounterAlreadyTerminal { .. } => "COMBAT_ENCOUNTER_TERMINAL",
            Self::UnexpectedPhase { .. } => "COMBAT_UNEXPECTED_PHASE",
            Self::InvariantViolation { .. } => "COMBAT_INVARIANT_VIOLATION",
        }
    }
}

/// Errors surfaced while executing an operation through the combat engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("play card failed: {0}")]
    PlayCard(TransitionPhaseError<CombatError>),

    #[error("end turn failed: {0}")]
    EndTurn(TransitionPhaseError<CombatError>),

    #[error("surrender failed: {0}")]
    Surrender(TransitionPhaseError<CombatError>),
}

impl ExecuteError {
    /// The combat error underneath the pipeline wrapper.
    pub fn combat_error(&self) -> &CombatError {
        match self {
            Self::PlayCard(inner) | Self::EndTurn(inner) | Self::Surrender(inner) => &inner.error,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self {
            Self::PlayCard(inner) | Self::EndTurn(inner) | Self::Surrender(inner) => inner.phase,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.combat_error().severity()
    }

    fn context(&self) -> Option<&ErrorContext> {
        self.combat_error().context()
    }

    fn error_code(&self) -> &'static str {
        self.combat_error().error_code()
    }
}

//! Common error infrastructure for tower-core.
//!
//! This module provides shared types and traits used across all error types in tower-core.
//! Domain-specific errors (`CombatError`, `CatalogError`) live beside the code that
//! raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Rich Context**: Errors carry the turn and floor they were raised on
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The caller can re-prompt for a different action
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted combat state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with an alternative action.
    ///
    /// Examples: not enough action points, encounter already over
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown card id, unknown enemy id
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - combat state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Encounter turn at the time of error (0 before an encounter exists).
    pub turn: u32,

    /// Tower floor of the encounter, if one exists.
    pub floor: Option<u32>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given turn.
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self {
            turn,
            floor: None,
            message: None,
        }
    }

    /// Attaches a floor to this context (builder pattern).
    #[must_use]
    pub const fn with_floor(mut self, floor: u32) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all tower-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

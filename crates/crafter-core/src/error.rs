//! Error types for formula and plan operations.

use std::fmt;

use crate::validation::ValidationError;

/// Violations of the formula or plan state machines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// `remove` was called on an empty plan.
    #[error("nothing to remove: the plan has no steps")]
    NothingToRemove,

    /// A manual level-up was requested at the top level.
    #[error("proficiency is already at the maximum level ({level})")]
    MaxProficiency {
        /// The level the formula is stuck at.
        level: u32,
    },

    /// Every step of an executable plan has already run.
    #[error("no more steps: all {len} steps have been applied")]
    NoMoreSteps {
        /// Number of steps in the plan.
        len: usize,
    },

    /// `query` was called after the last step ran.
    #[error("no pending step: all {len} steps have been applied")]
    NoPendingStep {
        /// Number of steps in the plan.
        len: usize,
    },

    /// A replace or remove touched a step that has already run.
    #[error("step {} is locked: {cursor} steps have already been applied", .index + 1)]
    StepLocked {
        /// 0-based index of the locked step.
        index: usize,
        /// Number of steps already applied.
        cursor: usize,
    },
}

/// Main error type for crafter operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CraftError {
    /// Construction input was malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A step index was outside the plan.
    #[error("index {index} out of range (plan has {len} steps)")]
    OutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// Number of steps in the plan.
        len: usize,
    },

    /// No formula was supplied where one is required.
    #[error("no formula supplied to {operation}")]
    MissingFormula {
        /// The plan operation that was called.
        operation: &'static str,
    },

    /// The operation is not allowed in the current state.
    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, CraftError>;

/// Coarse classification of a [`CraftError`], for callers that map errors
/// to user-facing messages or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Range,
    NullArgument,
    State,
}

impl ErrorKind {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Range => "range",
            Self::NullArgument => "null-argument",
            Self::State => "state",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CraftError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::OutOfRange { .. } => ErrorKind::Range,
            Self::MissingFormula { .. } => ErrorKind::NullArgument,
            Self::State(_) => ErrorKind::State,
        }
    }

    /// Returns `true` if this is a [`CraftError::Validation`].
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns `true` if this is a [`CraftError::State`].
    pub fn is_state(&self) -> bool {
        self.kind() == ErrorKind::State
    }
}

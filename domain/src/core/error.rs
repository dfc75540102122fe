//! Domain error types

use crate::core::persona::Persona;
use thiserror::Error;

/// Domain-level errors
///
/// Raised when an operation would break one of the debate invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Turn order violation: expected {expected}, got {actual}")]
    TurnOrderViolation { expected: Persona, actual: Persona },

    #[error("Non-contiguous turn index: expected {expected}, got {actual}")]
    NonContiguousTurn { expected: usize, actual: usize },

    #[error("Turn budget exhausted")]
    TurnBudgetExhausted,

    #[error("Verdict already recorded")]
    VerdictAlreadySet,

    #[error("Verdict requested with {remaining} turn(s) remaining")]
    VerdictBeforeDebateEnd { remaining: usize },

    #[error("Could not determine a winner: {0}")]
    JudgmentParseFailure(String),
}

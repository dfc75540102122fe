//! Input, output and error types for the debate use case.

use debate_domain::{
    DebateConfig, DebatePhase, DebateState, DomainError, Persona, ScoreCard, Turn, Verdict,
};
use thiserror::Error;

/// Errors that can occur while running a debate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunDebateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Generation failed for {node} after {attempts} attempt(s): {reason}")]
    GenerationFailure {
        node: String,
        attempts: usize,
        reason: String,
    },

    #[error("Turn order violation: expected {expected}, got {actual}")]
    TurnOrderViolation { expected: Persona, actual: Persona },

    #[error("Judgment could not be parsed after {attempts} attempt(s): {reason}")]
    JudgmentParseFailure { attempts: usize, reason: String },

    #[error("Debate invariant violated: {0}")]
    Domain(DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunDebateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunDebateError::Cancelled)
    }
}

impl From<DomainError> for RunDebateError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidConfiguration(msg) => RunDebateError::InvalidConfiguration(msg),
            DomainError::TurnOrderViolation { expected, actual } => {
                RunDebateError::TurnOrderViolation { expected, actual }
            }
            DomainError::JudgmentParseFailure(reason) => RunDebateError::JudgmentParseFailure {
                attempts: 1,
                reason,
            },
            other => RunDebateError::Domain(other),
        }
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    /// Raw topic; validated before any node runs
    pub topic: String,
    pub config: DebateConfig,
}

impl RunDebateInput {
    pub fn new(topic: impl Into<String>, config: DebateConfig) -> Self {
        Self {
            topic: topic.into(),
            config,
        }
    }
}

/// Result of a debate session that got past validation
///
/// An aborted session still carries every turn recorded before the
/// failure, so the partial transcript is never lost.
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    pub state: DebateState,
    /// `Done` or `Aborted`
    pub phase: DebatePhase,
    /// Why the session aborted, if it did
    pub error: Option<RunDebateError>,
    /// Diagnostic heuristic scores for the recorded turns
    pub scores: ScoreCard,
    /// Export failures; they never discard the debate result
    pub export_errors: Vec<String>,
}

impl DebateOutcome {
    pub fn is_complete(&self) -> bool {
        self.phase == DebatePhase::Done
    }

    pub fn turns(&self) -> &[Turn] {
        self.state.turns()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.state.verdict()
    }

    pub fn topic(&self) -> &str {
        self.state.topic().content()
    }
}

//! Execution parameters: use case call control.
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase)
//! calls the generator. These are application-layer concerns, not domain
//! policy: turn budget and retry limit live in
//! [`DebateConfig`](debate_domain::DebateConfig).

use crate::ports::llm_gateway::GenerationOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Upper bound for a single generator call. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Sampling options for persona nodes
    pub persona_options: GenerationOptions,
    /// Sampling options for the judge node
    pub judge_options: GenerationOptions,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            call_timeout: Some(Duration::from_secs(60)),
            persona_options: GenerationOptions::persona(),
            judge_options: GenerationOptions::judge(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_persona_options(mut self, options: GenerationOptions) -> Self {
        self.persona_options = options;
        self
    }

    pub fn with_judge_options(mut self, options: GenerationOptions) -> Self {
        self.judge_options = options;
        self
    }
}

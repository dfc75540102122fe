//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types after validation.

mod debate;
mod generation;
mod output;

pub use debate::FileDebateConfig;
pub use generation::{FileGenerationConfig, FileProviderKind};
pub use output::{FileOutputConfig, FileOutputFormat};

use debate_application::ExecutionParams;
use debate_domain::DebateConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Validation errors for file configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("debate.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("debate.max_turns must be an even number >= 2, got {0}")]
    InvalidMaxTurns(usize),

    #[error("debate.starting_persona: {0}")]
    UnknownPersona(String),

    #[error("debate.argument_style: {0}")]
    UnknownArgumentStyle(String),

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("generation.{field} must be greater than 0")]
    ZeroTokenBudget { field: &'static str },

    #[error("generation.{field} out of range: {value}")]
    SamplingOutOfRange { field: &'static str, value: f32 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session shape and retry policy
    pub debate: FileDebateConfig,
    /// Text generator settings
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.debate.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let max_turns = self.debate.max_turns;
        if max_turns < 2 || max_turns % 2 != 0 {
            return Err(ConfigValidationError::InvalidMaxTurns(max_turns));
        }

        self.debate.parse_starting_persona()?;
        self.debate.parse_argument_style()?;
        self.generation.validate()
    }

    /// Build the domain debate configuration.
    pub fn to_debate_config(&self) -> Result<DebateConfig, ConfigValidationError> {
        self.validate()?;
        Ok(DebateConfig::default()
            .with_max_turns(self.debate.max_turns)
            .with_starting_persona(self.debate.parse_starting_persona()?)
            .with_retry_limit(self.debate.retry_limit)
            .with_argument_style(self.debate.parse_argument_style()?))
    }

    /// Build the generator call parameters.
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_call_timeout(self.debate.timeout_seconds.map(Duration::from_secs))
            .with_persona_options(self.generation.persona_options())
            .with_judge_options(self.generation.judge_options())
    }
}

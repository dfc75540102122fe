//! Debate configuration from TOML (`[debate]` section)

use super::ConfigValidationError;
use debate_domain::{ArgumentStyle, Persona};
use serde::{Deserialize, Serialize};

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Total persona turns (even, >= 2)
    pub max_turns: usize,
    /// "scientist" or "philosopher"
    pub starting_persona: String,
    /// Extra attempts per node after the first failure
    pub retry_limit: usize,
    /// Timeout in seconds for a single generator call
    pub timeout_seconds: Option<u64>,
    /// "full" or "first_sentence"
    pub argument_style: String,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_turns: 4,
            starting_persona: Persona::Scientist.as_str().to_string(),
            retry_limit: 2,
            timeout_seconds: Some(60),
            argument_style: "full".to_string(),
        }
    }
}

impl FileDebateConfig {
    pub fn parse_starting_persona(&self) -> Result<Persona, ConfigValidationError> {
        self.starting_persona
            .parse()
            .map_err(ConfigValidationError::UnknownPersona)
    }

    pub fn parse_argument_style(&self) -> Result<ArgumentStyle, ConfigValidationError> {
        self.argument_style
            .parse()
            .map_err(ConfigValidationError::UnknownArgumentStyle)
    }
}

//! Debate session configuration

use crate::core::error::DomainError;
use crate::core::persona::Persona;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How persona output is shaped before it becomes a turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStyle {
    /// Keep the generated text as returned (trimmed)
    #[default]
    Full,
    /// Keep only the first sentence of the first line
    FirstSentence,
}

impl ArgumentStyle {
    /// Shape raw generated text. Returns `None` when nothing usable remains.
    pub fn apply(&self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        match self {
            ArgumentStyle::Full => Some(text.to_string()),
            ArgumentStyle::FirstSentence => {
                let first_line = text.lines().next().unwrap_or_default();
                let sentence = first_line.split('.').next().unwrap_or_default().trim();
                if sentence.is_empty() {
                    None
                } else {
                    Some(format!("{}.", sentence))
                }
            }
        }
    }
}

impl FromStr for ArgumentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full" => Ok(ArgumentStyle::Full),
            "first_sentence" | "sentence" => Ok(ArgumentStyle::FirstSentence),
            other => Err(format!("unknown argument style '{}'", other)),
        }
    }
}

/// Validated settings for one debate session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Total persona turns; even so both personas speak equally often
    pub max_turns: usize,
    /// Persona that opens the debate
    pub starting_persona: Persona,
    /// Extra attempts allowed per node invocation after the first failure
    pub retry_limit: usize,
    pub argument_style: ArgumentStyle,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_turns: 4,
            starting_persona: Persona::Scientist,
            retry_limit: 2,
            argument_style: ArgumentStyle::Full,
        }
    }
}

impl DebateConfig {
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_starting_persona(mut self, persona: Persona) -> Self {
        self.starting_persona = persona;
        self
    }

    pub fn with_retry_limit(mut self, retry_limit: usize) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    pub fn with_argument_style(mut self, style: ArgumentStyle) -> Self {
        self.argument_style = style;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_turns < 2 {
            return Err(DomainError::InvalidConfiguration(format!(
                "max_turns must be at least 2, got {}",
                self.max_turns
            )));
        }
        if self.max_turns % 2 != 0 {
            return Err(DomainError::InvalidConfiguration(format!(
                "max_turns must be even, got {}",
                self.max_turns
            )));
        }
        Ok(())
    }

    /// Attempts per node invocation (first try plus retries)
    pub fn max_attempts(&self) -> usize {
        self.retry_limit + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DebateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_turns, 4);
        assert_eq!(config.max_attempts(), 3);
    }

    #[test]
    fn test_odd_max_turns_rejected() {
        let config = DebateConfig::default().with_max_turns(3);
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfiguration(msg)) if msg.contains("even")
        ));
    }

    #[test]
    fn test_too_few_turns_rejected() {
        assert!(DebateConfig::default().with_max_turns(0).validate().is_err());
        assert!(DebateConfig::default().with_max_turns(2).validate().is_ok());
    }

    #[test]
    fn test_argument_style_full_trims() {
        assert_eq!(
            ArgumentStyle::Full.apply("  Evidence matters.\nMore.  "),
            Some("Evidence matters.\nMore.".to_string())
        );
        assert_eq!(ArgumentStyle::Full.apply("   "), None);
    }

    #[test]
    fn test_argument_style_first_sentence() {
        assert_eq!(
            ArgumentStyle::FirstSentence.apply("Trials show harm. Also other things.\nSecond line"),
            Some("Trials show harm.".to_string())
        );
        assert_eq!(ArgumentStyle::FirstSentence.apply(". leading dot"), None);
    }

    #[test]
    fn test_argument_style_from_str() {
        assert_eq!("first-sentence".parse(), Ok(ArgumentStyle::FirstSentence));
        assert_eq!("FULL".parse(), Ok(ArgumentStyle::Full));
        assert!("haiku".parse::<ArgumentStyle>().is_err());
    }
}

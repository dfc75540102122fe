//! Generator configuration from TOML (`[generation]` section)

use super::ConfigValidationError;
use debate_application::GenerationOptions;
use serde::{Deserialize, Serialize};

/// Which text generator backs the debate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileProviderKind {
    /// Deterministic local generator, no network
    #[default]
    Offline,
    /// Any server speaking the OpenAI chat completions API
    #[serde(alias = "openai-compatible", alias = "open_ai")]
    OpenAi,
}

/// Raw generator configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub provider: FileProviderKind,
    /// Server root; `/v1/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer key (optional for local servers)
    pub api_key_env: String,
    pub persona_max_tokens: u32,
    pub judge_max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let persona = GenerationOptions::persona();
        Self {
            provider: FileProviderKind::default(),
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2:0.5b".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            persona_max_tokens: persona.max_tokens,
            judge_max_tokens: GenerationOptions::judge().max_tokens,
            temperature: persona.temperature,
            top_p: persona.top_p,
        }
    }
}

impl FileGenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.persona_max_tokens == 0 {
            return Err(ConfigValidationError::ZeroTokenBudget {
                field: "persona_max_tokens",
            });
        }
        if self.judge_max_tokens == 0 {
            return Err(ConfigValidationError::ZeroTokenBudget {
                field: "judge_max_tokens",
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigValidationError::SamplingOutOfRange {
                field: "temperature",
                value: self.temperature,
            });
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigValidationError::SamplingOutOfRange {
                field: "top_p",
                value: self.top_p,
            });
        }
        Ok(())
    }

    pub fn persona_options(&self) -> GenerationOptions {
        GenerationOptions {
            max_tokens: self.persona_max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    pub fn judge_options(&self) -> GenerationOptions {
        self.persona_options().with_max_tokens(self.judge_max_tokens)
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_aliases() {
        let config: FileGenerationConfig = toml::from_str("provider = \"openai\"").unwrap();
        assert_eq!(config.provider, FileProviderKind::OpenAi);
        let config: FileGenerationConfig =
            toml::from_str("provider = \"openai-compatible\"").unwrap();
        assert_eq!(config.provider, FileProviderKind::OpenAi);
    }

    #[test]
    fn test_options_share_sampling() {
        let config = FileGenerationConfig {
            temperature: 0.2,
            ..Default::default()
        };
        assert_eq!(config.persona_options().max_tokens, 120);
        assert_eq!(config.judge_options().max_tokens, 400);
        assert_eq!(config.judge_options().temperature, 0.2);
    }

    #[test]
    fn test_top_p_out_of_range() {
        let config = FileGenerationConfig {
            top_p: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SamplingOutOfRange { field: "top_p", .. })
        ));
    }
}

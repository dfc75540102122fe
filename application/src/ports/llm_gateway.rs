//! LLM Gateway port
//!
//! Defines the single narrow interface through which nodes obtain generated
//! text. The orchestration core never talks to a model any other way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Sampling options forwarded to the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationOptions {
    /// Defaults for a persona argument
    pub fn persona() -> Self {
        Self {
            max_tokens: 120,
            temperature: 0.8,
            top_p: 0.9,
        }
    }

    /// Defaults for the judge
    pub fn judge() -> Self {
        Self {
            max_tokens: 400,
            ..Self::persona()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::persona()
    }
}

/// One call to the generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Node issuing the call ("scientist", "philosopher", "judge")
    pub label: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            system_prompt: None,
            prompt: prompt.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Gateway for text generation
///
/// Implementations (adapters) live in the infrastructure layer. Tests use
/// scripted fakes.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate text for a prompt. The returned text is opaque to the caller.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;

    /// Human-readable identifier of the backing model
    fn model_name(&self) -> String {
        "unknown".to_string()
    }
}

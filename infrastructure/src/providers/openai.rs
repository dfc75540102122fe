//! Gateway for servers speaking the OpenAI chat completions API
//! (OpenAI, vLLM, Ollama, llama.cpp server, ...).

use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// HTTP gateway to an OpenAI-compatible completion endpoint
pub struct OpenAiCompatibleGateway {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleGateway {
    /// `base_url` is the server root; `/v1/chat/completions` is appended.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: Self::endpoint(base_url),
            model: model.into(),
            api_key,
        })
    }

    fn endpoint(base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{}/v1/chat/completions", base)
    }

    fn body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });
        ChatRequest {
            model: &self.model,
            messages,
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
            top_p: request.options.top_p,
        }
    }

    fn map_send_error(error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout
        } else if error.is_connect() {
            GatewayError::ConnectionError(error.to_string())
        } else {
            GatewayError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        debug!(label = %request.label, endpoint = %self.endpoint, "POST chat completion");

        let mut builder = self.http.post(&self.endpoint).json(&self.body(request));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the cancellable, time-bounded
//! generator call used by every debate node.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Failure of a single node attempt
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("{0}")]
    Generation(#[from] GatewayError),

    #[error("Generator returned empty text")]
    EmptyOutput,

    #[error("{0}")]
    Judgment(debate_domain::DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Check if cancellation has been requested.
pub(crate) fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), NodeError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(NodeError::Cancelled);
    }
    Ok(())
}

/// Everything a node needs to reach the generator.
///
/// Wraps the gateway with the per-call timeout, the cancellation token and
/// the conversation logger. A call that outlives the timeout fails with
/// [`GatewayError::Timeout`]; partial output is never returned.
pub struct Generator<'a, G: LlmGateway + ?Sized> {
    gateway: &'a G,
    timeout: Option<Duration>,
    cancellation: Option<&'a CancellationToken>,
    logger: &'a dyn ConversationLogger,
}

impl<'a, G: LlmGateway + ?Sized> Generator<'a, G> {
    pub fn new(
        gateway: &'a G,
        timeout: Option<Duration>,
        cancellation: Option<&'a CancellationToken>,
        logger: &'a dyn ConversationLogger,
    ) -> Self {
        Self {
            gateway,
            timeout,
            cancellation,
            logger,
        }
    }

    async fn bounded(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.gateway.generate(request)).await
            {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout),
            },
            None => self.gateway.generate(request).await,
        }
    }

    /// Send one request, honouring timeout and cancellation.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, NodeError> {
        check_cancelled(self.cancellation)?;

        debug!(label = %request.label, "Sending prompt:\n{}", request.prompt);
        self.logger.log(ConversationEvent::new(
            "llm_request",
            serde_json::json!({
                "label": request.label,
                "system_prompt": request.system_prompt,
                "prompt": request.prompt,
                "max_tokens": request.options.max_tokens,
            }),
        ));

        let result = match self.cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(NodeError::Cancelled),
                result = self.bounded(request) => result,
            },
            None => self.bounded(request).await,
        };

        match &result {
            Ok(text) => self.logger.log(ConversationEvent::new(
                "llm_response",
                serde_json::json!({
                    "label": request.label,
                    "bytes": text.len(),
                    "text": text,
                }),
            )),
            Err(e) => self.logger.log(ConversationEvent::new(
                "llm_error",
                serde_json::json!({
                    "label": request.label,
                    "error": e.to_string(),
                }),
            )),
        }

        Ok(result?)
    }
}

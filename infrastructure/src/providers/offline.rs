//! Deterministic generator for dry runs and demos.

use async_trait::async_trait;
use debate_application::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use debate_application::use_cases::run_debate::JUDGE_LABEL;
use debate_domain::Persona;
use sha2::{Digest, Sha256};

/// Generator that derives its answer from a hash of the prompt.
///
/// The same request always yields the same text, so a whole debate run
/// offline is reproducible. Judge requests get a well-formed
/// `WINNER:` / `JUSTIFICATION:` answer.
#[derive(Debug, Clone, Default)]
pub struct OfflineGateway;

impl OfflineGateway {
    pub fn new() -> Self {
        Self
    }

    fn digest(request: &GenerationRequest) -> Vec<u8> {
        let mut hasher = Sha256::new();
        if let Some(system) = &request.system_prompt {
            hasher.update(system.as_bytes());
        }
        hasher.update(request.prompt.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[async_trait]
impl LlmGateway for OfflineGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let digest = Self::digest(request);
        let short = hex::encode(&digest[..3]);

        if request.label == JUDGE_LABEL {
            let winner = match digest[0] % 2 {
                0 => Persona::Scientist,
                _ => Persona::Philosopher,
            };
            return Ok(format!(
                "WINNER: {}\nJUSTIFICATION: (offline judgment {})",
                winner.display_name(),
                short
            ));
        }

        Ok(format!("(offline {} argument {})", request.label, short))
    }

    fn model_name(&self) -> String {
        "offline".to_string()
    }
}

//! Judge node: reads the whole transcript and declares a winner.

use crate::ports::llm_gateway::{GenerationOptions, GenerationRequest, LlmGateway};
use crate::use_cases::shared::{Generator, NodeError};
use debate_domain::{PromptTemplate, Topic, Turn, Verdict, parse_verdict};

pub const JUDGE_LABEL: &str = "judge";

/// Stateless judge node
#[derive(Debug, Clone)]
pub struct JudgeNode {
    options: GenerationOptions,
}

impl JudgeNode {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options }
    }

    pub fn request(&self, topic: &Topic, turns: &[Turn]) -> GenerationRequest {
        GenerationRequest::new(JUDGE_LABEL, PromptTemplate::judge_prompt(topic, turns))
            .with_system_prompt(PromptTemplate::judge_system())
            .with_options(self.options.clone())
    }

    pub async fn judge<G: LlmGateway + ?Sized>(
        &self,
        generator: &Generator<'_, G>,
        topic: &Topic,
        turns: &[Turn],
    ) -> Result<Verdict, NodeError> {
        let request = self.request(topic, turns);
        let raw = generator.generate(&request).await?;
        if raw.trim().is_empty() {
            return Err(NodeError::EmptyOutput);
        }
        parse_verdict(&raw).map_err(NodeError::Judgment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::conversation_logger::NoConversationLogger;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use debate_domain::{DomainError, Persona};

    struct FixedGateway(&'static str);

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            assert_eq!(request.label, JUDGE_LABEL);
            assert_eq!(request.options.max_tokens, 400);
            Ok(self.0.to_string())
        }
    }

    fn transcript() -> Vec<Turn> {
        vec![
            Turn::new(Persona::Scientist, "Trials work.", 0),
            Turn::new(Persona::Philosopher, "Values matter.", 1),
        ]
    }

    #[tokio::test]
    async fn test_judge_parses_winner() {
        let gateway = FixedGateway("WINNER: Philosopher\nJUSTIFICATION: Better rebuttals.");
        let logger = NoConversationLogger;
        let generator = Generator::new(&gateway, None, None, &logger);
        let topic = Topic::new("Ethics of trials").unwrap();

        let verdict = JudgeNode::new(GenerationOptions::judge())
            .judge(&generator, &topic, &transcript())
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::new(Persona::Philosopher, "Better rebuttals."));
    }

    #[tokio::test]
    async fn test_judge_rejects_unrecognised_winner() {
        let gateway = FixedGateway("Both sides were compelling.");
        let logger = NoConversationLogger;
        let generator = Generator::new(&gateway, None, None, &logger);
        let topic = Topic::new("Ethics of trials").unwrap();

        let err = JudgeNode::new(GenerationOptions::judge())
            .judge(&generator, &topic, &transcript())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NodeError::Judgment(DomainError::JudgmentParseFailure(_))
        ));
    }

    #[test]
    fn test_request_contains_transcript() {
        let topic = Topic::new("Ethics of trials").unwrap();
        let request = JudgeNode::new(GenerationOptions::judge()).request(&topic, &transcript());
        assert!(request.prompt.contains("Round 1 [Philosopher]: Values matter."));
        assert!(request.system_prompt.is_some());
    }
}

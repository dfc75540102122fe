//! Persona node: produces one argument for the speaking persona.

use crate::ports::llm_gateway::{GenerationOptions, GenerationRequest, LlmGateway};
use crate::use_cases::shared::{Generator, NodeError};
use debate_domain::{ArgumentStyle, Persona, PromptTemplate, Topic, Turn};

/// Stateless persona node
///
/// Reads the topic and the turns so far, asks the generator for an
/// argument and wraps it in a [`Turn`]. The text is treated as opaque; the
/// only check is that something non-blank remains after shaping.
#[derive(Debug, Clone)]
pub struct PersonaNode {
    options: GenerationOptions,
    style: ArgumentStyle,
}

impl PersonaNode {
    pub fn new(options: GenerationOptions, style: ArgumentStyle) -> Self {
        Self { options, style }
    }

    pub fn request(&self, topic: &Topic, turns: &[Turn], persona: Persona) -> GenerationRequest {
        GenerationRequest::new(
            persona.as_str(),
            PromptTemplate::persona_prompt(topic, turns, persona),
        )
        .with_system_prompt(PromptTemplate::persona_system(persona))
        .with_options(self.options.clone())
    }

    pub async fn act<G: LlmGateway + ?Sized>(
        &self,
        generator: &Generator<'_, G>,
        topic: &Topic,
        turns: &[Turn],
        persona: Persona,
    ) -> Result<Turn, NodeError> {
        let request = self.request(topic, turns, persona);
        let raw = generator.generate(&request).await?;
        let text = self.style.apply(&raw).ok_or(NodeError::EmptyOutput)?;
        Ok(Turn::new(persona, text, turns.len()))
    }
}

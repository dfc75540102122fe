//! Prompt templates for the debate flow

use crate::core::persona::Persona;
use crate::core::topic::Topic;
use crate::debate::memory::MemoryStore;
use crate::debate::turn::Turn;

/// Max characters of a persona's own-argument digest in its prompt
pub const OWN_SUMMARY_MAX_LEN: usize = 400;

const NO_PRIOR_ARGUMENT: &str = "No prior argument.";

/// Templates for generating prompts at each node
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a persona node
    pub fn persona_system(persona: Persona) -> String {
        format!(
            r#"You are the {} in a structured two-person debate.
{}
Stay in character. Respond with your argument only, without headings or speaker labels."#,
            persona.display_name(),
            persona.framing()
        )
    }

    /// Render turns as `Round N [Speaker]: text` lines
    pub fn format_transcript(turns: &[Turn]) -> String {
        turns
            .iter()
            .map(|t| format!("Round {} [{}]: {}", t.round(), t.speaker, t.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// User prompt for a persona's next argument
    ///
    /// Deterministic in its inputs: the same topic, turns and persona always
    /// yield the same prompt.
    pub fn persona_prompt(topic: &Topic, turns: &[Turn], persona: Persona) -> String {
        let memory: MemoryStore = turns.iter().cloned().collect();
        let opponent = memory
            .last_by(persona.other())
            .map(|t| t.text.as_str())
            .unwrap_or(NO_PRIOR_ARGUMENT);

        let mut prompt = format!(
            "Persona: {}\nTopic: {}\n",
            persona.display_name(),
            topic.content()
        );

        if turns.is_empty() {
            prompt.push_str("\nYou open the debate.\n");
        } else {
            prompt.push_str("\nTranscript so far:\n");
            prompt.push_str(&Self::format_transcript(turns));
            prompt.push('\n');
        }

        prompt.push_str(&format!(
            "\nOpponent's argument ({}): {}\n",
            persona.other().display_name(),
            opponent
        ));

        let own = memory.summary_for(persona, OWN_SUMMARY_MAX_LEN);
        if !own.is_empty() {
            prompt.push_str(&format!("Your previous points: {}\n", own));
        }

        prompt.push_str(&format!(
            "\nProduce one concise {}-style argument that rebuts the opponent's last point.",
            persona.as_str()
        ));
        prompt
    }

    /// System prompt for the judge node
    pub fn judge_system() -> &'static str {
        r#"You are an impartial debate judge.
Evaluate the arguments for relevance, evidence, reasoning and how well each side answered the other.
You must pick exactly one winner. Ties are not allowed."#
    }

    /// User prompt for the judge
    pub fn judge_prompt(topic: &Topic, turns: &[Turn]) -> String {
        format!(
            r#"Topic: {}

Full transcript:
{}

Decide who won the debate. Answer in exactly this format:

WINNER: <Scientist or Philosopher>
JUSTIFICATION: <two or three sentences explaining the decision>"#,
            topic.content(),
            Self::format_transcript(turns)
        )
    }
}

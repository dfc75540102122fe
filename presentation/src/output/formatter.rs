//! Output formatter trait

use debate_application::DebateOutcome;

/// Trait for formatting debate outcomes
pub trait OutputFormatter {
    /// Format the complete outcome: transcript, verdict, scores
    fn format(&self, outcome: &DebateOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &DebateOutcome) -> String;

    /// Format the verdict only (concise output)
    fn format_verdict_only(&self, outcome: &DebateOutcome) -> String;
}

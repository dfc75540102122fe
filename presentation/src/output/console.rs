//! Console output formatter for debate outcomes

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use debate_application::DebateOutcome;
use debate_domain::{Persona, ScoreCard, transcript_records};

/// Formats debate outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &DebateOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Topic:".cyan().bold(),
            outcome.topic()
        ));
        output.push_str(&format!(
            "{} {} vs {} ({} turns)\n",
            "Personas:".cyan().bold(),
            Self::speaker(Persona::Scientist),
            Self::speaker(Persona::Philosopher),
            outcome.turns().len()
        ));

        output.push_str(&Self::section_header("Transcript"));
        let mut round = 0;
        for turn in outcome.turns() {
            if turn.round() != round {
                round = turn.round();
                output.push_str(&format!("\n{}\n", format!("── Round {} ──", round).dimmed()));
            }
            output.push_str(&format!(
                "{} {}\n",
                format!("{}:", Self::speaker(turn.speaker)).bold(),
                turn.text
            ));
        }
        if outcome.turns().is_empty() {
            output.push_str(&format!("\n{}\n", "(no turns recorded)".dimmed()));
        }

        output.push_str(&Self::section_header("Verdict"));
        match outcome.verdict() {
            Some(verdict) => {
                output.push_str(&format!(
                    "\n{} {}\n\n{}\n",
                    "Winner:".green().bold(),
                    Self::speaker(verdict.winner).bold(),
                    Self::indent(&verdict.justification, "  ")
                ));
            }
            None => output.push_str(&format!("\n{}\n", "No verdict".dimmed())),
        }

        if let Some(error) = &outcome.error {
            output.push_str(&format!(
                "\n{} {}\n",
                "Debate aborted:".red().bold(),
                error
            ));
        }

        if !outcome.scores.per_turn.is_empty() {
            output.push_str(&format!("\n{}\n", Self::scores_line(&outcome.scores)));
        }

        if !outcome.export_errors.is_empty() {
            output.push_str(&format!("\n{}\n", "Export problems:".yellow().bold()));
            for error in &outcome.export_errors {
                output.push_str(&format!("  * {}\n", error));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DebateOutcome) -> String {
        let value = serde_json::json!({
            "topic": outcome.topic(),
            "phase": outcome.phase,
            "complete": outcome.is_complete(),
            "turns": transcript_records(outcome.turns()),
            "verdict": outcome.verdict(),
            "scores": outcome.scores,
            "error": outcome.error.as_ref().map(|e| e.to_string()),
            "export_errors": outcome.export_errors,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the verdict only (concise output)
    pub fn format_verdict_only(outcome: &DebateOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Debate Verdict ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), outcome.topic()));

        match (outcome.verdict(), &outcome.error) {
            (Some(verdict), _) => {
                output.push_str(&format!(
                    "{} {}\n",
                    "Winner:".green().bold(),
                    Self::speaker(verdict.winner).bold()
                ));
                output.push_str(&verdict.justification);
                output.push('\n');
            }
            (None, Some(error)) => {
                output.push_str(&format!("{} {}\n", "Debate aborted:".red().bold(), error));
            }
            (None, None) => output.push_str("No verdict\n"),
        }

        output
    }

    /// Heuristic totals; shown for diagnosis next to the judge's verdict
    fn scores_line(scores: &ScoreCard) -> String {
        let totals = Persona::ALL
            .into_iter()
            .map(|p| format!("{} {:.1}", p, scores.total_for(p)))
            .collect::<Vec<_>>()
            .join(" / ");
        let lead = match scores.leader() {
            Some(persona) => format!("{} ahead", persona),
            None => "level".to_string(),
        };
        format!("{} {} ({})", "Heuristic scores:".dimmed(), totals, lead)
    }

    fn speaker(persona: Persona) -> ColoredString {
        match persona {
            Persona::Scientist => persona.display_name().yellow(),
            Persona::Philosopher => persona.display_name().magenta(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &DebateOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &DebateOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_verdict_only(&self, outcome: &DebateOutcome) -> String {
        Self::format_verdict_only(outcome)
    }
}

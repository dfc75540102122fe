//! Progress reporting for debate execution

use colored::Colorize;
use debate_application::ports::progress::ProgressNotifier;
use debate_domain::{DebatePhase, Persona, Turn, Verdict};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a turn bar and a spinner while the judge deliberates
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn turn_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, _topic: &str, total_turns: usize) {
        let bar = ProgressBar::new(total_turns as u64);
        bar.set_style(Self::turn_style());
        bar.set_prefix("Debate");
        bar.set_message("Starting...");
        bar.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_turn_start(&self, persona: Persona, index: usize) {
        self.with_bar(|bar| bar.set_message(format!("{} (turn {})", persona, index + 1)));
    }

    fn on_turn_complete(&self, turn: &Turn) {
        self.with_bar(|bar| {
            bar.set_message(format!("{} {}", "v".green(), turn.speaker));
            bar.inc(1);
        });
    }

    fn on_retry(&self, node: &str, attempt: usize, error: &str) {
        self.with_bar(|bar| {
            bar.println(format!(
                "  {} {} attempt {} failed: {}",
                "!".yellow(),
                node,
                attempt,
                error
            ));
        });
    }

    fn on_judging_start(&self) {
        self.with_bar(|bar| {
            bar.set_prefix("Judge");
            bar.set_message("deliberating...");
        });
    }

    fn on_debate_end(&self, phase: DebatePhase, verdict: Option<&Verdict>) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = guard.take() {
            match (phase, verdict) {
                (DebatePhase::Done, Some(v)) => {
                    bar.finish_with_message(format!("{} wins!", v.winner.to_string().green()))
                }
                _ => bar.abandon_with_message("aborted".red().to_string()),
            }
        }
    }
}

/// Simple text-based progress for non-interactive stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, topic: &str, total_turns: usize) {
        eprintln!(
            "{} {} ({} turns)",
            "->".cyan(),
            topic.bold(),
            total_turns
        );
    }

    fn on_turn_start(&self, _persona: Persona, _index: usize) {}

    fn on_turn_complete(&self, turn: &Turn) {
        eprintln!("  {} R{} {}", "v".green(), turn.round(), turn.speaker);
    }

    fn on_retry(&self, node: &str, attempt: usize, error: &str) {
        eprintln!("  {} {} retry after attempt {}: {}", "!".yellow(), node, attempt, error);
    }

    fn on_judging_start(&self) {
        eprintln!("  {} Judge", "->".cyan());
    }

    fn on_debate_end(&self, phase: DebatePhase, _verdict: Option<&Verdict>) {
        if phase == DebatePhase::Aborted {
            eprintln!("  {} aborted", "x".red());
        }
        eprintln!();
    }
}

//! Progress notification port
//!
//! Defines the interface for reporting progress while a debate runs.

use debate_domain::{DebatePhase, Persona, Turn, Verdict};

/// Callback for progress updates during a debate
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first turn
    fn on_debate_start(&self, topic: &str, total_turns: usize);

    /// Called before a persona node is invoked
    fn on_turn_start(&self, persona: Persona, index: usize);

    /// Called after a turn has been recorded
    fn on_turn_complete(&self, turn: &Turn);

    /// Called when a node attempt failed and will be retried
    fn on_retry(&self, _node: &str, _attempt: usize, _error: &str) {}

    /// Called before the judge node is invoked
    fn on_judging_start(&self) {}

    /// Called when the debate reaches a terminal phase
    fn on_debate_end(&self, phase: DebatePhase, verdict: Option<&Verdict>);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_debate_start(&self, _topic: &str, _total_turns: usize) {}
    fn on_turn_start(&self, _persona: Persona, _index: usize) {}
    fn on_turn_complete(&self, _turn: &Turn) {}
    fn on_debate_end(&self, _phase: DebatePhase, _verdict: Option<&Verdict>) {}
}

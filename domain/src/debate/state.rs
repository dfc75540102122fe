//! Debate state and phase machine

use crate::core::error::DomainError;
use crate::core::persona::Persona;
use crate::core::topic::Topic;
use crate::debate::config::DebateConfig;
use crate::debate::memory::MemoryStore;
use crate::debate::turn::Turn;
use crate::debate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Phase of a debate session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "speaker", rename_all = "snake_case")]
pub enum DebatePhase {
    Init,
    Turn(Persona),
    Judging,
    Done,
    Aborted,
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebatePhase::Init => write!(f, "init"),
            DebatePhase::Turn(p) => write!(f, "turn({})", p),
            DebatePhase::Judging => write!(f, "judging"),
            DebatePhase::Done => write!(f, "done"),
            DebatePhase::Aborted => write!(f, "aborted"),
        }
    }
}

/// Shared state threaded through the debate (Entity)
///
/// Only the orchestrator mutates it, and only through [`record_turn`] and
/// [`record_verdict`], which enforce the turn-order and termination
/// invariants.
///
/// [`record_turn`]: DebateState::record_turn
/// [`record_verdict`]: DebateState::record_verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateState {
    topic: Topic,
    memory: MemoryStore,
    current_speaker: Persona,
    turns_remaining: usize,
    verdict: Option<Verdict>,
}

impl DebateState {
    pub fn new(topic: Topic, config: &DebateConfig) -> Self {
        Self {
            topic,
            memory: MemoryStore::new(),
            current_speaker: config.starting_persona,
            turns_remaining: config.max_turns,
            verdict: None,
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn turns(&self) -> &[Turn] {
        self.memory.all()
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn current_speaker(&self) -> Persona {
        self.current_speaker
    }

    pub fn turns_remaining(&self) -> usize {
        self.turns_remaining
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Index the next recorded turn must carry
    pub fn next_index(&self) -> usize {
        self.memory.len()
    }

    /// Phase implied by the state alone (never `Aborted`)
    pub fn phase(&self) -> DebatePhase {
        if self.verdict.is_some() {
            DebatePhase::Done
        } else if self.turns_remaining == 0 {
            DebatePhase::Judging
        } else {
            DebatePhase::Turn(self.current_speaker)
        }
    }

    /// Append a persona's turn, then advance the speaker and the budget.
    pub fn record_turn(&mut self, turn: Turn) -> Result<(), DomainError> {
        if self.verdict.is_some() {
            return Err(DomainError::VerdictAlreadySet);
        }
        if self.turns_remaining == 0 {
            return Err(DomainError::TurnBudgetExhausted);
        }
        if turn.speaker != self.current_speaker {
            return Err(DomainError::TurnOrderViolation {
                expected: self.current_speaker,
                actual: turn.speaker,
            });
        }
        let expected = self.next_index();
        if turn.index != expected {
            return Err(DomainError::NonContiguousTurn {
                expected,
                actual: turn.index,
            });
        }

        self.memory.append(turn);
        self.turns_remaining -= 1;
        self.current_speaker = self.current_speaker.other();
        Ok(())
    }

    /// Set the terminal verdict. Allowed once, after the last turn.
    pub fn record_verdict(&mut self, verdict: Verdict) -> Result<(), DomainError> {
        if self.verdict.is_some() {
            return Err(DomainError::VerdictAlreadySet);
        }
        if self.turns_remaining > 0 {
            return Err(DomainError::VerdictBeforeDebateEnd {
                remaining: self.turns_remaining,
            });
        }
        self.verdict = Some(verdict);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(max_turns: usize, start: Persona) -> DebateState {
        let config = DebateConfig::default()
            .with_max_turns(max_turns)
            .with_starting_persona(start);
        DebateState::new(Topic::new("Is free will an illusion?").unwrap(), &config)
    }

    #[test]
    fn test_initial_state() {
        let s = state(4, Persona::Philosopher);
        assert!(s.turns().is_empty());
        assert_eq!(s.current_speaker(), Persona::Philosopher);
        assert_eq!(s.turns_remaining(), 4);
        assert!(s.verdict().is_none());
        assert_eq!(s.phase(), DebatePhase::Turn(Persona::Philosopher));
    }

    #[test]
    fn test_record_turn_alternates_and_decrements() {
        let mut s = state(4, Persona::Scientist);
        s.record_turn(Turn::new(Persona::Scientist, "s0", 0)).unwrap();
        assert_eq!(s.current_speaker(), Persona::Philosopher);
        assert_eq!(s.turns_remaining(), 3);
        s.record_turn(Turn::new(Persona::Philosopher, "p1", 1)).unwrap();
        assert_eq!(s.current_speaker(), Persona::Scientist);
        assert_eq!(s.turns_remaining(), 2);
        assert_eq!(s.turns().len(), 2);
    }

    #[test]
    fn test_wrong_speaker_rejected() {
        let mut s = state(4, Persona::Scientist);
        let err = s
            .record_turn(Turn::new(Persona::Philosopher, "out of turn", 0))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::TurnOrderViolation {
                expected: Persona::Scientist,
                actual: Persona::Philosopher,
            }
        );
        assert!(s.turns().is_empty());
        assert_eq!(s.turns_remaining(), 4);
    }

    #[test]
    fn test_non_contiguous_index_rejected() {
        let mut s = state(4, Persona::Scientist);
        let err = s
            .record_turn(Turn::new(Persona::Scientist, "skip", 3))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::NonContiguousTurn {
                expected: 0,
                actual: 3
            }
        );
    }

    #[test]
    fn test_budget_exhaustion_moves_to_judging() {
        let mut s = state(2, Persona::Scientist);
        s.record_turn(Turn::new(Persona::Scientist, "a", 0)).unwrap();
        s.record_turn(Turn::new(Persona::Philosopher, "b", 1)).unwrap();
        assert_eq!(s.turns_remaining(), 0);
        assert_eq!(s.phase(), DebatePhase::Judging);
        assert_eq!(
            s.record_turn(Turn::new(Persona::Scientist, "c", 2)),
            Err(DomainError::TurnBudgetExhausted)
        );
    }

    #[test]
    fn test_verdict_only_after_last_turn() {
        let mut s = state(2, Persona::Scientist);
        assert_eq!(
            s.record_verdict(Verdict::new(Persona::Scientist, "early")),
            Err(DomainError::VerdictBeforeDebateEnd { remaining: 2 })
        );
        s.record_turn(Turn::new(Persona::Scientist, "a", 0)).unwrap();
        s.record_turn(Turn::new(Persona::Philosopher, "b", 1)).unwrap();
        s.record_verdict(Verdict::new(Persona::Philosopher, "clearer"))
            .unwrap();
        assert_eq!(s.phase(), DebatePhase::Done);
        assert_eq!(
            s.record_verdict(Verdict::new(Persona::Scientist, "again")),
            Err(DomainError::VerdictAlreadySet)
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(DebatePhase::Turn(Persona::Scientist).to_string(), "turn(Scientist)");
    }
}

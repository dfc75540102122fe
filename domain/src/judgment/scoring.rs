//! Heuristic transcript scoring.
//!
//! A diagnostic score card exported next to the verdict. It rewards new
//! vocabulary and reasonable length and penalises verbatim repetition.
//! It never decides the winner.

use crate::core::persona::Persona;
use crate::debate::turn::Turn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const REPEAT_PENALTY: f64 = 5.0;

/// Score of a single turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnScore {
    pub index: usize,
    pub round: usize,
    pub speaker: Persona,
    pub score: f64,
}

/// Per-turn scores and per-persona totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub scientist: f64,
    pub philosopher: f64,
    pub per_turn: Vec<TurnScore>,
}

impl ScoreCard {
    pub fn compute(turns: &[Turn]) -> Self {
        let mut card = ScoreCard::default();
        let mut seen: HashSet<String> = HashSet::new();

        for turn in turns {
            let tokens: HashSet<String> = turn
                .text
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let novelty = tokens.difference(&seen).count() as f64;
            let words = turn.text.split_whitespace().count() as f64;
            let length_score = (words / 5.0).clamp(1.0, 10.0);
            let repeated = turns
                .iter()
                .any(|other| other.index != turn.index && other.text == turn.text);
            let penalty = if repeated { REPEAT_PENALTY } else { 0.0 };
            let score = novelty + length_score - penalty;

            match turn.speaker {
                Persona::Scientist => card.scientist += score,
                Persona::Philosopher => card.philosopher += score,
            }
            card.per_turn.push(TurnScore {
                index: turn.index,
                round: turn.round(),
                speaker: turn.speaker,
                score,
            });
            seen.extend(tokens);
        }

        card
    }

    pub fn total_for(&self, persona: Persona) -> f64 {
        match persona {
            Persona::Scientist => self.scientist,
            Persona::Philosopher => self.philosopher,
        }
    }

    /// Persona with the higher total, or `None` on a tie
    pub fn leader(&self) -> Option<Persona> {
        if self.scientist > self.philosopher {
            Some(Persona::Scientist)
        } else if self.philosopher > self.scientist {
            Some(Persona::Philosopher)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript() {
        let card = ScoreCard::compute(&[]);
        assert_eq!(card.scientist, 0.0);
        assert_eq!(card.philosopher, 0.0);
        assert!(card.per_turn.is_empty());
        assert_eq!(card.leader(), None);
    }

    #[test]
    fn test_novelty_and_length() {
        // 3 new tokens, 3 words -> length clamps to 1.0
        let turns = vec![
            Turn::new(Persona::Scientist, "data beats dogma", 0),
            Turn::new(Persona::Philosopher, "data is dogma", 1),
        ];
        let card = ScoreCard::compute(&turns);
        assert_eq!(card.per_turn[0].score, 4.0);
        // only "is" is new
        assert_eq!(card.per_turn[1].score, 2.0);
        assert_eq!(card.leader(), Some(Persona::Scientist));
    }

    #[test]
    fn test_repetition_penalised() {
        let turns = vec![
            Turn::new(Persona::Scientist, "same point", 0),
            Turn::new(Persona::Philosopher, "other view", 1),
            Turn::new(Persona::Scientist, "same point", 2),
        ];
        let card = ScoreCard::compute(&turns);
        assert_eq!(card.per_turn[0].score, 2.0 + 1.0 - 5.0);
        assert_eq!(card.per_turn[2].score, 0.0 + 1.0 - 5.0);
        assert_eq!(card.total_for(Persona::Scientist), -6.0);
        assert_eq!(card.per_turn[2].round, 2);
    }
}

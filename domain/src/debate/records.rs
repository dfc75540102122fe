//! Export records for the transcript and the verdict.
//!
//! These are the plain shapes handed to persistence adapters. The
//! transcript record round-trips back into a [`Turn`].

use crate::core::persona::Persona;
use crate::debate::turn::Turn;
use crate::debate::verdict::Verdict;
use crate::judgment::scoring::ScoreCard;
use serde::{Deserialize, Serialize};

/// One exchange in the exported transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub index: usize,
    pub speaker: Persona,
    pub text: String,
}

impl From<&Turn> for TranscriptRecord {
    fn from(turn: &Turn) -> Self {
        Self {
            index: turn.index,
            speaker: turn.speaker,
            text: turn.text.clone(),
        }
    }
}

impl From<TranscriptRecord> for Turn {
    fn from(record: TranscriptRecord) -> Self {
        Turn::new(record.speaker, record.text, record.index)
    }
}

/// Build transcript records for every turn, in order
pub fn transcript_records(turns: &[Turn]) -> Vec<TranscriptRecord> {
    turns.iter().map(TranscriptRecord::from).collect()
}

/// Exported verdict with diagnostic scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub topic: String,
    pub winner: Persona,
    pub justification: String,
    pub scores: ScoreCard,
}

impl VerdictRecord {
    pub fn new(topic: impl Into<String>, verdict: &Verdict, scores: ScoreCard) -> Self {
        Self {
            topic: topic.into(),
            winner: verdict.winner,
            justification: verdict.justification.clone(),
            scores,
        }
    }
}

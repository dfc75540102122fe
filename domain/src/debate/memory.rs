//! Append-only memory of debate turns

use crate::core::persona::Persona;
use crate::debate::turn::Turn;
use serde::{Deserialize, Serialize};

/// Ordered log of turns consulted by every node
///
/// There is no API for deleting or reordering entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    turns: Vec<Turn>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Read-only view of every turn, in order
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent turn spoken by `persona`
    pub fn last_by(&self, persona: Persona) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker == persona)
    }

    /// Short digest of a persona's last three arguments.
    ///
    /// Arguments are joined with `" | "`; output longer than `max_len`
    /// characters is cut and terminated with `"..."`.
    pub fn summary_for(&self, persona: Persona, max_len: usize) -> String {
        let parts: Vec<&str> = self
            .turns
            .iter()
            .filter(|t| t.speaker == persona)
            .map(|t| t.text.as_str())
            .collect();
        let recent = &parts[parts.len().saturating_sub(3)..];
        let summary = recent.join(" | ");

        if summary.chars().count() <= max_len {
            return summary;
        }
        let keep = max_len.saturating_sub(3);
        let mut cut: String = summary.chars().take(keep).collect();
        cut.push_str("...");
        cut
    }
}

impl FromIterator<Turn> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

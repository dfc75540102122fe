//! Turn entity

use crate::core::persona::Persona;
use serde::{Deserialize, Serialize};

/// One persona's single contribution to the transcript
///
/// Immutable once appended to the memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Persona,
    pub text: String,
    pub index: usize,
}

impl Turn {
    pub fn new(speaker: Persona, text: impl Into<String>, index: usize) -> Self {
        Self {
            speaker,
            text: text.into(),
            index,
        }
    }

    /// 1-based round number; a round is one exchange between both personas
    pub fn round(&self) -> usize {
        self.index / 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_numbering() {
        assert_eq!(Turn::new(Persona::Scientist, "a", 0).round(), 1);
        assert_eq!(Turn::new(Persona::Philosopher, "b", 1).round(), 1);
        assert_eq!(Turn::new(Persona::Scientist, "c", 2).round(), 2);
        assert_eq!(Turn::new(Persona::Philosopher, "d", 5).round(), 3);
    }
}

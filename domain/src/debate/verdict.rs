//! Verdict value object

use crate::core::persona::Persona;
use serde::{Deserialize, Serialize};

/// The judge's final declaration
///
/// Created exactly once at the end of a debate; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub winner: Persona,
    pub justification: String,
}

impl Verdict {
    pub fn new(winner: Persona, justification: impl Into<String>) -> Self {
        Self {
            winner,
            justification: justification.into(),
        }
    }
}

//! Persona value object
//!
//! The debate has exactly two participants. Each persona carries a fixed
//! argumentative framing that the prompt templates pick up.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the two fixed debate participants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Argues from evidence, measurement and empirical results
    #[default]
    Scientist,
    /// Argues from concepts, values and ethics
    Philosopher,
}

impl Persona {
    /// Both personas, in canonical order
    pub const ALL: [Persona; 2] = [Persona::Scientist, Persona::Philosopher];

    /// The opposing persona
    pub fn other(self) -> Persona {
        match self {
            Persona::Scientist => Persona::Philosopher,
            Persona::Philosopher => Persona::Scientist,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Scientist => "scientist",
            Persona::Philosopher => "philosopher",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Scientist => "Scientist",
            Persona::Philosopher => "Philosopher",
        }
    }

    /// Persona-specific framing instruction
    pub fn framing(&self) -> &'static str {
        match self {
            Persona::Scientist => {
                "You argue as a scientist. Ground every claim in evidence, data, \
                 experiments and measurable outcomes. Prefer falsifiable statements."
            }
            Persona::Philosopher => {
                "You argue as a philosopher. Reason from concepts, definitions, \
                 values and ethical consequences. Expose hidden assumptions."
            }
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scientist" => Ok(Persona::Scientist),
            "philosopher" => Ok(Persona::Philosopher),
            other => Err(format!(
                "unknown persona '{}' (expected 'scientist' or 'philosopher')",
                other
            )),
        }
    }
}

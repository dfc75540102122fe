//! Domain layer for persona-debate
//!
//! This crate contains the core entities, value objects and invariants of a
//! two-persona debate. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Persona**: Scientist or Philosopher, each with a fixed framing
//! - **Turn**: one persona's contribution, appended to the [`MemoryStore`]
//! - **DebateState**: the state the orchestrator threads through the flow
//! - **Verdict**: the judge's terminal winner + justification

pub mod config;
pub mod core;
pub mod debate;
pub mod graph;
pub mod judgment;
pub mod prompt;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, persona::Persona, topic::Topic};
pub use debate::{
    config::{ArgumentStyle, DebateConfig},
    memory::MemoryStore,
    records::{TranscriptRecord, VerdictRecord, transcript_records},
    state::{DebatePhase, DebateState},
    turn::Turn,
    verdict::Verdict,
};
pub use graph::{GraphDescription, GraphEdge, GraphNode};
pub use judgment::{ScoreCard, TurnScore, parse_verdict};
pub use prompt::PromptTemplate;

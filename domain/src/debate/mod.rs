//! Debate subdomain
//!
//! - [`turn::Turn`]: one persona's contribution
//! - [`memory::MemoryStore`]: append-only turn log
//! - [`state::DebateState`]: state owned by the orchestrator
//! - [`verdict::Verdict`]: terminal judgment
//! - [`config::DebateConfig`]: validated session settings
//! - [`records`]: export shapes for transcript and verdict

pub mod config;
pub mod memory;
pub mod records;
pub mod state;
pub mod turn;
pub mod verdict;

//! Judgment subdomain
//!
//! Turning judge output into a verdict, plus the diagnostic score card.

pub mod parsing;
pub mod scoring;

pub use parsing::parse_verdict;
pub use scoring::{ScoreCard, TurnScore};

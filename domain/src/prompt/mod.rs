//! Prompt domain
//!
//! Templates for the persona and judge nodes.

mod template;

pub use template::{OWN_SUMMARY_MAX_LEN, PromptTemplate};

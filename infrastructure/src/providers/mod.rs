//! Text generator adapters implementing the
//! [`LlmGateway`](debate_application::LlmGateway) port.
//!
//! - [`OpenAiCompatibleGateway`] talks to any `/v1/chat/completions` server
//! - [`OfflineGateway`] answers deterministically without a network

mod offline;
mod openai;

pub use offline::OfflineGateway;
pub use openai::OpenAiCompatibleGateway;

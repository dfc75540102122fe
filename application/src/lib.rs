//! Application layer for persona-debate
//!
//! This crate contains the orchestrator use case, port definitions, and
//! execution parameters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    debate_exporter::{DebateExporter, ExportError, MemoryExporter, NoExport},
    llm_gateway::{GatewayError, GenerationOptions, GenerationRequest, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_debate::{
    DebateOutcome, JudgeNode, PersonaNode, RunDebateError, RunDebateInput, RunDebateUseCase,
};
pub use use_cases::shared::{Generator, NodeError};

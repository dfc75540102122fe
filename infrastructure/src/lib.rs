//! Infrastructure layer for persona-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDebateConfig, FileGenerationConfig,
    FileOutputConfig, FileOutputFormat, FileProviderKind,
};
pub use export::{FileDebateExporter, read_transcript};
pub use logging::JsonlConversationLogger;
pub use providers::{OfflineGateway, OpenAiCompatibleGateway};

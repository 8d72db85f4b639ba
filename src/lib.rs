// AI CheckMate - contract risk analysis pipeline

pub mod classify;
pub mod config;
pub mod extract;
pub mod llm;
pub mod messages;
pub mod pipeline;
pub mod transport;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use config::Config;
pub use pipeline::IngestionPipeline;
pub use types::{AppError, AppResult, DocumentKind, FailureReason, PipelineOutcome};

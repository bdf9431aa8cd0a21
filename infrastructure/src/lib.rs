//! Infrastructure layer for consumer-interview
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod persistence;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGenerationConfig, FileInterviewConfig,
    FileLoggingConfig, FilePersistenceConfig,
};
pub use gemini::{GeminiClient, GeminiSettings};
pub use logging::JsonlTranscriptLogger;
pub use persistence::JsonFileStore;

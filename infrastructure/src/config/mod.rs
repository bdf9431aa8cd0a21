//! Configuration file loading for consumer-interview
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `GEMINI_API_KEY`, `INTERVIEW_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./interview.toml` or `./.interview.toml`
//! 4. Global: `$XDG_CONFIG_HOME/consumer-interview/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGenerationConfig, FileInterviewConfig,
    FileLoggingConfig, FilePersistenceConfig,
};
pub use loader::ConfigLoader;

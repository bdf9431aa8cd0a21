//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout exactly. They are converted
//! into [`InterviewParams`] and [`GeminiSettings`] once validated.

use crate::gemini::GeminiSettings;
use interview_application::InterviewParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("generation.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("interview.max_attempts cannot be 0")]
    InvalidMaxAttempts,

    #[error("no API key configured (set GEMINI_API_KEY or generation.api_key)")]
    MissingApiKey,
}

/// Raw generation backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Base URL of the models collection
    pub api_url: String,
    /// Model identifier appended to `api_url`
    pub model: String,
    /// API key; usually supplied through `GEMINI_API_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Wall-clock timeout for one request
    pub timeout_seconds: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl FileGenerationConfig {
    /// Build client settings; fails when no API key is configured.
    pub fn gemini_settings(&self) -> Result<GeminiSettings, ConfigValidationError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigValidationError::MissingApiKey)?;
        Ok(GeminiSettings {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(self.timeout_seconds),
        })
    }
}

/// Raw interview loop configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInterviewConfig {
    /// Total generation attempts per turn
    pub max_attempts: u32,
    /// Linear backoff unit between attempts, in milliseconds
    pub retry_base_delay_ms: u64,
    /// Recent turns shown to the assessment agent
    pub context_window: usize,
}

impl Default for FileInterviewConfig {
    fn default() -> Self {
        let params = InterviewParams::default();
        Self {
            max_attempts: params.max_attempts,
            retry_base_delay_ms: params.retry_base_delay.as_millis() as u64,
            context_window: params.context_window,
        }
    }
}

/// Raw persistence configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersistenceConfig {
    /// Write session fields to disk
    pub enabled: bool,
    /// Path of the session field file (defaults to the data directory)
    pub state_file: Option<PathBuf>,
}

impl Default for FilePersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_file: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL interview transcript (disabled when unset)
    pub transcript_file: Option<PathBuf>,
    /// Diagnostic log file (defaults to the data directory)
    pub log_file: Option<PathBuf>,
}

/// Complete configuration file structure
///
/// ```toml
/// [generation]
/// model = "gemini-2.0-flash-exp"
/// timeout_seconds = 30
///
/// [interview]
/// max_attempts = 3
/// retry_base_delay_ms = 1000
///
/// [persistence]
/// state_file = "./session.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generation: FileGenerationConfig,
    pub interview: FileInterviewConfig,
    pub persistence: FilePersistenceConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.generation.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.generation.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.interview.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }

        Ok(())
    }

    /// Interview loop parameters for the application layer
    pub fn interview_params(&self) -> InterviewParams {
        InterviewParams::default()
            .with_max_attempts(self.interview.max_attempts)
            .with_retry_base_delay(Duration::from_millis(self.interview.retry_base_delay_ms))
            .with_context_window(self.interview.context_window)
    }
}

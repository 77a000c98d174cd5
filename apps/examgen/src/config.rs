//! apps/examgen/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// The credential for the generation service. Deliberately optional here:
    /// its absence only becomes an error when a generation is attempted.
    pub openai_api_key: Option<String>,
    pub exam_model: String,
    pub log_level: Level,
    pub export_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let exam_model =
            std::env::var("EXAMGEN_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        // Logs go to stderr, so keep the default quiet enough not to distract
        // from the interactive surface.
        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let export_path = std::env::var("EXAMGEN_EXPORT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cs-exam-generated.txt"));

        Ok(Self {
            openai_api_key,
            exam_model,
            log_level,
            export_path,
        })
    }
}

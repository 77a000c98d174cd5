//! apps/examgen/src/error.rs
//!
//! Defines the primary error type for the `examgen` binary.
//!
//! Generation failures never appear here: the state machine absorbs them
//! into its `Error` phase. This type covers the failures that end the
//! program itself.

use crate::config::ConfigError;

/// The primary error type for the `examgen` app.
///
/// File failures (export save, material load) are reported in place and do
/// not end the program, so they have no variant here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure of an interactive terminal prompt.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_fatal_failure_source() {
        let config: AppError = ConfigError::InvalidValue(
            "RUST_LOG".to_string(),
            "'loud' is not a valid log level".to_string(),
        )
        .into();
        assert!(matches!(config, AppError::Config(_)));

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        let prompt: AppError = dialoguer::Error::from(io).into();
        assert!(matches!(prompt, AppError::Prompt(_)));
    }
}

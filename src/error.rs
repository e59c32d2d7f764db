//! Error types for the safechain CLI.
//!
//! The core never returns these: every request ends in an `Outcome`. These
//! cover the shell around it (arguments, configuration, startup).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for safechain operations outside the core.
#[derive(Error, Debug)]
pub enum SafechainError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// Configuration file or environment is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The AI service could not be set up.
    #[error("AI service error: {0}")]
    AiError(String),
}

impl SafechainError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SafechainError::UserError(_) => exit_codes::USER_ERROR,
            SafechainError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            SafechainError::AiError(_) => exit_codes::SYSTEM_FAILURE,
        }
    }
}

/// Result type alias for safechain operations.
pub type Result<T> = std::result::Result<T, SafechainError>;

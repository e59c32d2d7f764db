//! AI text service seam.
//!
//! The core treats the language model as an opaque `prompt -> text`
//! function. This module provides:
//!
//! - **TextGenerator**: the one-capability trait the intent parser depends on
//! - **Gemini**: a blocking HTTP client for the Gemini `generateContent` API
//! - **Models**: the one-time model selection performed at startup
//!
//! Model selection happens once in `main` and the result is passed into the
//! client constructor; nothing here holds process-wide state.

mod gemini;
mod models;

pub use gemini::{DEFAULT_BASE_URL, GeminiCatalog, GeminiClient};
pub use models::{ModelSelection, select_model};

use thiserror::Error;

/// Failures talking to the AI service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// The HTTP request could not be sent or its body not read.
    #[error("request to AI service failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("AI service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but the body was not the expected shape.
    #[error("unexpected AI service response: {0}")]
    InvalidResponse(String),

    /// The service answered with no text candidates.
    #[error("AI service returned no text")]
    EmptyResponse,

    /// No AI client was set up for this run.
    #[error("AI service is not available in this mode")]
    Unavailable,
}

/// Something that turns a prompt into raw text.
///
/// No schema is enforced on the reply; callers must parse defensively.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        (**self).generate(prompt)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        (**self).generate(prompt)
    }
}

/// `None` stands for commands that run without the AI service.
impl<T: TextGenerator> TextGenerator for Option<T> {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        match self {
            Some(generator) => generator.generate(prompt),
            None => Err(AiError::Unavailable),
        }
    }
}

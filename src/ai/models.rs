//! One-time model selection.
//!
//! An explicitly configured model always wins. Otherwise the service's model
//! list is scanned for the first Gemini model that supports
//! `generateContent`. If the list is empty or cannot be fetched, the
//! fallback model is used so startup never fails on this step.

use super::AiError;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Model used when nothing better can be determined.
pub const FALLBACK_MODEL: &str = "gemini-pro";

const REQUIRED_METHOD: &str = "generateContent";

/// A model advertised by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Full resource name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    /// Generation methods the model supports.
    pub supported_methods: Vec<String>,
}

/// Source of model metadata.
pub trait ModelCatalog {
    fn list_models(&self) -> Result<Vec<ModelInfo>, AiError>;
}

/// How the active model was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Set in configuration or environment.
    Configured,
    /// First compatible model from the service's list.
    Discovered,
    /// No compatible model found, or listing failed.
    Fallback,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSource::Configured => write!(f, "configured"),
            SelectionSource::Discovered => write!(f, "discovered"),
            SelectionSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The result of startup model selection, threaded into the AI client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSelection {
    pub model: String,
    pub source: SelectionSource,
}

impl ModelSelection {
    pub fn configured(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            source: SelectionSource::Configured,
        }
    }

    pub fn fallback() -> Self {
        Self {
            model: FALLBACK_MODEL.to_string(),
            source: SelectionSource::Fallback,
        }
    }
}

/// Pick the model to use for the lifetime of the process.
pub fn select_model<C: ModelCatalog + ?Sized>(configured: Option<&str>, catalog: &C) -> ModelSelection {
    if let Some(model) = configured.map(str::trim).filter(|m| !m.is_empty()) {
        info!(model, "using configured model");
        return ModelSelection::configured(model);
    }

    match catalog.list_models() {
        Ok(models) => {
            let found = models.into_iter().find(|m| {
                m.name.contains("gemini") && m.supported_methods.iter().any(|s| s == REQUIRED_METHOD)
            });
            match found {
                Some(m) => {
                    info!(model = %m.name, "selected model");
                    ModelSelection {
                        model: m.name,
                        source: SelectionSource::Discovered,
                    }
                }
                None => {
                    warn!(fallback = FALLBACK_MODEL, "no compatible model found");
                    ModelSelection::fallback()
                }
            }
        }
        Err(e) => {
            warn!(error = %e, fallback = FALLBACK_MODEL, "model listing failed");
            ModelSelection::fallback()
        }
    }
}

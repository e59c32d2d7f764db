//! Blocking client for the Gemini REST API.

use super::models::{ModelCatalog, ModelInfo, ModelSelection};
use super::{AiError, TextGenerator};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

fn build_http(timeout: Option<Duration>) -> Result<Client, AiError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AiError::Request(e.to_string()))
}

fn check_status(response: Response) -> Result<Response, AiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(AiError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

/// Resource name in `models/<id>` form.
fn resource_name(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Text generation against a single, already-selected model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client for `selection`.
    ///
    /// `timeout` of `None` means requests may block indefinitely.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        selection: &ModelSelection,
        timeout: Option<Duration>,
    ) -> Result<Self, AiError> {
        Ok(Self {
            http: build_http(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: resource_name(&selection.model),
        })
    }

    /// Resource name of the model this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        debug!(model = %self.model, "sending prompt");
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| AiError::Request(e.to_string()))?;

        let body: GenerateResponse = check_status(response)?
            .json()
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        extract_text(body)
    }
}

/// Model listing, used once at startup.
#[derive(Debug, Clone)]
pub struct GeminiCatalog {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeminiCatalog {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AiError> {
        Ok(Self {
            http: build_http(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

impl ModelCatalog for GeminiCatalog {
    fn list_models(&self) -> Result<Vec<ModelInfo>, AiError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/models", self.base_url))
                .header(API_KEY_HEADER, &self.api_key);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request.send().map_err(|e| AiError::Request(e.to_string()))?;
            let page: ListModelsResponse = check_status(response)?
                .json()
                .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: m.name,
                supported_methods: m.supported_generation_methods,
            }));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, AiError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ApiModel>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

//! Free text -> `Intent`.
//!
//! The parser never fails: any problem reaching the AI service or reading
//! its reply becomes an `error` intent with a reason, which the dispatcher
//! turns into a system error outcome without touching the ledger.

use super::prompt::build_prompt;
use super::{Intent, names};
use crate::ai::TextGenerator;
use crate::role::Role;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

/// Reason attached to the `error` intent when the reply is not usable JSON.
pub const PARSE_FAILURE_REASON: &str = "parse failure";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*(.*?)\s*```$").expect("code fence pattern is valid")
});

/// Builds role-scoped prompts and turns replies into intents.
#[derive(Debug, Clone)]
pub struct IntentParser<G> {
    generator: G,
}

impl<G: TextGenerator> IntentParser<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Extract the intent behind `text` for a caller with `role`.
    ///
    /// Always returns a well-formed intent. Each call consults the AI service
    /// exactly once and may not be deterministic.
    pub fn parse_intent(&self, text: &str, role: Role) -> Intent {
        let prompt = build_prompt(text, role);
        debug!(%role, prompt_len = prompt.len(), "requesting intent");

        let raw = match self.generator.generate(&prompt) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "AI service call failed");
                return Intent::error(e.to_string());
            }
        };

        match parse_response(&raw) {
            Some(intent) => {
                info!(%role, intent = %intent.name, "intent extracted");
                intent
            }
            None => {
                warn!(reply = %raw, "AI reply is not a JSON object");
                Intent::error(PARSE_FAILURE_REASON)
            }
        }
    }
}

/// Parse a raw AI reply into an intent.
///
/// Surrounding code fences are stripped. If the remaining text is not a JSON
/// object, the outermost `{ ... }` span inside it is tried, which tolerates
/// prose before or after the object. A missing `intent` becomes `unknown`,
/// missing or non-object `args` become an empty map.
pub fn parse_response(raw: &str) -> Option<Intent> {
    let text = strip_code_fence(raw);

    let value = serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
        .or_else(|| embedded_object(text))?;

    let Value::Object(mut object) = value else {
        return None;
    };

    let name = match object.remove("intent") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => names::UNKNOWN.to_string(),
    };
    let args = match object.remove("args") {
        Some(Value::Object(args)) => args,
        _ => Default::default(),
    };

    Some(Intent { name, args })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    CODE_FENCE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str())
}

fn embedded_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&text[start..=end])
        .ok()
        .filter(Value::is_object)
}

//! Structured intents extracted from free text.
//!
//! An intent is a name from a small documented vocabulary plus a loose
//! argument map. Argument values are JSON values coerced to strings on read,
//! and no key is guaranteed to be present: consumers substitute defaults.
//!
//! - **Parser**: builds the role-scoped prompt and turns the AI reply into an `Intent`
//! - **Prompt**: the per-role instruction block and example outputs

mod parser;
mod prompt;

pub use parser::IntentParser;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Intent names understood by the dispatcher.
pub mod names {
    pub const CREATE_ASSET: &str = "createAsset";
    pub const UPDATE_STAGE: &str = "updateStage";
    pub const DELETE_ASSET: &str = "deleteAsset";
    pub const QUERY_ASSET: &str = "queryAsset";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const ERROR: &str = "error";
    pub const UNKNOWN: &str = "unknown";

    /// Intents that write to the ledger.
    pub const WRITES: [&str; 3] = [CREATE_ASSET, UPDATE_STAGE, DELETE_ASSET];

    /// Whether `name` is one of the ledger-writing intents.
    pub fn is_write(name: &str) -> bool {
        WRITES.contains(&name)
    }
}

/// An action extracted from a single user utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name (e.g. `createAsset`). Unknown names are carried unchanged.
    #[serde(rename = "intent")]
    pub name: String,

    /// Arguments keyed by field name (e.g. `assetId`).
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl Intent {
    /// Create an intent with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Map::new(),
        }
    }

    /// Create an `error` intent carrying `reason`.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(names::ERROR).with_arg("reason", reason.into())
    }

    /// Add an argument.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Read an argument as a string.
    ///
    /// Strings are returned as-is, other scalars use their JSON text.
    /// `null` and absent keys are `None`.
    pub fn arg(&self, key: &str) -> Option<String> {
        arg_from(&self.args, key)
    }

    /// Read an argument, substituting `default` when missing.
    pub fn arg_or(&self, key: &str, default: &str) -> String {
        self.arg(key).unwrap_or_else(|| default.to_string())
    }

    /// The `assetId` argument, or `N/A`.
    pub fn asset_id(&self) -> String {
        self.arg_or("assetId", "N/A")
    }
}

/// String coercion shared by `Intent::arg` and executors that only see args.
pub(crate) fn arg_from(args: &Map<String, Value>, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

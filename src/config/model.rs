//! Config struct definition and default implementation.

use crate::ai::DEFAULT_BASE_URL;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for safechain.
///
/// This struct represents the contents of `safechain.yaml`. Unknown fields
/// are ignored for forward compatibility and every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Ledger settings
    // =========================================================================
    /// Command line of the ledger helper; the positional form is appended.
    #[serde(default = "default_ledger_command")]
    pub ledger_command: String,

    /// Working directory for the ledger helper (default: current directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_working_dir: Option<PathBuf>,

    /// Extra environment variables for the ledger helper.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ledger_environment: BTreeMap<String, String>,

    // =========================================================================
    // AI settings
    // =========================================================================
    #[serde(default)]
    pub ai: AiConfig,

    // =========================================================================
    // Session settings
    // =========================================================================
    /// Known users and their roles. Used to pick a role for `--user`; this
    /// is a convenience lookup, not authentication.
    #[serde(default)]
    pub users: BTreeMap<String, Role>,

    /// NDJSON audit log path (disabled when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_command: default_ledger_command(),
            ledger_working_dir: None,
            ledger_environment: BTreeMap::new(),
            ai: AiConfig::default(),
            users: BTreeMap::new(),
            events_file: None,
        }
    }
}

/// AI service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API root of the Gemini REST service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use. When unset, the first compatible model is discovered at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout. Unset means requests may block indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: None,
            api_key_env: default_api_key_env(),
            timeout_seconds: None,
        }
    }
}

pub(crate) fn default_ledger_command() -> String {
    "./fabric_helper.sh".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

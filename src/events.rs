//! Append-only audit log of requests and their outcomes.
//!
//! Events are stored in NDJSON format (one JSON object per line). The log is
//! optional; when configured, every request handled by the assistant appends
//! one line, reads included.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `dispatch` (free-text request), `direct_submit` (structured
//!   write) or `direct_query` (structured read)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `role`: the caller's role, absent for structured reads
//! - `intent`: the intent name, when one was extracted
//! - `details`: freeform object, always carrying the outcome kind
//!
//! Failing to write an event never changes the outcome of a request; callers
//! log the failure and carry on.

use crate::error::{Result, SafechainError};
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Free text was parsed and dispatched.
    Dispatch,
    /// A structured command bypassed the parser but not the policy.
    DirectSubmit,
    /// A structured read; reads carry no role.
    DirectQuery,
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub details: Value,
}

impl Event {
    /// Create a new event.
    ///
    /// The timestamp is set to the current time and the actor is taken from
    /// the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            role: None,
            intent: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Override the actor (e.g. with the session's username).
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_intent(mut self, name: impl Into<String>) -> Self {
        self.intent = Some(name.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SafechainError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// NDJSON event file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event as a JSON line, creating the file and its parent
    /// directory if needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                SafechainError::UserError(format!(
                    "failed to create events directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                SafechainError::UserError(format!(
                    "failed to open events file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            SafechainError::UserError(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Read all events back, skipping blank lines.
    #[cfg(test)]
    pub fn read_all(&self) -> Result<Vec<Event>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SafechainError::UserError(format!(
                "failed to read events file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    SafechainError::UserError(format!("malformed event line: {}", e))
                })
            })
            .collect()
    }
}

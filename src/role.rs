//! Caller permission classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The caller's permission class.
///
/// A role is fixed for the lifetime of a session and passed by value into
/// the core. Anything that is not a recognized producer or consumer label
/// becomes `Unknown`, which the policy grants nothing. Deserialization goes
/// through `Role::parse`, so config files accept the same labels as `--role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    Producer,
    Consumer,
    Unknown,
}

impl Role {
    /// Parse a role label, case-insensitively.
    ///
    /// Accepts the English and Italian labels used by the ledger's operators.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "producer" | "produttore" => Role::Producer,
            "consumer" | "consumatore" => Role::Consumer,
            _ => Role::Unknown,
        }
    }

    /// Lowercase label passed to the ledger as the audit field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Consumer => "consumer",
            Role::Unknown => "unknown",
        }
    }

    /// All roles, in table order.
    pub fn all() -> [Role; 3] {
        [Role::Producer, Role::Consumer, Role::Unknown]
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::parse(&label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

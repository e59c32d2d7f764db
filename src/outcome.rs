//! Typed result of a dispatch and its rendered form.

use crate::exit_codes;
use serde::Serialize;
use std::fmt;

/// Exactly one outcome is produced per request. It is never retried or
/// modified, only rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The ledger accepted the write, or the query found a record.
    Success(String),
    /// The ledger refused a well-formed write.
    FabricError(String),
    /// The ledger or the AI service could not be reached, or the AI reply
    /// could not be interpreted.
    SystemError(String),
    /// The queried asset does not exist.
    NotFound(String),
    /// The caller's role does not permit the request.
    Unauthorized(String),
    /// The intent name is outside the routed vocabulary.
    Unrecognized(String),
}

impl Outcome {
    /// Stable snake_case tag, used in logs and the event log.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::FabricError(_) => "fabric_error",
            Outcome::SystemError(_) => "system_error",
            Outcome::NotFound(_) => "not_found",
            Outcome::Unauthorized(_) => "unauthorized",
            Outcome::Unrecognized(_) => "unrecognized",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Category-prefixed message for display.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// CLI exit code for one-shot commands. A missing record is an expected
    /// answer, not a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) | Outcome::NotFound(_) => exit_codes::SUCCESS,
            Outcome::Unauthorized(_) | Outcome::Unrecognized(_) => exit_codes::ACCESS_DENIED,
            Outcome::FabricError(_) => exit_codes::LEDGER_REJECTED,
            Outcome::SystemError(_) => exit_codes::SYSTEM_FAILURE,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(message) => write!(f, "SUCCESS: {}", message),
            Outcome::FabricError(message) => write!(f, "FABRIC ERROR: {}", message),
            Outcome::SystemError(message) => write!(f, "SYSTEM ERROR: {}", message),
            Outcome::NotFound(asset_id) => write!(f, "NOT FOUND: no record for {}.", asset_id),
            Outcome::Unauthorized(reason) => write!(f, "ACCESS DENIED: {}", reason),
            Outcome::Unrecognized(name) => {
                write!(f, "UNRECOGNIZED: request not understood or not supported ({}).", name)
            }
        }
    }
}

/// What a front end shows for one outcome, with the exit code a one-shot
/// command should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeText {
    pub text: String,
    pub exit_code: i32,
}

impl From<&Outcome> for OutcomeText {
    fn from(outcome: &Outcome) -> Self {
        Self {
            text: outcome.render(),
            exit_code: outcome.exit_code(),
        }
    }
}

impl From<Outcome> for OutcomeText {
    fn from(outcome: Outcome) -> Self {
        Self::from(&outcome)
    }
}

impl fmt::Display for OutcomeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_category_prefixes() {
        assert_eq!(
            Outcome::Success("Asset A1 created on the ledger.".to_string()).render(),
            "SUCCESS: Asset A1 created on the ledger."
        );
        assert_eq!(
            Outcome::FabricError("endorsement failed".to_string()).render(),
            "FABRIC ERROR: endorsement failed"
        );
        assert_eq!(
            Outcome::SystemError("No such file or directory".to_string()).render(),
            "SYSTEM ERROR: No such file or directory"
        );
        assert_eq!(Outcome::NotFound("A9".to_string()).render(), "NOT FOUND: no record for A9.");
        assert_eq!(
            Outcome::Unauthorized("role not permitted for this action".to_string()).render(),
            "ACCESS DENIED: role not permitted for this action"
        );
        assert!(
            Outcome::Unrecognized("transferAsset".to_string())
                .render()
                .starts_with("UNRECOGNIZED:")
        );
    }

    #[test]
    fn exit_codes_follow_category() {
        assert_eq!(Outcome::Success(String::new()).exit_code(), exit_codes::SUCCESS);
        assert_eq!(Outcome::NotFound("A1".to_string()).exit_code(), exit_codes::SUCCESS);
        assert_eq!(Outcome::Unauthorized(String::new()).exit_code(), exit_codes::ACCESS_DENIED);
        assert_eq!(Outcome::FabricError(String::new()).exit_code(), exit_codes::LEDGER_REJECTED);
        assert_eq!(Outcome::SystemError(String::new()).exit_code(), exit_codes::SYSTEM_FAILURE);
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let value = serde_json::to_value(Outcome::NotFound("A1".to_string())).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "not_found", "detail": "A1"}));
        assert_eq!(Outcome::NotFound("A1".to_string()).kind(), "not_found");
    }

    #[test]
    fn outcome_text_pairs_render_with_exit_code() {
        let text = OutcomeText::from(Outcome::FabricError("endorsement failed".to_string()));
        assert_eq!(text.text, "FABRIC ERROR: endorsement failed");
        assert_eq!(text.exit_code, exit_codes::LEDGER_REJECTED);
        assert_eq!(text.to_string(), text.text);
    }
}

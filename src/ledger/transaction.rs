//! Ledger writes: `create`, `update`, `delete`.

use super::classify::{classify_invocation_failure, classify_write};
use super::invoker::LedgerInvoker;
use crate::intent::{Intent, names};
use crate::outcome::Outcome;
use crate::role::Role;
use tracing::info;

/// A fully-defaulted write form ready to hand to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCommand {
    /// Positional arguments, verb first, role last.
    pub args: Vec<String>,
    /// Message reported if the ledger accepts the write.
    pub success_message: String,
}

impl WriteCommand {
    /// Map a write intent to its positional form.
    ///
    /// Every missing field gets a documented default, so a partially
    /// populated intent still produces an invocation. Returns `None` for
    /// intents that are not writes.
    pub fn from_intent(intent: &Intent, role: Role) -> Option<Self> {
        let asset_id = intent.asset_id();
        let (mut args, success_message) = match intent.name.as_str() {
            names::CREATE_ASSET => (
                vec![
                    "create".to_string(),
                    asset_id.clone(),
                    intent.arg_or("productType", "Generico"),
                    intent.arg_or("quantity", "0"),
                    intent.arg_or("unit", "u"),
                    intent.arg_or("origin", "Unknown"),
                ],
                format!("Asset {} created on the ledger.", asset_id),
            ),
            names::UPDATE_STAGE => {
                let stage = intent.arg_or("newStage", "In Transito");
                (
                    vec!["update".to_string(), asset_id.clone(), stage.clone()],
                    format!("Asset {} updated to stage {}.", asset_id, stage),
                )
            }
            names::DELETE_ASSET => (
                vec!["delete".to_string(), asset_id.clone()],
                format!("Asset {} deleted from the ledger.", asset_id),
            ),
            _ => return None,
        };

        args.push(role.as_str().to_string());
        Some(Self { args, success_message })
    }
}

/// Submits write intents to the ledger executable.
#[derive(Debug, Clone)]
pub struct TransactionExecutor<I> {
    invoker: I,
}

impl<I: LedgerInvoker> TransactionExecutor<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Submit a `createAsset`, `updateStage` or `deleteAsset` intent.
    ///
    /// Any other intent name is returned as `Unrecognized` without invoking
    /// the ledger.
    pub fn submit(&self, intent: &Intent, role: Role) -> Outcome {
        let Some(command) = WriteCommand::from_intent(intent, role) else {
            return Outcome::Unrecognized(intent.name.clone());
        };

        info!(intent = %intent.name, asset_id = %command.args[1], %role, "submitting ledger write");
        match self.invoker.invoke(&command.args) {
            Ok(output) => classify_write(&output, command.success_message),
            Err(e) => classify_invocation_failure(&e),
        }
    }
}

//! Ledger reads: `query`.

use super::classify::{classify_invocation_failure, classify_query};
use super::invoker::LedgerInvoker;
use crate::intent::arg_from;
use crate::outcome::Outcome;
use serde_json::{Map, Value};
use tracing::info;

/// Reads asset records from the ledger executable.
#[derive(Debug, Clone)]
pub struct QueryExecutor<I> {
    invoker: I,
}

impl<I: LedgerInvoker> QueryExecutor<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Look up `args["assetId"]` (default `N/A`).
    ///
    /// Holds no state between calls: the same missing id is `NotFound`
    /// every time.
    pub fn evaluate(&self, args: &Map<String, Value>) -> Outcome {
        let asset_id = arg_from(args, "assetId").unwrap_or_else(|| "N/A".to_string());
        info!(asset_id = %asset_id, "querying ledger");

        let form = ["query".to_string(), asset_id.clone()];
        match self.invoker.invoke(&form) {
            Ok(output) => classify_query(&asset_id, &output),
            Err(e) => classify_invocation_failure(&e),
        }
    }
}

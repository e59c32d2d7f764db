//! Ledger executable integration.
//!
//! The ledger is an external program invoked once per request with one of
//! four positional forms:
//!
//! ```text
//! create <assetId> <productType> <quantity> <unit> <origin> <role>
//! update <assetId> <newStage> <role>
//! delete <assetId> <role>
//! query  <assetId>
//! ```
//!
//! - **Invoker**: the mockable process seam and the real child-process runner
//! - **Classify**: exit status / output -> `Outcome`
//! - **Transaction**: write intents
//! - **Query**: read intents

mod classify;
mod invoker;
mod query;
mod transaction;

pub use invoker::{LedgerInvoker, ProcessInvoker, ProcessOutput};
pub use query::QueryExecutor;
pub use transaction::TransactionExecutor;

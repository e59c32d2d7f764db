//! Process result -> `Outcome`.
//!
//! A write is accepted only when the process exits 0 AND its error stream
//! carries the `status:200` marker. The ledger helper can exit 0 after the
//! peers refused the transaction, so the exit code alone is not enough.
//! A query only looks at the exit code: nonzero means the record is absent.

use super::invoker::ProcessOutput;
use crate::outcome::Outcome;
use std::io;
use tracing::{error, info, warn};

/// Marker the ledger helper writes to stderr when a write was committed.
pub const SUCCESS_MARKER: &str = "status:200";

/// Whether a write invocation actually landed on the ledger.
pub fn write_accepted(output: &ProcessOutput) -> bool {
    output.exited_cleanly() && output.stderr.contains(SUCCESS_MARKER)
}

/// Classify a write invocation.
///
/// Rejections surface the trimmed error stream verbatim so the ledger's own
/// reason (duplicate id, endorsement failure, ...) reaches the user.
pub fn classify_write(output: &ProcessOutput, success_message: String) -> Outcome {
    if write_accepted(output) {
        info!("{}", success_message);
        return Outcome::Success(success_message);
    }

    let stderr = output.stderr.trim();
    error!(exit_code = ?output.exit_code, stderr, "ledger rejected write");
    if stderr.is_empty() {
        return Outcome::FabricError(describe_exit(output));
    }
    Outcome::FabricError(stderr.to_string())
}

/// Classify a query invocation for `asset_id`.
///
/// The error stream of a failed query is logged and otherwise dropped.
pub fn classify_query(asset_id: &str, output: &ProcessOutput) -> Outcome {
    if output.exited_cleanly() {
        info!(asset_id, "query succeeded");
        return Outcome::Success(output.stdout.trim().to_string());
    }

    warn!(asset_id, exit_code = ?output.exit_code, stderr = output.stderr.trim(), "asset not found");
    Outcome::NotFound(asset_id.to_string())
}

/// The ledger could not be reached at all.
pub fn classify_invocation_failure(err: &io::Error) -> Outcome {
    error!(error = %err, "failed to run ledger command");
    Outcome::SystemError(format!("failed to run ledger command: {}", err))
}

fn describe_exit(output: &ProcessOutput) -> String {
    match output.exit_code {
        Some(0) => format!("ledger did not confirm the write ({} missing)", SUCCESS_MARKER),
        Some(code) => format!("ledger command exited with status {}", code),
        None => "ledger command was terminated by a signal".to_string(),
    }
}

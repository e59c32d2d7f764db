//! Exit code constants for the safechain CLI.
//!
//! - 0: Success (including a query that found no record)
//! - 1: User error (bad args, invalid state)
//! - 2: Access denied or unrecognized request
//! - 3: Ledger rejected the write
//! - 4: System error reaching the ledger or the AI service
//! - 5: Configuration error

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid input.
pub const USER_ERROR: i32 = 1;

/// The request was refused by the role policy or could not be interpreted.
pub const ACCESS_DENIED: i32 = 2;

/// The ledger refused a well-formed write (endorsement failure, duplicate id, ...).
pub const LEDGER_REJECTED: i32 = 3;

/// The ledger executable or the AI service could not be reached.
pub const SYSTEM_FAILURE: i32 = 4;

/// Configuration file or environment is invalid.
pub const CONFIG_ERROR: i32 = 5;

//! Command implementations for safechain.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands return the process exit code: for requests
//! that reach the ledger it is derived from the outcome, so scripts can
//! tell a denial from a ledger rejection.

mod ask;
mod chat;
mod inspect;
mod ledger;

use crate::cli::{Cli, Command};
use crate::context::AppContext;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. The runtime context
/// is resolved once and shared by every handler.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let ctx = AppContext::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Chat(args) => chat::cmd_chat(&ctx, args),
        Command::Ask(args) => ask::cmd_ask(&ctx, args),
        Command::Register(args) => ledger::cmd_register(&ctx, args),
        Command::Update(args) => ledger::cmd_update(&ctx, args),
        Command::Delete(args) => ledger::cmd_delete(&ctx, args),
        Command::Query(args) => ledger::cmd_query(&ctx, args),
        Command::Models => inspect::cmd_models(&ctx),
        Command::Policy => inspect::cmd_policy(&ctx),
    }
}

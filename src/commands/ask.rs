//! Implementation of the `safechain ask` command.

use crate::cli::AskArgs;
use crate::context::AppContext;
use crate::error::{Result, SafechainError};

/// Execute the `safechain ask` command.
///
/// Interprets one request, prints the rendered outcome and returns its exit
/// code.
pub fn cmd_ask(ctx: &AppContext, args: AskArgs) -> Result<i32> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(SafechainError::UserError("request text is empty".to_string()));
    }

    let role = ctx.resolve_role(Some(&args.role), None)?;
    let assistant = ctx.assistant(true)?;

    let outcome = assistant.handle(&text, role);
    println!("{}", outcome.render());
    Ok(outcome.exit_code())
}

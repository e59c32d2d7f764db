//! Read-only commands: `models` and `policy`.

use crate::context::AppContext;
use crate::error::Result;
use crate::exit_codes;
use crate::role::Role;

/// Execute the `safechain models` command.
///
/// Runs the same selection the assistant would run at startup and prints
/// the result.
pub fn cmd_models(ctx: &AppContext) -> Result<i32> {
    let api_key = ctx.config.api_key()?;
    let selection = ctx.select_model(&api_key)?;

    println!("Model:  {}", selection.model);
    println!("Source: {}", selection.source);
    Ok(exit_codes::SUCCESS)
}

/// Execute the `safechain policy` command.
pub fn cmd_policy(ctx: &AppContext) -> Result<i32> {
    let assistant = ctx.assistant(false)?;
    let policy = assistant.dispatcher().policy();

    println!("Role permissions");
    println!("================");
    for role in Role::all() {
        let allowed: Vec<&str> = policy.allowed(role).into_iter().collect();
        let listed = if allowed.is_empty() {
            "(none)".to_string()
        } else {
            allowed.join(", ")
        };
        println!("  {:10} {}", role.as_str(), listed);
    }
    Ok(exit_codes::SUCCESS)
}

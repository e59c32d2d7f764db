//! Structured ledger commands: `register`, `update`, `delete`, `query`.
//!
//! These skip the AI service entirely. Writes still go through the policy
//! gate, so `--role consumer` is denied exactly as it would be in chat.

use crate::cli::{DeleteArgs, QueryArgs, RegisterArgs, UpdateArgs};
use crate::context::AppContext;
use crate::error::Result;
use crate::intent::{Intent, names};
use crate::outcome::OutcomeText;

/// Execute the `safechain register` command.
pub fn cmd_register(ctx: &AppContext, args: RegisterArgs) -> Result<i32> {
    let intent = Intent::new(names::CREATE_ASSET)
        .with_arg("assetId", args.asset_id)
        .with_arg("productType", args.product_type)
        .with_arg("quantity", args.quantity)
        .with_arg("unit", args.unit)
        .with_arg("origin", args.origin);
    submit(ctx, &intent, &args.role)
}

/// Execute the `safechain update` command.
pub fn cmd_update(ctx: &AppContext, args: UpdateArgs) -> Result<i32> {
    let intent = Intent::new(names::UPDATE_STAGE)
        .with_arg("assetId", args.asset_id)
        .with_arg("newStage", args.new_stage);
    submit(ctx, &intent, &args.role)
}

/// Execute the `safechain delete` command.
pub fn cmd_delete(ctx: &AppContext, args: DeleteArgs) -> Result<i32> {
    let intent = Intent::new(names::DELETE_ASSET).with_arg("assetId", args.asset_id);
    submit(ctx, &intent, &args.role)
}

/// Execute the `safechain query` command.
pub fn cmd_query(ctx: &AppContext, args: QueryArgs) -> Result<i32> {
    let intent = Intent::new(names::QUERY_ASSET).with_arg("assetId", args.asset_id);
    let assistant = ctx.assistant(false)?;
    Ok(report(assistant.evaluate_query(&intent)))
}

fn submit(ctx: &AppContext, intent: &Intent, role: &str) -> Result<i32> {
    let role = ctx.resolve_role(Some(role), None)?;
    let assistant = ctx.assistant(false)?;
    Ok(report(assistant.submit_transaction(intent, role)))
}

fn report(outcome: OutcomeText) -> i32 {
    println!("{}", outcome);
    outcome.exit_code
}

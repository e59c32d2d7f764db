//! CLI argument parsing for safechain.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Safechain: natural-language assistant for a food supply-chain ledger.
///
/// Producers register and move assets along the chain; consumers look them
/// up. Free-text requests are turned into ledger actions by an AI service and
/// checked against the caller's role before anything touches the ledger.
#[derive(Parser, Debug)]
#[command(name = "safechain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: safechain.yaml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for safechain.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session.
    ///
    /// Each line is interpreted by the AI service and dispatched under the
    /// session's role. Type `exit`, `quit` or `esci` to leave.
    Chat(ChatArgs),

    /// Interpret and dispatch a single request.
    Ask(AskArgs),

    /// Register a new asset from structured fields (no AI involved).
    Register(RegisterArgs),

    /// Move an asset to a new supply-chain stage.
    Update(UpdateArgs),

    /// Delete an asset from the ledger.
    Delete(DeleteArgs),

    /// Look up an asset record.
    Query(QueryArgs),

    /// Show which AI model would be used and why.
    Models,

    /// Print the role permission table.
    Policy,
}

/// Arguments for the `chat` command.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Role for this session (producer, consumer). Looked up from the
    /// config's `users` table when omitted.
    #[arg(short, long)]
    pub role: Option<String>,

    /// Name shown in the greeting and recorded in the event log.
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the `ask` command.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Role of the caller (producer, consumer).
    #[arg(short, long)]
    pub role: String,

    /// The request, in natural language.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Arguments for the `register` command.
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Asset identifier (e.g., FOOD123).
    #[arg(long)]
    pub asset_id: String,

    /// Product type (e.g., Mela).
    #[arg(long)]
    pub product_type: String,

    /// Quantity, as a number.
    #[arg(long)]
    pub quantity: String,

    /// Unit of measure (e.g., kg).
    #[arg(long)]
    pub unit: String,

    /// Place of origin.
    #[arg(long)]
    pub origin: String,

    /// Role of the caller.
    #[arg(short, long, default_value = "producer")]
    pub role: String,
}

/// Arguments for the `update` command.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Asset identifier.
    pub asset_id: String,

    /// New stage (e.g., "In Transito", "Consegnato").
    pub new_stage: String,

    /// Role of the caller.
    #[arg(short, long, default_value = "producer")]
    pub role: String,
}

/// Arguments for the `delete` command.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Asset identifier.
    pub asset_id: String,

    /// Role of the caller.
    #[arg(short, long, default_value = "producer")]
    pub role: String,
}

/// Arguments for the `query` command.
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Asset identifier.
    pub asset_id: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

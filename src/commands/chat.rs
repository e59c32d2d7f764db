//! Implementation of the `safechain chat` command.
//!
//! A line-oriented loop: each non-blank line is one request, answered with
//! its rendered outcome. The loop ends on `exit`, `quit`, `esci` or EOF.

use crate::ai::TextGenerator;
use crate::assistant::Assistant;
use crate::cli::ChatArgs;
use crate::context::AppContext;
use crate::error::{Result, SafechainError};
use crate::exit_codes;
use crate::ledger::LedgerInvoker;
use crate::session::{Session, Speaker, is_exit_command};
use std::io::{self, BufRead, Write};

/// Execute the `safechain chat` command.
pub fn cmd_chat(ctx: &AppContext, args: ChatArgs) -> Result<i32> {
    let role = ctx.resolve_role(args.role.as_deref(), args.user.as_deref())?;
    let username = args.user.unwrap_or_else(|| role.to_string());
    let assistant = ctx.assistant(true)?;

    let mut session = Session::new(username, role);
    let stdin = io::stdin();
    run_chat(&assistant, &mut session, stdin.lock(), io::stdout().lock())?;
    Ok(exit_codes::SUCCESS)
}

/// Drive the chat loop over `input`, writing prompts and answers to `output`.
pub(crate) fn run_chat<G, W, R>(
    assistant: &Assistant<G, W, R>,
    session: &mut Session,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()>
where
    G: TextGenerator,
    W: LedgerInvoker,
    R: LedgerInvoker,
{
    let allowed: Vec<&str> = assistant
        .dispatcher()
        .policy()
        .allowed(session.role())
        .into_iter()
        .collect();

    writeln!(output, "{}", session.greeting()).map_err(io_error)?;
    if allowed.is_empty() {
        writeln!(output, "Your role has no permitted actions.").map_err(io_error)?;
    } else {
        writeln!(output, "Permitted actions: {}", allowed.join(", ")).map_err(io_error)?;
    }

    let mut lines = input.lines();
    loop {
        write!(output, "> ").map_err(io_error)?;
        output.flush().map_err(io_error)?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(io_error)?;
        let text = line.trim();

        if text.is_empty() {
            continue;
        }
        if is_exit_command(text) {
            break;
        }

        let outcome = assistant.handle_turn(session, text);
        writeln!(output, "{}", outcome.render()).map_err(io_error)?;
    }

    let handled = session
        .transcript()
        .iter()
        .filter(|m| m.speaker == Speaker::User)
        .count();
    writeln!(output).map_err(io_error)?;
    writeln!(output, "Goodbye, {}. {} request(s) handled.", session.username(), handled).map_err(io_error)?;
    Ok(())
}

fn io_error(e: io::Error) -> SafechainError {
    SafechainError::UserError(format!("terminal I/O failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::intent::IntentParser;
    use crate::ledger::{QueryExecutor, TransactionExecutor};
    use crate::policy::Policy;
    use crate::role::Role;
    use crate::test_support::{RecordingInvoker, ScriptedGenerator};

    fn chat(ai: &ScriptedGenerator, ledger: &RecordingInvoker, role: Role, input: &str) -> (Session, String) {
        let assistant = Assistant::new(
            IntentParser::new(ai),
            Dispatcher::new(Policy::standard(), TransactionExecutor::new(ledger), QueryExecutor::new(ledger)),
        );
        let mut session = Session::new("rossi", role);
        let mut output = Vec::new();

        run_chat(&assistant, &mut session, input.as_bytes(), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn blank_lines_are_skipped_and_exit_stops() {
        let ai = ScriptedGenerator::replying(r#"{"intent":"deleteAsset","args":{"assetId":"A1"}}"#);
        let ledger = RecordingInvoker::succeeding_write();

        let (session, output) = chat(&ai, &ledger, Role::Producer, "\n   \ndelete A1\nesci\ndelete A2\n");

        assert_eq!(ai.prompts().len(), 1);
        assert_eq!(ledger.calls(), vec![vec!["delete", "A1", "producer"]]);
        assert_eq!(session.transcript().len(), 2);
        assert!(output.contains("SUCCESS: Asset A1 deleted from the ledger."));
        assert!(output.contains("Goodbye, rossi. 1 request(s) handled."));
    }

    #[test]
    fn greeting_lists_role_gated_actions() {
        let ai = ScriptedGenerator::replying("{}");
        let ledger = RecordingInvoker::with_output(Some(0), "", "");

        let (_, consumer) = chat(&ai, &ledger, Role::Consumer, "");
        assert!(consumer.contains("Permitted actions: queryAsset"));

        let (_, unknown) = chat(&ai, &ledger, Role::Unknown, "");
        assert!(unknown.contains("no permitted actions"));
    }

    #[test]
    fn eof_ends_the_session() {
        let ai = ScriptedGenerator::replying(r#"{"intent":"queryAsset","args":{"assetId":"A1"}}"#);
        let ledger = RecordingInvoker::with_output(Some(0), "{\"assetId\":\"A1\"}", "");

        let (session, output) = chat(&ai, &ledger, Role::Consumer, "where is A1?");

        assert_eq!(session.transcript().len(), 2);
        assert!(output.contains("SUCCESS: {\"assetId\":\"A1\"}"));
    }
}

//! Runtime context resolution for safechain commands.
//!
//! Every command starts here: the effective config is resolved once, and the
//! ledger invoker, the AI client and the assistant are built from it. Model
//! selection happens at most once per process, when the AI client is built.

use crate::ai::{GeminiCatalog, GeminiClient, ModelSelection, select_model};
use crate::assistant::Assistant;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{Result, SafechainError};
use crate::events::EventLog;
use crate::intent::IntentParser;
use crate::ledger::{ProcessInvoker, QueryExecutor, TransactionExecutor};
use crate::policy::Policy;
use crate::role::Role;
use std::path::Path;
use tracing::{debug, info, warn};

/// The assistant wired to the real collaborators. The AI client is `None`
/// for commands that never parse free text.
pub type LiveAssistant = Assistant<Option<GeminiClient>, ProcessInvoker, ProcessInvoker>;

/// Resolved configuration for one process run.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    /// Resolve the context from an optional explicit config path.
    ///
    /// # Returns
    ///
    /// * `Ok(AppContext)` - Config loaded (or defaulted) and validated
    /// * `Err(SafechainError::ConfigError)` - Config could not be read or is invalid (exit code 5)
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::resolve(config_path)?;
        Ok(Self { config })
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build the ledger process invoker from `ledger_command`.
    pub fn ledger_invoker(&self) -> Result<ProcessInvoker> {
        let mut invoker = ProcessInvoker::from_command_line(&self.config.ledger_command)?
            .with_environment(self.config.ledger_environment.clone());
        if let Some(dir) = &self.config.ledger_working_dir {
            invoker = invoker.with_working_dir(dir);
        }
        debug!(program = invoker.program(), "ledger invoker ready");
        Ok(invoker)
    }

    /// Choose the model: configured, else discovered, else the fallback.
    /// A blank `ai.model` counts as unset.
    pub fn select_model(&self, api_key: &str) -> Result<ModelSelection> {
        let catalog = GeminiCatalog::new(&self.config.ai.base_url, api_key, self.config.ai_timeout())
            .map_err(|e| SafechainError::AiError(e.to_string()))?;
        Ok(select_model(self.config.ai.model.as_deref(), &catalog))
    }

    /// Build the AI client, selecting the model first.
    pub fn ai_client(&self) -> Result<GeminiClient> {
        let api_key = self.config.api_key()?;
        let selection = self.select_model(&api_key)?;

        let client = GeminiClient::new(&self.config.ai.base_url, api_key, &selection, self.config.ai_timeout())
            .map_err(|e| SafechainError::AiError(e.to_string()))?;
        info!(model = client.model(), source = %selection.source, "AI model ready");
        Ok(client)
    }

    /// Build the assistant. `with_ai` controls whether free text can be
    /// interpreted; structured commands leave it off and need no API key.
    pub fn assistant(&self, with_ai: bool) -> Result<LiveAssistant> {
        let generator = if with_ai { Some(self.ai_client()?) } else { None };
        let invoker = self.ledger_invoker()?;

        let dispatcher = Dispatcher::new(
            Policy::standard(),
            TransactionExecutor::new(invoker.clone()),
            QueryExecutor::new(invoker),
        );

        let assistant = Assistant::new(IntentParser::new(generator), dispatcher);
        Ok(match &self.config.events_file {
            Some(path) => {
                let log = EventLog::new(path);
                debug!(path = %log.path().display(), "recording events");
                assistant.with_events(log)
            }
            None => assistant,
        })
    }

    /// Work out the caller's role from `--role`, or from the config's
    /// `users` table when only `--user` is given.
    pub fn resolve_role(&self, role: Option<&str>, user: Option<&str>) -> Result<Role> {
        if let Some(label) = role {
            let role = Role::parse(label);
            if role == Role::Unknown {
                warn!(label, "unrecognized role; every action will be denied");
            }
            return Ok(role);
        }

        match user {
            Some(name) => self.config.users.get(name).copied().ok_or_else(|| {
                SafechainError::UserError(format!(
                    "user '{}' has no role in the config.\n\n\
                     Pass --role producer or --role consumer, or add the user under `users:`.",
                    name
                ))
            }),
            None => Err(SafechainError::UserError(
                "no role given.\n\nPass --role producer or --role consumer.".to_string(),
            )),
        }
    }
}

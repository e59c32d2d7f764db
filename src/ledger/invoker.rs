//! Ledger executable invocation.
//!
//! Runs the configured ledger command as a child process with a positional
//! argument form appended, capturing exit status and both output streams in
//! full. There is no timeout: the call blocks until the process exits.

use crate::error::{Result, SafechainError};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::debug;

/// Captured result of one ledger process run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code of the process (None if it was killed by a signal).
    pub exit_code: Option<i32>,
    /// Full standard output, lossily decoded.
    pub stdout: String,
    /// Full standard error, lossily decoded.
    pub stderr: String,
}

impl ProcessOutput {
    /// Process-level success. Writes need more than this, see `classify`.
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one ledger command form and reports what happened.
///
/// `Err` means the process could not be started or its output could not be
/// collected; a process that ran and failed is an `Ok` with a nonzero exit.
pub trait LedgerInvoker {
    fn invoke(&self, args: &[String]) -> io::Result<ProcessOutput>;
}

impl<T: LedgerInvoker + ?Sized> LedgerInvoker for &T {
    fn invoke(&self, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).invoke(args)
    }
}

/// Spawns the real ledger executable.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    leading_args: Vec<String>,
    working_dir: Option<PathBuf>,
    environment: BTreeMap<String, String>,
}

impl ProcessInvoker {
    /// Build an invoker from a command line such as `./fabric_helper.sh` or
    /// `bash scripts/ledger.sh --channel food`.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = shell_words::split(command_line).map_err(|e| {
            SafechainError::ConfigError(format!(
                "failed to parse ledger command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command_line, e
            ))
        })?;

        if parts.is_empty() {
            return Err(SafechainError::ConfigError(
                "ledger command is empty".to_string(),
            ));
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            leading_args: parts,
            working_dir: None,
            environment: BTreeMap::new(),
        })
    }

    /// Run the command from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Extra environment variables for the ledger process.
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl LedgerInvoker for ProcessInvoker {
    fn invoke(&self, args: &[String]) -> io::Result<ProcessOutput> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .envs(&self.environment);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let start = Instant::now();
        let output = command.output()?;
        debug!(
            program = %self.program,
            ?args,
            exit_code = ?output.status.code(),
            duration_ms = start.elapsed().as_millis() as u64,
            "ledger command finished"
        );

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

use crate::ai::{AiError, TextGenerator};
use crate::ledger::{LedgerInvoker, ProcessOutput};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Ledger invoker that returns a canned result and records every call.
pub(crate) struct RecordingInvoker {
    response: Result<ProcessOutput, io::ErrorKind>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingInvoker {
    pub(crate) fn with_output(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Self {
        Self {
            response: Ok(ProcessOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding_write() -> Self {
        Self::with_output(Some(0), "", "chaincode invoke successful. result: status:200")
    }

    pub(crate) fn failing_to_spawn() -> Self {
        Self {
            response: Err(io::ErrorKind::NotFound),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl LedgerInvoker for RecordingInvoker {
    fn invoke(&self, args: &[String]) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        match &self.response {
            Ok(output) => Ok(output.clone()),
            Err(kind) => Err(io::Error::new(*kind, "ledger helper not found")),
        }
    }
}

/// In-memory ledger speaking the positional protocol.
///
/// `create` stores a JSON record and reports `status:200`. `update` moves an
/// existing record to a new `currentStage`. `query` prints the record or
/// exits 1, and `delete` removes it. Writes to a missing asset fail with
/// `status:500`.
#[derive(Default)]
pub(crate) struct FakeLedger {
    records: Mutex<BTreeMap<String, String>>,
}

impl LedgerInvoker for FakeLedger {
    fn invoke(&self, args: &[String]) -> io::Result<ProcessOutput> {
        let mut records = self.records.lock().unwrap();
        let committed = |stdout: String| ProcessOutput {
            exit_code: Some(0),
            stdout,
            stderr: "status:200".to_string(),
        };
        let failed = |stderr: String| ProcessOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr,
        };

        let output = match args.first().map(String::as_str) {
            Some("create") if args.len() == 7 => {
                if records.contains_key(&args[1]) {
                    failed(format!("status:500 asset {} already exists", args[1]))
                } else {
                    let record = serde_json::json!({
                        "assetId": args[1],
                        "productType": args[2],
                        "quantity": args[3],
                        "unit": args[4],
                        "origin": args[5],
                        "currentStage": "Raccolto",
                    });
                    records.insert(args[1].clone(), record.to_string());
                    committed(String::new())
                }
            }
            Some("update") if args.len() == 4 => match records.get_mut(&args[1]) {
                Some(stored) => match serde_json::from_str::<serde_json::Value>(stored) {
                    Ok(mut record) => {
                        record["currentStage"] = serde_json::Value::String(args[2].clone());
                        *stored = record.to_string();
                        committed(String::new())
                    }
                    Err(e) => failed(format!("status:500 corrupt record {}: {}", args[1], e)),
                },
                None => failed(format!("status:500 asset {} does not exist", args[1])),
            },
            Some("delete") if args.len() == 3 => match records.remove(&args[1]) {
                Some(_) => committed(String::new()),
                None => failed(format!("status:500 asset {} does not exist", args[1])),
            },
            Some("query") if args.len() == 2 => match records.get(&args[1]) {
                Some(record) => committed(format!("{}\n", record)),
                None => failed(format!("asset {} does not exist", args[1])),
            },
            _ => failed(format!("unsupported form: {:?}", args)),
        };
        Ok(output)
    }
}

/// AI collaborator that returns a fixed reply and records prompts.
pub(crate) struct ScriptedGenerator {
    reply: Result<String, AiError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: AiError) -> Self {
        Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Write an executable `sh` script into `dir`.
#[cfg(unix)]
pub(crate) fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

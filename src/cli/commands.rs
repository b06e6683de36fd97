//! CLI command implementations
//!
//! `replay` builds a registry over an in-memory UI tree and applies one
//! operation per input line. Dispatch results are written as JSON lines;
//! a bad line is answered with an error response and the replay goes on.
//! A read error on the input ends the replay.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::eventing::{
    DispatchReport, EventingConfig, EventingRegistry, MemoryUiTree, ObservedEvent, TargetList,
    UpdateLog, UpdateRequest,
};
use crate::observability::{init_logging, Event};

use super::args::Command;
use super::errors::{CliErrorCode, CliResult};
use super::io::{read_operations, write_error, write_response};

/// One replay input line
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Add a client to the UI tree
    Mount { client: String },

    /// Remove a client from the UI tree
    Unmount { client: String },

    /// Register an observer (group and targets optional)
    Register {
        #[serde(default)]
        group: Option<String>,
        event: String,
        client: String,
        #[serde(default)]
        execute: Option<TargetList>,
        #[serde(default)]
        render: Option<TargetList>,
    },

    /// Dispatch a whitespace separated event list
    Dispatch { group: String, events: String },

    /// Dispatch a raw push-channel payload
    Socket { channel: String, message: Value },
}

/// Result line written for each dispatch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutput {
    pub report: DispatchReport,
    pub updates: Vec<UpdateRequest>,
}

/// Replay registry type
pub type ReplayRegistry = EventingRegistry<MemoryUiTree, UpdateLog>;

/// Run a CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Replay { config, log } => {
            init_logging(&log);
            let config = match config {
                Some(path) => load_config(&path)?,
                None => EventingConfig::default(),
            };

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            replay(config, stdin.lock(), &mut stdout)?;
            Ok(())
        }
        Command::CheckConfig { config } => check_config(&config, &mut io::stdout()),
    }
}

fn load_config(path: &Path) -> CliResult<EventingConfig> {
    let config = EventingConfig::load(path)?;
    info!(code = %Event::ConfigLoaded, path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Load, validate and print a configuration file
pub fn check_config<W: Write>(path: &Path, out: &mut W) -> CliResult<()> {
    let config = load_config(path)?;
    write_response(out, &config)
}

/// Apply every operation read from `input`, writing results to `output`
///
/// Returns the registry so callers can inspect its final state.
pub fn replay<R: BufRead, W: Write>(
    config: EventingConfig,
    input: R,
    output: &mut W,
) -> CliResult<ReplayRegistry> {
    let mut registry = EventingRegistry::with_config(config, MemoryUiTree::new(), UpdateLog::new());

    for line in read_operations(input) {
        let applied = line.and_then(|value| Ok(serde_json::from_value::<Operation>(value)?));

        match applied {
            Ok(operation) => {
                if let Some(report) = apply(&mut registry, operation) {
                    let updates = registry.updater_mut().drain();
                    write_response(output, &DispatchOutput { report, updates })?;
                }
            }
            Err(err) if err.code() == &CliErrorCode::IoError => return Err(err),
            Err(err) => write_error(output, err.code_str(), err.message())?,
        }
    }

    Ok(registry)
}

fn apply(registry: &mut ReplayRegistry, operation: Operation) -> Option<DispatchReport> {
    match operation {
        Operation::Mount { client } => {
            registry.lookup_mut().mount(client);
            None
        }
        Operation::Unmount { client } => {
            registry.lookup_mut().unmount(&client);
            None
        }
        Operation::Register {
            group,
            event,
            client,
            execute,
            render,
        } => {
            let observed = ObservedEvent {
                event,
                execute,
                render,
            };
            registry.register_observed(group.as_deref(), &client, &observed);
            None
        }
        Operation::Dispatch { group, events } => Some(registry.dispatch(&group, &events)),
        Operation::Socket { channel, message } => {
            Some(registry.dispatch_socket_message(&message, &channel))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};
    use tempfile::NamedTempFile;

    fn run(script: &str) -> (ReplayRegistry, Vec<Value>) {
        let mut out = Vec::new();
        let registry = replay(EventingConfig::default(), Cursor::new(script), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (registry, lines)
    }

    /// Input whose every read fails
    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "stdin closed"))
        }
    }

    #[test]
    fn test_replay_register_and_dispatch() {
        let script = r#"
{"op":"mount","client":"obs"}
{"op":"register","group":"chat","event":"posted","client":"obs","render":"form:list"}
{"op":"dispatch","group":"chat","events":"posted"}
"#;
        let (_, lines) = run(script);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["report"]["updates"], 1);
        assert_eq!(lines[0]["data"]["updates"][0]["client_id"], "obs");
        assert_eq!(lines[0]["data"]["updates"][0]["execute"][0], "@this");
        assert_eq!(lines[0]["data"]["updates"][0]["render"][0], "form:list");
    }

    #[test]
    fn test_replay_default_group() {
        let script = r#"
{"op":"mount","client":"obs"}
{"op":"register","event":"saved","client":"obs"}
{"op":"dispatch","group":"global","events":"saved"}
"#;
        let (registry, lines) = run(script);
        assert!(registry.registration("global", "saved", "obs").is_some());
        assert_eq!(lines[0]["data"]["updates"][0]["render"][0], "@none");
    }

    #[test]
    fn test_replay_socket_gate() {
        let script = r#"
{"op":"mount","client":"obs"}
{"op":"register","group":"chan","event":"ping","client":"obs"}
{"op":"socket","channel":"chan","message":42}
{"op":"socket","channel":"chan","message":"ping"}
"#;
        let (_, lines) = run(script);

        assert_eq!(lines[0]["data"]["report"]["skipped"], "EVENTING_MALFORMED_MESSAGE");
        assert_eq!(lines[0]["data"]["updates"].as_array().unwrap().len(), 0);
        assert_eq!(lines[1]["data"]["report"]["updates"], 1);
    }

    #[test]
    fn test_replay_continues_after_bad_line() {
        let script = r#"
{"op":"teleport"}
not json at all
{"op":"dispatch","group":"none","events":"x"}
"#;
        let (_, lines) = run(script);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["status"], "error");
        assert_eq!(lines[0]["code"], "EVENTING_CLI_INVALID_OPERATION");
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[2]["data"]["report"]["skipped"], "EVENTING_UNKNOWN_GROUP");
    }

    #[test]
    fn test_replay_unmount_makes_client_stale() {
        let script = r#"
{"op":"mount","client":"obs"}
{"op":"register","group":"g","event":"e","client":"obs"}
{"op":"unmount","client":"obs"}
{"op":"dispatch","group":"g","events":"e"}
"#;
        let (_, lines) = run(script);
        assert_eq!(lines[0]["data"]["report"]["stale_clients"], 1);
        assert_eq!(lines[0]["data"]["report"]["updates"], 0);
    }

    #[test]
    fn test_check_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"unknown_events":"log"}}"#).unwrap();

        let mut out = Vec::new();
        check_config(file.path(), &mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["data"]["unknown_events"], "log");
        assert_eq!(value["data"]["default_group"], "global");
    }

    #[test]
    fn test_check_config_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_group":""}}"#).unwrap();

        let err = check_config(file.path(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.code_str(), "EVENTING_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_replay_stops_on_read_error() {
        let mut out = Vec::new();
        let result = replay(
            EventingConfig::default(),
            BufReader::new(BrokenInput),
            &mut out,
        );

        let err = result.err().unwrap();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert_eq!(err.code_str(), "EVENTING_CLI_IO_ERROR");
        assert!(out.is_empty());
    }
}

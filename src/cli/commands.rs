//! CLI command implementations
//!
//! Boot sequence for `invoke` and `start`:
//!
//! 1. Configuration load
//! 2. Ledger load (from the configured snapshot, or empty in memory)
//! 3. Request processing, persisting the snapshot after every commit
//!
//! A response is written only after the snapshot covering it is on disk.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ApiHandler;
use crate::ledger::{Ledger, SnapshotError};
use crate::observability::{init_logging, parse_level, Event, LogFormat};

use super::args::{Cli, Command};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_request, read_single_request, write_json, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Level or directive list (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "text" or "json" (optional, default "text")
    #[serde(default)]
    pub log_format: LogFormat,

    /// Ledger snapshot file (optional; without it the ledger lives in memory)
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            snapshot_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        parse_level(&self.log_level).map_err(|e| CliError::config_error(e.message()))?;

        if let Some(path) = &self.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error("snapshot_path must not be empty"));
            }
        }

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments, loads configuration, installs logging and dispatches.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config_path = cli.command.config_path().clone();
    let config = Config::load(&config_path)?;

    // Logging failures never stop the process
    if let Err(e) = init_logging(&config.log_level, config.log_format) {
        eprintln!("{}", e);
    }
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        snapshot = ?config.snapshot_path,
        "configuration loaded"
    );

    run_command(cli.command, &config)
}

/// Run the appropriate command against stdin/stdout
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match cmd {
        Command::Init { .. } => init(config, &mut output),
        Command::Invoke { .. } => invoke(config, &mut input, &mut output),
        Command::Start { .. } => start(config, &mut input, &mut output),
    }
}

/// Create an empty snapshot at the configured path
///
/// Fails if no snapshot path is configured or the file already exists.
pub fn init<W: Write>(config: &Config, output: &mut W) -> CliResult<()> {
    let path = config
        .snapshot_path
        .as_deref()
        .ok_or_else(|| CliError::config_error("init requires snapshot_path in the config"))?;

    Ledger::init_snapshot(path).map_err(|e| match e {
        SnapshotError::AlreadyExists { .. } => {
            CliError::new(CliErrorCode::AlreadyInitialized, e.to_string())
        }
        other => CliError::persist_failed(other),
    })?;

    tracing::info!(event = %Event::SnapshotCreated, path = %path.display(), "snapshot created");
    write_response(
        output,
        json!({"initialized": true, "snapshot": path.display().to_string()}),
    )
}

/// Execute a single request read from `input` and exit
pub fn invoke<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> CliResult<()> {
    let session = Session::boot(config)?;
    let handler = ApiHandler::new(&session.ledger);

    let request = read_single_request(input)?;
    session.process(&handler, &request, output)
}

/// Execute one request per line of `input` until end of input
pub fn start<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> CliResult<()> {
    let session = Session::boot(config)?;
    let handler = ApiHandler::new(&session.ledger);

    tracing::info!(event = %Event::Serving, "reading requests from stdin");
    let mut served = 0u64;
    while let Some(request) = read_request(input)? {
        session.process(&handler, &request, output)?;
        served += 1;
    }

    let metrics = session.ledger.metrics().snapshot();
    tracing::info!(
        event = %Event::ShutdownComplete,
        served,
        committed = metrics.transactions_committed,
        conflicted = metrics.transactions_conflicted,
        aborted = metrics.transactions_aborted,
        "end of input"
    );
    Ok(())
}

/// A booted ledger and where to persist it
struct Session {
    ledger: Ledger,
    snapshot_path: Option<PathBuf>,
}

impl Session {
    fn boot(config: &Config) -> CliResult<Self> {
        tracing::info!(event = %Event::BootStart, "booting ledger");

        let ledger = match &config.snapshot_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::not_initialized(path));
                }
                Ledger::load_snapshot(path).map_err(CliError::boot_failed)?
            }
            None => Ledger::new(),
        };

        tracing::info!(
            event = %Event::BootComplete,
            highest_commit = ledger.highest_commit_id().value(),
            "ledger ready"
        );
        Ok(Self {
            ledger,
            snapshot_path: config.snapshot_path.clone(),
        })
    }

    fn process<W: Write>(&self, handler: &ApiHandler<'_>, request: &str, output: &mut W) -> CliResult<()> {
        let before = self.ledger.highest_commit_id();
        let response = handler.handle(request);

        if let Some(path) = &self.snapshot_path {
            if self.ledger.highest_commit_id() > before {
                self.ledger
                    .save_snapshot(path)
                    .map_err(CliError::persist_failed)?;
            }
        }

        write_json(output, &response.to_json())
    }
}

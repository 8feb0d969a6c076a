//! CLI-specific error types
//!
//! All CLI errors are fatal: the process exits non-zero.

use std::fmt;
use std::io;

use crate::ledger::SnapshotError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Snapshot already exists
    AlreadyInitialized,
    /// Configured snapshot missing
    NotInitialized,
    /// Snapshot could not be loaded
    BootFailed,
    /// Snapshot could not be written after a commit
    PersistFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "REC_CLI_CONFIG_ERROR",
            Self::IoError => "REC_CLI_IO_ERROR",
            Self::AlreadyInitialized => "REC_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "REC_CLI_NOT_INITIALIZED",
            Self::BootFailed => "REC_CLI_BOOT_FAILED",
            Self::PersistFailed => "REC_CLI_PERSIST_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Not initialized
    pub fn not_initialized(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "Snapshot {} does not exist. Run 'recordledger init' first.",
                path.display()
            ),
        )
    }

    /// Snapshot load failure
    pub fn boot_failed(err: SnapshotError) -> Self {
        Self::new(CliErrorCode::BootFailed, err.to_string())
    }

    /// Snapshot write failure
    pub fn persist_failed(err: SnapshotError) -> Self {
        Self::new(CliErrorCode::PersistFailed, err.to_string())
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

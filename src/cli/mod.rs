//! CLI module for recordledger
//!
//! Provides command-line interface for:
//! - init: Create an empty ledger snapshot
//! - invoke: One-shot request execution
//! - start: Process requests line by line until end of input

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, invoke, run, run_command, start, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_single_request, write_json, write_response};

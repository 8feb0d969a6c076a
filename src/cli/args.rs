//! CLI argument definitions using clap
//!
//! Commands:
//! - recordledger init --config <path>
//! - recordledger invoke --config <path>
//! - recordledger start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recordledger - a transactional user and alert record store
#[derive(Parser, Debug)]
#[command(name = "recordledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty ledger snapshot
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./recordledger.json")]
        config: PathBuf,
    },

    /// Execute a single request read from stdin and exit
    Invoke {
        /// Path to configuration file
        #[arg(long, default_value = "./recordledger.json")]
        config: PathBuf,
    },

    /// Execute one request per stdin line until end of input
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./recordledger.json")]
        config: PathBuf,
    },
}

impl Command {
    pub fn config_path(&self) -> &PathBuf {
        match self {
            Command::Init { config } | Command::Invoke { config } | Command::Start { config } => {
                config
            }
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["recordledger", "start"]).unwrap();
        assert_eq!(cli.command.config_path(), &PathBuf::from("./recordledger.json"));
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::try_parse_from(["recordledger", "invoke", "--config", "/etc/rl.json"]).unwrap();
        assert!(matches!(cli.command, Command::Invoke { .. }));
        assert_eq!(cli.command.config_path(), &PathBuf::from("/etc/rl.json"));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["recordledger", "serve"]).is_err());
    }
}

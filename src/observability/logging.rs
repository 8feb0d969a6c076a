//! Process-wide tracing subscriber
//!
//! Logs go to stderr so stdout stays reserved for responses. `RUST_LOG`
//! overrides the configured level when set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::{ObservabilityError, ObservabilityResult};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ObservabilityError::new(format!(
                "unknown log format '{}', expected text or json",
                other
            ))),
        }
    }
}

/// Parses a level or directive list such as `info` or `recordledger=debug`.
pub fn parse_level(level: &str) -> ObservabilityResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| ObservabilityError::new(format!("invalid log level '{}': {}", level, e)))
}

/// Builds the level filter: `RUST_LOG` if set, else `level`.
pub fn build_filter(level: &str) -> ObservabilityResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_level(level),
    }
}

/// Installs the global subscriber.
///
/// Fails if the level cannot be parsed or a subscriber is already set.
pub fn init_logging(level: &str, format: LogFormat) -> ObservabilityResult<()> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ObservabilityError::new(format!("subscriber not installed: {}", e)))
}

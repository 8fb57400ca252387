//! Configuration management via environment variables
//!
//! The checker and the status server are configured through plain environment
//! variables (optionally seeded from a `.env` file). Clap reads the per-command
//! values; the helpers here cover the process-wide switches.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Ceiling for a whole checker run.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 30;

/// Status server listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Status server bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Location of the shared result record.
pub const DEFAULT_RESULT_FILE: &str = "result.json";

/// Configuration errors raised at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the required checker variables is missing or empty
    #[error(
        "Expecting BRIDGE_UI_URL, HOME_BRIDGE_ADDRESS and FOREIGN_BRIDGE_ADDRESS env variables to be set"
    )]
    MissingRequired,

    /// The run ceiling must be positive
    #[error("Invalid check timeout: {0}s")]
    InvalidTimeout(u64),
}

/// Get a non-empty environment variable
///
/// Unset variables and variables set to an empty string both yield `None`.
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Whether verbose diagnostics are enabled
///
/// Any non-empty `DEBUG` value turns body logging on.
pub fn is_debug_enabled() -> bool {
    get_env("DEBUG").is_some()
}

/// Log filter directive for the current process
///
/// `BRIDGE_MONITOR_LOG_LEVEL` wins; otherwise `debug` when `DEBUG` is set, else `info`.
pub fn log_level() -> String {
    get_env("BRIDGE_MONITOR_LOG_LEVEL").unwrap_or_else(|| {
        if is_debug_enabled() {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    })
}

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Base URL of the monitored UI
    pub bridge_ui_url: String,
    /// Expected home bridge address
    pub home_bridge_address: String,
    /// Expected foreign bridge address
    pub foreign_bridge_address: String,
    /// Ceiling for the whole run
    pub timeout: Duration,
    /// Where the result record lives
    pub result_file: PathBuf,
}

impl CheckerConfig {
    /// Build a checker configuration from possibly-missing inputs.
    pub fn new(
        bridge_ui_url: Option<String>,
        home_bridge_address: Option<String>,
        foreign_bridge_address: Option<String>,
    ) -> Result<Self, ConfigError> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        match (
            present(bridge_ui_url),
            present(home_bridge_address),
            present(foreign_bridge_address),
        ) {
            (Some(bridge_ui_url), Some(home_bridge_address), Some(foreign_bridge_address)) => {
                Ok(Self {
                    bridge_ui_url,
                    home_bridge_address,
                    foreign_bridge_address,
                    timeout: Duration::from_secs(DEFAULT_CHECK_TIMEOUT_SECS),
                    result_file: PathBuf::from(DEFAULT_RESULT_FILE),
                })
            }
            _ => Err(ConfigError::MissingRequired),
        }
    }

    /// Override the run ceiling.
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::InvalidTimeout(secs));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Override the result record location.
    pub fn with_result_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_file = path.into();
        self
    }

    /// Lock file guarding against overlapping runs.
    pub fn lock_file(&self) -> PathBuf {
        lock_file_for(&self.result_file)
    }
}

/// `<result file>.lock`
pub fn lock_file_for(result_file: &Path) -> PathBuf {
    let mut name = result_file.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Status server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Where the result record lives
    pub result_file: PathBuf,
}

impl ServerConfig {
    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            result_file: PathBuf::from(DEFAULT_RESULT_FILE),
        }
    }
}

//! check subcommand
//!
//! Runs the bridge UI check once under the run lock and the watchdog.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::{CheckerConfig, ConfigError, DEFAULT_CHECK_TIMEOUT_SECS, DEFAULT_RESULT_FILE};
use crate::health::{run_with_watchdog, BridgeUiChecker, RunOutcome};
use crate::lock::RunLock;
use crate::store::FileResultStore;

/// Arguments for the check subcommand
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Base URL of the monitored UI
    #[arg(long, env = "BRIDGE_UI_URL")]
    pub bridge_ui_url: Option<String>,

    /// Expected home bridge address (case-insensitive)
    #[arg(long, env = "HOME_BRIDGE_ADDRESS")]
    pub home_bridge_address: Option<String>,

    /// Expected foreign bridge address (case-insensitive)
    #[arg(long, env = "FOREIGN_BRIDGE_ADDRESS")]
    pub foreign_bridge_address: Option<String>,

    /// Give up on the whole run after this many seconds
    #[arg(long, default_value_t = DEFAULT_CHECK_TIMEOUT_SECS, env = "CHECK_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Where to write the result record
    #[arg(long, default_value = DEFAULT_RESULT_FILE, env = "RESULT_FILE")]
    pub result_file: PathBuf,
}

impl CheckArgs {
    /// Resolve and validate the checker configuration.
    pub fn to_config(&self) -> Result<CheckerConfig, ConfigError> {
        Ok(CheckerConfig::new(
            self.bridge_ui_url.clone(),
            self.home_bridge_address.clone(),
            self.foreign_bridge_address.clone(),
        )?
        .with_timeout_secs(self.timeout_secs)?
        .with_result_file(&self.result_file))
    }
}

/// Execute the check command
///
/// `Err` means the run could not start (configuration, lock) or the record
/// could not be written; check failures come back as `RunOutcome::Failed`.
pub async fn execute(args: &CheckArgs) -> anyhow::Result<RunOutcome> {
    let config = args.to_config()?;

    info!(
        url = %config.bridge_ui_url,
        timeout_secs = config.timeout.as_secs(),
        "Starting bridge UI check"
    );

    let _lock = RunLock::acquire(config.lock_file())?;
    let store = FileResultStore::new(&config.result_file);
    let checker = BridgeUiChecker::new(config)?;

    let outcome = run_with_watchdog(&checker, &store)
        .await
        .with_context(|| format!("Failed to write result to {}", store.path().display()))?;

    info!(outcome = ?outcome, "Bridge UI check finished");
    Ok(outcome)
}

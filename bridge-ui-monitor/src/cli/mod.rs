//! CLI module for bridge-ui-monitor
//!
//! One binary, two processes: `check` runs a single probe and exits, `serve`
//! exposes the last recorded result over HTTP.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Bridge UI monitor - verifies the deployed bridge UI still points at the expected contracts
#[derive(Parser, Debug)]
#[command(name = "bridge-ui-monitor")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    BRIDGE_UI_URL             Base URL of the monitored UI (check, required)
    HOME_BRIDGE_ADDRESS       Expected home bridge address (check, required)
    FOREIGN_BRIDGE_ADDRESS    Expected foreign bridge address (check, required)
    CHECK_TIMEOUT_SECS        Ceiling for a whole check run (default: 30)
    RESULT_FILE               Result record location (default: result.json)
    HOST                      Status server bind address (default: 0.0.0.0)
    PORT                      Status server port (default: 3000)
    DEBUG                     Log request/response bodies when set
    BRIDGE_MONITOR_LOG_LEVEL  Log filter (default: info)

A .env file in the working directory is loaded before parsing.
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge UI check once and record the result
    Check(check::CheckArgs),
    /// Serve the last recorded result over HTTP
    Serve(serve::ServeArgs),
}

//! Bridge UI Monitor entry point

use bridge_ui_monitor::cli::{Cli, Commands};
use bridge_ui_monitor::logging;
use clap::Parser;

#[tokio::main]
async fn main() {
    // .env must be loaded before clap resolves `env = ...` arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init().expect("failed to initialize logging");

    match cli.command {
        Commands::Check(args) => match bridge_ui_monitor::cli::check::execute(&args).await {
            Ok(outcome) => std::process::exit(outcome.exit_code()),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
        Commands::Serve(args) => {
            if let Err(e) = bridge_ui_monitor::cli::serve::execute(&args).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

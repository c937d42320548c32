use pii_admin::cli::Cli;
use pii_admin::commands;
use pii_admin::logger::initialize as LoggerInitialize;

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger FIRST
    if let Err(e) = LoggerInitialize(cli.log_level(), cli.log_dir.as_deref()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    debug!("pii-admin {} starting", env!("CARGO_PKG_VERSION"));

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if e.requires_login() {
                eprintln!("Session expired or missing. Run `pii-admin login` first.");
            }
            ExitCode::FAILURE
        }
    }
}

//! Roster CLI - Main entry point

use clap::Parser;
use roster_cli::{Cli, Commands};
use roster_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("roster-cli")
        .build();

    // Environment takes precedence; the CLI works without logging
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);
    let _log_guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn execute_command(cli: &Cli) -> roster_cli::Result<()> {
    match &cli.command {
        Commands::Validate { table, file } => roster_cli::commands::validate::run(
            *table,
            file.as_deref(),
            &cli.data_dir,
            cli.json,
        ),
        Commands::ValidateAll => roster_cli::commands::validate::run_all(&cli.data_dir, cli.json),
    }
}

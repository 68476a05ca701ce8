//! COD CLI - Main entry point

use clap::Parser;
use cod_cli::{Cli, Commands};
use cod_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        // Verbose mode: log to console with debug level
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("cod")
            .build()
    } else {
        // Normal mode: warnings and errors only
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("cod")
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = log_config
        .clone()
        .with_env_overrides()
        .unwrap_or(log_config);

    // Initialize logging (ignore errors as CLI should work without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(&cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> cod_cli::Result<()> {
    // Command is guaranteed to exist at this point (checked in main)
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    match command {
        Commands::Run => cod_cli::commands::run::run(&cli.base_dir).await,

        Commands::Status => cod_cli::commands::status::run(&cli.base_dir).await,

        Commands::Query {
            country,
            source,
            top,
            format,
            no_header,
        } => {
            cod_cli::commands::query::run(
                &cli.base_dir,
                country,
                source,
                *top,
                format.as_deref(),
                *no_header,
            )
            .await
        }
    }
}

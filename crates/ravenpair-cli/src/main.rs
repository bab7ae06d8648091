//! RavenPair CLI binary entrypoint.
//!
//! This is the main entry point for the `ravenpair` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ravenpair_cli::cli::{Cli, Commands};
use ravenpair_cli::client::HttpApiClient;
use ravenpair_cli::commands::{ApiCommand, ConnectCommand, VersionCommand};
use ravenpair_cli::config::Settings;
use ravenpair_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ravenpair_cli::CliError> {
    let format = OutputFormat::new(cli.format);

    if let Commands::Version = cli.command {
        return VersionCommand::new().execute(&mut io::stdout().lock(), &format);
    }

    let settings = Settings::load(
        cli.server.as_deref(),
        cli.token.as_deref(),
        cli.config.as_deref(),
    )?;
    if let Some(path) = &settings.config_file {
        eprintln!("Using config file: {}", path.display());
    }

    match cli.command {
        Commands::Api { command } => {
            let client = HttpApiClient::new(&settings.server, settings.token.as_deref())?;
            let cmd = ApiCommand::new(&client);
            cmd.execute(&mut io::stdout().lock(), &format, &command).await?;
        }
        Commands::Connect(args) => {
            let cmd = ConnectCommand::new(&settings, &args);
            cmd.execute(io::stdout()).await?;
        }
        Commands::Version => {}
    }

    Ok(())
}

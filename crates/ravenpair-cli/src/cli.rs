//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// CLI tool to interact with the RavenPair server.
#[derive(Parser, Debug, Clone)]
#[command(name = "ravenpair")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// RavenPair server URL [default: http://localhost:8080].
    #[arg(short, long, env = "RAVENPAIR_SERVER", global = true)]
    pub server: Option<String>,

    /// Authentication token.
    #[arg(short, long, env = "RAVENPAIR_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Config file [default: $HOME/.ravenpair.toml].
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable output.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interact with the RavenPair REST API.
    Api {
        /// API subcommand to execute.
        #[command(subcommand)]
        command: ApiCommands,
    },

    /// Open a WebSocket connection to the RavenPair server.
    ///
    /// Messages received from the server are printed to stdout.
    /// Press Ctrl+C to close the connection.
    Connect(ConnectArgs),

    /// Print the version of the ravenpair CLI.
    Version,
}

/// REST API subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ApiCommands {
    /// Get server status.
    Status,

    /// Create a new pair session.
    Pair {
        /// Name for the pair session.
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// List active pairs.
    List,
}

/// Arguments for the connect command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConnectArgs {
    /// WebSocket endpoint path.
    #[arg(short, long, default_value = "/ws")]
    pub path: String,
}

impl Default for ConnectArgs {
    fn default() -> Self {
        Self { path: "/ws".into() }
    }
}

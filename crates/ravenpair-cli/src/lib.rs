//! # ravenpair-cli
//!
//! RavenPair command-line interface.
//!
//! Provides commands for:
//! - Server status and pair management over the REST API
//! - A live WebSocket session that prints server-pushed messages
//!
//! # Architecture
//!
//! REST calls go through [`client::HttpApiClient`]. The WebSocket session
//! is driven by [`session::SessionClient`], which owns the read task and
//! the close handshake for exactly one connection per call.
//!
//! ```text
//! ┌───────────┐   HTTP /api/*    ┌──────────────────┐
//! │ ravenpair │─────────────────►│                  │
//! │    CLI    │   WebSocket /ws  │ RavenPair server │
//! │           │◄────────────────►│                  │
//! └───────────┘                  └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

pub use cli::{ApiCommands, Cli, Commands, ConnectArgs, Format};
pub use client::{ApiClient, ApiResponse, HttpApiClient};
pub use config::Settings;
pub use error::{CliError, SessionError};
pub use output::OutputFormat;
pub use session::{SessionClient, SessionConfig, SessionOutcome};

//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`api`] - REST API requests
//! - [`connect`] - Live WebSocket session
//! - [`version`] - Client version

pub mod api;
pub mod connect;
pub mod version;

pub use api::ApiCommand;
pub use connect::ConnectCommand;
pub use version::VersionCommand;

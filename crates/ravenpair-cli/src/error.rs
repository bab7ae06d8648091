//! CLI error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that end a WebSocket session abnormally.
///
/// A normal or going-away close from the server is not an error and never
/// shows up here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The handshake could not complete (network, TLS, rejected upgrade).
    #[error("websocket dial failed: {0}")]
    Dial(String),

    /// The handshake did not complete within the allotted time.
    #[error("websocket handshake timed out after {0:?}")]
    HandshakeTimeout(Duration),

    /// The connection failed while reading frames.
    #[error("websocket read failed: {0}")]
    Read(String),

    /// The close frame could not be sent.
    #[error("websocket write failed: {0}")]
    Write(String),
}

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// WebSocket session failed.
    #[error("connection error: {0}")]
    Session(#[from] SessionError),

    /// REST request failed before a response was received.
    #[error("http error: {0}")]
    Http(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

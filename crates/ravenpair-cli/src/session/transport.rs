//! Transport boundary.
//!
//! A [`Transport`] performs the handshake and hands back the connection as
//! two halves: a [`FrameReader`] owned by the read task and a
//! [`FrameWriter`] kept by the control flow for the close handshake.
//! Dropping both halves tears the connection down.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::SessionError;

/// Close code for a normal closure.
pub const CLOSE_NORMAL: u16 = 1000;

/// Close code sent by an endpoint that is going away.
pub const CLOSE_GOING_AWAY: u16 = 1001;

/// Handshake parameters for a single dial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialRequest {
    url: String,
    headers: BTreeMap<String, String>,
}

impl DialRequest {
    /// Create a request for the given WebSocket URL with no headers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Set a handshake header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach `Authorization: Bearer <token>` when the token is non-empty.
    #[must_use]
    pub fn with_bearer_token(self, token: &str) -> Self {
        if token.is_empty() {
            self
        } else {
            self.with_header("Authorization", format!("Bearer {token}"))
        }
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All handshake headers.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a single header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Status code and reason carried by a close frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    /// Close status code.
    pub code: u16,
    /// Optional human-readable reason.
    pub reason: String,
}

impl CloseFrame {
    /// Normal-closure frame with the given reason.
    #[must_use]
    pub fn normal(reason: impl Into<String>) -> Self {
        Self {
            code: CLOSE_NORMAL,
            reason: reason.into(),
        }
    }

    /// Whether the code marks an expected termination.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.code, CLOSE_NORMAL | CLOSE_GOING_AWAY)
    }
}

/// A frame read from the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Text data frame.
    Text(String),
    /// Binary data frame.
    Binary(Vec<u8>),
    /// Ping control frame.
    Ping,
    /// Pong control frame.
    Pong,
    /// Close frame, with status when the peer sent one.
    Close(Option<CloseFrame>),
}

/// Read half of a connection.
pub trait FrameReader: Send + 'static {
    /// Read the next frame. `None` means the stream ended.
    fn next_frame(&mut self) -> impl Future<Output = Option<Result<Frame, SessionError>>> + Send;
}

/// Write half of a connection.
pub trait FrameWriter: Send {
    /// Send a close frame.
    fn send_close(
        &mut self,
        frame: CloseFrame,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Flush and close the underlying connection.
    fn close(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

/// Something that can open WebSocket connections.
pub trait Transport: Send + Sync {
    /// Read half type.
    type Reader: FrameReader;
    /// Write half type.
    type Writer: FrameWriter;

    /// Perform the handshake.
    ///
    /// Any failure must be reported as [`SessionError::Dial`].
    fn dial(
        &self,
        request: &DialRequest,
    ) -> impl Future<Output = Result<(Self::Reader, Self::Writer), SessionError>> + Send;
}

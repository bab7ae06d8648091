//! `tokio-tungstenite` transport.

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame as WsCloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use crate::error::SessionError;

use super::transport::{CloseFrame, DialRequest, Frame, FrameReader, FrameWriter, Transport};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport backed by `tokio-tungstenite`, with TLS for `wss://`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteTransport;

impl TungsteniteTransport {
    /// Create a new transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Transport for TungsteniteTransport {
    type Reader = TungsteniteReader;
    type Writer = TungsteniteWriter;

    async fn dial(
        &self,
        request: &DialRequest,
    ) -> Result<(TungsteniteReader, TungsteniteWriter), SessionError> {
        let mut ws_request = request
            .url()
            .into_client_request()
            .map_err(|e| SessionError::Dial(format!("invalid url '{}': {e}", request.url())))?;

        for (name, value) in request.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SessionError::Dial(format!("invalid header name '{name}': {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| SessionError::Dial(format!("invalid value for header '{name}': {e}")))?;
            ws_request.headers_mut().insert(header_name, header_value);
        }

        debug!(url = %request.url(), "Dialing websocket");

        let (ws, response) = connect_async(ws_request)
            .await
            .map_err(|e| SessionError::Dial(e.to_string()))?;

        debug!(status = %response.status(), "Websocket handshake complete");

        let (sink, stream) = ws.split();
        Ok((TungsteniteReader { stream }, TungsteniteWriter { sink }))
    }
}

/// Read half of a tungstenite connection.
pub struct TungsteniteReader {
    stream: SplitStream<WsStream>,
}

impl std::fmt::Debug for TungsteniteReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TungsteniteReader").finish_non_exhaustive()
    }
}

impl FrameReader for TungsteniteReader {
    async fn next_frame(&mut self) -> Option<Result<Frame, SessionError>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(SessionError::Read(e.to_string()))),
            };

            let frame = match message {
                WsMessage::Text(text) => Frame::Text(text),
                WsMessage::Binary(data) => Frame::Binary(data),
                WsMessage::Ping(_) => Frame::Ping,
                WsMessage::Pong(_) => Frame::Pong,
                WsMessage::Close(close) => Frame::Close(close.map(|c| CloseFrame {
                    code: u16::from(c.code),
                    reason: c.reason.into_owned(),
                })),
                WsMessage::Frame(_) => {
                    trace!("Skipping raw frame");
                    continue;
                }
            };
            return Some(Ok(frame));
        }
    }
}

/// Write half of a tungstenite connection.
pub struct TungsteniteWriter {
    sink: SplitSink<WsStream, WsMessage>,
}

impl std::fmt::Debug for TungsteniteWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TungsteniteWriter").finish_non_exhaustive()
    }
}

impl FrameWriter for TungsteniteWriter {
    async fn send_close(&mut self, frame: CloseFrame) -> Result<(), SessionError> {
        let close = WsCloseFrame {
            code: CloseCode::from(frame.code),
            reason: frame.reason.into(),
        };
        self.sink
            .send(WsMessage::Close(Some(close)))
            .await
            .map_err(|e| SessionError::Write(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        match self.sink.close().await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(SessionError::Write(e.to_string())),
        }
    }
}

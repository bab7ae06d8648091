//! Session orchestration.
//!
//! A session dials once, spawns a single read task that feeds the
//! [`MessageHandler`], then waits for whichever comes first:
//!
//! - the read task finishing (server close or read error), or
//! - the caller's shutdown future resolving.
//!
//! Shutdown is also observed during the handshake; the dial is then
//! dropped and no read task is started.
//!
//! On shutdown a normal-closure frame is sent and the read task gets
//! [`SessionConfig::close_grace`] to observe the server's reply before it
//! is aborted. Every path closes the connection and joins the read task
//! before returning, so no background work outlives [`SessionClient::connect`].

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use crate::error::SessionError;

use super::message::{Message, MessageHandler};
use super::state::{AtomicSessionState, SessionState};
use super::transport::{CloseFrame, DialRequest, Frame, FrameReader, FrameWriter, Transport};
use super::tungstenite::TungsteniteTransport;
use super::url::to_websocket_url;

/// Default handshake timeout.
const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wait for the server to acknowledge a client close.
const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(3);

/// Timing parameters for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Upper bound on the opening handshake.
    pub handshake_timeout: Duration,
    /// Upper bound on the close handshake after a local shutdown.
    pub close_grace: Duration,
}

impl SessionConfig {
    /// Set the handshake timeout.
    #[must_use]
    pub const fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }

    /// Set the close grace period.
    #[must_use]
    pub const fn with_close_grace(mut self, close_grace: Duration) -> Self {
        self.close_grace = close_grace;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
            close_grace: DEFAULT_CLOSE_GRACE,
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The server closed the stream with a normal or going-away code.
    ClosedByServer,
    /// The local side requested shutdown; carries the close reason.
    ClosedByClient(String),
    /// Dial, read or close-frame write failed.
    Failed(SessionError),
}

impl SessionOutcome {
    /// Whether the session ended without an error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Convert into a `Result`, keeping the error of a failed session.
    ///
    /// # Errors
    ///
    /// Returns the session error for [`SessionOutcome::Failed`].
    pub fn into_result(self) -> Result<(), SessionError> {
        match self {
            Self::ClosedByServer | Self::ClosedByClient(_) => Ok(()),
            Self::Failed(e) => Err(e),
        }
    }
}

/// WebSocket session client.
///
/// Each call to [`connect`](Self::connect) drives exactly one connection;
/// nothing is reused between calls.
#[derive(Debug)]
pub struct SessionClient<T = TungsteniteTransport> {
    transport: T,
    config: SessionConfig,
    state: AtomicSessionState,
}

impl SessionClient<TungsteniteTransport> {
    /// Create a client over the default `tokio-tungstenite` transport.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(TungsteniteTransport::new())
    }
}

impl Default for SessionClient<TungsteniteTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> SessionClient<T> {
    /// Create a client over the given transport.
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            config: SessionConfig::default(),
            state: AtomicSessionState::default(),
        }
    }

    /// Replace the timing configuration.
    #[must_use]
    pub const fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Timing configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current lifecycle state of the most recent session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.load()
    }

    /// Connect to `path` on the server at `target_url` and deliver messages
    /// to `handler` until the session ends.
    ///
    /// `target_url` may be an `http(s)://` base URL; it is translated to
    /// `ws(s)://`. A non-empty `token` is sent as a bearer token. The
    /// `shutdown` future resolves with a close reason when the caller wants
    /// to disconnect.
    pub async fn connect<H, S>(
        &self,
        target_url: &str,
        path: &str,
        token: &str,
        handler: H,
        shutdown: S,
    ) -> SessionOutcome
    where
        H: MessageHandler,
        S: Future<Output = String>,
    {
        let url = format!("{}{path}", to_websocket_url(target_url));
        let request = DialRequest::new(url).with_bearer_token(token);
        self.run(&request, handler, shutdown).await
    }

    /// Run a session for an already-built dial request.
    pub async fn run<H, S>(&self, request: &DialRequest, mut handler: H, shutdown: S) -> SessionOutcome
    where
        H: MessageHandler,
        S: Future<Output = String>,
    {
        self.state.store(SessionState::Dialing);
        tokio::pin!(shutdown);

        let dialed = tokio::select! {
            biased;

            dialed = timeout(self.config.handshake_timeout, self.transport.dial(request)) => dialed,

            reason = &mut shutdown => {
                info!(reason = %reason, "Shutdown requested during handshake");
                return self.finish(SessionOutcome::ClosedByClient(reason));
            }
        };
        let (reader, mut writer) = match dialed {
            Ok(Ok(halves)) => halves,
            Ok(Err(e)) => return self.finish(SessionOutcome::Failed(e)),
            Err(_) => {
                return self.finish(SessionOutcome::Failed(SessionError::HandshakeTimeout(
                    self.config.handshake_timeout,
                )));
            }
        };

        self.state.store(SessionState::Connected);
        info!(url = %request.url(), "Session connected");
        handler.on_open(request.url());

        let delivering = Arc::new(AtomicBool::new(true));
        let mut read_task = tokio::spawn(read_loop(reader, handler, Arc::clone(&delivering)));

        let outcome = tokio::select! {
            biased;

            joined = &mut read_task => match join_result(joined) {
                Ok(()) => SessionOutcome::ClosedByServer,
                Err(e) => SessionOutcome::Failed(e),
            },

            reason = &mut shutdown => {
                self.state.store(SessionState::Closing);
                delivering.store(false, Ordering::SeqCst);
                debug!(reason = %reason, "Shutdown requested, sending close frame");

                let sent = writer.send_close(CloseFrame::normal(reason.clone())).await;
                match &sent {
                    Ok(()) => {
                        let acked = timeout(self.config.close_grace, &mut read_task).await;
                        match acked {
                            Ok(joined) => {
                                if let Err(e) = join_result(joined) {
                                    debug!(error = %e, "Read task ended with error during close");
                                }
                            }
                            Err(_) => {
                                warn!(grace = ?self.config.close_grace, "Close not acknowledged, forcing");
                                abort_and_join(read_task).await;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to send close frame");
                        abort_and_join(read_task).await;
                    }
                }

                match sent {
                    Ok(()) => SessionOutcome::ClosedByClient(reason),
                    Err(e) => SessionOutcome::Failed(e),
                }
            }
        };

        if let Err(e) = writer.close().await {
            debug!(error = %e, "Error while closing connection");
        }
        drop(writer);

        self.finish(outcome)
    }

    fn finish(&self, outcome: SessionOutcome) -> SessionOutcome {
        let state = if outcome.is_success() {
            SessionState::Closed
        } else {
            SessionState::Failed
        };
        self.state.store(state);
        debug!(?outcome, "Session finished");
        outcome
    }
}

/// Read frames until the stream terminates.
///
/// `Ok(())` means the server closed with a normal or going-away code.
async fn read_loop<R, H>(
    mut reader: R,
    mut handler: H,
    delivering: Arc<AtomicBool>,
) -> Result<(), SessionError>
where
    R: FrameReader,
    H: MessageHandler,
{
    loop {
        let frame = match reader.next_frame().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => return Err(e),
            None => {
                return Err(SessionError::Read(
                    "connection ended without a close frame".into(),
                ));
            }
        };

        let message = match frame {
            Frame::Text(text) => Message::text(text),
            Frame::Binary(data) => Message::binary(data),
            Frame::Ping | Frame::Pong => {
                trace!("Ignoring control frame");
                continue;
            }
            Frame::Close(Some(close)) if close.is_clean() => {
                debug!(code = close.code, reason = %close.reason, "Server closed session");
                return Ok(());
            }
            Frame::Close(Some(close)) => {
                return Err(SessionError::Read(format!(
                    "server closed with code {}: {}",
                    close.code, close.reason
                )));
            }
            Frame::Close(None) => {
                return Err(SessionError::Read(
                    "server closed without a status code".into(),
                ));
            }
        };

        if delivering.load(Ordering::SeqCst) {
            handler.on_message(message);
        } else {
            trace!(len = message.payload().len(), "Dropping message received during shutdown");
        }
    }
}

fn join_result(joined: Result<Result<(), SessionError>, JoinError>) -> Result<(), SessionError> {
    joined.unwrap_or_else(|e| Err(SessionError::Read(format!("read task ended unexpectedly: {e}"))))
}

async fn abort_and_join(read_task: tokio::task::JoinHandle<Result<(), SessionError>>) {
    read_task.abort();
    if let Err(e) = read_task.await {
        trace!(cancelled = e.is_cancelled(), "Read task stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    use parking_lot::Mutex;
    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::session::transport::{CLOSE_GOING_AWAY, CLOSE_NORMAL};

    type ServerTx = mpsc::UnboundedSender<Result<Frame, SessionError>>;
    type ServerRx = mpsc::UnboundedReceiver<Result<Frame, SessionError>>;

    /// What the fake server did with the connection.
    #[derive(Debug, Default, Clone)]
    struct Recorder {
        requests: Arc<Mutex<Vec<DialRequest>>>,
        close_frames: Arc<Mutex<Vec<CloseFrame>>>,
        closes: Arc<AtomicUsize>,
    }

    /// In-memory transport driven by a frame channel.
    struct FakeTransport {
        server: ServerTx,
        frames: Mutex<Option<ServerRx>>,
        dial_error: Option<String>,
        dial_hangs: bool,
        reply_to_close: Vec<Frame>,
        fail_close_write: bool,
        recorder: Recorder,
    }

    impl FakeTransport {
        fn new() -> (Self, ServerTx) {
            let (tx, rx) = mpsc::unbounded_channel();
            let transport = Self {
                server: tx.clone(),
                frames: Mutex::new(Some(rx)),
                dial_error: None,
                dial_hangs: false,
                reply_to_close: Vec::new(),
                fail_close_write: false,
                recorder: Recorder::default(),
            };
            (transport, tx)
        }

        fn echoing_close(mut self) -> Self {
            self.reply_to_close = vec![Frame::Close(Some(CloseFrame::normal("")))];
            self
        }
    }

    struct FakeReader {
        frames: ServerRx,
    }

    impl FrameReader for FakeReader {
        async fn next_frame(&mut self) -> Option<Result<Frame, SessionError>> {
            self.frames.recv().await
        }
    }

    struct FakeWriter {
        server: ServerTx,
        reply_to_close: Vec<Frame>,
        fail_close_write: bool,
        recorder: Recorder,
    }

    impl FrameWriter for FakeWriter {
        async fn send_close(&mut self, frame: CloseFrame) -> Result<(), SessionError> {
            if self.fail_close_write {
                return Err(SessionError::Write("broken pipe".into()));
            }
            self.recorder.close_frames.lock().push(frame);
            for reply in self.reply_to_close.drain(..) {
                let _ = self.server.send(Ok(reply));
            }
            Ok(())
        }

        async fn close(&mut self) -> Result<(), SessionError> {
            self.recorder.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Transport for FakeTransport {
        type Reader = FakeReader;
        type Writer = FakeWriter;

        async fn dial(&self, request: &DialRequest) -> Result<(FakeReader, FakeWriter), SessionError> {
            self.recorder.requests.lock().push(request.clone());
            if self.dial_hangs {
                std::future::pending::<()>().await;
            }
            if let Some(msg) = &self.dial_error {
                return Err(SessionError::Dial(msg.clone()));
            }
            let frames = self
                .frames
                .lock()
                .take()
                .ok_or_else(|| SessionError::Dial("already dialed".into()))?;
            Ok((
                FakeReader { frames },
                FakeWriter {
                    server: self.server.clone(),
                    reply_to_close: self.reply_to_close.clone(),
                    fail_close_write: self.fail_close_write,
                    recorder: self.recorder.clone(),
                },
            ))
        }
    }

    fn collector() -> (Arc<Mutex<Vec<Message>>>, impl MessageHandler) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |m: Message| sink.lock().push(m))
    }

    fn never() -> impl Future<Output = String> {
        std::future::pending()
    }

    fn text(s: &str) -> Result<Frame, SessionError> {
        Ok(Frame::Text(s.into()))
    }

    fn close(code: u16) -> Result<Frame, SessionError> {
        Ok(Frame::Close(Some(CloseFrame {
            code,
            reason: String::new(),
        })))
    }

    #[tokio::test]
    async fn delivers_frames_in_order_then_closed_by_server() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();
        server.send(text("hello")).unwrap();
        server.send(Ok(Frame::Binary(vec![1, 2, 3]))).unwrap();
        server.send(Ok(Frame::Ping)).unwrap();
        server.send(Ok(Frame::Pong)).unwrap();
        server.send(text("world")).unwrap();
        server.send(close(CLOSE_NORMAL)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (seen, handler) = collector();
        let outcome = client
            .connect("http://localhost:8080", "/ws", "", handler, never())
            .await;

        assert!(matches!(outcome, SessionOutcome::ClosedByServer));
        assert_eq!(
            *seen.lock(),
            vec![
                Message::text("hello"),
                Message::binary(vec![1, 2, 3]),
                Message::text("world"),
            ]
        );
        assert_eq!(client.state(), SessionState::Closed);
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
        assert!(recorder.close_frames.lock().is_empty());
    }

    #[tokio::test]
    async fn going_away_close_is_clean() {
        let (transport, server) = FakeTransport::new();
        server.send(close(CLOSE_GOING_AWAY)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        assert!(matches!(outcome, SessionOutcome::ClosedByServer));
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn abnormal_close_code_fails() {
        let (transport, server) = FakeTransport::new();
        server.send(close(1011)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        match outcome {
            SessionOutcome::Failed(SessionError::Read(msg)) => assert!(msg.contains("1011")),
            other => panic!("expected read failure, got {other:?}"),
        }
        assert_eq!(client.state(), SessionState::Failed);
    }

    #[tokio::test]
    async fn close_without_status_fails() {
        let (transport, server) = FakeTransport::new();
        server.send(Ok(Frame::Close(None))).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        assert!(matches!(outcome, SessionOutcome::Failed(SessionError::Read(_))));
    }

    #[tokio::test]
    async fn read_error_fails_after_delivering_earlier_frames() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();
        server.send(text("first")).unwrap();
        server
            .send(Err(SessionError::Read("connection reset".into())))
            .unwrap();
        server.send(text("never read")).unwrap();

        let client = SessionClient::with_transport(transport);
        let (seen, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        match outcome {
            SessionOutcome::Failed(SessionError::Read(msg)) => assert_eq!(msg, "connection reset"),
            other => panic!("expected read failure, got {other:?}"),
        }
        assert_eq!(*seen.lock(), vec![Message::text("first")]);
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dial_failure_never_starts_reading() {
        let (mut transport, server) = FakeTransport::new();
        transport.dial_error = Some("connection refused".into());
        let recorder = transport.recorder.clone();
        server.send(text("unreachable")).unwrap();

        let client = SessionClient::with_transport(transport);
        let (seen, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        assert!(matches!(outcome, SessionOutcome::Failed(SessionError::Dial(_))));
        assert!(seen.lock().is_empty());
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 0);
        assert_eq!(client.state(), SessionState::Failed);
    }

    #[tokio::test]
    async fn handshake_timeout_fails() {
        let (mut transport, _server) = FakeTransport::new();
        transport.dial_hangs = true;

        let config = SessionConfig::default().with_handshake_timeout(Duration::from_millis(50));
        let client = SessionClient::with_transport(transport).with_config(config);
        let (_, handler) = collector();
        let outcome = client.connect("ws://x", "/ws", "", handler, never()).await;

        match outcome {
            SessionOutcome::Failed(SessionError::HandshakeTimeout(d)) => {
                assert_eq!(d, Duration::from_millis(50));
            }
            other => panic!("expected handshake timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn shutdown_during_handshake_ends_without_reading() {
        let (mut transport, server) = FakeTransport::new();
        transport.dial_hangs = true;
        let recorder = transport.recorder.clone();
        server.send(text("unreachable")).unwrap();

        let config = SessionConfig::default().with_handshake_timeout(Duration::from_secs(5));
        let client = SessionClient::with_transport(transport).with_config(config);
        let (seen, handler) = collector();

        let started = Instant::now();
        let outcome = client
            .connect("ws://x", "/ws", "", handler, async { "interrupted".to_string() })
            .await;

        match outcome {
            SessionOutcome::ClosedByClient(reason) => assert_eq!(reason, "interrupted"),
            other => panic!("expected client close, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(seen.lock().is_empty());
        assert!(recorder.close_frames.lock().is_empty());
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 0);
        assert_eq!(client.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn builds_websocket_url_from_http_base() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();
        server.send(close(CLOSE_NORMAL)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let _ = client
            .connect("http://localhost:8080/", "/ws", "", handler, never())
            .await;

        let requests = recorder.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url(), "ws://localhost:8080/ws");
        assert_eq!(requests[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn token_becomes_bearer_header() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();
        server.send(close(CLOSE_NORMAL)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let _ = client
            .connect("https://example.com", "/ws", "tok123", handler, never())
            .await;

        let requests = recorder.requests.lock();
        assert_eq!(requests[0].url(), "wss://example.com/ws");
        assert_eq!(requests[0].header("Authorization"), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn on_open_runs_before_messages() {
        struct Events(Arc<Mutex<Vec<String>>>);

        impl MessageHandler for Events {
            fn on_open(&mut self, url: &str) {
                self.0.lock().push(format!("open {url}"));
            }

            fn on_message(&mut self, message: Message) {
                self.0.lock().push(message.to_text_lossy());
            }
        }

        let (transport, server) = FakeTransport::new();
        server.send(text("one")).unwrap();
        server.send(close(CLOSE_NORMAL)).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let client = SessionClient::with_transport(transport);
        let outcome = client
            .connect("ws://x", "/ws", "", Events(Arc::clone(&events)), never())
            .await;

        assert!(outcome.is_success());
        assert_eq!(*events.lock(), vec!["open ws://x/ws".to_string(), "one".to_string()]);
    }

    #[tokio::test]
    async fn shutdown_sends_one_close_frame_and_stops_delivery() {
        let (mut transport, server) = FakeTransport::new();
        transport = transport.echoing_close();
        transport
            .reply_to_close
            .insert(0, Frame::Text("in flight after close".into()));
        let recorder = transport.recorder.clone();
        server.send(text("before")).unwrap();

        let (first_tx, first_rx) = oneshot::channel::<()>();
        let mut first_tx = Some(first_tx);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = move |m: Message| {
            sink.lock().push(m);
            if let Some(tx) = first_tx.take() {
                let _ = tx.send(());
            }
        };
        let shutdown = async move {
            let _ = first_rx.await;
            "interrupted".to_string()
        };

        let client = SessionClient::with_transport(transport);
        let outcome = client.connect("ws://x", "/ws", "", handler, shutdown).await;

        match outcome {
            SessionOutcome::ClosedByClient(reason) => assert_eq!(reason, "interrupted"),
            other => panic!("expected client close, got {other:?}"),
        }
        assert_eq!(*seen.lock(), vec![Message::text("before")]);
        assert_eq!(
            *recorder.close_frames.lock(),
            vec![CloseFrame::normal("interrupted")]
        );
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
        assert_eq!(client.state(), SessionState::Closed);
    }

    #[tokio::test]
    async fn unacknowledged_close_is_forced_after_grace() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();

        let config = SessionConfig::default().with_close_grace(Duration::from_millis(100));
        let client = SessionClient::with_transport(transport).with_config(config);
        let (_, handler) = collector();

        let started = Instant::now();
        let outcome = client
            .connect("ws://x", "/ws", "", handler, async { "bye".to_string() })
            .await;

        assert!(matches!(outcome, SessionOutcome::ClosedByClient(ref r) if r == "bye"));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(recorder.close_frames.lock().len(), 1);
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
        // The aborted read task dropped the receiving half.
        assert!(server.is_closed());
    }

    #[tokio::test]
    async fn close_write_failure_is_reported_and_connection_still_closed() {
        let (mut transport, _server) = FakeTransport::new();
        transport.fail_close_write = true;
        let recorder = transport.recorder.clone();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let outcome = client
            .connect("ws://x", "/ws", "", handler, async { "bye".to_string() })
            .await;

        assert!(matches!(outcome, SessionOutcome::Failed(SessionError::Write(_))));
        assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
        assert_eq!(client.state(), SessionState::Failed);
    }

    #[tokio::test]
    async fn shutdown_after_server_close_is_ignored() {
        let (transport, server) = FakeTransport::new();
        let recorder = transport.recorder.clone();
        server.send(close(CLOSE_NORMAL)).unwrap();

        let client = SessionClient::with_transport(transport);
        let (_, handler) = collector();
        let shutdown = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "late".to_string()
        };
        let outcome = client.connect("ws://x", "/ws", "", handler, shutdown).await;

        assert!(matches!(outcome, SessionOutcome::ClosedByServer));
        assert!(recorder.close_frames.lock().is_empty());
    }

    #[test]
    fn outcome_into_result() {
        assert!(SessionOutcome::ClosedByServer.into_result().is_ok());
        assert!(SessionOutcome::ClosedByClient("x".into()).into_result().is_ok());
        let err = SessionOutcome::Failed(SessionError::Write("x".into()))
            .into_result()
            .unwrap_err();
        assert!(matches!(err, SessionError::Write(_)));
    }

    #[test]
    fn default_config_matches_protocol_timeouts() {
        let config = SessionConfig::default();
        assert_eq!(config.handshake_timeout, Duration::from_secs(10));
        assert_eq!(config.close_grace, Duration::from_secs(3));
    }
}

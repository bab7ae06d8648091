//! WebSocket session client.
//!
//! Drives a single connection to the server's `/ws` stream from dial to
//! termination: one read task delivers frames to a [`MessageHandler`]
//! while the caller waits for either the server to close the stream or a
//! local shutdown request.
//!
//! ```text
//! ┌───────────────┐  dial   ┌───────────┐  frames  ┌────────────────┐
//! │ SessionClient │────────►│ Transport │─────────►│ MessageHandler │
//! └───────────────┘  close  └───────────┘          └────────────────┘
//! ```

mod message;
mod orchestrator;
mod state;
mod transport;
mod tungstenite;
mod url;

pub use message::{Message, MessageHandler, MessageKind};
pub use orchestrator::{SessionClient, SessionConfig, SessionOutcome};
pub use state::{AtomicSessionState, SessionState};
pub use transport::{
    CloseFrame, DialRequest, Frame, FrameReader, FrameWriter, Transport, CLOSE_GOING_AWAY,
    CLOSE_NORMAL,
};
pub use tungstenite::TungsteniteTransport;
pub use url::to_websocket_url;

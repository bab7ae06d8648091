//! Messages delivered to the caller.

/// Kind of a received data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// UTF-8 text frame.
    Text,
    /// Binary frame.
    Binary,
}

/// A text or binary message received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    payload: Vec<u8>,
}

impl Message {
    /// Create a text message.
    #[must_use]
    pub fn text(payload: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Text,
            payload: payload.into().into_bytes(),
        }
    }

    /// Create a binary message.
    #[must_use]
    pub fn binary(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: MessageKind::Binary,
            payload: payload.into(),
        }
    }

    /// Message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Receiver of session events.
///
/// Handlers run on the session's read task. `on_message` is called once
/// per message, in arrival order, and the next frame is not read until it
/// returns.
pub trait MessageHandler: Send + 'static {
    /// Called once after the handshake succeeds, before any message.
    fn on_open(&mut self, _url: &str) {}

    /// Called for every text or binary message.
    fn on_message(&mut self, message: Message);
}

impl<F> MessageHandler for F
where
    F: FnMut(Message) + Send + 'static,
{
    fn on_message(&mut self, message: Message) {
        self(message);
    }
}

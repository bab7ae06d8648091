//! Session lifecycle state.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a single session.
///
/// `Idle -> Dialing -> Connected -> Closing -> Closed`, with `Failed`
/// reachable from `Dialing` and `Connected`. `Closed` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No dial attempted yet.
    Idle,
    /// Handshake in progress.
    Dialing,
    /// Handshake done, frames flowing.
    Connected,
    /// Close handshake in progress.
    Closing,
    /// Connection closed cleanly.
    Closed,
    /// Connection ended with an error.
    Failed,
}

/// Atomic wrapper for session state.
#[derive(Debug)]
pub struct AtomicSessionState(AtomicU8);

impl AtomicSessionState {
    /// Create a new atomic state.
    #[must_use]
    pub const fn new(state: SessionState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    /// Load the current state.
    #[must_use]
    pub fn load(&self) -> SessionState {
        match self.0.load(Ordering::SeqCst) {
            0 => SessionState::Idle,
            1 => SessionState::Dialing,
            2 => SessionState::Connected,
            3 => SessionState::Closing,
            4 => SessionState::Closed,
            _ => SessionState::Failed,
        }
    }

    /// Store a new state.
    pub fn store(&self, state: SessionState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

impl Default for AtomicSessionState {
    fn default() -> Self {
        Self::new(SessionState::Idle)
    }
}

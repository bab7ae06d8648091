//! Connect command implementation.
//!
//! Opens a WebSocket session and prints every message until the server
//! closes the stream or the user presses Ctrl+C.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cli::ConnectArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::MessagePrinter;
use crate::session::{SessionClient, SessionOutcome, Transport};

/// Close reason sent when the user interrupts the session.
pub const INTERRUPT_REASON: &str = "interrupted";

/// Connect command executor.
#[derive(Debug, Clone)]
pub struct ConnectCommand {
    server: String,
    token: String,
    path: String,
}

impl ConnectCommand {
    /// Create a new connect command.
    #[must_use]
    pub fn new(settings: &Settings, args: &ConnectArgs) -> Self {
        Self {
            server: settings.server.clone(),
            token: settings.token_str().to_string(),
            path: args.path.clone(),
        }
    }

    /// Address shown to the user: the configured server plus the path.
    #[must_use]
    pub fn display_url(&self) -> String {
        format!("{}{}", self.server, self.path)
    }

    /// Execute the connect command, disconnecting on Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns an error if the session fails or output fails.
    pub async fn execute<W>(&self, out: W) -> Result<(), CliError>
    where
        W: Write + Send + 'static,
    {
        let (listener, shutdown) = listen_for(ctrl_c());
        let result = self.run(&SessionClient::new(), out, shutdown).await;
        listener.abort();
        result
    }

    /// Run a session over `client`, disconnecting when `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the session fails or output fails.
    pub async fn run<T, W, S>(
        &self,
        client: &SessionClient<T>,
        out: W,
        shutdown: S,
    ) -> Result<(), CliError>
    where
        T: Transport,
        W: Write + Send + 'static,
        S: Future<Output = String>,
    {
        let out = Arc::new(Mutex::new(out));
        writeln!(out.lock(), "Connecting to {}", self.display_url())?;

        let notice = Arc::clone(&out);
        let shutdown = async move {
            let reason = shutdown.await;
            if let Err(e) = writeln!(notice.lock(), "\nInterrupted. Closing connection...") {
                warn!(error = %e, "Failed to write session output");
            }
            reason
        };

        let printer = MessagePrinter::new(Arc::clone(&out));
        let outcome = client
            .connect(&self.server, &self.path, &self.token, printer, shutdown)
            .await;

        let mut out = out.lock();
        match outcome {
            SessionOutcome::ClosedByServer => writeln!(out, "Connection closed by server.")?,
            SessionOutcome::ClosedByClient(_) => writeln!(out, "Connection closed.")?,
            SessionOutcome::Failed(e) => return Err(e.into()),
        }
        out.flush()?;
        Ok(())
    }
}

/// Start waiting for `signal` on its own task right away.
///
/// Returns the listener task and a future resolving with the signal's
/// close reason. The future never resolves if the listener is dropped
/// without firing.
fn listen_for<F>(signal: F) -> (JoinHandle<()>, impl Future<Output = String> + Send)
where
    F: Future<Output = String> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let listener = tokio::spawn(async move {
        let _ = tx.send(signal.await);
    });
    let shutdown = async move {
        match rx.await {
            Ok(reason) => reason,
            Err(_) => std::future::pending().await,
        }
    };
    (listener, shutdown)
}

/// Resolves once Ctrl+C is pressed.
async fn ctrl_c() -> String {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C; only the server can end this session");
        std::future::pending::<()>().await;
    }
    INTERRUPT_REASON.to_string()
}

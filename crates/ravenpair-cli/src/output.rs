//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats for REST
//! responses, and a line-per-message printer for WebSocket sessions.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::cli::Format;
use crate::client::ApiResponse;
use crate::error::CliError;
use crate::session::{Message, MessageHandler, MessageKind};

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Body of a REST response, parsed when it is JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Valid JSON body.
    Json(serde_json::Value),
    /// Anything else, decoded lossily.
    Raw(String),
}

/// REST response as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDocument {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: ResponseBody,
}

impl From<&ApiResponse> for ResponseDocument {
    fn from(response: &ApiResponse) -> Self {
        let body = response.json().map_or_else(
            || ResponseBody::Raw(String::from_utf8_lossy(&response.body).into_owned()),
            ResponseBody::Json,
        );
        Self {
            status: response.status,
            body,
        }
    }
}

impl TableDisplay for ResponseDocument {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "HTTP {}", self.status)?;
        match &self.body {
            ResponseBody::Json(value) => {
                let pretty = serde_json::to_string_pretty(value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer, "{pretty}")?;
            }
            ResponseBody::Raw(text) => writeln!(writer, "{text}")?,
        }
        Ok(())
    }
}

/// Client version information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Binary name.
    pub name: String,
    /// Crate version.
    pub version: String,
}

impl VersionInfo {
    /// Version of this build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: "ravenpair".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

impl TableDisplay for VersionInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{} version {}", self.name, self.version)?;
        Ok(())
    }
}

/// Prints session events, one line per message.
///
/// The writer is shared with the command that owns the session so it can
/// print the closing line once the session ends.
#[derive(Debug)]
pub struct MessagePrinter<W> {
    out: Arc<Mutex<W>>,
}

impl<W> MessagePrinter<W> {
    /// Create a printer writing to `out`.
    #[must_use]
    pub const fn new(out: Arc<Mutex<W>>) -> Self {
        Self { out }
    }
}

impl<W> MessagePrinter<W>
where
    W: Write,
{
    fn print(&self, line: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock();
        if let Err(e) = write_line(&mut *out, line) {
            warn!(error = %e, "Failed to write session output");
        }
    }
}

fn write_line<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> std::io::Result<()> {
    out.write_fmt(line)?;
    writeln!(out)?;
    out.flush()
}

impl<W> MessageHandler for MessagePrinter<W>
where
    W: Write + Send + 'static,
{
    fn on_open(&mut self, _url: &str) {
        self.print(format_args!("Connected. Press Ctrl+C to disconnect."));
    }

    fn on_message(&mut self, message: Message) {
        match message.kind() {
            MessageKind::Text => self.print(format_args!("< {}", message.to_text_lossy())),
            MessageKind::Binary => {
                self.print(format_args!("< [binary {} bytes]", message.payload().len()));
            }
        }
    }
}
